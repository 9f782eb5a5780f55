use ahash::AHashSet;
use anyhow::{bail, Context, Result};
use codegen::data;
use codegen::emit;
use codegen::index::EmojiIndex;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use std::{env, fs};

include_flate::flate!(static EMOJI_DATA: str from "data/emoji.json");
include_flate::flate!(static CATEGORY_DATA: str from "data/categories.json");

const OUT_DIR: &str = "dist";
const IMG_DIR: &str = "data/img";
const SHEET_FILE: &str = "sheet.png";
const GO_FILE: &str = "emoji_data.go";
const GO_DIR_ENV: &str = "EMOJI_GO_DIR";

const HELP: &str = "\
emoji-gen: generate emoji lookup data, stylesheet and image assets

USAGE:
    emoji-gen [--exclude <PATH>]

FLAGS:
    --exclude <PATH>    newline-delimited short names to drop from every artifact
    -h, --help          print this help
";

struct Args {
    exclude: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let exclude = args
        .opt_value_from_str("--exclude")
        .context("reading --exclude")?;

    let rest = args.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {:?} (try --help)", rest);
    }

    Ok(Some(Args { exclude }))
}

fn main() -> Result<()> {
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let args = match parse_args()? {
        Some(args) => args,
        None => return Ok(()),
    };

    let start = Instant::now();

    let excluded = match &args.exclude {
        Some(path) => data::load_exclusions(path)?,
        None => AHashSet::new(),
    };

    let (index, categories) = codegen::build_index(&EMOJI_DATA, &CATEGORY_DATA, &excluded)?;

    log::info!(
        "indexed {} emojis ({} aliases) in {}ms",
        index.emojis.len(),
        index.alias_to_index.len(),
        start.elapsed().as_millis()
    );

    // Serialization is pure; everything below is file I/O.
    let json = emit::json::render(&index)?;
    let module = emit::module::render(&index, &categories);
    let golang = emit::golang::render(&index);
    let css = emit::css::render(&index, &categories);

    let out_root = Path::new(OUT_DIR);
    fs::create_dir_all(out_root.join("images"))
        .with_context(|| format!("creating {}/images", OUT_DIR))?;

    // The writes are independent. One failure sets the abort flag so
    // writes that have not started yet are skipped; finished writes are
    // not rolled back.
    let abort = AtomicBool::new(false);

    rayon::scope(|s| {
        s.spawn(|_| copy_images(&index, out_root));
        s.spawn(|_| {
            write_artifact(&out_root.join("emoji.json"), json.as_bytes(), &abort);
        });
        s.spawn(|_| {
            write_artifact(&out_root.join("emoji_data.rs"), module.as_bytes(), &abort);
        });
        s.spawn(|_| {
            write_artifact(&out_root.join("emojis.css"), css.as_bytes(), &abort);
        });
        s.spawn(|_| {
            // Relocation must wait for this one write, nothing else.
            let path = out_root.join(GO_FILE);
            if write_artifact(&path, golang.as_bytes(), &abort) {
                relocate_go_file(&path);
            }
        });
    });

    if abort.load(Ordering::SeqCst) {
        log::error!("emoji generation finished with errors");
    } else {
        log::info!(
            "emoji generation complete in {}ms",
            start.elapsed().as_millis()
        );
    }

    Ok(())
}

/// Copies every record bitmap plus the sprite sheet. Individual failures
/// are warnings; the run continues.
fn copy_images(index: &EmojiIndex, out_root: &Path) {
    let img_dir = Path::new(IMG_DIR);
    let dest = out_root.join("images");

    let mut files: Vec<&str> = index.emojis.iter().map(|e| e.image.as_str()).collect();
    files.push(SHEET_FILE);
    files.sort_unstable();
    files.dedup();

    files.par_iter().for_each(|&name| {
        if let Err(err) = fs::copy(img_dir.join(name), dest.join(name)) {
            log::warn!("failed to copy image {}: {}", name, err);
        }
    });
}

/// Returns whether the write happened. A failure sets the abort flag.
fn write_artifact(path: &Path, bytes: &[u8], abort: &AtomicBool) -> bool {
    if abort.load(Ordering::SeqCst) {
        log::warn!("skipping {} after an earlier failure", path.display());
        return false;
    }
    match fs::write(path, bytes) {
        Ok(()) => {
            log::info!("wrote {}", path.display());
            true
        }
        Err(err) => {
            log::error!("failed to write {}: {}", path.display(), err);
            abort.store(true, Ordering::SeqCst);
            false
        }
    }
}

/// Best-effort move of the generated Go file to the directory named by
/// `EMOJI_GO_DIR`. Unset variable or a failed move leaves the file where
/// it was written.
fn relocate_go_file(path: &Path) {
    let dir = match env::var_os(GO_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            log::warn!(
                "{} is not set, leaving {} in place",
                GO_DIR_ENV,
                path.display()
            );
            return;
        }
    };

    let dest = dir.join(GO_FILE);
    let moved = fs::rename(path, &dest).or_else(|_| {
        // rename cannot cross filesystems
        fs::copy(path, &dest).and_then(|_| fs::remove_file(path))
    });

    match moved {
        Ok(()) => log::info!("moved {} to {}", GO_FILE, dest.display()),
        Err(err) => log::warn!("failed to move {} to {}: {}", GO_FILE, dest.display(), err),
    }
}
