//! Artifact serializers. All four render to a `String`; writing (and any
//! concurrency around writing) is the caller's business.

pub mod css;
pub mod golang;
pub mod json;
pub mod module;
