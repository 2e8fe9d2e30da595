//! playdeck-import library interface
//!
//! Exposes the markdown catalog importer for the CLI binary and for
//! integration tests.

pub mod markdown;

pub use markdown::{ImportOptions, Importer};
