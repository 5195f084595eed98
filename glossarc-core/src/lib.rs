//! # glossarc Core
//!
//! Shared building blocks for the glossarc crates:
//!
//! - [`tag`]: the [`CompressionTag`] a glossary file is stored with
//! - [`error`]: error types
//! - [`context`]: the opaque [`Context`] handle threaded through for logging
//!
//! ## Example
//!
//! ```rust
//! use glossarc_core::CompressionTag;
//!
//! let tag: CompressionTag = "bz2".parse().unwrap();
//! assert!(tag.is_standard());
//! assert_eq!(CompressionTag::from_extension("dz", true), Some(CompressionTag::Gz));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod context;
pub mod error;
pub mod tag;

// Re-exports for convenience
pub use context::{Context, NamedContext, log_prefix};
pub use error::{GlossArcError, Result};
pub use tag::CompressionTag;
