//! # glossarc Archive
//!
//! Transparent compression and archival for glossary files.
//!
//! - [`registry`]: the streaming codec behind each [`CompressionTag`] (gzip,
//!   bzip2, xz)
//! - [`resolve`]: compression inferred from a file name, including volume
//!   names such as `dict.gz.001`
//! - [`stream`]: [`open_transparent`] and the [`TaggedStream`] it returns
//! - [`compress`]: [`compress()`] into a sibling file and [`uncompress`]
//! - [`archive`]: zip archival of a directory or of a file with its `_res`
//!   resource directory
//! - [`detect`]: compression sniffed from magic bytes
//!
//! ## Example
//!
//! ```rust,no_run
//! use glossarc_archive::{OpenOptions, open_transparent};
//! use std::io::BufRead;
//!
//! let stream = open_transparent("wordnet.txt.bz2", &OpenOptions::read()).unwrap();
//! println!("compression: {}", stream.tag());
//! for line in stream.lines() {
//!     println!("{}", line.unwrap());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod compress;
pub mod detect;
pub mod registry;
pub mod resolve;
pub mod stream;

// Re-exports
pub use archive::{ArchiveBuilder, Archived, ZipCompressionLevel, archive_path, build_archive};
pub use compress::{Compressed, compress, compress_with_level, uncompress};
pub use detect::{sniff, tag_from_magic};
pub use glossarc_core::{CompressionTag, Context, GlossArcError, NamedContext, Result};
pub use registry::{Capability, Codec, CodecRegistry, Decoder, Encoder, registry};
pub use resolve::{ResolveOptions, Resolved, resolve};
pub use stream::{OpenOptions, StreamMode, TaggedStream, open_transparent};
