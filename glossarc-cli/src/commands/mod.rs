//! Command implementations for the glossarc CLI.

pub mod archive;
pub mod cat;
pub mod compress;
pub mod detect;
pub mod resolve;
pub mod uncompress;

pub use archive::{ArchiveOptions, cmd_archive};
pub use cat::cmd_cat;
pub use compress::cmd_compress;
pub use detect::cmd_detect;
pub use resolve::cmd_resolve;
pub use uncompress::cmd_uncompress;
