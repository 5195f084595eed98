//! Compress command implementation.

use crate::utils::create_spinner;
use glossarc_archive::{CompressionTag, Compressed, NamedContext, compress_with_level};
use std::path::Path;

/// Compress `path` and report where the result went.
///
/// Returns `false` when zip compression fell back to the original path.
pub fn cmd_compress(
    path: &Path,
    kind: CompressionTag,
    level: Option<u8>,
    context: Option<String>,
    progress: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let ctx = NamedContext::new(context.unwrap_or_default());
    let spinner = create_spinner(format!("Compressing {}", path.display()), progress);
    let outcome = compress_with_level(&ctx, path, kind, level);
    spinner.finish_and_clear();

    match outcome? {
        Compressed::Written(target) => {
            println!("{}", target.display());
            Ok(true)
        }
        Compressed::Partial { path, cause } => {
            eprintln!("Warning: archive may be incomplete: {}", cause);
            println!("{}", path.display());
            Ok(true)
        }
        Compressed::Unchanged { path, cause } => {
            match cause {
                Some(cause) => eprintln!("Warning: left uncompressed: {}", cause),
                None => eprintln!("Warning: left uncompressed"),
            }
            println!("{}", path.display());
            Ok(false)
        }
    }
}
