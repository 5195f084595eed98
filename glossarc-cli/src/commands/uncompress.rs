//! Uncompress command implementation.

use glossarc_archive::{CompressionTag, ResolveOptions, resolve, uncompress};
use std::path::Path;

pub fn cmd_uncompress(
    src: &Path,
    dst: Option<&Path>,
    kind: Option<CompressionTag>,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = resolve(src, ResolveOptions::new().legacy_dz(true).zip(true));
    let kind = kind.unwrap_or(resolved.tag);

    let dst = match dst {
        Some(dst) => dst.to_path_buf(),
        None if resolved.is_compressed() => resolved.base,
        None => {
            return Err(format!(
                "cannot derive an output name from {}; pass one explicitly",
                src.display()
            )
            .into());
        }
    };

    uncompress(src, &dst, kind)?;
    println!("{}", dst.display());
    Ok(())
}
