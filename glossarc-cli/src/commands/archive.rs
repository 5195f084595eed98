//! Archive command implementation.

use crate::utils::create_spinner;
use glossarc_archive::{ArchiveBuilder, NamedContext, ZipCompressionLevel};
use std::path::Path;

/// Options for the archive command.
pub struct ArchiveOptions {
    pub keep: bool,
    pub level: ZipCompressionLevel,
    pub context: Option<String>,
    pub progress: bool,
}

pub fn cmd_archive(
    path: &Path,
    options: &ArchiveOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = NamedContext::new(options.context.clone().unwrap_or_default());
    let spinner = create_spinner(format!("Archiving {}", path.display()), options.progress);
    let result = ArchiveBuilder::new()
        .compression(options.level)
        .keep_source(options.keep)
        .build(&ctx, path);
    spinner.finish_and_clear();

    let archived = result?;
    println!("Created: {}", archived.path.display());
    println!("Entries: {}", archived.entries);
    if archived.source_removed {
        println!("Removed: {}", path.display());
    }
    Ok(())
}
