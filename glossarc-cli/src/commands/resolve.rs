//! Resolve command implementation.

use glossarc_archive::{ResolveOptions, resolve};
use serde::Serialize;
use std::path::Path;

/// JSON output for a resolved name.
#[derive(Debug, Serialize)]
struct ResolveJson {
    name: String,
    base: String,
    compression: String,
    compressed: bool,
}

pub fn cmd_resolve(
    name: &Path,
    dz: bool,
    zip: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolved = resolve(name, ResolveOptions::new().legacy_dz(dz).zip(zip));

    if json {
        let out = ResolveJson {
            name: name.display().to_string(),
            base: resolved.base.display().to_string(),
            compression: resolved.tag.name().to_string(),
            compressed: resolved.is_compressed(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Name: {}", name.display());
    println!("Base: {}", resolved.base.display());
    println!("Compression: {}", resolved.tag);
    Ok(())
}
