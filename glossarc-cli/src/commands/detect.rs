//! Detect command implementation.

use glossarc_archive::{ResolveOptions, resolve, sniff};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON output for detection results.
#[derive(Debug, Serialize)]
struct DetectJson {
    file: String,
    by_name: String,
    by_content: String,
    consistent: bool,
    magic: String,
}

pub fn cmd_detect(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(File::open(file)?);
    let (by_content, magic) = sniff(&mut reader)?;
    let by_name = resolve(file, ResolveOptions::new().legacy_dz(true).zip(true)).tag;
    let consistent = by_name == by_content;

    if !consistent {
        log::warn!(
            "{} is named as {} but its content looks like {}",
            file.display(),
            by_name,
            by_content
        );
    }

    if json {
        let out = DetectJson {
            file: file.display().to_string(),
            by_name: by_name.name().to_string(),
            by_content: by_content.name().to_string(),
            consistent,
            magic: magic.iter().map(|b| format!("{:02X}", b)).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Named compression: {}", by_name);
    println!("Detected compression: {}", by_content);
    println!("Magic bytes: {:02X?}", magic);
    Ok(())
}
