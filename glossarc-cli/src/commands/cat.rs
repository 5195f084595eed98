//! Cat command implementation.

use glossarc_archive::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn cmd_cat(file: &Path, dz: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = OpenOptions::read().legacy_dz(dz).open(file)?;
    log::debug!("Reading {} as {}", file.display(), stream.tag());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    io::copy(&mut stream, &mut out)?;
    out.flush()?;
    stream.close()?;
    Ok(())
}
