//! Zip archival of a glossary file or directory.
//!
//! Two cases:
//!
//! - a directory `dict/` becomes `dict.zip` holding its contents relative to
//!   `dict/`, and the directory is removed afterwards;
//! - a file `dict.txt` becomes `dict.txt.zip` holding `dict.txt` plus the
//!   sibling resource directory `dict.txt_res/` when present. Nothing is
//!   removed.
//!
//! Entries are added while the process working directory is switched to the
//! archive root, so every entry name is relative. The working directory is
//! process-wide state: building takes a global lock and restores the previous
//! directory on every exit path. Do not call this while other threads depend
//! on the working directory.
//!
//! The finished zip is reopened and every entry read back (checking its CRC)
//! before a source directory is removed.

use crate::resolve::append_suffix;
use glossarc_core::{Context, GlossArcError, Result, log_prefix};
use std::env;
use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Suffix of the resource directory bundled with a single glossary file.
pub const RESOURCE_SUFFIX: &str = "_res";

static ARCHIVE_LOCK: Mutex<()> = Mutex::new(());

/// Compression applied to every zip entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZipCompressionLevel {
    /// Store without compression.
    Store,
    /// Deflate, fastest.
    Fast,
    /// Deflate, default level.
    #[default]
    Normal,
    /// Deflate, smallest output.
    Best,
}

impl ZipCompressionLevel {
    fn file_options(self) -> SimpleFileOptions {
        let options = SimpleFileOptions::default();
        let deflated = options.compression_method(CompressionMethod::Deflated);
        match self {
            Self::Store => options.compression_method(CompressionMethod::Stored),
            Self::Fast => deflated.compression_level(Some(1)),
            Self::Normal => deflated,
            Self::Best => deflated.compression_level(Some(9)),
        }
    }
}

/// Switches the process working directory and switches it back on drop.
///
/// Only used with `ARCHIVE_LOCK` held.
#[derive(Debug)]
pub(crate) struct WorkingDirGuard {
    previous: PathBuf,
    prefix: String,
}

impl WorkingDirGuard {
    /// Change into `dir`, remembering the current directory.
    pub(crate) fn enter(dir: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir.as_ref())?;
        Ok(Self {
            previous,
            prefix: prefix.to_string(),
        })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            log::error!(
                "{}Failed to restore working directory {}: {}",
                self.prefix,
                self.previous.display(),
                e
            );
        }
    }
}

/// Summary of a finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archived {
    /// Path of the written zip file.
    pub path: PathBuf,
    /// Number of file entries written.
    pub entries: usize,
    /// Whether the source directory was removed.
    pub source_removed: bool,
}

/// Builds zip archives from glossary files and directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveBuilder {
    compression: ZipCompressionLevel,
    keep_source: bool,
}

impl ArchiveBuilder {
    /// Builder with normal deflate compression that removes archived directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zip compression level for every entry.
    pub fn compression(mut self, level: ZipCompressionLevel) -> Self {
        self.compression = level;
        self
    }

    /// Keep the source directory instead of removing it after archiving.
    pub fn keep_source(mut self, keep: bool) -> Self {
        self.keep_source = keep;
        self
    }

    /// Archive `path` into the zip named by [`archive_path`].
    ///
    /// Any failure is wrapped in [`GlossArcError::Archival`]. A partially
    /// written zip is removed when possible.
    pub fn build<C: Context + ?Sized>(
        &self,
        ctx: &C,
        path: impl AsRef<Path>,
    ) -> Result<Archived> {
        let path = path.as_ref();
        let prefix = log_prefix(ctx);
        let _lock = ARCHIVE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        self.write_archive(&prefix, path)
            .map_err(|e| GlossArcError::archival(path, e))
    }

    fn write_archive(&self, prefix: &str, path: &Path) -> Result<Archived> {
        let source = source_path(path)?;
        let zip_path = append_suffix(&source, ".zip");
        let is_dir = source.is_dir();
        log::info!(
            "{}Archiving {} into {}",
            prefix,
            source.display(),
            zip_path.display()
        );

        let (root, names) = if is_dir {
            ensure_outside(&source, &zip_path)?;
            (source.clone(), list_dir(&source)?)
        } else {
            file_entries(&source)?
        };

        let mut zip = ZipWriter::new(File::create(&zip_path)?);
        let options = self.compression.file_options();
        let written = add_all(&mut zip, &root, &names, options, prefix).and_then(|count| {
            zip.finish()?;
            verify_archive(&zip_path, count)?;
            Ok(count)
        });

        let entries = match written {
            Ok(count) => count,
            Err(e) => {
                discard_partial(&zip_path, prefix);
                return Err(e);
            }
        };

        let source_removed = is_dir && !self.keep_source;
        if source_removed {
            log::debug!("{}Removing archived directory {}", prefix, source.display());
            fs::remove_dir_all(&source)?;
        }

        Ok(Archived {
            path: zip_path,
            entries,
            source_removed,
        })
    }
}

/// Archive `path` with default settings. See [`ArchiveBuilder::build`].
pub fn build_archive<C: Context + ?Sized>(
    ctx: &C,
    path: impl AsRef<Path>,
) -> Result<Archived> {
    ArchiveBuilder::new().build(ctx, path)
}

/// The zip [`ArchiveBuilder::build`] writes for `path`.
///
/// Trailing separators are ignored and a `.` or `..` tail is resolved to the
/// directory it names, so `dict/` and `dict/sub/..` both give `dict.zip`.
/// Fails with `InvalidArgument` when `path` has no final name (`/`).
pub fn archive_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    Ok(append_suffix(source_path(path.as_ref())?, ".zip"))
}

/// `path` ending in a real name, so that appending `.zip` names a sibling.
fn source_path(path: &Path) -> Result<PathBuf> {
    let trimmed: PathBuf = path.components().collect();
    if let Some(Component::Normal(_)) = trimmed.components().next_back() {
        return Ok(trimmed);
    }

    let resolved = fs::canonicalize(path)?;
    if resolved.file_name().is_none() {
        return Err(GlossArcError::invalid_argument(format!(
            "cannot archive {}: it has no name to derive the zip from",
            path.display()
        )));
    }
    Ok(resolved)
}

/// Refuse to write the zip inside the directory being archived.
fn ensure_outside(source: &Path, zip_path: &Path) -> Result<()> {
    let source_dir = fs::canonicalize(source)?;
    let zip_dir = match zip_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent)?,
        _ => env::current_dir()?,
    };
    if zip_dir.starts_with(&source_dir) {
        return Err(GlossArcError::invalid_argument(format!(
            "{} would be written inside {}",
            zip_path.display(),
            source.display()
        )));
    }
    Ok(())
}

/// Root and entry names for the single-file case.
fn file_entries(path: &Path) -> Result<(PathBuf, Vec<PathBuf>)> {
    let name = path.file_name().ok_or_else(|| {
        GlossArcError::invalid_argument(format!("{} has no file name", path.display()))
    })?;
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut names = vec![PathBuf::from(name)];
    let resource = append_suffix(path, RESOURCE_SUFFIX);
    if resource.is_dir() {
        names.push(append_suffix(name, RESOURCE_SUFFIX));
    }
    Ok((root, names))
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(PathBuf::from(entry?.file_name()));
    }
    Ok(names)
}

/// Add `names` (relative to `root`) with the working directory set to `root`.
fn add_all<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    root: &Path,
    names: &[PathBuf],
    options: SimpleFileOptions,
    prefix: &str,
) -> Result<usize> {
    let _cwd = WorkingDirGuard::enter(root, prefix)?;
    let mut count = 0;
    for name in names {
        count += add_entry(zip, name, options, prefix)?;
    }
    Ok(count)
}

/// Add a file, or a directory recursively. Returns the number of files added.
fn add_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &Path,
    options: SimpleFileOptions,
    prefix: &str,
) -> Result<usize> {
    let metadata = fs::metadata(entry).ok();
    match metadata {
        Some(meta) if meta.is_file() => {
            let name = entry_name(entry);
            log::debug!("{}Adding {} ({} bytes)", prefix, name, meta.len());
            let options = options.large_file(meta.len() >= u64::from(u32::MAX));
            zip.start_file(name, options)?;
            io::copy(&mut File::open(entry)?, zip)?;
            Ok(1)
        }
        Some(meta) if meta.is_dir() => {
            let mut count = 0;
            for child in fs::read_dir(entry)? {
                count += add_entry(zip, &entry.join(child?.file_name()), options, prefix)?;
            }
            Ok(count)
        }
        _ => Err(GlossArcError::not_file_or_directory(entry)),
    }
}

/// Zip entry name: relative components joined with `/`.
fn entry_name(entry: &Path) -> String {
    entry
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Reopen a finished zip and read every entry to the end, which checks its CRC.
fn verify_archive(zip_path: &Path, expected: usize) -> Result<()> {
    let mut archive = ZipArchive::new(File::open(zip_path)?)?;
    if archive.len() != expected {
        return Err(GlossArcError::corrupt_archive(
            zip_path,
            format!("{} entries, expected {}", archive.len(), expected),
        ));
    }
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        io::copy(&mut entry, &mut io::sink())?;
    }
    Ok(())
}

/// Remove a file left behind by a failed write.
pub(crate) fn discard_partial(path: &Path, prefix: &str) {
    match fs::remove_file(path) {
        Ok(()) => log::debug!("{}Removed partial output {}", prefix, path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!(
            "{}Could not remove partial output {}: {}",
            prefix,
            path.display(),
            e
        ),
    }
}
