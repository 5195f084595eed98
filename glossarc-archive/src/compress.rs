//! Compressing and uncompressing glossary files.
//!
//! Zip compression is best-effort: when archiving fails the original file is
//! handed back and the failure is reported through [`Compressed`] instead of
//! as an error.

use crate::archive::{ArchiveBuilder, archive_path, discard_partial};
use crate::resolve::append_suffix;
use crate::stream::{OpenOptions, TaggedStream};
use glossarc_core::{CompressionTag, Context, GlossArcError, Result, log_prefix};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Outcome of [`compress`].
#[derive(Debug)]
pub enum Compressed {
    /// The compressed sibling was written.
    Written(PathBuf),
    /// Archiving failed, but a file was left at the zip path and is returned.
    Partial {
        /// The zip path.
        path: PathBuf,
        /// What went wrong.
        cause: GlossArcError,
    },
    /// No zip was produced; this is the original, uncompressed path.
    Unchanged {
        /// The source path, untouched.
        path: PathBuf,
        /// What went wrong, if archiving reported anything.
        cause: Option<GlossArcError>,
    },
}

impl Compressed {
    /// The path the caller should use from now on.
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Partial { path, .. } | Self::Unchanged { path, .. } => {
                path
            }
        }
    }

    /// Consume the outcome, keeping only the path.
    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Written(path) | Self::Partial { path, .. } | Self::Unchanged { path, .. } => {
                path
            }
        }
    }

    /// Whether a compressed file exists at [`Compressed::path`].
    pub fn is_compressed(&self) -> bool {
        !matches!(self, Self::Unchanged { .. })
    }

    /// The archiving failure, if there was one.
    pub fn cause(&self) -> Option<&GlossArcError> {
        match self {
            Self::Written(_) => None,
            Self::Partial { cause, .. } => Some(cause),
            Self::Unchanged { cause, .. } => cause.as_ref(),
        }
    }
}

/// Compress the existing plain file `filename` into `filename.<kind>`.
///
/// Standard codecs always write the sibling and leave `filename` alone. For
/// [`CompressionTag::Zip`] the work is delegated to the archive builder and
/// failures downgrade to [`Compressed::Unchanged`]. [`CompressionTag::None`]
/// is rejected as an invalid argument.
pub fn compress<C: Context + ?Sized>(
    ctx: &C,
    filename: impl AsRef<Path>,
    kind: CompressionTag,
) -> Result<Compressed> {
    compress_with_level(ctx, filename, kind, None)
}

/// [`compress`] with an explicit codec level for the standard codecs.
pub fn compress_with_level<C: Context + ?Sized>(
    ctx: &C,
    filename: impl AsRef<Path>,
    kind: CompressionTag,
    level: Option<u8>,
) -> Result<Compressed> {
    let path = filename.as_ref();

    match kind {
        CompressionTag::Gz | CompressionTag::Bz2 | CompressionTag::Lzma => {
            let target = append_suffix(path, &format!(".{}", kind.extension()));
            log::info!(
                "{}Compressing {} with {}",
                log_prefix(ctx),
                path.display(),
                kind
            );
            let mut options = OpenOptions::write();
            if let Some(level) = level {
                options = options.level(level);
            }
            let mut source = File::open(path)?;
            let mut dest = TaggedStream::with_tag(&target, kind, &options)?;
            io::copy(&mut source, &mut dest)?;
            dest.close()?;
            Ok(Compressed::Written(target))
        }
        CompressionTag::Zip => {
            log::info!("{}Compressing {} with zip", log_prefix(ctx), path.display());
            Ok(compress_zip(ctx, path))
        }
        CompressionTag::None => Err(GlossArcError::invalid_argument(format!(
            "unexpected compression {:?} for {}",
            kind.name(),
            path.display()
        ))),
    }
}

fn compress_zip<C: Context + ?Sized>(ctx: &C, path: &Path) -> Compressed {
    let prefix = log_prefix(ctx);
    let target = match archive_path(path) {
        Ok(target) => target,
        Err(e) => {
            let cause = GlossArcError::archival(path, e);
            log::error!("{}{}", prefix, cause);
            return Compressed::Unchanged {
                path: path.to_path_buf(),
                cause: Some(cause),
            };
        }
    };

    if let Err(e) = fs::remove_file(&target) {
        if e.kind() != io::ErrorKind::NotFound {
            log::debug!("{}Could not remove stale {}: {}", prefix, target.display(), e);
        }
    }

    let cause = ArchiveBuilder::new().build(ctx, path).err();
    if let Some(e) = &cause {
        log::error!(
            "{}{}\nFailed to compress file {:?}",
            prefix,
            e,
            path.display().to_string()
        );
    }

    match (target.is_file(), cause) {
        (true, None) => Compressed::Written(target),
        (true, Some(cause)) => Compressed::Partial {
            path: target,
            cause,
        },
        (false, cause) => Compressed::Unchanged {
            path: path.to_path_buf(),
            cause,
        },
    }
}

/// Decompress `src`, a single-stream compressed file, into a new plain file
/// at `dst`.
///
/// Only the standard codecs are accepted; anything else fails with
/// `UnsupportedCompression` before `dst` is created. Codec errors propagate
/// unchanged, and a `dst` written up to the failure is removed.
pub fn uncompress(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    kind: CompressionTag,
) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if !kind.is_standard() {
        return Err(GlossArcError::unsupported(kind.name(), "uncompress"));
    }

    log::info!("Uncompressing {} to {}", src.display(), dst.display());
    let mut source = TaggedStream::with_tag(src, kind, &OpenOptions::read())?;
    let mut dest = BufWriter::new(File::create(dst)?);
    let copied = io::copy(&mut source, &mut dest).and_then(|_| dest.flush());
    if let Err(e) = copied {
        drop(dest);
        discard_partial(dst, "");
        return Err(e.into());
    }
    source.close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossarc_core::NamedContext;

    #[test]
    fn test_compress_none_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dict.txt");
        fs::write(&file, b"x").unwrap();

        let err = compress(&(), &file, CompressionTag::None).unwrap_err();
        assert!(matches!(err, GlossArcError::InvalidArgument { .. }));
    }

    #[test]
    fn test_compress_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("dict.txt");
        fs::write(&file, b"apple\tfruit\n").unwrap();

        let ctx = NamedContext::new("fruits");
        let out = compress(&ctx, &file, CompressionTag::Gz).unwrap();
        assert!(out.is_compressed());
        assert_eq!(out.path(), dir.path().join("dict.txt.gz"));
        assert!(out.cause().is_none());
        assert_eq!(fs::read(&file).unwrap(), b"apple\tfruit\n");
    }

    #[test]
    fn test_compress_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = compress(&(), dir.path().join("nope.txt"), CompressionTag::Bz2).unwrap_err();
        assert!(matches!(err, GlossArcError::Io(_)));
    }

    #[test]
    fn test_uncompress_rejects_zip_and_none() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dict.zip");
        let dst = dir.path().join("dict.txt");
        fs::write(&src, b"PK").unwrap();

        for kind in [CompressionTag::Zip, CompressionTag::None] {
            let err = uncompress(&src, &dst, kind).unwrap_err();
            assert!(err.is_unsupported());
            assert!(!dst.exists());
        }
    }

    #[test]
    fn test_uncompress_corrupt_input_keeps_dst_absent() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("dict.txt.lzma");
        let dst = dir.path().join("dict.txt");
        fs::write(&src, b"\xFD7zXZ\x00 truncated").unwrap();

        assert!(uncompress(&src, &dst, CompressionTag::Lzma).is_err());
        assert!(!dst.exists());
    }

    #[test]
    fn test_compressed_accessors() {
        let unchanged = Compressed::Unchanged {
            path: PathBuf::from("dict.txt"),
            cause: Some(GlossArcError::not_file_or_directory("dict.txt")),
        };
        assert!(!unchanged.is_compressed());
        assert!(unchanged.cause().is_some());
        assert_eq!(unchanged.into_path(), PathBuf::from("dict.txt"));
    }
}
