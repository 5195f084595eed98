//! Compression tags.
//!
//! A tag names how a glossary file is stored on disk: plain, as a single
//! compressed stream, or packaged into a zip archive.

use crate::error::{GlossArcError, Result};
use std::fmt;
use std::str::FromStr;

/// How a file is compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionTag {
    /// Stored plain.
    #[default]
    None,
    /// GZIP (.gz). Also used for dictzip (.dz) files when the legacy alias is on.
    Gz,
    /// Bzip2 (.bz2).
    Bz2,
    /// XZ / LZMA (.lzma).
    Lzma,
    /// ZIP archive of a file or directory tree (.zip).
    Zip,
}

impl CompressionTag {
    /// Tags backed by a single-stream codec.
    pub const STANDARD: [Self; 3] = [Self::Gz, Self::Bz2, Self::Lzma];

    /// Extension of dictzip files, read as gzip when the legacy alias is enabled.
    pub const LEGACY_DZ: &'static str = "dz";

    /// Lower-case tag name.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gz => "gz",
            Self::Bz2 => "bz2",
            Self::Lzma => "lzma",
            Self::Zip => "zip",
        }
    }

    /// File extension without the leading dot (empty for [`CompressionTag::None`]).
    pub fn extension(self) -> &'static str {
        match self {
            Self::None => "",
            other => other.name(),
        }
    }

    /// Whether this tag is one of [`CompressionTag::STANDARD`].
    pub fn is_standard(self) -> bool {
        matches!(self, Self::Gz | Self::Bz2 | Self::Lzma)
    }

    /// Map a bare extension (no dot, any case) to a compressed tag.
    ///
    /// Returns `None` for extensions that do not name a compression, including
    /// `dz` unless `legacy_dz` is set. `none` is not an extension and is never
    /// returned from here.
    pub fn from_extension(ext: &str, legacy_dz: bool) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "gz" => Some(Self::Gz),
            "bz2" => Some(Self::Bz2),
            "lzma" => Some(Self::Lzma),
            "zip" => Some(Self::Zip),
            Self::LEGACY_DZ if legacy_dz => Some(Self::Gz),
            _ => None,
        }
    }
}

impl fmt::Display for CompressionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionTag {
    type Err = GlossArcError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        Self::from_extension(s, false).ok_or_else(|| GlossArcError::unsupported(s, "parse"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!("gz".parse::<CompressionTag>().unwrap(), CompressionTag::Gz);
        assert_eq!("BZ2".parse::<CompressionTag>().unwrap(), CompressionTag::Bz2);
        assert_eq!("lzma".parse::<CompressionTag>().unwrap(), CompressionTag::Lzma);
        assert_eq!("zip".parse::<CompressionTag>().unwrap(), CompressionTag::Zip);
        assert_eq!("none".parse::<CompressionTag>().unwrap(), CompressionTag::None);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["", "dz", "xz", "rar", "7z", ".gz"] {
            let err = bad.parse::<CompressionTag>().unwrap_err();
            assert!(err.is_unsupported(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_dz_alias() {
        assert_eq!(CompressionTag::from_extension("dz", false), None);
        assert_eq!(
            CompressionTag::from_extension(".DZ", true),
            Some(CompressionTag::Gz)
        );
    }

    #[test]
    fn test_tag_properties() {
        assert!(CompressionTag::STANDARD.iter().all(|t| t.is_standard()));
        assert!(!CompressionTag::Zip.is_standard());
        assert!(!CompressionTag::None.is_standard());
        assert_eq!(CompressionTag::None.extension(), "");
        assert_eq!(CompressionTag::Lzma.to_string(), "lzma");
    }
}
