//! Compression inference from file names.
//!
//! Dictionary volumes are often named `name.gz.001`: a numeric extension is a
//! part number, and the compression is named by the extension just inside it.
//! Only one level of numeric extension is skipped.

use glossarc_core::CompressionTag;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Switches for [`resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Treat `.dz` (dictzip) as gzip.
    pub legacy_dz: bool,
    /// Report `.zip` names as [`CompressionTag::Zip`] instead of plain.
    pub zip: bool,
}

impl ResolveOptions {
    /// Default options: no `dz` alias, `.zip` resolves as plain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the `dz` alias.
    pub fn legacy_dz(mut self, enabled: bool) -> Self {
        self.legacy_dz = enabled;
        self
    }

    /// Enable or disable reporting `.zip`.
    pub fn zip(mut self, enabled: bool) -> Self {
        self.zip = enabled;
        self
    }
}

/// A file name split into its base and the compression it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The name with the compression (and volume) extensions removed, or the
    /// original name when no compression was recognised.
    pub base: PathBuf,
    /// The resolved compression.
    pub tag: CompressionTag,
}

impl Resolved {
    /// Whether the name carried a recognised compression extension.
    pub fn is_compressed(&self) -> bool {
        self.tag != CompressionTag::None
    }
}

/// Derive the compression of `filename` from its extension.
///
/// ```
/// use glossarc_archive::resolve::{resolve, ResolveOptions};
/// use glossarc_core::CompressionTag;
///
/// let r = resolve("dict.gz.001", ResolveOptions::new());
/// assert_eq!(r.tag, CompressionTag::Gz);
/// assert_eq!(r.base.to_str(), Some("dict"));
/// ```
pub fn resolve(filename: impl AsRef<Path>, options: ResolveOptions) -> Resolved {
    let path = filename.as_ref();
    let (mut stem, mut ext) = split_extension(path);

    if is_volume_number(&ext) {
        (stem, ext) = split_extension(&stem);
    }

    match CompressionTag::from_extension(&ext, options.legacy_dz) {
        Some(CompressionTag::Zip) if !options.zip => unresolved(path),
        Some(tag) => Resolved { base: stem, tag },
        None => unresolved(path),
    }
}

/// Append `suffix` to the final component of `path` verbatim
/// (`dict.txt` + `.gz` = `dict.txt.gz`).
pub fn append_suffix(path: impl AsRef<Path>, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn unresolved(path: &Path) -> Resolved {
    Resolved {
        base: path.to_path_buf(),
        tag: CompressionTag::None,
    }
}

/// Split off the last extension, lower-cased and without its dot.
fn split_extension(path: &Path) -> (PathBuf, String) {
    match path.extension() {
        Some(ext) => (
            path.with_extension(""),
            ext.to_string_lossy().to_ascii_lowercase(),
        ),
        None => (path.to_path_buf(), String::new()),
    }
}

fn is_volume_number(ext: &str) -> bool {
    let digits = ext.strip_prefix(['+', '-']).unwrap_or(ext);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_of(name: &str) -> CompressionTag {
        resolve(name, ResolveOptions::new()).tag
    }

    #[test]
    fn test_standard_extensions() {
        assert_eq!(tag_of("dict.gz"), CompressionTag::Gz);
        assert_eq!(tag_of("dict.BZ2"), CompressionTag::Bz2);
        assert_eq!(tag_of("dict.txt.lzma"), CompressionTag::Lzma);
        assert_eq!(tag_of("dict.txt"), CompressionTag::None);
        assert_eq!(tag_of("dict"), CompressionTag::None);
    }

    #[test]
    fn test_base_strips_tag_extension() {
        let r = resolve("data/dict.txt.gz", ResolveOptions::new());
        assert_eq!(r.base, PathBuf::from("data/dict.txt"));
        assert!(r.is_compressed());
    }

    #[test]
    fn test_unresolved_keeps_original_name() {
        let r = resolve("dict.txt", ResolveOptions::new());
        assert_eq!(r.base, PathBuf::from("dict.txt"));
        assert!(!r.is_compressed());
    }

    #[test]
    fn test_volume_number_is_skipped() {
        let r = resolve("dict.gz.001", ResolveOptions::new());
        assert_eq!(r.tag, CompressionTag::Gz);
        assert_eq!(r.base, PathBuf::from("dict"));

        assert_eq!(tag_of("dict.123.gz"), CompressionTag::Gz);
        assert_eq!(tag_of("dict.bz2.7"), CompressionTag::Bz2);
    }

    #[test]
    fn test_only_one_volume_level() {
        assert_eq!(tag_of("dict.gz.1.2"), CompressionTag::None);
        assert_eq!(tag_of("dict.001"), CompressionTag::None);
        let r = resolve("dict.txt.002", ResolveOptions::new());
        assert_eq!(r.base, PathBuf::from("dict.txt.002"));
    }

    #[test]
    fn test_dz_alias() {
        assert_eq!(tag_of("dict.dz"), CompressionTag::None);
        let r = resolve("dict.dz", ResolveOptions::new().legacy_dz(true));
        assert_eq!(r.tag, CompressionTag::Gz);
        assert_eq!(r.base, PathBuf::from("dict"));
    }

    #[test]
    fn test_zip_only_when_applicable() {
        assert_eq!(tag_of("dict.zip"), CompressionTag::None);
        let r = resolve("dict.zip", ResolveOptions::new().zip(true));
        assert_eq!(r.tag, CompressionTag::Zip);
    }

    #[test]
    fn test_hidden_file_has_no_extension() {
        assert_eq!(tag_of(".gz"), CompressionTag::None);
    }

    #[test]
    fn test_append_suffix() {
        assert_eq!(
            append_suffix("dir/dict.txt", ".gz"),
            PathBuf::from("dir/dict.txt.gz")
        );
        assert_eq!(append_suffix("dict", "_res"), PathBuf::from("dict_res"));
    }
}
