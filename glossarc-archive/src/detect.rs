//! Compression detection from magic bytes.
//!
//! The opener trusts file names; this module is for diagnostics and for
//! telling the two `lzma` container flavours apart when decoding.

use glossarc_core::{CompressionTag, Result};
use std::io::Read;

/// GZIP magic (`1F 8B`).
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
/// Bzip2 magic (`BZh`).
pub const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5A, 0x68];
/// XZ stream header magic.
pub const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
/// ZIP magic (`PK`).
pub const ZIP_MAGIC: [u8; 2] = [0x50, 0x4B];

/// Bytes needed to recognise every supported signature.
const SNIFF_LEN: usize = 6;

/// Guess the compression of data from its leading bytes.
///
/// Legacy LZMA-alone files carry no magic and are reported as
/// [`CompressionTag::None`].
pub fn tag_from_magic(magic: &[u8]) -> CompressionTag {
    if magic.starts_with(&GZIP_MAGIC) {
        CompressionTag::Gz
    } else if magic.starts_with(&BZIP2_MAGIC) {
        CompressionTag::Bz2
    } else if magic.starts_with(&XZ_MAGIC) {
        CompressionTag::Lzma
    } else if magic.starts_with(&ZIP_MAGIC) {
        CompressionTag::Zip
    } else {
        CompressionTag::None
    }
}

/// Whether `data` starts with an XZ stream header.
pub fn is_xz(data: &[u8]) -> bool {
    data.starts_with(&XZ_MAGIC)
}

/// Read the leading bytes of `reader` and guess its compression.
///
/// Returns the tag along with the bytes consumed.
pub fn sniff<R: Read>(reader: &mut R) -> Result<(CompressionTag, Vec<u8>)> {
    let mut magic = Vec::with_capacity(SNIFF_LEN);
    reader.take(SNIFF_LEN as u64).read_to_end(&mut magic)?;
    Ok((tag_from_magic(&magic), magic))
}
