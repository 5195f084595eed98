//! Codec registry.
//!
//! Maps a [`CompressionTag`] to the codec able to encode and decode it. The
//! registry is a static table; looking a codec up never allocates or touches
//! the filesystem. Codecs are streaming: [`Codec::decoder`] and
//! [`Codec::encoder`] wrap any reader or writer.

use crate::detect::is_xz;
use bzip2::bufread::MultiBzDecoder;
use bzip2::write::BzEncoder;
use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use glossarc_core::{CompressionTag, GlossArcError, Result};
use std::io::{self, BufRead, Read, Write};
use xz2::bufread::XzDecoder;
use xz2::stream::{CONCATENATED, Stream};
use xz2::write::XzEncoder;

/// A single-stream codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    tag: CompressionTag,
    default_level: u8,
}

impl Codec {
    /// The tag this codec handles.
    pub fn tag(&self) -> CompressionTag {
        self.tag
    }

    /// Codec name, identical to the tag name.
    pub fn name(&self) -> &'static str {
        self.tag.name()
    }

    /// Level used when the caller does not pick one.
    pub fn default_level(&self) -> u8 {
        self.default_level
    }

    /// Wrap `reader` so that reading yields decompressed bytes.
    ///
    /// Concatenated gzip members and bzip2 streams are read as one. The `lzma`
    /// codec reads XZ containers and, when the XZ magic is absent, legacy
    /// LZMA-alone data. Malformed input surfaces as an [`io::Error`] on read.
    pub fn decoder<R: BufRead>(&self, mut reader: R) -> Result<Decoder<R>> {
        match self.tag {
            CompressionTag::Gz => Ok(Decoder::Gz(MultiGzDecoder::new(reader))),
            CompressionTag::Bz2 => Ok(Decoder::Bz2(MultiBzDecoder::new(reader))),
            CompressionTag::Lzma => {
                let stream = if is_xz(reader.fill_buf()?) {
                    Stream::new_stream_decoder(u64::MAX, CONCATENATED)
                } else {
                    Stream::new_lzma_decoder(u64::MAX)
                }
                .map_err(io::Error::other)?;
                Ok(Decoder::Xz(XzDecoder::new_stream(reader, stream)))
            }
            CompressionTag::None | CompressionTag::Zip => {
                Err(GlossArcError::unsupported(self.name(), "decode"))
            }
        }
    }

    /// Wrap `writer` so that written bytes are compressed.
    ///
    /// Uses the default level when `level` is `None`; levels above 9 are
    /// clamped. Call [`Encoder::finish`] to write the stream trailer.
    pub fn encoder<W: Write>(&self, writer: W, level: Option<u8>) -> Result<Encoder<W>> {
        let level = u32::from(level.unwrap_or(self.default_level).min(9));
        match self.tag {
            CompressionTag::Gz => Ok(Encoder::Gz(GzEncoder::new(
                writer,
                flate2::Compression::new(level),
            ))),
            // Bzip2 block sizes start at 1
            CompressionTag::Bz2 => Ok(Encoder::Bz2(BzEncoder::new(
                writer,
                bzip2::Compression::new(level.max(1)),
            ))),
            CompressionTag::Lzma => Ok(Encoder::Xz(XzEncoder::new(writer, level))),
            CompressionTag::None | CompressionTag::Zip => {
                Err(GlossArcError::unsupported(self.name(), "encode"))
            }
        }
    }

    /// Compress a complete buffer.
    pub fn encode(&self, data: &[u8], level: Option<u8>) -> Result<Vec<u8>> {
        let mut encoder = self.encoder(Vec::new(), level)?;
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    /// Decompress a complete buffer.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decoder(data)?.read_to_end(&mut out)?;
        Ok(out)
    }
}

/// Decompressing reader returned by [`Codec::decoder`].
pub enum Decoder<R: BufRead> {
    /// gzip, including `dz` files.
    Gz(MultiGzDecoder<R>),
    /// bzip2.
    Bz2(MultiBzDecoder<R>),
    /// XZ or LZMA-alone.
    Xz(XzDecoder<R>),
}

impl<R: BufRead> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Gz(d) => d.read(buf),
            Self::Bz2(d) => d.read(buf),
            Self::Xz(d) => d.read(buf),
        }
    }
}

/// Compressing writer returned by [`Codec::encoder`].
pub enum Encoder<W: Write> {
    /// gzip.
    Gz(GzEncoder<W>),
    /// bzip2.
    Bz2(BzEncoder<W>),
    /// XZ.
    Xz(XzEncoder<W>),
}

impl<W: Write> Encoder<W> {
    /// Write the stream trailer and hand back the inner writer.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Gz(e) => e.finish(),
            Self::Bz2(e) => e.finish(),
            Self::Xz(e) => e.finish(),
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Gz(e) => e.write(buf),
            Self::Bz2(e) => e.write(buf),
            Self::Xz(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Gz(e) => e.flush(),
            Self::Bz2(e) => e.flush(),
            Self::Xz(e) => e.flush(),
        }
    }
}

/// What a tag opens as.
#[derive(Debug, Clone, Copy)]
pub enum Capability<'a> {
    /// Plain byte stream, no codec.
    Plain,
    /// A codec stream.
    Codec(&'a Codec),
}

/// Table of supported codecs.
#[derive(Debug)]
pub struct CodecRegistry {
    codecs: [Codec; 3],
}

static REGISTRY: CodecRegistry = CodecRegistry {
    codecs: [
        Codec {
            tag: CompressionTag::Gz,
            default_level: 9,
        },
        Codec {
            tag: CompressionTag::Bz2,
            default_level: 9,
        },
        Codec {
            tag: CompressionTag::Lzma,
            default_level: 6,
        },
    ],
};

/// The process-wide codec registry.
pub fn registry() -> &'static CodecRegistry {
    &REGISTRY
}

impl CodecRegistry {
    /// Capability for `tag`, or `None` when the tag has no stream codec
    /// ([`CompressionTag::Zip`]).
    pub fn get(&self, tag: CompressionTag) -> Option<Capability<'_>> {
        match tag {
            CompressionTag::None => Some(Capability::Plain),
            tag => self.codec(tag).map(Capability::Codec),
        }
    }

    /// Codec for a standard tag.
    pub fn codec(&self, tag: CompressionTag) -> Option<&Codec> {
        self.codecs.iter().find(|c| c.tag == tag)
    }

    /// Capability for a tag name such as `"bz2"`.
    ///
    /// `"dz"` maps to the gzip codec only when `legacy_dz` is set. Unknown
    /// names yield `None` and the caller decides whether that is fatal.
    pub fn lookup(&self, name: &str, legacy_dz: bool) -> Option<Capability<'_>> {
        if name.is_empty() || name.eq_ignore_ascii_case("none") {
            return Some(Capability::Plain);
        }
        CompressionTag::from_extension(name, legacy_dz).and_then(|tag| self.get(tag))
    }

    /// Iterate over every registered codec.
    pub fn codecs(&self) -> impl Iterator<Item = &Codec> {
        self.codecs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::tag_from_magic;

    #[test]
    fn test_registry_covers_standard_tags() {
        for tag in CompressionTag::STANDARD {
            let codec = registry().codec(tag).unwrap();
            assert_eq!(codec.tag(), tag);
            assert_eq!(codec.name(), tag.name());
        }
    }

    #[test]
    fn test_none_is_plain_zip_is_unsupported() {
        assert!(matches!(
            registry().get(CompressionTag::None),
            Some(Capability::Plain)
        ));
        assert!(registry().get(CompressionTag::Zip).is_none());
    }

    #[test]
    fn test_lookup_dz_alias() {
        assert!(registry().lookup("dz", false).is_none());
        match registry().lookup("dz", true) {
            Some(Capability::Codec(codec)) => assert_eq!(codec.tag(), CompressionTag::Gz),
            other => panic!("expected gzip codec, got {:?}", other),
        }
        assert!(registry().lookup("rar", true).is_none());
    }

    #[test]
    fn test_codec_roundtrip_every_level() {
        let data = b"headword\tdefinition\n".repeat(40);
        for codec in registry().codecs() {
            for level in [None, Some(0), Some(1), Some(6), Some(9), Some(42)] {
                let packed = codec.encode(&data, level).unwrap();
                assert_eq!(tag_from_magic(&packed), codec.tag());
                assert_eq!(
                    codec.decode(&packed).unwrap(),
                    data,
                    "{} at {:?}",
                    codec.name(),
                    level
                );
            }
        }
    }

    #[test]
    fn test_empty_input_roundtrip() {
        for codec in registry().codecs() {
            let packed = codec.encode(b"", None).unwrap();
            assert!(!packed.is_empty());
            assert!(codec.decode(&packed).unwrap().is_empty());
        }
    }

    #[test]
    fn test_concatenated_members() {
        for codec in registry().codecs() {
            let mut joined = codec.encode(b"first\n", None).unwrap();
            joined.extend(codec.encode(b"second\n", None).unwrap());
            assert_eq!(codec.decode(&joined).unwrap(), b"first\nsecond\n");
        }
    }

    #[test]
    fn test_decode_garbage_fails() {
        for codec in registry().codecs() {
            assert!(codec.decode(b"definitely not compressed").is_err());
        }
    }

    #[test]
    fn test_truncated_stream_fails() {
        let data = b"headword\tdefinition\n".repeat(40);
        for codec in registry().codecs() {
            let packed = codec.encode(&data, None).unwrap();
            let cut = &packed[..packed.len() / 2];
            assert!(codec.decode(cut).is_err(), "{} accepted a cut stream", codec.name());
        }
    }
}
