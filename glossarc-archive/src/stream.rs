//! Transparent opening of possibly-compressed files.
//!
//! [`open_transparent`] resolves the compression from the file name and
//! returns a [`TaggedStream`] that reads or writes plain bytes either way.
//!
//! Codec streams decode and encode incrementally. A write stream is only a
//! complete file once its trailer is written by [`TaggedStream::close`].
//! Dropping an unclosed write stream still finishes it, but only `close`
//! reports failures.

use crate::registry::{Capability, Decoder, Encoder, registry};
use crate::resolve::{ResolveOptions, resolve};
use glossarc_core::{CompressionTag, GlossArcError, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Direction of a [`TaggedStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    /// Open an existing file for reading.
    #[default]
    Read,
    /// Create (or truncate) a file for writing.
    Write,
}

/// Options for opening a [`TaggedStream`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    mode: StreamMode,
    legacy_dz: bool,
    level: Option<u8>,
}

impl OpenOptions {
    /// Read mode, no `dz` alias, default codec level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for read mode.
    pub fn read() -> Self {
        Self::new().mode(StreamMode::Read)
    }

    /// Shorthand for write mode.
    pub fn write() -> Self {
        Self::new().mode(StreamMode::Write)
    }

    /// Set the stream direction.
    pub fn mode(mut self, mode: StreamMode) -> Self {
        self.mode = mode;
        self
    }

    /// Treat `.dz` files as gzip.
    pub fn legacy_dz(mut self, enabled: bool) -> Self {
        self.legacy_dz = enabled;
        self
    }

    /// Codec compression level (0-9) for write streams.
    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level.min(9));
        self
    }

    /// Open `path`, resolving its compression from the name.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<TaggedStream> {
        open_transparent(path, self)
    }
}

/// Open `filename` for reading or writing, transparently handling
/// compression named by its extension.
///
/// `.zip` names are not resolved here and open as plain byte streams.
pub fn open_transparent(
    filename: impl AsRef<Path>,
    options: &OpenOptions,
) -> Result<TaggedStream> {
    let path = filename.as_ref();
    let resolved = resolve(path, ResolveOptions::new().legacy_dz(options.legacy_dz));
    TaggedStream::with_tag(path, resolved.tag, options)
}

enum Inner {
    PlainRead(BufReader<File>),
    PlainWrite(BufWriter<File>),
    Decoding(BufReader<Decoder<BufReader<File>>>),
    Encoding(Encoder<BufWriter<File>>),
    Closed,
}

/// An open byte stream together with the compression used for it.
///
/// Owned by whoever opened it; not meant to be shared between threads.
pub struct TaggedStream {
    path: PathBuf,
    tag: CompressionTag,
    mode: StreamMode,
    inner: Inner,
}

impl TaggedStream {
    /// Open `path` with an explicit tag, skipping name resolution.
    ///
    /// Fails with `UnsupportedCompression` for [`CompressionTag::Zip`].
    pub fn with_tag(
        path: impl AsRef<Path>,
        tag: CompressionTag,
        options: &OpenOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let capability = registry()
            .get(tag)
            .ok_or_else(|| GlossArcError::unsupported(tag.name(), "open"))?;

        let inner = match (capability, options.mode) {
            (Capability::Plain, StreamMode::Read) => {
                Inner::PlainRead(BufReader::new(File::open(path)?))
            }
            (Capability::Plain, StreamMode::Write) => {
                Inner::PlainWrite(BufWriter::new(File::create(path)?))
            }
            (Capability::Codec(codec), StreamMode::Read) => {
                let file = BufReader::new(File::open(path)?);
                Inner::Decoding(BufReader::new(codec.decoder(file)?))
            }
            (Capability::Codec(codec), StreamMode::Write) => {
                let file = BufWriter::new(File::create(path)?);
                Inner::Encoding(codec.encoder(file, options.level)?)
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            tag,
            mode: options.mode,
            inner,
        })
    }

    /// The compression this stream was opened with.
    pub fn tag(&self) -> CompressionTag {
        self.tag
    }

    /// The path that was opened.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stream direction.
    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// Whether [`TaggedStream::close`] has already run.
    pub fn is_closed(&self) -> bool {
        matches!(self.inner, Inner::Closed)
    }

    /// Flush and release the stream, writing the trailer for codec writers.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.inner, Inner::Closed) {
            Inner::PlainWrite(mut writer) => writer.flush()?,
            Inner::Encoding(encoder) => encoder.finish()?.flush()?,
            Inner::PlainRead(_) | Inner::Decoding(_) | Inner::Closed => {}
        }
        Ok(())
    }

    fn wrong_direction(&self) -> io::Error {
        let message = match self.inner {
            Inner::Closed => format!("{} is closed", self.path.display()),
            _ => format!("{} is open for {:?}", self.path.display(), self.mode),
        };
        io::Error::new(io::ErrorKind::Unsupported, message)
    }
}

impl Read for TaggedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::PlainRead(reader) => return reader.read(buf),
            Inner::Decoding(reader) => return reader.read(buf),
            _ => {}
        }
        Err(self.wrong_direction())
    }
}

impl BufRead for TaggedStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if !matches!(self.inner, Inner::PlainRead(_) | Inner::Decoding(_)) {
            return Err(self.wrong_direction());
        }
        match &mut self.inner {
            Inner::PlainRead(reader) => reader.fill_buf(),
            Inner::Decoding(reader) => reader.fill_buf(),
            _ => Ok(&[]),
        }
    }

    fn consume(&mut self, amt: usize) {
        match &mut self.inner {
            Inner::PlainRead(reader) => reader.consume(amt),
            Inner::Decoding(reader) => reader.consume(amt),
            _ => {}
        }
    }
}

impl Write for TaggedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::PlainWrite(writer) => return writer.write(buf),
            Inner::Encoding(encoder) => return encoder.write(buf),
            _ => {}
        }
        Err(self.wrong_direction())
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            Inner::PlainWrite(writer) => return writer.flush(),
            Inner::Encoding(encoder) => return encoder.flush(),
            _ => {}
        }
        Err(self.wrong_direction())
    }
}

impl Drop for TaggedStream {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            log::error!("Failed to finish {}: {}", self.path.display(), e);
        }
    }
}

impl fmt::Debug for TaggedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedStream")
            .field("path", &self.path)
            .field("tag", &self.tag)
            .field("mode", &self.mode)
            .field("closed", &self.is_closed())
            .finish()
    }
}
