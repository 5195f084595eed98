//! glossarc CLI - transparent compression for dictionary files
//!
//! Resolves, opens, compresses, uncompresses and archives glossary files
//! stored plain, as gzip/bzip2/xz, or as zip archives.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{
    ArchiveOptions, cmd_archive, cmd_cat, cmd_compress, cmd_detect, cmd_resolve, cmd_uncompress,
};
use glossarc_archive::{CompressionTag, ZipCompressionLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glossarc")]
#[command(
    author,
    version,
    about = "Transparent compression and archival for dictionary files"
)]
#[command(long_about = "
glossarc reads and writes glossary files stored plain, compressed with
gzip, bzip2 or xz (.lzma), or packaged as zip archives.

Examples:
  glossarc resolve wordnet.txt.gz.001
  glossarc cat jmdict.txt.bz2
  glossarc cat --dz cedict.dz
  glossarc compress dict.txt -c lzma
  glossarc compress mydict -c zip
  glossarc uncompress dict.txt.gz
  glossarc archive dict.txt --keep
  glossarc detect mystery.bin
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Do not show progress spinners
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the compression a file name resolves to
    Resolve {
        /// File name to resolve (need not exist)
        name: PathBuf,

        /// Treat .dz as gzip
        #[arg(long)]
        dz: bool,

        /// Report .zip names as zip instead of plain
        #[arg(long)]
        zip: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Compare the compression named by a file with its magic bytes
    Detect {
        /// File to inspect
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Write the decompressed contents of a file to stdout
    Cat {
        /// File to read
        file: PathBuf,

        /// Treat .dz as gzip
        #[arg(long)]
        dz: bool,
    },

    /// Compress a file (or zip a directory) next to the original
    #[command(alias = "c")]
    Compress {
        /// File or directory to compress
        path: PathBuf,

        /// Compression to apply
        #[arg(short, long, value_enum)]
        compression: CompressionArg,

        /// Codec level 0-9 (gz, bz2, lzma)
        #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(0..=9))]
        level: Option<u8>,

        /// Label to tag log lines with
        #[arg(long)]
        context: Option<String>,
    },

    /// Decompress a gz, bz2 or lzma file
    #[command(alias = "x")]
    Uncompress {
        /// Compressed file
        src: PathBuf,

        /// Output file (defaults to the source name without its extension)
        dst: Option<PathBuf>,

        /// Compression of the source (defaults to the one its name resolves to)
        #[arg(short, long, value_enum)]
        compression: Option<CompressionArg>,
    },

    /// Package a directory, or a file with its _res directory, into a zip
    Archive {
        /// File or directory to archive
        path: PathBuf,

        /// Keep the source directory after archiving it
        #[arg(short, long)]
        keep: bool,

        /// Zip compression level
        #[arg(short = 'l', long, value_enum, default_value = "normal")]
        level: ZipLevel,

        /// Label to tag log lines with
        #[arg(long)]
        context: Option<String>,
    },
}

/// Compression accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CompressionArg {
    /// GZIP
    Gz,
    /// Bzip2
    Bz2,
    /// XZ / LZMA
    Lzma,
    /// ZIP archive
    Zip,
}

impl From<CompressionArg> for CompressionTag {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Gz => CompressionTag::Gz,
            CompressionArg::Bz2 => CompressionTag::Bz2,
            CompressionArg::Lzma => CompressionTag::Lzma,
            CompressionArg::Zip => CompressionTag::Zip,
        }
    }
}

/// Zip compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum ZipLevel {
    /// Store without compression
    Store,
    /// Fast compression
    Fast,
    /// Normal compression (default)
    #[default]
    Normal,
    /// Best compression
    Best,
}

impl From<ZipLevel> for ZipCompressionLevel {
    fn from(level: ZipLevel) -> Self {
        match level {
            ZipLevel::Store => ZipCompressionLevel::Store,
            ZipLevel::Fast => ZipCompressionLevel::Fast,
            ZipLevel::Normal => ZipCompressionLevel::Normal,
            ZipLevel::Best => ZipCompressionLevel::Best,
        }
    }
}

/// Exit status when zip compression fell back to the original file.
const EXIT_FALLBACK: i32 = 2;

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);
    let progress = utils::progress_enabled(cli.quiet);

    let result = match cli.command {
        Commands::Resolve {
            name,
            dz,
            zip,
            json,
        } => cmd_resolve(&name, dz, zip, json).map(|()| 0),
        Commands::Detect { file, json } => cmd_detect(&file, json).map(|()| 0),
        Commands::Cat { file, dz } => cmd_cat(&file, dz).map(|()| 0),
        Commands::Compress {
            path,
            compression,
            level,
            context,
        } => cmd_compress(&path, compression.into(), level, context, progress)
            .map(|compressed| if compressed { 0 } else { EXIT_FALLBACK }),
        Commands::Uncompress {
            src,
            dst,
            compression,
        } => cmd_uncompress(&src, dst.as_deref(), compression.map(Into::into)).map(|()| 0),
        Commands::Archive {
            path,
            keep,
            level,
            context,
        } => cmd_archive(
            &path,
            &ArchiveOptions {
                keep,
                level: level.into(),
                context,
                progress,
            },
        )
        .map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
