use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

/// Which bit order to start encoding a payload byte with.
#[derive(Debug, Clone, Copy)]
pub enum EndianArg {
    /// MSB-first.
    Big,
    /// LSB-first.
    Little,
}

impl FromStr for EndianArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "big" => Ok(EndianArg::Big),
            "little" => Ok(EndianArg::Little),
            other => Err(format!("unknown endian '{}', expected 'big' or 'little'", other)),
        }
    }
}

/// Which container-specific framing to apply around the core codec.
#[derive(Debug, Clone, Copy)]
pub enum ContainerArg {
    /// No container header; the whole file is cover bytes.
    Raw,
    /// Skip a 44-byte WAV RIFF header.
    Wav,
    /// Decode/re-encode a PNG's pixel buffer via the `image` crate.
    Png,
}

impl FromStr for ContainerArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(ContainerArg::Raw),
            "wav" => Ok(ContainerArg::Wav),
            "png" => Ok(ContainerArg::Png),
            other => Err(format!("unknown container '{}', expected raw, wav or png", other)),
        }
    }
}

/// The tunable codec parameters, shared across subcommands via `#[structopt(flatten)]`.
#[derive(StructOpt, Debug)]
pub struct CodecArgs {
    /// Cover bytes copied verbatim before the hidden frame begins
    #[structopt(long, default_value = "0")]
    pub offset: u64,
    /// Cover bytes copied verbatim between consecutive payload blocks
    #[structopt(long, default_value = "0")]
    pub skip: u64,
    /// Number of payload bytes per block
    #[structopt(long, default_value = "1")]
    pub block_size: u64,
    /// Which bit (0..=7) of each touched cover byte carries a payload bit
    #[structopt(long, default_value = "0")]
    pub bit_position: u8,
    /// Bit order within a payload byte for the first block: big or little
    #[structopt(long, default_value = "big")]
    pub endian: EndianArg,
    /// Flip endianness after this many blocks; 0 means never flip
    #[structopt(long, default_value = "0")]
    pub flip_frequency: u64,
    /// Plaintext password identifier embedded in-band; empty means none
    #[structopt(long, default_value = "")]
    pub password: String,
    /// Container family to frame the core codec with
    #[structopt(long, default_value = "raw")]
    pub container: ContainerArg,
}

#[derive(StructOpt, Debug)]
#[structopt(author, about)]
pub enum Opt {
    /// Encodes data into a cover file
    #[structopt(name = "encode")]
    Encode {
        /// Original cover file
        #[structopt(parse(from_os_str))]
        cover: PathBuf,
        /// File with the data to be encoded
        #[structopt(parse(from_os_str))]
        data: PathBuf,
        /// Resulting stego file
        #[structopt(parse(from_os_str))]
        result: PathBuf,
        /// Replace the destination file if it already exists
        #[structopt(short = "f", long = "force")]
        force: bool,
        #[structopt(flatten)]
        codec: CodecArgs,
    },
    /// Decodes data that was hidden in a cover file
    #[structopt(name = "decode")]
    Decode {
        /// Stego file with hidden data
        #[structopt(parse(from_os_str))]
        encoded: PathBuf,
        /// File to store the extracted data. If not supplied then the data is printed to stdout
        #[structopt(parse(from_os_str))]
        data: Option<PathBuf>,
        /// Replace the destination file if it already exists
        #[structopt(short = "f", long = "force")]
        force: bool,
        #[structopt(flatten)]
        codec: CodecArgs,
    },
    /// Splits one payload across several cover files
    #[structopt(name = "multi-encode")]
    MultiEncode {
        /// File with the data to be split across covers
        #[structopt(parse(from_os_str))]
        data: PathBuf,
        /// "cover:destination:amount" triples, in order
        #[structopt(required = true)]
        entries: Vec<String>,
        #[structopt(flatten)]
        codec: CodecArgs,
    },
    /// Recombines a payload previously split with multi-encode
    #[structopt(name = "multi-decode")]
    MultiDecode {
        /// File to store the recombined data
        #[structopt(parse(from_os_str))]
        result: PathBuf,
        /// Stego files, in the same order used for multi-encode
        #[structopt(required = true)]
        entries: Vec<PathBuf>,
        #[structopt(flatten)]
        codec: CodecArgs,
    },
}
