#![warn(missing_docs)]

//! This crate hides an arbitrary payload inside the body of a cover file by
//! overwriting a chosen bit position of selected cover bytes with bits of
//! the payload, producing a stego file of identical byte length to the
//! cover — and reads it back out again.
//!
//! The payload is wrapped in a small in-band frame (an optional password
//! marker, the payload length, then the payload itself) and spread across
//! the cover using a block-interleaving scheme with configurable skip gaps
//! and periodic bit-order flips, so that a naive hex dump of the result
//! looks like ordinary cover noise. See [`options::StegOptions`] for every
//! knob and [`frame`] for the codec itself.
//!
//! [`container`] provides thin adapters (PNG, WAV) that skip a fixed
//! container header before delegating to the frame codec, and
//! [`fragment`] splits one payload across several cover files.

use std::fs::{File, OpenOptions};
use std::io::{stdin, stdout, Read, Write};
use std::path::PathBuf;

mod error;

/// Pure bit-level operations: setting/reading one bit, and interleaving a
/// source buffer into (or back out of) a cover buffer at a chosen bit
/// position and bit order.
pub mod bitops;

/// Fixed-width big-endian scalar encoding used for the frame header fields.
pub mod scalar;

/// [`options::StegOptions`], the value type carrying every tunable codec
/// parameter.
pub mod options;

/// Computes how many cover bytes a given payload and options would need.
pub mod capacity;

/// The streaming frame encoder/decoder: the block loop, skip gaps and
/// endianness-flip cadence that implement the hidden frame layout.
pub mod frame;

/// Splits one payload stream across several cover files, and recombines it
/// on decode.
pub mod fragment;

/// Thin per-container-family adapters (PNG, WAV, raw) that adjust the
/// frame codec's starting offset to preserve a container's own header.
pub mod container;

pub use error::Error;
pub use options::StegOptions;

/// Encodes a payload (read from `data`, or from stdin if not given) into
/// `cover`, writing the resulting stego file to `output` under the given
/// `options`. Treats `cover` as a headerless/raw container.
///
/// Fails fast with [`Error::Io`] if `output` already exists, unless
/// `replace` is set.
pub fn encode_into_file(
    cover: PathBuf,
    data: Option<PathBuf>,
    output: PathBuf,
    replace: bool,
    options: &StegOptions,
) -> Result<(), Error> {
    // opening output file early so it'll error out fast when it exists or something
    let dest = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create_new(!replace)
        .open(output)?;

    let payload = read_payload(data)?;
    let cover_len = std::fs::metadata(&cover)?.len();
    let cover_reader = File::open(cover)?;

    container::encode_raw(cover_reader, cover_len, &payload, dest, options)?;
    Ok(())
}

/// Decodes a payload hidden by [`encode_into_file`] from `encoded`, writing
/// it to `result` or to stdout if not given. Treats `encoded` as a
/// headerless/raw container.
///
/// Returns `Ok(())` even when the embedded password does not match
/// `options` — check the crate's CLI output or call [`container::decode_raw`]
/// directly if you need to distinguish that from a successful decode.
pub fn decode_from_file(
    encoded: PathBuf,
    result: Option<PathBuf>,
    replace: bool,
    options: &StegOptions,
) -> Result<(), Error> {
    let stego = File::open(encoded)?;
    let mut recovered = Vec::new();
    let outcome = container::decode_raw(stego, &mut recovered, options)?;

    if outcome == frame::DecodeOutcome::InvalidPassword {
        log::warn!("decoded stego file did not match the supplied password");
    }

    match result {
        Some(o) => OpenOptions::new()
            .write(true)
            .truncate(true)
            .create_new(!replace)
            .open(o)?
            .write_all(&recovered)?,
        None => stdout().write_all(&recovered)?,
    }
    Ok(())
}

fn read_payload(data: Option<PathBuf>) -> Result<Vec<u8>, Error> {
    match data {
        Some(path) => {
            let mut file = File::open(path)?;
            let mut payload = Vec::with_capacity(file.metadata()?.len() as usize);
            file.read_to_end(&mut payload)?;
            Ok(payload)
        }
        None => {
            let mut payload = Vec::with_capacity(256);
            stdin().read_to_end(&mut payload)?;
            Ok(payload)
        }
    }
}
