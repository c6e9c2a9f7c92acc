//! Drives the frame codec once per entry in an ordered list of covers,
//! splitting one payload stream across them on encode and concatenating the
//! recovered slices, in list order, on decode.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::PathBuf;

use log::{debug, info};

use crate::frame::{self, DecodeOutcome, EncodeOutcome};
use crate::options::StegOptions;
use crate::Error;

/// One cover/destination pair and how much of the shared payload it carries.
#[derive(Debug, Clone)]
pub struct MultiEncodeEntry {
    /// Path to the cover file this entry reads from.
    pub cover_path: PathBuf,
    /// Path the resulting stego file is written to.
    pub destination_path: PathBuf,
    /// How many payload bytes this entry consumes from the shared stream.
    pub data_amount_to_encode: u64,
    /// Options used for this entry's encode.
    pub options: StegOptions,
}

/// One stego file to decode, in the order its slice should be appended.
#[derive(Debug, Clone)]
pub struct MultiDecodeEntry {
    /// Path to the stego file carrying this slice.
    pub encoded_path: PathBuf,
    /// Options used for this entry's decode.
    pub options: StegOptions,
}

/// Splits `payload` across `entries` in order, calling the frame encoder
/// once per entry. The payload stream is shared: each entry's read position
/// picks up where the previous one left off.
///
/// Fails with [`Error::InvalidArgument`] if the entries' amounts sum to more
/// than `payload.len()`.
pub fn multi_encode(entries: &[MultiEncodeEntry], payload: &[u8]) -> Result<EncodeOutcome, Error> {
    let total: u64 = entries.iter().map(|e| e.data_amount_to_encode).sum();
    if total > payload.len() as u64 {
        return Err(Error::InvalidArgument(format!(
            "multi-encode entries request {} payload bytes but only {} are available",
            total,
            payload.len()
        )));
    }

    info!("multi-encode: {} entries, {} total payload bytes", entries.len(), total);
    let mut cursor = Cursor::new(payload);
    for (i, entry) in entries.iter().enumerate() {
        let cover = BufReader::new(File::open(&entry.cover_path)?);
        let cover_len = std::fs::metadata(&entry.cover_path)?.len();
        let dest = BufWriter::new(File::create(&entry.destination_path)?);

        debug!(
            "multi-encode entry {}: {} -> {} ({} bytes)",
            i,
            entry.cover_path.display(),
            entry.destination_path.display(),
            entry.data_amount_to_encode
        );

        frame::encode(
            cover,
            cover_len,
            &mut cursor,
            entry.data_amount_to_encode,
            dest,
            &entry.options,
        )?;
    }

    Ok(EncodeOutcome::EncodingSuccessful)
}

/// Decodes each entry in order, appending recovered payload bytes to `dest`.
/// Short-circuits on the first [`DecodeOutcome::InvalidPassword`].
pub fn multi_decode(entries: &[MultiDecodeEntry], dest: &mut Vec<u8>) -> Result<DecodeOutcome, Error> {
    for (i, entry) in entries.iter().enumerate() {
        let stego = BufReader::new(File::open(&entry.encoded_path)?);
        debug!("multi-decode entry {}: {}", i, entry.encoded_path.display());

        let outcome = frame::decode(stego, &mut *dest, &entry.options)?;
        if outcome == DecodeOutcome::InvalidPassword {
            return Ok(DecodeOutcome::InvalidPassword);
        }
    }
    Ok(DecodeOutcome::DecodingSuccessful)
}
