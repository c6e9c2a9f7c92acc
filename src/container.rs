//! Thin adapters that adjust `initial_offset` to preserve a container
//! format's own header, then delegate to the frame codec. Each adapter is a
//! free function, not a trait object — spec §9 calls out that the
//! inheritance-based dispatch in the original source has no reason to
//! survive the port.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use image::codecs::png::{PngDecoder, PngEncoder};
use image::{GenericImageView, ImageDecoder};

use crate::frame::{self, DecodeOutcome, EncodeOutcome};
use crate::options::StegOptions;
use crate::Error;

/// WAV's fixed 44-byte RIFF/fmt/data header, preserved verbatim.
pub const WAV_HEADER_LEN: u64 = 44;

/// Returns a copy of `options` with `initial_offset` advanced past a
/// container header of `header_len` bytes. Never mutates the caller's copy.
fn with_header_offset(options: &StegOptions, header_len: u64) -> StegOptions {
    let mut adjusted = options.clone();
    adjusted.set_initial_offset(options.initial_offset() + header_len);
    adjusted
}

/// Encodes `payload` into a WAV file at `cover_path`, preserving its 44-byte
/// header, and writes the result to `dest_path`.
pub fn encode_wav(
    cover_path: impl AsRef<Path>,
    payload: &[u8],
    dest_path: impl AsRef<Path>,
    options: &StegOptions,
) -> Result<EncodeOutcome, Error> {
    let adjusted = with_header_offset(options, WAV_HEADER_LEN);
    let cover = BufReader::new(File::open(cover_path.as_ref())?);
    let cover_len = std::fs::metadata(cover_path.as_ref())?.len();
    let dest = BufWriter::new(File::create(dest_path)?);
    frame::encode(cover, cover_len, payload, payload.len() as u64, dest, &adjusted)
}

/// Recovers a payload previously hidden in a WAV file with [`encode_wav`].
pub fn decode_wav(
    encoded_path: impl AsRef<Path>,
    options: &StegOptions,
) -> Result<(DecodeOutcome, Vec<u8>), Error> {
    let adjusted = with_header_offset(options, WAV_HEADER_LEN);
    let stego = BufReader::new(File::open(encoded_path)?);
    let mut recovered = Vec::new();
    let outcome = frame::decode(stego, &mut recovered, &adjusted)?;
    Ok((outcome, recovered))
}

/// Encodes `payload` into a PNG image's raw pixel buffer (no container
/// header to skip — `PngDecoder` already strips it), re-encoding the result
/// with the original dimensions and color type.
///
/// This is the direct descendant of the teacher's `encode_into_image`.
pub fn encode_png(
    cover_path: impl AsRef<Path>,
    payload: &[u8],
    dest_path: impl AsRef<Path>,
    options: &StegOptions,
) -> Result<EncodeOutcome, Error> {
    let decoder = PngDecoder::new(File::open(cover_path)?)?;
    let (width, height) = decoder.dimensions();
    let color_type = decoder.color_type();
    let pixel_len = decoder.total_bytes();
    let mut pixels = decoder.into_reader()?;

    let mut stego_pixels = Vec::with_capacity(pixel_len as usize);
    let outcome = frame::encode(
        &mut pixels,
        pixel_len,
        payload,
        payload.len() as u64,
        &mut stego_pixels,
        options,
    )?;

    let dest = BufWriter::new(File::create(dest_path)?);
    PngEncoder::new(dest).encode(&stego_pixels, width, height, color_type)?;
    Ok(outcome)
}

/// Recovers a payload previously hidden in a PNG image with [`encode_png`].
pub fn decode_png(
    encoded_path: impl AsRef<Path>,
    options: &StegOptions,
) -> Result<(DecodeOutcome, Vec<u8>), Error> {
    let decoder = PngDecoder::new(File::open(encoded_path)?)?;
    let pixels = decoder.into_reader()?;
    let mut recovered = Vec::new();
    let outcome = frame::decode(pixels, &mut recovered, options)?;
    Ok((outcome, recovered))
}

/// No-op adapter for covers with no container header at all: delegates
/// straight to the frame codec with `options` unchanged.
pub fn encode_raw<C: Read>(
    cover: C,
    cover_len: u64,
    payload: &[u8],
    dest: impl std::io::Write,
    options: &StegOptions,
) -> Result<EncodeOutcome, Error> {
    frame::encode(cover, cover_len, payload, payload.len() as u64, dest, options)
}

/// No-op adapter for covers with no container header at all.
pub fn decode_raw<S: Read>(
    stego: S,
    dest: impl std::io::Write,
    options: &StegOptions,
) -> Result<DecodeOutcome, Error> {
    frame::decode(stego, dest, options)
}
