//! The streaming frame encoder and decoder: the block loop, the endianness
//! flip cadence, the skip gap, and the header layout described in spec §4.5
//! and §4.6.

use std::io::{self, Read, Write};

use log::{debug, trace, warn};

use crate::bitops::{self, Endian};
use crate::capacity;
use crate::options::StegOptions;
use crate::scalar;
use crate::Error;

/// Result of a successful encode. Exists mainly so the stable result-code
/// naming from spec §6 has a concrete representation, even though encode
/// has no other "success" shape to distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// The stego output was written in full.
    EncodingSuccessful,
}

/// Result of a decode attempt. `InvalidPassword` is a value, not an error:
/// it distinguishes "well-formed stego file, wrong password" from a hard
/// failure (see spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The payload was recovered in full.
    DecodingSuccessful,
    /// The stego file's embedded password did not match the supplied options.
    InvalidPassword,
}

fn read_exact_vec<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, Error> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::InsufficientBytes {
                needed: len as u64,
                available: 0,
            }
        } else {
            Error::Io(e)
        }
    })?;
    Ok(buf)
}

/// Reads up to `len` bytes, stopping early (without error) at EOF. Used for
/// the decoder's tolerant reads where a short final skip region is expected.
fn read_up_to<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>, Error> {
    let mut buf = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(buf)
}

fn copy_verbatim<R: Read, W: Write>(reader: &mut R, writer: &mut W, len: u64) -> Result<(), Error> {
    let mut remaining = len;
    let mut buf = [0u8; 4096];
    while remaining > 0 {
        let chunk = remaining.min(buf.len() as u64) as usize;
        reader.read_exact(&mut buf[..chunk]).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                Error::InsufficientBytes {
                    needed: remaining,
                    available: 0,
                }
            } else {
                Error::Io(e)
            }
        })?;
        writer.write_all(&buf[..chunk])?;
        remaining -= chunk as u64;
    }
    Ok(())
}

/// Encodes `payload` (exactly `payload_len` bytes, clamped by the caller to
/// what the payload source actually has) into `cover`, writing the
/// byte-identical-length stego output to `dest`.
///
/// `cover_len` is the cover's total byte length, used for the up-front
/// capacity check (spec §4.5 step 1).
pub fn encode<C: Read, P: Read, W: Write>(
    mut cover: C,
    cover_len: u64,
    mut payload: P,
    payload_len: u64,
    mut dest: W,
    options: &StegOptions,
) -> Result<EncodeOutcome, Error> {
    let validation = capacity::validate(options, payload_len, cover_len)?;
    debug!(
        "encoding {} payload bytes across {} blocks ({} cover bytes required of {})",
        payload_len, validation.number_of_data_blocks, validation.total_bytes_required, cover_len
    );

    let pos = options.hidden_bit_position();

    copy_verbatim(&mut cover, &mut dest, options.initial_offset())?;

    let mut flag_byte = read_exact_vec(&mut cover, 1)?;
    let has_password = !options.password().is_empty();
    flag_byte[0] = bitops::set_bit(flag_byte[0], has_password as u8, 0)?;
    dest.write_all(&flag_byte)?;

    if has_password {
        let pw_len = options.password().len() as u32;
        let len_bytes = scalar::write_u32_be(pw_len);
        let mut len_chunk = read_exact_vec(&mut cover, 32)?;
        bitops::interleave_into(&mut len_chunk, 0, &len_bytes, 0, 3, pos, options.starting_endian())?;
        dest.write_all(&len_chunk)?;

        let mut pw_chunk = read_exact_vec(&mut cover, pw_len as usize * 8)?;
        bitops::interleave_into(
            &mut pw_chunk,
            0,
            options.password(),
            0,
            options.password().len() - 1,
            pos,
            options.starting_endian(),
        )?;
        dest.write_all(&pw_chunk)?;
    }

    let len_bytes = scalar::write_u64_be(payload_len);
    let mut len_chunk = read_exact_vec(&mut cover, 64)?;
    bitops::interleave_into(&mut len_chunk, 0, &len_bytes, 0, 7, pos, options.starting_endian())?;
    dest.write_all(&len_chunk)?;

    let block_size = options.data_block_size();
    let skip = options.byte_skip_per_block();
    let flip_frequency = options.endian_change_frequency();

    let mut endian = options.starting_endian();
    let mut blocks_in_window = 0u64;
    let mut encoded = 0u64;

    while encoded < payload_len {
        let n = block_size.min(payload_len - encoded) as usize;
        let payload_buf = read_exact_vec(&mut payload, n)?;
        let mut chunk = read_exact_vec(&mut cover, n * 8 + skip as usize)?;

        bitops::interleave_into(&mut chunk, 0, &payload_buf, 0, n - 1, pos, endian)?;
        dest.write_all(&chunk)?;

        encoded += n as u64;
        blocks_in_window += 1;
        trace!("encoded block {} ({} bytes, endian {:?})", blocks_in_window, n, endian);
        if flip_frequency > 0 && blocks_in_window == flip_frequency {
            endian = endian.flipped();
            blocks_in_window = 0;
        }
    }

    io::copy(&mut cover, &mut dest)?;

    debug!("encode finished: {} payload bytes written", payload_len);
    Ok(EncodeOutcome::EncodingSuccessful)
}

/// Decodes a payload previously hidden by [`encode`], writing the recovered
/// bytes to `dest`.
pub fn decode<S: Read, W: Write>(
    mut stego: S,
    mut dest: W,
    options: &StegOptions,
) -> Result<DecodeOutcome, Error> {
    let pos = options.hidden_bit_position();

    // discard the initial offset
    let mut remaining_offset = options.initial_offset();
    let mut scratch = [0u8; 4096];
    while remaining_offset > 0 {
        let chunk = remaining_offset.min(scratch.len() as u64) as usize;
        stego.read_exact(&mut scratch[..chunk])?;
        remaining_offset -= chunk as u64;
    }

    let flag_byte = read_exact_vec(&mut stego, 1)?;
    let pw_flag = bitops::get_bit(flag_byte[0], 0)?;
    let has_password = !options.password().is_empty();

    match (pw_flag, has_password) {
        (1, false) | (0, true) => {
            warn!("password presence mismatch decoding stego frame");
            return Ok(DecodeOutcome::InvalidPassword);
        }
        (1, true) => {
            let len_chunk = read_exact_vec(&mut stego, 32)?;
            let len_bytes =
                bitops::deinterleave_from(&len_chunk, 0, 4, pos, options.starting_endian())?;
            let pw_len = scalar::read_u32_be(&len_bytes, 0)? as usize;

            let pw_chunk = read_exact_vec(&mut stego, pw_len * 8)?;
            let recovered =
                bitops::deinterleave_from(&pw_chunk, 0, pw_len, pos, options.starting_endian())?;
            if recovered != options.password() {
                warn!("password mismatch decoding stego frame");
                return Ok(DecodeOutcome::InvalidPassword);
            }
        }
        (0, false) => {}
        _ => unreachable!("pw_flag is always 0 or 1"),
    }

    let len_chunk = read_exact_vec(&mut stego, 64)?;
    let len_bytes = bitops::deinterleave_from(&len_chunk, 0, 8, pos, options.starting_endian())?;
    let payload_len = scalar::read_u64_be(&len_bytes, 0)?;

    let block_size = options.data_block_size();
    let skip = options.byte_skip_per_block();
    let flip_frequency = options.endian_change_frequency();

    let mut endian = options.starting_endian();
    let mut blocks_in_window = 0u64;
    let mut remaining = payload_len;

    while remaining > 0 {
        let n = block_size.min(remaining) as usize;
        let block = read_up_to(&mut stego, n * 8)?;
        if block.len() < n * 8 {
            // truncated input; salvage whatever complete bytes we can and stop.
            let complete = block.len() / 8;
            if complete > 0 {
                let recovered =
                    bitops::deinterleave_from(&block, 0, complete, pos, endian)?;
                dest.write_all(&recovered)?;
            }
            break;
        }

        let recovered = bitops::deinterleave_from(&block, 0, n, pos, endian)?;
        dest.write_all(&recovered)?;
        remaining -= n as u64;

        let _ = read_up_to(&mut stego, skip as usize)?;

        blocks_in_window += 1;
        trace!("decoded block {} ({} bytes, endian {:?})", blocks_in_window, n, endian);
        if flip_frequency > 0 && blocks_in_window == flip_frequency {
            endian = endian.flipped();
            blocks_in_window = 0;
        }
    }

    debug!("decode finished: {} payload bytes recovered", payload_len - remaining);
    Ok(DecodeOutcome::DecodingSuccessful)
}
