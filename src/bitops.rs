//! Pure functions over byte buffers: single-bit get/set, and the
//! bit-interleaver/de-interleaver that spreads one source byte across eight
//! cover bytes (and pulls it back out again).
//!
//! Nothing here touches I/O; everything operates on slices already in memory.

use crate::Error;

/// Bit order used when a payload byte is spread across eight cover bytes.
///
/// `Big` places the payload's bit 7 (MSB) into the first cover byte of the
/// window; `Little` places bit 0 (LSB) first. The de-interleaver must mirror
/// whichever was used to encode, or the round trip breaks silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// MSB-first: source bit 7 goes into the first cover byte.
    Big,
    /// LSB-first: source bit 0 goes into the first cover byte.
    Little,
}

impl Endian {
    /// Flips `Big` to `Little` and back.
    pub fn flipped(self) -> Endian {
        match self {
            Endian::Big => Endian::Little,
            Endian::Little => Endian::Big,
        }
    }
}

fn check_bit_pos(pos: u8) -> Result<(), Error> {
    if pos > 7 {
        return Err(Error::InvalidArgument(format!(
            "bit position {} out of range 0..=7",
            pos
        )));
    }
    Ok(())
}

/// Clears bit `pos` of `target` and ORs in `value` (0 or 1) at that position.
pub fn set_bit(target: u8, value: u8, pos: u8) -> Result<u8, Error> {
    check_bit_pos(pos)?;
    if value > 1 {
        return Err(Error::InvalidArgument(format!(
            "bit value {} is not 0 or 1",
            value
        )));
    }
    Ok((target & !(1 << pos)) | (value << pos))
}

/// Reads bit `pos` of `value`, returning 0 or 1.
pub fn get_bit(value: u8, pos: u8) -> Result<u8, Error> {
    check_bit_pos(pos)?;
    Ok((value >> pos) & 1)
}

/// Spreads `source[src_start..=src_end_inclusive]` into
/// `target[target_start..]`, eight cover bytes per source byte, writing one
/// bit of the source byte into bit `pos` of each touched target byte.
///
/// `endian` controls which end of each source byte lands in the first cover
/// byte of its eight-byte window: see [`Endian`].
pub fn interleave_into(
    target: &mut [u8],
    target_start: usize,
    source: &[u8],
    src_start: usize,
    src_end_inclusive: usize,
    pos: u8,
    endian: Endian,
) -> Result<(), Error> {
    check_bit_pos(pos)?;
    if src_start > src_end_inclusive || src_end_inclusive >= source.len() {
        return Err(Error::InvalidArgument(format!(
            "source range {}..={} invalid for a buffer of length {}",
            src_start,
            src_end_inclusive,
            source.len()
        )));
    }
    if target_start > target.len() {
        return Err(Error::InvalidArgument(format!(
            "target_start {} out of range for a buffer of length {}",
            target_start,
            target.len()
        )));
    }
    let src_len = src_end_inclusive - src_start + 1;
    let needed = src_len
        .checked_mul(8)
        .ok_or_else(|| Error::InvalidArgument("source range too large".into()))?;
    let available = target.len().saturating_sub(target_start);
    if available < needed {
        return Err(Error::InsufficientBytes {
            needed: needed as u64,
            available: available as u64,
        });
    }

    let mut t = target_start;
    for s in &source[src_start..=src_end_inclusive] {
        for j in (0..8).rev() {
            let bit = match endian {
                Endian::Big => (s >> j) & 1,
                Endian::Little => (s >> (7 - j)) & 1,
            };
            target[t] = set_bit(target[t], bit, pos)?;
            t += 1;
        }
    }
    Ok(())
}

/// Inverse of [`interleave_into`]: reconstructs `count_bytes` bytes from
/// `source[src_start..]`, reading bit `pos` of every eighth-adjacent cover
/// byte.
pub fn deinterleave_from(
    source: &[u8],
    src_start: usize,
    count_bytes: usize,
    pos: u8,
    endian: Endian,
) -> Result<Vec<u8>, Error> {
    check_bit_pos(pos)?;
    let needed = count_bytes
        .checked_mul(8)
        .ok_or_else(|| Error::InvalidArgument("byte count too large".into()))?;
    let available = source.len().saturating_sub(src_start);
    if available < needed {
        return Err(Error::InsufficientBytes {
            needed: needed as u64,
            available: available as u64,
        });
    }

    let mut out = Vec::with_capacity(count_bytes);
    let mut s = src_start;
    for _ in 0..count_bytes {
        let mut byte = 0u8;
        for j in 0..8 {
            let bit = get_bit(source[s], pos)?;
            match endian {
                Endian::Big => byte = (byte << 1) | bit,
                Endian::Little => byte |= bit << j,
            }
            s += 1;
        }
        out.push(byte);
    }
    Ok(out)
}
