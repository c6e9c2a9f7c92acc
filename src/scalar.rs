//! Fixed-width big-endian scalar serialization.
//!
//! These are the building blocks the frame codec uses before handing bytes
//! to [`crate::bitops`]: a `u32`/`u64`/float is first turned into its 4 or 8
//! big-endian bytes here, and *those* bytes are what gets interleaved into
//! cover bytes.

use byteorder::{BigEndian, ByteOrder};

use crate::Error;

/// Serializes `value` as 4 big-endian bytes.
pub fn write_u32_be(value: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, value);
    buf
}

/// Parses a `u32` from 4 big-endian bytes starting at `start`.
pub fn read_u32_be(buf: &[u8], start: usize) -> Result<u32, Error> {
    require(buf, start, 4)?;
    Ok(BigEndian::read_u32(&buf[start..start + 4]))
}

/// Serializes `value` as 8 big-endian bytes.
pub fn write_u64_be(value: u64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, value);
    buf
}

/// Parses a `u64` from 8 big-endian bytes starting at `start`.
pub fn read_u64_be(buf: &[u8], start: usize) -> Result<u64, Error> {
    require(buf, start, 8)?;
    Ok(BigEndian::read_u64(&buf[start..start + 8]))
}

/// Serializes `value` as 4 big-endian bytes, bit-preserving.
pub fn write_f32_be(value: f32) -> [u8; 4] {
    write_u32_be(value.to_bits())
}

/// Parses an `f32` from 4 big-endian bytes starting at `start`, bit-preserving.
pub fn read_f32_be(buf: &[u8], start: usize) -> Result<f32, Error> {
    Ok(f32::from_bits(read_u32_be(buf, start)?))
}

/// Serializes `value` as 8 big-endian bytes, bit-preserving.
pub fn write_f64_be(value: f64) -> [u8; 8] {
    write_u64_be(value.to_bits())
}

/// Parses an `f64` from 8 big-endian bytes starting at `start`, bit-preserving.
pub fn read_f64_be(buf: &[u8], start: usize) -> Result<f64, Error> {
    Ok(f64::from_bits(read_u64_be(buf, start)?))
}

fn require(buf: &[u8], start: usize, len: usize) -> Result<(), Error> {
    let available = buf.len().saturating_sub(start);
    if available < len {
        return Err(Error::InsufficientBytes {
            needed: len as u64,
            available: available as u64,
        });
    }
    Ok(())
}
