//! [`StegOptions`]: every tunable parameter of the codec, in one value type.

use crate::bitops::Endian;
use crate::Error;

/// Every tunable parameter of the bit-interleaving codec.
///
/// Cloning a `StegOptions` is always a deep copy: every field is plain data
/// or an owned `Vec<u8>`, so there is no shared mutable substructure to worry
/// about. Container adapters (§4.8) clone an options value before adjusting
/// `initial_offset`, never mutating the caller's copy in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StegOptions {
    initial_offset: u64,
    byte_skip_per_block: u64,
    data_block_size: u64,
    hidden_bit_position: u8,
    starting_endian: Endian,
    endian_change_frequency: u64,
    password: Vec<u8>,
}

impl StegOptions {
    /// Builds a fully-parameterized options value, validating range
    /// invariants (`data_block_size >= 1`, `hidden_bit_position <= 7`).
    pub fn new(
        initial_offset: u64,
        byte_skip_per_block: u64,
        data_block_size: u64,
        hidden_bit_position: u8,
        starting_endian: Endian,
        endian_change_frequency: u64,
        password: Vec<u8>,
    ) -> Result<Self, Error> {
        let opts = StegOptions {
            initial_offset,
            byte_skip_per_block,
            data_block_size,
            hidden_bit_position,
            starting_endian,
            endian_change_frequency,
            password,
        };
        opts.validate()?;
        Ok(opts)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.data_block_size < 1 {
            return Err(Error::InvalidArgument(
                "data_block_size must be at least 1".into(),
            ));
        }
        if self.hidden_bit_position > 7 {
            return Err(Error::InvalidArgument(format!(
                "hidden_bit_position {} out of range 0..=7",
                self.hidden_bit_position
            )));
        }
        Ok(())
    }

    /// Cover bytes copied verbatim before the hidden frame begins.
    pub fn initial_offset(&self) -> u64 {
        self.initial_offset
    }

    /// Sets `initial_offset`. Used by container adapters on a cloned copy.
    pub fn set_initial_offset(&mut self, value: u64) {
        self.initial_offset = value;
    }

    /// Cover bytes copied verbatim between consecutive payload blocks.
    pub fn byte_skip_per_block(&self) -> u64 {
        self.byte_skip_per_block
    }

    /// Number of payload bytes per block.
    pub fn data_block_size(&self) -> u64 {
        self.data_block_size
    }

    /// Sets `data_block_size`; rejects 0.
    pub fn set_data_block_size(&mut self, value: u64) -> Result<(), Error> {
        if value < 1 {
            return Err(Error::InvalidArgument(
                "data_block_size must be at least 1".into(),
            ));
        }
        self.data_block_size = value;
        Ok(())
    }

    /// Which bit of each touched cover byte carries a payload bit.
    pub fn hidden_bit_position(&self) -> u8 {
        self.hidden_bit_position
    }

    /// Sets `hidden_bit_position`; rejects values outside 0..=7.
    pub fn set_hidden_bit_position(&mut self, value: u8) -> Result<(), Error> {
        if value > 7 {
            return Err(Error::InvalidArgument(format!(
                "hidden_bit_position {} out of range 0..=7",
                value
            )));
        }
        self.hidden_bit_position = value;
        Ok(())
    }

    /// Bit order within a payload byte for the first block.
    pub fn starting_endian(&self) -> Endian {
        self.starting_endian
    }

    /// Sets `starting_endian`.
    pub fn set_starting_endian(&mut self, value: Endian) {
        self.starting_endian = value;
    }

    /// Blocks between endianness flips; `0` disables flipping.
    pub fn endian_change_frequency(&self) -> u64 {
        self.endian_change_frequency
    }

    /// Sets `endian_change_frequency`.
    pub fn set_endian_change_frequency(&mut self, value: u64) {
        self.endian_change_frequency = value;
    }

    /// The in-band password identifier. Empty means "no password".
    pub fn password(&self) -> &[u8] {
        &self.password
    }

    /// Sets the password.
    pub fn set_password(&mut self, value: Vec<u8>) {
        self.password = value;
    }
}

impl Default for StegOptions {
    fn default() -> Self {
        StegOptions {
            initial_offset: 0,
            byte_skip_per_block: 0,
            data_block_size: 1,
            hidden_bit_position: 0,
            starting_endian: Endian::Big,
            endian_change_frequency: 0,
            password: Vec::new(),
        }
    }
}
