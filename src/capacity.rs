//! Computes, from [`StegOptions`] and a payload length, the exact number of
//! cover bytes the hidden frame requires.

use crate::options::StegOptions;
use crate::Error;

/// A structured breakdown of what a given encode would cost in cover bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeValidation {
    /// `ceil(payload_len / data_block_size)`, or 0 for an empty payload.
    pub number_of_data_blocks: u64,
    /// Cover bytes spent on skip gaps between (and after, see below) blocks.
    pub total_byte_skip: u64,
    /// Cover bytes the password region costs: 1 if absent (flag byte only),
    /// else `1 + 32 + 8*len` (flag byte, pwLen field, pwBytes).
    pub password_size: u64,
    /// Total cover bytes the frame needs, including `initial_offset`.
    pub total_bytes_required: u64,
    /// The cover file's actual size, for convenience in error reporting.
    pub cover_file_size: u64,
}

/// Validates that `cover_file_size` is large enough to hold the hidden frame
/// for `payload_len` bytes of payload under `options`.
///
/// Per the resolved open question on final-block skip accounting (see
/// `SPEC_FULL.md`), the trailing skip after the *last* block is charged for
/// here too, matching what the encoder actually reads.
pub fn validate(
    options: &StegOptions,
    payload_len: u64,
    cover_file_size: u64,
) -> Result<EncodeValidation, Error> {
    let block_size = options.data_block_size();
    let number_of_data_blocks = if payload_len == 0 {
        0
    } else {
        (payload_len - 1) / block_size + 1
    };

    let total_byte_skip = number_of_data_blocks * options.byte_skip_per_block();

    let password_size = if options.password().is_empty() {
        1
    } else {
        1 + 32 + options.password().len() as u64 * 8
    };

    let total_bytes_required = payload_len * 8
        + total_byte_skip
        + options.initial_offset()
        + password_size
        + 64;

    let breakdown = EncodeValidation {
        number_of_data_blocks,
        total_byte_skip,
        password_size,
        total_bytes_required,
        cover_file_size,
    };

    if total_bytes_required > cover_file_size {
        return Err(Error::InsufficientCapacity {
            required: total_bytes_required,
            available: cover_file_size,
        });
    }

    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitops::Endian;

    #[test]
    fn zero_payload_needs_only_headers() {
        let opts = StegOptions::default();
        let v = validate(&opts, 0, 65).unwrap();
        assert_eq!(v.number_of_data_blocks, 0);
        assert_eq!(v.total_byte_skip, 0);
        assert_eq!(v.password_size, 1);
        assert_eq!(v.total_bytes_required, 65);
    }

    #[test]
    fn password_size_accounts_for_flag_byte_length_and_len_field() {
        let opts = StegOptions::new(0, 0, 1, 0, Endian::Big, 0, b"ABC".to_vec()).unwrap();
        let v = validate(&opts, 0, 1000).unwrap();
        assert_eq!(v.password_size, 1 + 32 + 3 * 8);
    }

    #[test]
    fn capacity_boundary_is_exact() {
        let opts = StegOptions::default();
        let payload_len = 4u64;
        let required = validate(&opts, payload_len, u64::MAX).unwrap().total_bytes_required;
        assert!(validate(&opts, payload_len, required).is_ok());
        assert!(matches!(
            validate(&opts, payload_len, required - 1),
            Err(Error::InsufficientCapacity { .. })
        ));
    }

    #[test]
    fn capacity_boundary_is_exact_with_a_password() {
        let opts = StegOptions::new(0, 0, 1, 0, Endian::Big, 0, b"A".to_vec()).unwrap();
        let payload_len = 1u64;
        let required = validate(&opts, payload_len, u64::MAX).unwrap().total_bytes_required;
        // flag(1) + pwLen(32) + pwBytes(8) + payloadLen(64) + block(8) = 113
        assert_eq!(required, 113);
        assert!(validate(&opts, payload_len, required).is_ok());
        assert!(matches!(
            validate(&opts, payload_len, required - 1),
            Err(Error::InsufficientCapacity { .. })
        ));
    }

    #[test]
    fn final_block_skip_is_charged_for() {
        let mut opts = StegOptions::default();
        opts.set_data_block_size(3).unwrap();
        let v = validate(&opts, 3, 10_000).unwrap();
        assert_eq!(v.number_of_data_blocks, 1);
        assert_eq!(v.total_byte_skip, 0);

        let skipping = StegOptions::new(0, 2, 3, 0, Endian::Big, 0, vec![]).unwrap();
        let v2 = validate(&skipping, 3, 10_000).unwrap();
        assert_eq!(v2.number_of_data_blocks, 1);
        assert_eq!(v2.total_byte_skip, 2);
    }
}
