use thiserror::Error as ThisError;

/// Common error type for this crate.
///
/// `InvalidPassword` is deliberately *not* a variant here: per the decode
/// contract it is a returned value ([`crate::frame::DecodeOutcome`]), not a
/// failure, since a wrong-password stego file is still well-formed.
#[derive(Debug, ThisError)]
pub enum Error {
    /// An option value, index or argument was out of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A read or bit-interleave operation needed more bytes than were available.
    #[error("insufficient bytes: needed {needed}, had {available}")]
    InsufficientBytes {
        /// Bytes the operation required.
        needed: u64,
        /// Bytes actually available.
        available: u64,
    },

    /// The cover file is too small to hold the hidden frame.
    #[error("insufficient capacity: cover requires {required} bytes, has {available}")]
    InsufficientCapacity {
        /// Total cover bytes the frame would need.
        required: u64,
        /// Bytes actually present in the cover.
        available: u64,
    },

    /// Lower-level I/O failure. `io::ErrorKind::NotFound` distinguishes the
    /// "path does not exist" case callers may want to special-case.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Image container decoding/encoding failure from the PNG adapter.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
