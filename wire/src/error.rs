use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("truncated input at byte {0}")]
    Truncated(usize),

    #[error("unexpected byte {byte:#04x} at {pos}")]
    UnexpectedByte { byte: u8, pos: usize },

    #[error("non-canonical integer encoding at byte {0}")]
    NonCanonicalInt(usize),

    #[error("integer overflow at byte {0}")]
    IntOverflow(usize),

    #[error("dictionary keys out of order or duplicated at byte {0}")]
    UnorderedKeys(usize),

    #[error("dictionary key is not valid utf-8 at byte {0}")]
    BadKey(usize),

    #[error("trailing bytes after value")]
    TrailingData,

    #[error("payload must be a one-element list containing a dictionary")]
    BadEnvelope,

    #[error("missing required field {0:?}")]
    MissingField(&'static str),

    #[error("field {0:?} has the wrong type")]
    WrongType(&'static str),

    #[error("invalid value for field {field:?}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid/unrecognized key {0:?}")]
    UnknownKey(String),

    #[error("i, p, r, s lengths must be identical")]
    MismatchedLists,
}
