//! Parameters used to construct a [`NameTable`](crate::NameTable).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The name of the sentinel record when none is configured.
pub const DEFAULT_SENTINEL: &[u8] = b"zeroName";

/// What to do when a record loaded from persisted data is assigned a
/// different id than the data declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MismatchPolicy {
    /// Log a warning and keep the id allocation assigned. The table keeps
    /// working but ids may drift from what external code stored.
    #[default]
    Lenient,
    /// Refuse the record with [`Error::IndexMismatch`](crate::Error::IndexMismatch).
    Strict,
}

/// Construction parameters for a name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Expected number of names; used to pre-size storage.
    pub capacity: usize,
    /// Name of the record at id 0.
    pub sentinel: Vec<u8>,
    /// How persisted ids that disagree with allocation order are handled.
    pub mismatch: MismatchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1024,
            sentinel: DEFAULT_SENTINEL.to_vec(),
            mismatch: MismatchPolicy::default(),
        }
    }
}
