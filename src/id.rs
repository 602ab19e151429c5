use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Id uniquely identifying an interned name within one [`NameTable`].
///
/// Ids are dense and assigned in insertion order, so they can be used as
/// indices into arrays kept elsewhere. Id 0 is always the sentinel.
///
/// [`NameTable`]: crate::NameTable
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NameId(u32);

impl NameId {
    /// The id of the sentinel record.
    pub const SENTINEL: NameId = NameId(0);

    /// Wrap a raw id, for instance one stored by external code.
    #[inline]
    pub const fn new(id: u32) -> Self {
        NameId(id)
    }

    /// The raw id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id as an array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.0 == 0
    }

    /// The largest number of records a table can hold.
    pub const LIMIT: usize = u32::MAX as usize;

    // Panics past `LIMIT`: wrapping would hand out an id twice.
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(id) => NameId(id),
            Err(_) => panic!("name table exceeds {} records", Self::LIMIT),
        }
    }
}

impl From<NameId> for usize {
    fn from(id: NameId) -> usize {
        id.index()
    }
}

impl From<NameId> for u32 {
    fn from(id: NameId) -> u32 {
        id.0
    }
}

impl Display for NameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
