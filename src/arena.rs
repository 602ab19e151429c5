// Dense append-only storage for interned names.
//
// A record's position is its id. Records are never removed, so an id stays
// valid for as long as the arena lives.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::id::NameId;

/// An interned name and the tag attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InternedName {
    name: Box<[u8]>,
    tag: u32,
}

impl InternedName {
    pub(crate) fn new(name: &[u8], tag: u32) -> Self {
        Self {
            name: name.into(),
            tag,
        }
    }

    /// The name bytes.
    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// The auxiliary tag.
    #[inline]
    pub fn tag(&self) -> u32 {
        self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: u32) {
        self.tag = tag;
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    records: Vec<InternedName>,
}

impl Arena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// The id the next allocation will receive.
    #[inline]
    pub(crate) fn next_id(&self) -> NameId {
        NameId::from_index(self.records.len())
    }

    pub(crate) fn alloc(&mut self, record: InternedName) -> NameId {
        let id = self.next_id();
        self.records.push(record);
        id
    }

    #[inline]
    pub(crate) fn get(&self, id: NameId) -> Result<&InternedName, Error> {
        let len = self.records.len();
        self.records
            .get(id.index())
            .ok_or(Error::OutOfRange { id, len })
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NameId) -> Result<&mut InternedName, Error> {
        let len = self.records.len();
        self.records
            .get_mut(id.index())
            .ok_or(Error::OutOfRange { id, len })
    }

    // Only for ids already known to be allocated, such as those stored in
    // the hash index.
    #[inline]
    pub(crate) fn name_of(&self, id: NameId) -> &[u8] {
        self.records[id.index()].name()
    }

    // Every arena owned by a table holds its sentinel at id 0.
    #[inline]
    pub(crate) fn first(&self) -> &InternedName {
        &self.records[0]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = (NameId, &InternedName)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| (NameId::from_index(i), record))
    }

    pub(crate) fn into_records(self) -> Vec<InternedName> {
        self.records
    }
}
