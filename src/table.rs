use log::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arena::{Arena, InternedName};
use crate::config::{Config, MismatchPolicy};
use crate::error::Error;
use crate::id::NameId;
use crate::index::HashIndex;

/// The outcome of [`NameTable::add_new_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interned {
    /// The name was not present and has been given this fresh id.
    New(NameId),
    /// The name was already present under this id. Nothing was changed.
    Existing(NameId),
}

impl Interned {
    /// The id of the name, whether fresh or existing.
    pub fn id(self) -> NameId {
        match self {
            Interned::New(id) | Interned::Existing(id) => id,
        }
    }

    /// The id if the name was newly inserted.
    pub fn new_id(self) -> Option<NameId> {
        match self {
            Interned::New(id) => Some(id),
            Interned::Existing(_) => None,
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, Interned::New(_))
    }
}

/// How [`NameTable::tag_by_name`] treats a name that isn't in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// Return `Ok(None)`.
    Ignore,
    /// Return [`Error::NameNotFound`].
    Error,
}

/// A string interning table with stable numeric ids.
///
/// Every name is stored once and identified by a [`NameId`]. Ids are handed
/// out densely in insertion order, starting at 1; id 0 is a sentinel record
/// created with the table. Ids are never reused or renumbered, and the
/// table can be written to and read back from a text format that preserves
/// them exactly (see [`NameTable::write_db`] and [`NameTable::read_db`]).
///
/// Each name also carries a `u32` tag which the table does not interpret.
///
/// ```rust
/// use nametable::{Interned, NameTable};
///
/// let mut table = NameTable::new();
/// let vdd = table.add_new_name("vdd", 7).id();
/// assert_eq!(vdd.get(), 1);
/// assert_eq!(table.add_new_name("vdd", 8), Interned::Existing(vdd));
/// assert_eq!(table.tag(vdd).unwrap(), 7);
/// assert_eq!(table.name(vdd).unwrap(), b"vdd");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "Vec<InternedName>", try_from = "Vec<InternedName>")
)]
pub struct NameTable {
    arena: Arena,
    index: HashIndex,
    mismatch: MismatchPolicy,
}

impl NameTable {
    /// Create a table with default parameters and the `zeroName` sentinel.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create a table pre-sized for about `capacity` names.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(&Config {
            capacity,
            ..Config::default()
        })
    }

    pub fn with_config(config: &Config) -> Self {
        let mut table = Self {
            arena: Arena::with_capacity(config.capacity),
            index: HashIndex::with_capacity(config.capacity),
            mismatch: config.mismatch,
        };
        table.add_name(&config.sentinel, 0);
        table
    }

    /// Insert `name` with `tag` unless it is already present.
    ///
    /// If the name is already present, its existing id is reported as
    /// [`Interned::Existing`] and its tag is left as it was.
    pub fn add_new_name(&mut self, name: impl AsRef<[u8]>, tag: u32) -> Interned {
        let name = name.as_ref();
        match self.lookup(name) {
            Some(id) => Interned::Existing(id),
            None => Interned::New(self.add_name(name, tag)),
        }
    }

    /// Insert `name` with `tag` without checking whether it's present.
    ///
    /// If it is, both records are kept but lookups by name find the new id
    /// from now on.
    pub fn add_name(&mut self, name: impl AsRef<[u8]>, tag: u32) -> NameId {
        let id = self.arena.alloc(InternedName::new(name.as_ref(), tag));
        self.index.insert(id, &self.arena);
        id
    }

    /// Allocate a record for `name` with tag 0, expecting it to receive id
    /// `expected`. The name is only made findable if `index` is set; use
    /// [`NameTable::add_data`] to index it and attach a tag later.
    ///
    /// When allocation assigns an id other than `expected`, the table's
    /// [`MismatchPolicy`] decides: `Lenient` logs a warning and keeps the
    /// assigned id (which is returned), `Strict` allocates nothing and
    /// returns [`Error::IndexMismatch`].
    pub fn alloc_name(
        &mut self,
        name: impl AsRef<[u8]>,
        expected: NameId,
        index: bool,
    ) -> Result<NameId, Error> {
        self.check_next_id(expected)?;
        Ok(self.push_name(name.as_ref(), index))
    }

    /// Set the tag of an allocated record and make its name findable.
    ///
    /// The sentinel's tag stays 0; for id 0 only the name is reindexed.
    pub fn add_data(&mut self, id: NameId, tag: u32) -> Result<(), Error> {
        let record = self.arena.get_mut(id)?;
        if !id.is_sentinel() {
            record.set_tag(tag);
        }
        self.index.insert(id, &self.arena);
        Ok(())
    }

    /// The name stored under `id`.
    pub fn name(&self, id: NameId) -> Result<&[u8], Error> {
        Ok(self.arena.get(id)?.name())
    }

    /// The name stored under `id` as a string, or `None` if it isn't UTF-8.
    pub fn name_str(&self, id: NameId) -> Result<Option<&str>, Error> {
        Ok(std::str::from_utf8(self.name(id)?).ok())
    }

    /// The tag stored under `id`.
    pub fn tag(&self, id: NameId) -> Result<u32, Error> {
        Ok(self.arena.get(id)?.tag())
    }

    /// The *id* of `name`, or the sentinel id if it isn't present.
    ///
    /// Despite the name this does not return a tag: existing callers use
    /// the id itself as their tag. Use [`NameTable::tag_by_name`] to get the
    /// stored tag.
    pub fn tag_id(&self, name: impl AsRef<[u8]>) -> NameId {
        self.lookup(name).unwrap_or(NameId::SENTINEL)
    }

    /// Look up `name`, returning its id and tag.
    ///
    /// What happens for an unknown name is decided by `missing`. Callers
    /// that consider a missing name fatal should propagate the
    /// [`Error::NameNotFound`] and stop there.
    pub fn tag_by_name(
        &self,
        name: impl AsRef<[u8]>,
        missing: Missing,
    ) -> Result<Option<(NameId, u32)>, Error> {
        let name = name.as_ref();
        if let Some(id) = self.lookup(name) {
            return Ok(Some((id, self.tag(id)?)));
        }
        match missing {
            Missing::Ignore => Ok(None),
            Missing::Error => {
                let name = String::from_utf8_lossy(name).into_owned();
                debug!("cannot find {} in hash table", name);
                Err(Error::NameNotFound(name))
            }
        }
    }

    /// The id `name` is findable under, if any.
    pub fn lookup(&self, name: impl AsRef<[u8]>) -> Option<NameId> {
        self.index.lookup(name.as_ref(), &self.arena)
    }

    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of records, including the sentinel. Always at least 1.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Number of records excluding the sentinel.
    pub fn name_count(&self) -> usize {
        self.arena.len() - 1
    }

    /// Whether the table holds nothing but the sentinel.
    pub fn is_empty(&self) -> bool {
        self.name_count() == 0
    }

    /// The sentinel record at id 0.
    pub fn sentinel(&self) -> &InternedName {
        self.arena.first()
    }

    /// All records in id order, starting with the sentinel.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (NameId, &InternedName)> + '_ {
        self.arena.iter()
    }

    pub fn mismatch_policy(&self) -> MismatchPolicy {
        self.mismatch
    }

    pub fn set_mismatch_policy(&mut self, mismatch: MismatchPolicy) {
        self.mismatch = mismatch;
    }

    // Allocates with tag 0 and no mismatch check.
    pub(crate) fn push_name(&mut self, name: &[u8], index: bool) -> NameId {
        let id = self.arena.alloc(InternedName::new(name, 0));
        if index {
            self.index.insert(id, &self.arena);
        }
        id
    }

    /// The id the next allocation will receive.
    pub(crate) fn next_id(&self) -> NameId {
        self.arena.next_id()
    }

    // Applies the mismatch policy for a record about to be allocated.
    pub(crate) fn check_next_id(&self, expected: NameId) -> Result<(), Error> {
        self.check_id_at(expected, self.next_id())
    }

    pub(crate) fn check_id_at(&self, expected: NameId, assigned: NameId) -> Result<(), Error> {
        if assigned == expected {
            return Ok(());
        }
        match self.mismatch {
            MismatchPolicy::Lenient => {
                warn!("mismatch between {} and {} name ids", assigned, expected);
                Ok(())
            }
            MismatchPolicy::Strict => Err(Error::IndexMismatch { expected, assigned }),
        }
    }
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<NameTable> for Vec<InternedName> {
    fn from(table: NameTable) -> Self {
        table.arena.into_records()
    }
}

/// Rebuild a table from its records, sentinel first. Every record is
/// indexed, in id order, and the mismatch policy is the default.
///
/// Fails with [`Error::MissingSentinel`] for an empty list and with
/// [`Error::SentinelTag`] if the first record's tag isn't 0.
impl TryFrom<Vec<InternedName>> for NameTable {
    type Error = Error;

    fn try_from(records: Vec<InternedName>) -> Result<Self, Error> {
        let sentinel = records.first().ok_or(Error::MissingSentinel)?;
        if sentinel.tag() != 0 {
            return Err(Error::SentinelTag(sentinel.tag()));
        }
        let mut table = Self {
            arena: Arena::with_capacity(records.len()),
            index: HashIndex::with_capacity(records.len()),
            mismatch: MismatchPolicy::default(),
        };
        for record in records {
            let id = table.arena.alloc(record);
            table.index.insert(id, &table.arena);
        }
        Ok(table)
    }
}
