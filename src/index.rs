// Name to id lookup.
//
// The index never stores name bytes. It buckets ids by the hash of their
// name and compares candidates against the arena, so the arena remains the
// only owner of every interned name.

use ahash::{HashMap, HashMapExt, RandomState};
use smallvec::SmallVec;

use crate::arena::Arena;
use crate::id::NameId;

type Bucket = SmallVec<[NameId; 1]>;

#[derive(Debug, Clone)]
pub(crate) struct HashIndex {
    state: RandomState,
    buckets: HashMap<u64, Bucket>,
}

impl HashIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            state: RandomState::new(),
            buckets: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    fn hash(&self, name: &[u8]) -> u64 {
        self.state.hash_one(name)
    }

    /// Make the name of `id` findable. `id` must already be allocated in
    /// `arena`. An existing entry for the same name is replaced, so the most
    /// recently inserted id shadows earlier ones.
    pub(crate) fn insert(&mut self, id: NameId, arena: &Arena) {
        let name = arena.name_of(id);
        let hash = self.hash(name);
        let bucket = self.buckets.entry(hash).or_default();
        match bucket
            .iter_mut()
            .find(|other| arena.name_of(**other) == name)
        {
            Some(slot) => *slot = id,
            None => bucket.push(id),
        }
    }

    pub(crate) fn lookup(&self, name: &[u8], arena: &Arena) -> Option<NameId> {
        self.buckets
            .get(&self.hash(name))?
            .iter()
            .copied()
            .find(|id| arena.name_of(*id) == name)
    }
}
