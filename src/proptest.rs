//! Proptest support for name tables
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. This module helps you write one by generating names
//! that survive the text format, and tables built from them.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! nametable = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use ahash::HashSet;
use proptest::prelude::*;

use crate::table::NameTable;

// No whitespace, so every generated name can be written and read back.
const NAME: &str = "[a-zA-Z_][a-zA-Z0-9_/.\\[\\]$]{0,15}";
const SMALL_NAMES: &[&str] = &["vdd", "vss", "clk", "rst", "net1", "net2"];

/// Generate a single name that can be persisted.
pub fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(SMALL_NAMES).prop_map(|name| name.to_string()),
        NAME,
    ]
}

/// Generate a list of names, possibly with repeats.
pub fn arb_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_name(), 0..max)
}

/// Generate a list of distinct names.
pub fn arb_unique_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    arb_names(max).prop_map(|names| unduplicate_names(&names))
}

fn unduplicate_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::default();
    names
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Generate a name table filled through dedup insertion, each name tagged
/// with an arbitrary value.
///
/// Example:
///
/// ```notrust
/// use nametable::proptest::arb_name_table;
///
/// proptest! {
///   #[test]
///   fn test_write_read(table in arb_name_table(32)) {
///     let mut out = Vec::new();
///     table.write_db(&mut out, "nets").unwrap();
///     let mut copy = NameTable::new();
///     prop_assert!(copy.read_db(out.as_slice()).is_ok());
///   }
/// }
/// ```
pub fn arb_name_table(max: usize) -> impl Strategy<Value = NameTable> {
    prop::collection::vec((arb_name(), any::<u32>()), 0..max).prop_map(|entries| {
        let mut table = NameTable::with_capacity(entries.len() + 1);
        for (name, tag) in entries {
            table.add_new_name(name, tag);
        }
        table
    })
}
