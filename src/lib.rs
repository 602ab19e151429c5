#![forbid(unsafe_code)]

//! A string interning table with stable numeric ids.
//!
//! [`NameTable`] maps names (arbitrary byte strings, compared byte for byte)
//! to small dense [`NameId`]s handed out in insertion order. Code elsewhere
//! can store those ids and use them as array indices instead of keeping the
//! names around. Each name can carry a `u32` tag.
//!
//! Id 0 is a sentinel record, `zeroName` unless configured otherwise, that
//! stands for "no name". Ids are never reused.
//!
//! A table can be written to a simple text format and read back into a
//! fresh table with exactly the same ids:
//!
//! ```rust
//! use nametable::NameTable;
//!
//! let mut table = NameTable::new();
//! table.add_new_name("vdd", 1);
//! table.add_new_name("clk", 2);
//!
//! let mut out = Vec::new();
//! table.write_db(&mut out, "nets")?;
//! assert_eq!(out, b"nets NAMES 2\n1 vdd\n2 clk\n");
//!
//! let mut copy = NameTable::new();
//! let header = copy.read_db(out.as_slice())?;
//! assert_eq!(header.count, 2);
//! assert_eq!(copy.lookup("clk"), table.lookup("clk"));
//! # Ok::<(), nametable::Error>(())
//! ```
//!
//! Tags are not part of the text format; reattach them with
//! [`NameTable::add_data`].

mod arena;
pub mod config;
mod error;
mod id;
mod index;
mod persist;
#[cfg(feature = "proptest")]
pub mod proptest;
mod table;

pub use arena::InternedName;
pub use config::{Config, MismatchPolicy};
pub use error::{Error, ParseErrorKind};
pub use id::NameId;
pub use persist::{Header, HEADER_WORD};
pub use table::{Interned, Missing, NameTable};
