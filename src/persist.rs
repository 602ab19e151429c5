// Text persistence for name tables.
//
// The format is line oriented and whitespace tokenized:
//
//   <label> NAMES <count>
//   <id> <name>
//   ...
//
// Records are written in id order starting at 1; the sentinel is never
// written. Tags are not persisted.

use std::io;

use log::debug;

use crate::error::{Error, ParseErrorKind};
use crate::id::NameId;
use crate::table::NameTable;

/// The word written between the label and the count in the header.
pub const HEADER_WORD: &str = "NAMES";

/// The header line of a persisted name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The caller supplied type label.
    pub label: String,
    /// The second header token. Written as `NAMES` but not checked on read.
    pub word: String,
    /// Number of records that follow, excluding the sentinel.
    pub count: usize,
}

fn is_token(bytes: &[u8]) -> bool {
    !bytes.is_empty() && !bytes.iter().any(u8::is_ascii_whitespace)
}

fn tokens(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty())
}

fn parse_u32(token: &[u8]) -> Option<u32> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

// Yields the next line holding at least one token, with its 1-based number.
fn next_line<I>(lines: &mut I) -> Result<Option<(usize, Vec<u8>)>, Error>
where
    I: Iterator<Item = (usize, io::Result<Vec<u8>>)>,
{
    for (i, line) in lines {
        let line = line?;
        if tokens(&line).next().is_some() {
            return Ok(Some((i + 1, line)));
        }
    }
    Ok(None)
}

fn parse_header(line_nr: usize, line: &[u8]) -> Result<Header, Error> {
    let parse_error = |kind| Error::Parse {
        line: line_nr,
        kind,
    };
    let parts: Vec<&[u8]> = tokens(line).collect();
    let [label, word, count] = parts[..] else {
        return Err(parse_error(ParseErrorKind::BadHeader));
    };
    let count = parse_u32(count).ok_or_else(|| parse_error(ParseErrorKind::BadCount))?;
    Ok(Header {
        label: String::from_utf8_lossy(label).into_owned(),
        word: String::from_utf8_lossy(word).into_owned(),
        count: count as usize,
    })
}

fn parse_record(line_nr: usize, line: &[u8]) -> Result<(NameId, Vec<u8>), Error> {
    let parse_error = |kind| Error::Parse {
        line: line_nr,
        kind,
    };
    let parts: Vec<&[u8]> = tokens(line).collect();
    let [id, name] = parts[..] else {
        return Err(parse_error(ParseErrorKind::BadRecord));
    };
    let id = parse_u32(id).ok_or_else(|| parse_error(ParseErrorKind::BadId))?;
    Ok((NameId::new(id), name.to_vec()))
}

impl NameTable {
    /// Write every name except the sentinel to `w`, under `label`.
    ///
    /// Names are checked before anything is written: a name that is empty
    /// or contains whitespace couldn't be read back and fails with
    /// [`Error::UnencodableName`].
    pub fn write_db<W: io::Write>(&self, w: &mut W, label: &str) -> Result<(), Error> {
        if !is_token(label.as_bytes()) {
            return Err(Error::UnencodableLabel(label.to_string()));
        }
        if let Some((id, _)) = self
            .iter()
            .skip(1)
            .find(|(_, record)| !is_token(record.name()))
        {
            return Err(Error::UnencodableName(id));
        }
        writeln!(w, "{} {} {}", label, HEADER_WORD, self.name_count())?;
        for (id, record) in self.iter().skip(1) {
            write!(w, "{} ", id)?;
            w.write_all(record.name())?;
            w.write_all(b"\n")?;
        }
        debug!("wrote {} {} names", self.name_count(), label);
        Ok(())
    }

    /// Read names written by [`NameTable::write_db`] from `r` and append
    /// them, indexed and with tag 0, in the order they appear.
    ///
    /// The table is normally fresh and built with the same sentinel as the
    /// one written, so that every record receives the id it was saved
    /// under. Records whose saved id differs from the id they receive are
    /// handled by the table's [`MismatchPolicy`](crate::MismatchPolicy).
    ///
    /// Reading is all or nothing: the whole input is parsed and checked
    /// first, so on error the table is left as it was. Tags have to be
    /// reattached afterward with [`NameTable::add_data`].
    pub fn read_db<R: io::BufRead>(&mut self, r: R) -> Result<Header, Error> {
        let mut lines = r.split(b'\n').enumerate();

        let (line_nr, line) = next_line(&mut lines)?.ok_or(Error::Parse {
            line: 1,
            kind: ParseErrorKind::MissingHeader,
        })?;
        let header = parse_header(line_nr, &line)?;

        let mut records = Vec::new();
        let mut last_line = line_nr;
        for _ in 0..header.count {
            let (line_nr, line) = next_line(&mut lines)?.ok_or(Error::Parse {
                line: last_line + 1,
                kind: ParseErrorKind::UnexpectedEof,
            })?;
            records.push(parse_record(line_nr, &line)?);
            last_line = line_nr;
        }

        let start = self.next_id().index();
        for (offset, (expected, _)) in records.iter().enumerate() {
            self.check_id_at(*expected, NameId::from_index(start + offset))?;
        }
        for (_, name) in &records {
            self.push_name(name, true);
        }
        debug!("read {} {} names", header.count, header.label);
        Ok(header)
    }
}
