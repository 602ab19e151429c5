use insta::assert_snapshot;
use rstest::rstest;

use nametable::{Config, Error, MismatchPolicy, NameId, NameTable, ParseErrorKind};

fn abc() -> NameTable {
    let mut table = NameTable::new();
    table.add_new_name("a", 10);
    table.add_new_name("b", 20);
    table.add_new_name("c", 30);
    table
}

fn write(table: &NameTable, label: &str) -> String {
    let mut out = Vec::new();
    table.write_db(&mut out, label).unwrap();
    String::from_utf8(out).unwrap()
}

fn strict() -> NameTable {
    NameTable::with_config(&Config {
        mismatch: MismatchPolicy::Strict,
        ..Config::default()
    })
}

#[test]
fn test_write_format() {
    assert_snapshot!(write(&abc(), "nets"), @r###"
    nets NAMES 3
    1 a
    2 b
    3 c
    "###);
}

#[test]
fn test_write_empty_table() {
    assert_eq!(write(&NameTable::new(), "layers"), "layers NAMES 0\n");
}

#[test]
fn test_round_trip() {
    let table = abc();
    let saved = write(&table, "nets");

    let mut loaded = NameTable::new();
    let header = loaded.read_db(saved.as_bytes()).unwrap();
    assert_eq!(header.label, "nets");
    assert_eq!(header.word, "NAMES");
    assert_eq!(header.count, 3);

    for (i, name) in [(1, "a"), (2, "b"), (3, "c")] {
        let id = NameId::new(i);
        assert_eq!(loaded.name(id).unwrap(), name.as_bytes());
        assert_eq!(loaded.lookup(name), Some(id));
        // tags are not persisted
        assert_eq!(loaded.tag(id).unwrap(), 0);
    }
    assert_eq!(write(&loaded, "nets"), saved);
}

#[test]
fn test_round_trip_then_reattach_tags() {
    let table = abc();
    let saved = write(&table, "nets");
    let mut loaded = NameTable::new();
    loaded.read_db(saved.as_bytes()).unwrap();
    for (id, record) in table.iter().skip(1) {
        loaded.add_data(id, record.tag()).unwrap();
    }
    assert_eq!(loaded.tag(NameId::new(2)).unwrap(), 20);
}

#[test]
fn test_read_tolerates_blank_lines_and_crlf() {
    let input = "\nnets NAMES 2\r\n\n1 vdd\r\n   \n2   vss\r\n";
    let mut table = NameTable::new();
    let header = table.read_db(input.as_bytes()).unwrap();
    assert_eq!(header.count, 2);
    assert_eq!(table.name(NameId::new(2)).unwrap(), b"vss");
}

#[test]
fn test_read_ignores_trailing_content() {
    let input = "nets NAMES 1\n1 vdd\n2 extra\n";
    let mut table = NameTable::new();
    table.read_db(input.as_bytes()).unwrap();
    assert_eq!(table.len(), 2);
    assert!(!table.contains("extra"));
}

#[rstest]
#[case("", 1, ParseErrorKind::MissingHeader)]
#[case("nets NAMES\n", 1, ParseErrorKind::BadHeader)]
#[case("nets NAMES 2 extra\n", 1, ParseErrorKind::BadHeader)]
#[case("nets NAMES many\n", 1, ParseErrorKind::BadCount)]
#[case("nets NAMES 2\n1 a\n", 3, ParseErrorKind::UnexpectedEof)]
#[case("nets NAMES 2\n1 a\n2\n", 3, ParseErrorKind::BadRecord)]
#[case("nets NAMES 2\n1 a\n\n2 b c\n", 4, ParseErrorKind::BadRecord)]
#[case("nets NAMES 1\none a\n", 2, ParseErrorKind::BadId)]
fn test_read_parse_errors(
    #[case] input: &str,
    #[case] expected_line: usize,
    #[case] expected_kind: ParseErrorKind,
) {
    let mut table = NameTable::new();
    let err = table.read_db(input.as_bytes()).unwrap_err();
    match err {
        Error::Parse { line, kind } => {
            assert_eq!(line, expected_line);
            assert_eq!(kind, expected_kind);
        }
        other => panic!("unexpected error {}", other),
    }
}

#[test]
fn test_read_is_atomic() {
    let input = "nets NAMES 3\n1 a\n2 b\n3 c d\n";
    let mut table = NameTable::new();
    assert!(table.read_db(input.as_bytes()).is_err());
    assert_eq!(table.len(), 1);
    assert!(!table.contains("a"));
}

#[test]
fn test_lenient_mismatch_continues() {
    let input = "nets NAMES 2\n1 a\n5 b\n";
    let mut table = NameTable::new();
    assert_eq!(table.mismatch_policy(), MismatchPolicy::Lenient);
    table.read_db(input.as_bytes()).unwrap();
    // b drifts to the id allocation assigns
    assert_eq!(table.lookup("b"), Some(NameId::new(2)));
}

#[test]
fn test_strict_mismatch_rejects_whole_read() {
    let input = "nets NAMES 2\n1 a\n5 b\n";
    let mut table = strict();
    let err = table.read_db(input.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        Error::IndexMismatch { expected, assigned }
            if expected == NameId::new(5) && assigned == NameId::new(2)
    ));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_strict_read_into_non_fresh_table() {
    let mut table = strict();
    table.add_new_name("already", 0);
    let err = table
        .read_db("nets NAMES 1\n1 a\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, Error::IndexMismatch { .. }));
    assert!(!table.contains("a"));
}

#[test]
fn test_strict_read_matching_ids() {
    let mut table = strict();
    table.read_db(write(&abc(), "nets").as_bytes()).unwrap();
    assert_eq!(table.lookup("c"), Some(NameId::new(3)));
}

#[test]
fn test_header_word_not_checked() {
    let mut table = NameTable::new();
    let header = table.read_db("layers LAYERS 1\n1 metal1\n".as_bytes()).unwrap();
    assert_eq!(header.word, "LAYERS");
    assert_eq!(table.lookup("metal1"), Some(NameId::new(1)));
}

#[test]
fn test_write_unencodable() {
    let mut table = abc();
    let empty = table.add_new_name("", 0).id();
    let mut out = Vec::new();
    let err = table.write_db(&mut out, "nets").unwrap_err();
    assert!(matches!(err, Error::UnencodableName(id) if id == empty));
    assert!(matches!(
        abc().write_db(&mut out, "two words"),
        Err(Error::UnencodableLabel(_))
    ));
}

#[test]
fn test_write_io_error() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = abc().write_db(&mut Broken, "nets").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
