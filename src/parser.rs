use crate::error::ParseError;
use crate::model::{Document, Scope};

/// Classification of a single source line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Header(&'a str),
    Pair(&'a str, &'a str),
    Malformed,
}

/// Parse the whole text in one pass. Keys go to the top level until the first
/// section header; from then on every key belongs to the most recently
/// opened section, and the top level is never written to again.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let mut document = Document::default();
    let mut scope = Scope::TopLevel;
    for (line_number, line) in (1..).zip(text.split('\n')) {
        match classify(line) {
            Line::Skip => (),
            Line::Header(name) => {
                document.open_section(name, line_number)?;
                scope = Scope::Section(name);
            }
            Line::Pair(key, value) => document.insert(scope, key, value, line_number)?,
            Line::Malformed => {
                return Err(ParseError::MalformedLine {
                    line: strip_cr(line).to_owned(),
                    line_number,
                });
            }
        }
    }
    Ok(document)
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() || line == "\r" || line.starts_with(['#', ';']) {
        return Line::Skip;
    }
    if let Some(name) = section_name(line) {
        return Line::Header(name);
    }
    let mut parts = line.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Line::Pair(key, strip_cr(value)),
        _ => Line::Malformed,
    }
}

/// A line holding both brackets is a header, named by what lies between the
/// first `[` and the `]` after it (or the end of the line if none follows).
fn section_name(line: &str) -> Option<&str> {
    if !line.contains(']') {
        return None;
    }
    let (_, rest) = line.split_once('[')?;
    Some(match rest.find(']') {
        Some(end) => &rest[..end],
        None => strip_cr(rest),
    })
}

fn strip_cr(s: &str) -> &str {
    s.strip_suffix('\r').unwrap_or(s)
}

#[test]
fn test_classify() {
    assert_eq!(classify(""), Line::Skip);
    assert_eq!(classify("\r"), Line::Skip);
    assert_eq!(classify("# a=b=c"), Line::Skip);
    assert_eq!(classify("; [S]"), Line::Skip);
    assert_eq!(classify("[S]"), Line::Header("S"));
    assert_eq!(classify("  [S] trailing\r"), Line::Header("S"));
    assert_eq!(classify("x]y[z\r"), Line::Header("z"));
    assert_eq!(classify("[]"), Line::Header(""));
    assert_eq!(classify("a=b\r"), Line::Pair("a", "b"));
    assert_eq!(classify(" a = b "), Line::Pair(" a ", " b "));
    assert_eq!(classify("a="), Line::Pair("a", ""));
    assert_eq!(classify("a"), Line::Malformed);
    assert_eq!(classify("a=b=c"), Line::Malformed);
    assert_eq!(classify(" "), Line::Malformed);
}

#[test]
fn test_sections_take_rest_of_file() {
    let d = parse("A=1\n[S]\nB=2\n[T]\nC=3\n").unwrap();
    assert_eq!(d.get("A"), Some("1"));
    assert_eq!(d.get_section_value("S", "B"), Some("2"));
    assert_eq!(d.get_section_value("S", "C"), None);
    assert_eq!(d.get_section_value("T", "C"), Some("3"));
    assert_eq!(d.top_level().len(), 1);
    assert_eq!(d.section_count(), 2);
}

#[test]
fn test_no_return_to_top_level() {
    let d = parse("[S]\n\n# end of S?\nA=1\n").unwrap();
    assert_eq!(d.get("A"), None);
    assert_eq!(d.get_section_value("S", "A"), Some("1"));
}

#[test]
fn test_crlf() {
    let d = parse("A=1\r\n\r\n[S]\r\nB= 2 \r\n").unwrap();
    assert_eq!(d.get("A"), Some("1"));
    assert_eq!(d.get_section_value("S", "B"), Some(" 2 "));
}

#[test]
fn test_duplicate_top_level_key() {
    assert_eq!(
        parse("A=1\nA=2\n"),
        Err(ParseError::DuplicateKey {
            key: "A".into(),
            section: None,
            line_number: 2,
        })
    );
}

#[test]
fn test_same_key_in_different_scopes() {
    let d = parse("A=0\n[S]\nA=1\n[T]\nA=2\n").unwrap();
    assert_eq!(d.get("A"), Some("0"));
    assert_eq!(d.get_section_value("S", "A"), Some("1"));
    assert_eq!(d.get_section_value("T", "A"), Some("2"));
}

#[test]
fn test_duplicate_section() {
    assert_eq!(
        parse("[S]\nA=1\n[T]\n[S]\n"),
        Err(ParseError::DuplicateSection {
            name: "S".into(),
            line_number: 4,
        })
    );
}

#[test]
fn test_malformed_line() {
    assert_eq!(
        parse("# header\nA=1\nB\n"),
        Err(ParseError::MalformedLine {
            line: "B".into(),
            line_number: 3,
        })
    );
    assert_eq!(
        parse("[S]\nurl=http://h/?a=b\r\n"),
        Err(ParseError::MalformedLine {
            line: "url=http://h/?a=b".into(),
            line_number: 2,
        })
    );
}

#[test]
fn test_empty_input() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n\r\n; only comments\n").unwrap().is_empty());
}
