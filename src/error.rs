use std::path::PathBuf;
use thiserror::Error;

/// Reasons why some text cannot be turned into a [`Document`](crate::Document).
///
/// Line numbers are 1-based and count every line of the input, including
/// blank and comment lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line_number}: expected exactly one '=' in {line:?}")]
    MalformedLine { line: String, line_number: usize },

    #[error("line {line_number}: key {key:?} used multiple times{}", in_section(.section))]
    DuplicateKey {
        key: String,
        section: Option<String>,
        line_number: usize,
    },

    #[error("line {line_number}: section {name:?} redefined")]
    DuplicateSection { name: String, line_number: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn in_section(section: &Option<String>) -> String {
    section
        .as_ref()
        .map(|name| format!(" in section {name:?}"))
        .unwrap_or_default()
}

#[test]
fn test_messages() {
    let e = ParseError::DuplicateKey {
        key: "A".into(),
        section: None,
        line_number: 2,
    };
    assert_eq!(e.to_string(), r#"line 2: key "A" used multiple times"#);
    let e = ParseError::DuplicateKey {
        key: "A".into(),
        section: Some("S".into()),
        line_number: 4,
    };
    assert_eq!(
        e.to_string(),
        r#"line 4: key "A" used multiple times in section "S""#
    );
    let e = ParseError::MalformedLine {
        line: "a=b=c".into(),
        line_number: 1,
    };
    assert_eq!(e.to_string(), r#"line 1: expected exactly one '=' in "a=b=c""#);
}
