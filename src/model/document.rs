use super::Scope;
use crate::error::ParseError;
use crate::parser;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::str::FromStr;
use tracing::trace;

/// Key/value pairs of one scope.
pub type Entries = HashMap<String, String>;

/// Parsed content of an INI file: keys appearing before the first section
/// header, and one set of keys per named section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    top_level: Entries,
    sections: HashMap<String, Entries>,
}

impl Document {
    pub fn parse(text: &str) -> Result<Document, ParseError> {
        parser::parse(text)
    }

    /// Value of a key defined before any section header.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.top_level.get(key).map(String::as_str)
    }

    /// Value of `key` inside `section`. A missing section and a missing key
    /// both give `None`.
    pub fn get_section_value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn top_level(&self) -> &Entries {
        &self.top_level
    }

    pub fn section(&self, name: &str) -> Option<&Entries> {
        self.sections.get(name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Section names, in no particular order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty() && self.sections.is_empty()
    }

    pub(crate) fn open_section(&mut self, name: &str, line_number: usize) -> Result<(), ParseError> {
        match self.sections.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(ParseError::DuplicateSection {
                name: name.to_owned(),
                line_number,
            }),
            Entry::Vacant(e) => {
                trace!(section = name, line_number, "section opened");
                e.insert(Entries::new());
                Ok(())
            }
        }
    }

    pub(crate) fn insert(
        &mut self,
        scope: Scope<'_>,
        key: &str,
        value: &str,
        line_number: usize,
    ) -> Result<(), ParseError> {
        let entries = match scope {
            Scope::TopLevel => &mut self.top_level,
            Scope::Section(name) => self.sections.entry(name.to_owned()).or_default(),
        };
        match entries.entry(key.to_owned()) {
            Entry::Occupied(_) => Err(ParseError::DuplicateKey {
                key: key.to_owned(),
                section: scope.section_name().map(String::from),
                line_number,
            }),
            Entry::Vacant(e) => {
                trace!(section = scope.section_name(), key, value, "key stored");
                e.insert(value.to_owned());
                Ok(())
            }
        }
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}

#[test]
fn test_lookups() {
    let mut d = Document::default();
    assert!(d.is_empty());
    d.insert(Scope::TopLevel, "A", "1", 1).unwrap();
    d.open_section("S", 2).unwrap();
    d.insert(Scope::Section("S"), "B", "2", 3).unwrap();
    assert_eq!(d.get("A"), Some("1"));
    assert_eq!(d.get("B"), None);
    assert_eq!(d.get_section_value("S", "B"), Some("2"));
    assert_eq!(d.get_section_value("S", "A"), None);
    assert_eq!(d.get_section_value("T", "B"), None);
    assert!(d.has_section("S"));
    assert_eq!(d.section_names().collect::<Vec<_>>(), vec!["S"]);
    assert_eq!(d.section_count(), 1);
    assert!(!d.is_empty());
}

#[test]
fn test_scopes_are_independent() {
    let mut d = Document::default();
    d.insert(Scope::TopLevel, "A", "1", 1).unwrap();
    d.open_section("S", 2).unwrap();
    d.insert(Scope::Section("S"), "A", "2", 3).unwrap();
    assert_eq!(
        d.insert(Scope::Section("S"), "A", "3", 4),
        Err(ParseError::DuplicateKey {
            key: "A".into(),
            section: Some("S".into()),
            line_number: 4,
        })
    );
    assert_eq!(
        d.open_section("S", 5),
        Err(ParseError::DuplicateSection {
            name: "S".into(),
            line_number: 5,
        })
    );
    assert_eq!(d.get("A"), Some("1"));
    assert_eq!(d.get_section_value("S", "A"), Some("2"));
}
