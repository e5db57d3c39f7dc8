/// Key space a key/value line is stored into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    TopLevel,
    Section(&'a str),
}

impl<'a> Scope<'a> {
    pub fn section_name(self) -> Option<&'a str> {
        match self {
            Scope::TopLevel => None,
            Scope::Section(name) => Some(name),
        }
    }
}
