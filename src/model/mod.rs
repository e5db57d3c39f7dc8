pub use self::document::{Document, Entries};
pub(crate) use self::scope::Scope;

mod document;
mod scope;
