//! Reader for simple INI-style configuration files.
//!
//! A file holds `key=value` lines, `[section]` headers, blank lines and
//! comment lines starting with `#` or `;`. Keys before the first header are
//! top-level keys; every key after a header belongs to that section, up to
//! the next header. Keys and values are plain strings, used verbatim except
//! for a trailing carriage return being dropped from values.
//!
//! ```no_run
//! let config = inikv::open(["/etc", "app", "app.ini"])?;
//! let name = config.get("name");
//! let port = config.get_section_value("server", "port");
//! # Ok::<(), inikv::Error>(())
//! ```

pub use crate::error::{Error, ParseError, Result};
pub use crate::file::IniFile;
pub use crate::model::{Document, Entries};
pub use crate::shared::SharedIniFile;

mod error;
mod file;
mod model;
mod parser;
mod shared;

/// Shortcut for [`IniFile::open`].
pub fn open<I, P>(segments: I) -> Result<IniFile>
where
    I: IntoIterator<Item = P>,
    P: AsRef<std::path::Path>,
{
    IniFile::open(segments)
}
