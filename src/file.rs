use crate::error::{Error, Result};
use crate::model::Document;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A [`Document`] together with the file it was read from.
#[derive(Debug, Clone)]
pub struct IniFile {
    path: PathBuf,
    document: Document,
}

impl IniFile {
    /// Join `segments` into a path, then read and parse that file.
    pub fn open<I, P>(segments: I) -> Result<IniFile>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let path = join(segments);
        let document = load(&path)?;
        Ok(IniFile { path, document })
    }

    /// Read the file again and replace the current content. If reading or
    /// parsing fails, the content loaded previously is kept.
    pub fn reload(&mut self) -> Result<()> {
        match load(&self.path) {
            Ok(document) => {
                self.document = document;
                Ok(())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "reload failed, keeping previous content");
                Err(e)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Deref for IniFile {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}

pub(crate) fn join<I, P>(segments: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    segments.into_iter().fold(PathBuf::new(), |mut path, segment| {
        path.push(segment);
        path
    })
}

pub(crate) fn load(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })?;
    let document = Document::parse(&text)?;
    debug!(
        path = %path.display(),
        keys = document.top_level().len(),
        sections = document.section_count(),
        "configuration file loaded"
    );
    Ok(document)
}

#[test]
fn test_join() {
    assert_eq!(join(["etc", "app", "app.ini"]), Path::new("etc/app/app.ini"));
    assert_eq!(join(["/etc", "app.ini"]), Path::new("/etc/app.ini"));
    assert_eq!(join(Vec::<&str>::new()), PathBuf::new());
}

#[test]
fn test_missing_file() {
    match IniFile::open(["this", "file", "does-not-exist.ini"]) {
        Err(Error::Io { path, source }) => {
            assert_eq!(path, Path::new("this/file/does-not-exist.ini"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
