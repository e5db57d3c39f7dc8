use eyre::WrapErr;
use inikv::{Document, Error, IniFile, ParseError, SharedIniFile};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const SAMPLE: &str = "\
# sample configuration\r
name=demo\r
\r
[server]\r
host=127.0.0.1\r
port=8080\r
; trailing comment\r
[client]\r
retries=3\r
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn write(dir: &Path, name: &str, content: &str) -> eyre::Result<()> {
    fs::write(dir.join(name), content).wrap_err_with(|| format!("cannot write {name}"))
}

#[test]
fn open_joins_segments() -> eyre::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    fs::create_dir(dir.path().join("conf"))?;
    write(&dir.path().join("conf"), "app.ini", SAMPLE)?;
    let ini = inikv::open([dir.path(), Path::new("conf"), Path::new("app.ini")])?;
    assert_eq!(ini.path(), dir.path().join("conf").join("app.ini"));
    assert_eq!(ini.get("name"), Some("demo"));
    assert_eq!(ini.get_section_value("server", "host"), Some("127.0.0.1"));
    assert_eq!(ini.get_section_value("server", "port"), Some("8080"));
    assert_eq!(ini.get_section_value("server", "retries"), None);
    assert_eq!(ini.get_section_value("client", "retries"), Some("3"));
    assert_eq!(ini.get("missing"), None);
    assert_eq!(ini.get_section_value("NoSuch", "x"), None);
    Ok(())
}

#[test]
fn open_reports_parse_errors() -> eyre::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    write(dir.path(), "bad.ini", "A=1\n[S]\nB=2\n[S]\n")?;
    match IniFile::open([dir.path(), Path::new("bad.ini")]) {
        Err(Error::Parse(ParseError::DuplicateSection { name, line_number })) => {
            assert_eq!(name, "S");
            assert_eq!(line_number, 4);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn open_rejects_invalid_utf8() -> eyre::Result<()> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("binary.ini"), [b'A', b'=', 0xff, b'\n'])?;
    match IniFile::open([dir.path().join("binary.ini")]) {
        Err(Error::Io { source, .. }) => {
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData)
        }
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn reload_is_idempotent() -> eyre::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    write(dir.path(), "app.ini", SAMPLE)?;
    let mut ini = IniFile::open([dir.path().join("app.ini")])?;
    let before = ini.document().clone();
    ini.reload()?;
    assert_eq!(ini.document(), &before);
    Ok(())
}

#[test]
fn reload_replaces_everything() -> eyre::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    write(dir.path(), "app.ini", SAMPLE)?;
    let mut ini = IniFile::open([dir.path().join("app.ini")])?;
    write(dir.path(), "app.ini", "name=other\n[server]\nport=9090\n")?;
    ini.reload()?;
    assert_eq!(ini.get("name"), Some("other"));
    assert_eq!(ini.get_section_value("server", "host"), None);
    assert_eq!(ini.get_section_value("server", "port"), Some("9090"));
    assert!(!ini.has_section("client"));
    assert_eq!(ini.section_count(), 1);
    Ok(())
}

#[test]
fn failed_reload_keeps_previous_content() -> eyre::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    write(dir.path(), "app.ini", SAMPLE)?;
    let mut ini = IniFile::open([dir.path().join("app.ini")])?;
    let before = ini.document().clone();
    write(dir.path(), "app.ini", "name=demo\nname=again\n")?;
    assert!(matches!(
        ini.reload(),
        Err(Error::Parse(ParseError::DuplicateKey { .. }))
    ));
    assert_eq!(ini.document(), &before);
    fs::remove_file(dir.path().join("app.ini"))?;
    assert!(matches!(ini.reload(), Err(Error::Io { .. })));
    assert_eq!(ini.document(), &before);
    Ok(())
}

#[test]
fn shared_snapshots_survive_reload() -> eyre::Result<()> {
    init_tracing();
    let dir = TempDir::new()?;
    write(dir.path(), "app.ini", SAMPLE)?;
    let shared = Arc::new(SharedIniFile::open([dir.path().join("app.ini")])?);
    let old = shared.snapshot();
    write(dir.path(), "app.ini", "name=new\n")?;
    shared.reload()?;
    assert_eq!(old.get("name"), Some("demo"));
    assert_eq!(shared.get("name").as_deref(), Some("new"));
    assert_eq!(shared.get_section_value("server", "port"), None);

    let readers = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..100 {
                    let name = shared.get("name");
                    assert!(matches!(name.as_deref(), Some("new" | "newer")));
                }
            })
        })
        .collect::<Vec<_>>();
    write(dir.path(), "app.ini", "name=newer\n")?;
    shared.reload()?;
    for reader in readers {
        reader.join().map_err(|_| eyre::eyre!("reader thread panicked"))?;
    }
    assert_eq!(shared.get("name").as_deref(), Some("newer"));
    Ok(())
}

#[test]
fn document_from_str() -> eyre::Result<()> {
    let d: Document = "A=1\n[S]\nB=2\n[T]\nC=3\n".parse()?;
    assert_eq!(d.get("A"), Some("1"));
    assert_eq!(d.get_section_value("S", "B"), Some("2"));
    assert_eq!(d.get_section_value("S", "C"), None);
    assert_eq!(d.get_section_value("T", "C"), Some("3"));
    let mut names = d.section_names().collect::<Vec<_>>();
    names.sort_unstable();
    assert_eq!(names, vec!["S", "T"]);
    Ok(())
}
