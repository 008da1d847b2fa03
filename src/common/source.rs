use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    rc::Rc,
};

/// Some literal Monkey source code: a REPL line, a file on disk, a string
/// embedded in a test. Essentially a string with a path, the path serving
/// as the source's name for diagnostics. Sources without a real path point
/// to `./source`.
#[derive(Debug, PartialEq, Eq)]
pub struct Source {
    pub contents: String,
    pub path: PathBuf,
}

impl Source {
    /// Build a `Source` from a string and a path. Does not check that the
    /// path (if it exists on disk) actually contains these contents;
    /// `Source::path` or `Source::source` should be preferred.
    pub fn new(source: &str, path: &Path) -> Rc<Source> {
        Rc::new(Source {
            contents: source.to_string(),
            path: path.to_owned(),
        })
    }

    /// Build a `Source` by reading a file from disk.
    pub fn path(path: &Path) -> std::io::Result<Rc<Source>> {
        let mut source = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut source)?;

        Ok(Source::new(&source, path))
    }

    /// Build a `Source` from a bare string, e.g. a REPL line. Points at
    /// `./source`.
    pub fn source(source: &str) -> Rc<Source> {
        Source::new(source, &PathBuf::from("./source"))
    }
}
