//! The artifact tree produced by renderers and the writer which puts it on
//! disk.

use std::path::Path;

use eyre::{Result, WrapErr};

/// Mime types attached to rendered artifacts.
pub mod mime {
    /// A directory.
    pub const DIRECTORY: &str = "application/x-directory";
    /// Go source code.
    pub const GO_SOURCE: &str = "text/x-go-source";
    /// Java source code.
    pub const JAVA_SOURCE: &str = "text/x-java-source";
}

/// A rendered file: source code, or anything else a renderer emits.
///
/// `error` is set when rendering this file failed. The buffer still holds
/// whatever was produced up to that point so callers can inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub name: String,
    pub mime_type: String,
    pub buf: Vec<u8>,
    pub error: Option<String>,
}

impl File {
    /// Create a new file with the given name, mime type and content.
    pub fn new(name: impl Into<String>, mime_type: &str, buf: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.to_string(),
            buf: buf.into(),
            error: None,
        }
    }

    /// Attach a render error to this file.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// The buffer as text, lossy for non UTF-8 content.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buf).into_owned()
    }
}

/// A directory containing other directories and files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dir {
    pub name: String,
    pub files: Vec<File>,
    pub dirs: Vec<Dir>,
}

impl Dir {
    /// Create an empty directory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The mime type of every directory.
    pub fn mime_type(&self) -> &'static str {
        mime::DIRECTORY
    }

    /// Get the child directory with the given name, creating it if missing.
    fn dir_mut(&mut self, name: &str) -> &mut Dir {
        let idx = match self.dirs.iter().position(|d| d.name == name) {
            Some(idx) => idx,
            None => {
                self.dirs.push(Dir::new(name));
                self.dirs.len() - 1
            }
        };
        &mut self.dirs[idx]
    }

    /// Walk (and create) nested directories for a `/`-separated path.
    ///
    /// Empty segments are skipped, so `"a//b/"` is the same as `"a/b"`.
    pub fn ensure_path(&mut self, path: &str) -> &mut Dir {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self, |dir, segment| dir.dir_mut(segment))
    }

    /// Find a file by its `/`-separated path relative to this directory.
    pub fn find_file(&self, path: &str) -> Option<&File> {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let file_name = segments.pop()?;
        let mut dir = self;
        for segment in segments {
            dir = dir.dirs.iter().find(|d| d.name == segment)?;
        }
        dir.files.iter().find(|f| f.name == file_name)
    }
}

/// Either a [`Dir`] or a [`File`].
#[derive(Debug, Clone, Copy)]
pub enum Artifact<'a> {
    Dir(&'a Dir),
    File(&'a File),
}

impl Artifact<'_> {
    /// The artifact name, which becomes a path segment when written.
    pub fn name(&self) -> &str {
        match self {
            Artifact::Dir(dir) => &dir.name,
            Artifact::File(file) => &file.name,
        }
    }
}

impl<'a> From<&'a Dir> for Artifact<'a> {
    fn from(value: &'a Dir) -> Self {
        Artifact::Dir(value)
    }
}

impl<'a> From<&'a File> for Artifact<'a> {
    fn from(value: &'a File) -> Self {
        Artifact::File(value)
    }
}

/// Materialize the artifact below `dest`, creating directories as needed.
///
/// A directory with an empty name is written directly into `dest`, which
/// is how renderers return their root.
pub fn write<'a>(dest: &Path, artifact: impl Into<Artifact<'a>>) -> Result<()> {
    match artifact.into() {
        Artifact::File(file) => {
            let path = dest.join(&file.name);
            tracing::debug!(path = %path.display(), bytes = file.buf.len(), "writing file");
            std::fs::write(&path, &file.buf)
                .wrap_err_with(|| format!("unable to emit file: {}", path.display()))?;
        }
        Artifact::Dir(dir) => {
            let path = dest.join(&dir.name);
            tracing::debug!(path = %path.display(), mime = dir.mime_type(), "creating directory");
            std::fs::create_dir_all(&path)
                .wrap_err_with(|| format!("unable to create directory: {}", path.display()))?;
            for file in &dir.files {
                write(&path, file)?;
            }
            for child in &dir.dirs {
                write(&path, child)
                    .wrap_err_with(|| format!("unable to emit dir: {}", path.display()))?;
            }
        }
    }
    Ok(())
}
