use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A filesystem path cleared for serving: canonical, and verified to live
/// under the resolver's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedPath {
    pub path: PathBuf,
    /// Suffix after the last `.` of the file name, empty if none. Drives
    /// the content-type lookup.
    pub extension: String,
}

impl ServedPath {
    fn new(path: PathBuf) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        Self { path, extension }
    }
}

/// Successful resolution of a request target.
#[derive(Debug)]
pub enum Resolved {
    /// A concrete file to read and send.
    File(ServedPath),
    /// The target names a directory but lacks the trailing slash; the
    /// caller must redirect to the slash-terminated form.
    RedirectToDir,
}

/// Failed resolution of a request target.
#[derive(Debug)]
pub enum ResolveError {
    /// No such file under the root.
    NotFound,
    /// The path escapes the served root. Callers must answer exactly as
    /// they do for `NotFound`; nothing about the host filesystem may leak.
    Traversal,
    /// Any other filesystem error (permissions, bad root, ...).
    Io(std::io::Error),
}

/// Maps request targets under a URI prefix onto files under a root
/// directory.
///
/// The root is the confinement boundary: every path handed back has been
/// canonicalized (symlinks and dot segments resolved) and checked to be
/// the root or a descendant of it.
#[derive(Debug, Clone)]
pub struct PathResolver {
    prefix: String,
    root: PathBuf,
}

impl PathResolver {
    pub fn new(prefix: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            root: root.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether this resolver's route is responsible for `target`. Declining
    /// is "not my route", distinct from resolving and failing.
    pub fn claims(&self, target: &str) -> bool {
        target.starts_with(&self.prefix)
    }

    /// Resolves a claimed target to a servable file.
    ///
    /// The prefix is stripped, the remainder joined onto the root without
    /// interpreting dot segments, and the result canonicalized before the
    /// containment check. A target equal to the bare prefix resolves to
    /// the root directory itself and so takes the redirect rule.
    pub fn resolve(&self, target: &str) -> Result<Resolved, ResolveError> {
        let remainder = match target.strip_prefix(&self.prefix) {
            Some(rest) => rest.trim_start_matches('/'),
            None => return Err(ResolveError::NotFound),
        };
        let joined = self.root.join(remainder);

        // The root itself must canonicalize; a route pointing at a missing
        // directory is a deployment problem, not a client one.
        let root = self.root.canonicalize().map_err(ResolveError::Io)?;

        let canonical = canonicalize(&joined)?;
        ensure_under(&canonical, &root)?;

        if canonical.is_dir() {
            if !target.ends_with('/') {
                return Ok(Resolved::RedirectToDir);
            }

            // Trailing slash: the directory's index stands in for it. The
            // index is re-checked in case it is a symlink out of the root.
            let index = canonicalize(&canonical.join("index.html"))?;
            ensure_under(&index, &root)?;

            return Ok(Resolved::File(ServedPath::new(index)));
        }

        Ok(Resolved::File(ServedPath::new(canonical)))
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf, ResolveError> {
    path.canonicalize().map_err(|e| match e.kind() {
        ErrorKind::NotFound => ResolveError::NotFound,
        _ => ResolveError::Io(e),
    })
}

fn ensure_under(path: &Path, root: &Path) -> Result<(), ResolveError> {
    if path.starts_with(root) {
        Ok(())
    } else {
        Err(ResolveError::Traversal)
    }
}
