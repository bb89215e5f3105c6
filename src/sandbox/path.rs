use crate::error::SandboxError;
use std::path::{Component, Path, PathBuf};

/// Resolves caller-supplied relative paths against a fixed workspace root.
///
/// Every tool-level path argument goes through [`PathResolver::resolve`] before
/// the filesystem is touched. The resolver holds the canonical root, fixed at
/// process start; it never creates the resolved path itself (directory creation
/// is the caller's responsibility after a successful resolve).
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Establish the workspace root: create the directory if absent and pin its
    /// canonical form. All later containment checks compare against this.
    pub fn new(root: &Path) -> Result<Self, SandboxError> {
        std::fs::create_dir_all(root)?;
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    /// The canonical workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` against the workspace root.
    ///
    /// The request is valid iff the result, after normalizing `.`/`..` segments
    /// and resolving any symbolic indirection, equals the root or is a
    /// component-wise descendant of it. Comparison is per path component, never
    /// a raw string prefix: a sibling directory whose name merely shares the
    /// root's string prefix is rejected.
    ///
    /// `resolve("")` and `resolve(".")` yield the root; trailing slashes are
    /// insignificant.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, SandboxError> {
        // Null bytes can truncate paths in C-backed syscalls.
        if relative.contains('\0') {
            return Err(self.escape(relative));
        }

        // `join` replaces the root entirely when the request is absolute, so
        // absolute inputs fall through to the same containment check.
        let candidate = lexical_normalize(&self.root.join(relative));
        if !candidate.starts_with(&self.root) {
            return Err(self.escape(relative));
        }

        // `..` is gone at this point, but a symlink inside the workspace can
        // still point elsewhere. Canonicalize the deepest existing ancestor and
        // re-check before trusting the result.
        let resolved = resolve_existing_ancestor(&candidate)?;
        if !resolved.starts_with(&self.root) {
            return Err(self.escape(relative));
        }

        Ok(resolved)
    }

    fn escape(&self, relative: &str) -> SandboxError {
        SandboxError::PathEscape {
            path: relative.to_string(),
        }
    }
}

/// Resolve `.` and `..` segments without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // Popping at the filesystem root is a no-op, matching `/..` == `/`.
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Canonicalize the deepest existing ancestor of `candidate` and re-append the
/// not-yet-existing remainder. The candidate is absolute, so the walk always
/// terminates at an existing ancestor.
fn resolve_existing_ancestor(candidate: &Path) -> Result<PathBuf, SandboxError> {
    for ancestor in candidate.ancestors() {
        if ancestor.exists() {
            let base = ancestor.canonicalize()?;
            // An empty remainder means the candidate itself exists; joining it
            // would append a trailing separator and break syscalls on files.
            return match candidate.strip_prefix(ancestor) {
                Ok(rest) if !rest.as_os_str().is_empty() => Ok(base.join(rest)),
                _ => Ok(base),
            };
        }
    }
    Ok(candidate.to_path_buf())
}
