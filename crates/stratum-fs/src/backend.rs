//! The injectable filesystem/process capability
//!
//! Everything above this crate performs I/O exclusively through [`Backend`],
//! passed explicitly as `&dyn Backend`. The production implementation is
//! [`crate::RealBackend`]; tests use [`crate::MemoryBackend`], which records
//! every mutating call and returns canned process results. Both run the
//! identical pipeline logic.

use crate::Result;

/// Captured result of an external process invocation.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Process exit code (0 on success; -1 when terminated by signal)
    pub code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with code zero.
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Filesystem and process capability.
///
/// All paths are plain UTF-8 strings in normalized (forward-slash) form.
/// Mutating operations are: `write`, `append`, `copy`, `create_dir_all`,
/// `symlink`, `remove_file`, `remove_dir_all`, and `run`.
pub trait Backend: Send + Sync {
    /// Read a file's entire contents as UTF-8 text.
    fn read_to_string(&self, path: &str) -> Result<String>;

    /// Write content to a file, creating or truncating it.
    fn write(&self, path: &str, content: &str) -> Result<()>;

    /// Append content to a file, creating it if absent.
    fn append(&self, path: &str, content: &str) -> Result<()>;

    /// Copy a regular file.
    fn copy(&self, from: &str, to: &str) -> Result<()>;

    /// Whether a path exists (symlinks are not followed).
    fn exists(&self, path: &str) -> bool;

    /// Whether a path is an existing directory.
    fn is_dir(&self, path: &str) -> bool;

    /// Whether a path is an existing regular file.
    fn is_file(&self, path: &str) -> bool;

    /// Whether a path is a symlink (broken links included).
    fn is_symlink(&self, path: &str) -> bool;

    /// Read a symlink's target string.
    fn read_link(&self, path: &str) -> Result<String>;

    /// Create a directory and all missing parents.
    fn create_dir_all(&self, path: &str) -> Result<()>;

    /// Create a symlink at `link` pointing to `original`.
    fn symlink(&self, original: &str, link: &str) -> Result<()>;

    /// Remove a file or symlink.
    fn remove_file(&self, path: &str) -> Result<()>;

    /// Remove a directory and its contents.
    fn remove_dir_all(&self, path: &str) -> Result<()>;

    /// List the entry names of a directory, sorted.
    fn list_dir(&self, path: &str) -> Result<Vec<String>>;

    /// Run an external process to completion, capturing its output.
    ///
    /// `env` entries are added on top of the inherited environment. This is
    /// the only blocking external operation in the system; there is no
    /// timeout and no cancellation.
    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&str>,
        env: &[(String, String)],
    ) -> Result<ProcessOutput>;
}
