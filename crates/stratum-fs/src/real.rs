//! Production backend over std::fs and std::process

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::backend::{Backend, ProcessOutput};
use crate::{Error, Result};

/// Backend implementation that touches the real filesystem and spawns real
/// processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealBackend;

impl RealBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for RealBackend {
    fn read_to_string(&self, path: &str) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::io(path, e))
    }

    fn write(&self, path: &str, content: &str) -> Result<()> {
        fs::write(path, content).map_err(|e| Error::io(path, e))
    }

    fn append(&self, path: &str, content: &str) -> Result<()> {
        use std::io::Write;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::io(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| Error::io(path, e))
    }

    fn copy(&self, from: &str, to: &str) -> Result<()> {
        fs::copy(from, to).map(|_| ()).map_err(|e| Error::io(from, e))
    }

    fn exists(&self, path: &str) -> bool {
        // symlink_metadata so a broken symlink still counts as present
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn is_symlink(&self, path: &str) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn read_link(&self, path: &str) -> Result<String> {
        fs::read_link(path)
            .map(|p| p.to_string_lossy().to_string())
            .map_err(|e| Error::io(path, e))
    }

    fn create_dir_all(&self, path: &str) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))
    }

    fn symlink(&self, original: &str, link: &str) -> Result<()> {
        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(original, link).map_err(|e| Error::io(link, e))
        }
        #[cfg(windows)]
        {
            if Path::new(original).is_dir() {
                std::os::windows::fs::symlink_dir(original, link)
                    .map_err(|e| Error::io(link, e))
            } else {
                std::os::windows::fs::symlink_file(original, link)
                    .map_err(|e| Error::io(link, e))
            }
        }
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }

    fn remove_dir_all(&self, path: &str) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>> {
        if !self.is_dir(path) {
            return Err(Error::NotADirectory { path: path.into() });
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| Error::io(path, e))? {
            let entry = entry.map_err(|e| Error::io(path, e))?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }

    fn run(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&str>,
        env: &[(String, String)],
    ) -> Result<ProcessOutput> {
        debug!(program, ?args, "running external process");
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        for (key, value) in env {
            command.env(key, value);
        }

        let output = command.output().map_err(|e| Error::Spawn {
            command: program.to_string(),
            message: e.to_string(),
        })?;

        Ok(ProcessOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
