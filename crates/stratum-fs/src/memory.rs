//! Deterministic in-memory backend for tests
//!
//! Stores a flat map of normalized path → node, records every mutating call
//! in an operations log, and serves canned results for process invocations.
//! Production code never constructs this type; it exists so the pipeline can
//! be exercised without touching the real filesystem.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use crate::backend::{Backend, ProcessOutput};
use crate::{Error, Result};

/// Hop limit when following symlink chains, mirroring ELOOP on real systems.
const MAX_LINK_DEPTH: usize = 16;

#[derive(Debug, Clone)]
enum Node {
    File(String),
    Dir,
    Symlink(String),
}

/// One recorded mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Write { path: String },
    Append { path: String },
    Copy { from: String, to: String },
    CreateDirAll { path: String },
    Symlink { original: String, link: String },
    RemoveFile { path: String },
    RemoveDirAll { path: String },
    Run { program: String, args: Vec<String> },
}

impl Operation {
    /// The target path this operation mutates, if any.
    pub fn touched_path(&self) -> Option<&str> {
        match self {
            Self::Write { path }
            | Self::Append { path }
            | Self::CreateDirAll { path }
            | Self::RemoveFile { path }
            | Self::RemoveDirAll { path } => Some(path),
            Self::Copy { to, .. } => Some(to),
            Self::Symlink { link, .. } => Some(link),
            Self::Run { .. } => None,
        }
    }
}

/// In-memory [`Backend`] with an operations log and canned process results.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    nodes: Mutex<BTreeMap<String, Node>>,
    ops: Mutex<Vec<Operation>>,
    process_results: Mutex<VecDeque<ProcessOutput>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating parent directories implicitly.
    pub fn seed_file(&self, path: &str, content: &str) {
        let mut nodes = self.nodes.lock().unwrap();
        Self::insert_parents(&mut nodes, path);
        nodes.insert(path.to_string(), Node::File(content.to_string()));
    }

    /// Seed a directory, creating parents implicitly.
    pub fn seed_dir(&self, path: &str) {
        let mut nodes = self.nodes.lock().unwrap();
        Self::insert_parents(&mut nodes, path);
        nodes.insert(path.to_string(), Node::Dir);
    }

    /// Seed a symlink (its target need not exist).
    pub fn seed_symlink(&self, link: &str, original: &str) {
        let mut nodes = self.nodes.lock().unwrap();
        Self::insert_parents(&mut nodes, link);
        nodes.insert(link.to_string(), Node::Symlink(original.to_string()));
    }

    /// Queue a canned result for the next `run` call. Without queued results
    /// every invocation succeeds with empty output.
    pub fn push_process_result(&self, output: ProcessOutput) {
        self.process_results.lock().unwrap().push_back(output);
    }

    /// Snapshot of all recorded mutating calls, in order.
    pub fn operations(&self) -> Vec<Operation> {
        self.ops.lock().unwrap().clone()
    }

    /// Recorded operations that mutated the given path.
    pub fn operations_touching(&self, path: &str) -> Vec<Operation> {
        self.operations()
            .into_iter()
            .filter(|op| op.touched_path() == Some(path))
            .collect()
    }

    fn insert_parents(nodes: &mut BTreeMap<String, Node>, path: &str) {
        let mut current = String::new();
        let mut components = path.split('/').filter(|c| !c.is_empty()).peekable();
        while let Some(component) = components.next() {
            if components.peek().is_none() {
                break;
            }
            current.push('/');
            current.push_str(component);
            nodes.entry(current.clone()).or_insert(Node::Dir);
        }
    }

    fn record(&self, op: Operation) {
        self.ops.lock().unwrap().push(op);
    }

    /// Follow symlinks from `path`, like the kernel does for `open(2)`,
    /// giving up after [`MAX_LINK_DEPTH`] hops.
    fn follow_links(nodes: &BTreeMap<String, Node>, path: &str) -> String {
        let mut current = path.to_string();
        let mut hops = 0usize;
        while let Some(Node::Symlink(target)) = nodes.get(&current) {
            hops += 1;
            if hops > MAX_LINK_DEPTH {
                break;
            }
            current = target.clone();
        }
        current
    }

    fn resolve_file(&self, path: &str) -> Option<String> {
        let nodes = self.nodes.lock().unwrap();
        match nodes.get(&Self::follow_links(&nodes, path)) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }
}

impl Backend for MemoryBackend {
    fn read_to_string(&self, path: &str) -> Result<String> {
        self.resolve_file(path)
            .ok_or_else(|| Error::NotFound { path: path.into() })
    }

    fn write(&self, path: &str, content: &str) -> Result<()> {
        self.record(Operation::Write { path: path.to_string() });
        let mut nodes = self.nodes.lock().unwrap();
        // std::fs::write follows symlinks, so writing to a link mutates
        // the pointee and leaves the link in place.
        let dest = Self::follow_links(&nodes, path);
        Self::insert_parents(&mut nodes, &dest);
        nodes.insert(dest, Node::File(content.to_string()));
        Ok(())
    }

    fn append(&self, path: &str, content: &str) -> Result<()> {
        self.record(Operation::Append { path: path.to_string() });
        let mut nodes = self.nodes.lock().unwrap();
        let dest = Self::follow_links(&nodes, path);
        Self::insert_parents(&mut nodes, &dest);
        let existing = match nodes.get(&dest) {
            Some(Node::File(prior)) => prior.clone(),
            _ => String::new(),
        };
        nodes.insert(dest, Node::File(existing + content));
        Ok(())
    }

    fn copy(&self, from: &str, to: &str) -> Result<()> {
        self.record(Operation::Copy {
            from: from.to_string(),
            to: to.to_string(),
        });
        let content = self
            .resolve_file(from)
            .ok_or_else(|| Error::NotFound { path: from.into() })?;
        let mut nodes = self.nodes.lock().unwrap();
        let dest = Self::follow_links(&nodes, to);
        Self::insert_parents(&mut nodes, &dest);
        nodes.insert(dest, Node::File(content));
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        matches!(self.nodes.lock().unwrap().get(path), Some(Node::Dir))
    }

    fn is_file(&self, path: &str) -> bool {
        matches!(self.nodes.lock().unwrap().get(path), Some(Node::File(_)))
    }

    fn is_symlink(&self, path: &str) -> bool {
        matches!(self.nodes.lock().unwrap().get(path), Some(Node::Symlink(_)))
    }

    fn read_link(&self, path: &str) -> Result<String> {
        match self.nodes.lock().unwrap().get(path) {
            Some(Node::Symlink(target)) => Ok(target.clone()),
            _ => Err(Error::NotFound { path: path.into() }),
        }
    }

    fn create_dir_all(&self, path: &str) -> Result<()> {
        self.record(Operation::CreateDirAll { path: path.to_string() });
        let mut nodes = self.nodes.lock().unwrap();
        Self::insert_parents(&mut nodes, path);
        nodes.entry(path.to_string()).or_insert(Node::Dir);
        Ok(())
    }

    fn symlink(&self, original: &str, link: &str) -> Result<()> {
        self.record(Operation::Symlink {
            original: original.to_string(),
            link: link.to_string(),
        });
        let mut nodes = self.nodes.lock().unwrap();
        Self::insert_parents(&mut nodes, link);
        nodes.insert(link.to_string(), Node::Symlink(original.to_string()));
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<()> {
        self.record(Operation::RemoveFile { path: path.to_string() });
        let mut nodes = self.nodes.lock().unwrap();
        match nodes.remove(path) {
            Some(Node::File(_)) | Some(Node::Symlink(_)) => Ok(()),
            Some(dir) => {
                nodes.insert(path.to_string(), dir);
                Err(Error::Io {
                    path: path.into(),
                    source: std::io::Error::other("is a directory"),
                })
            }
            None => Err(Error::NotFound { path: path.into() }),
        }
    }

    fn remove_dir_all(&self, path: &str) -> Result<()> {
        self.record(Operation::RemoveDirAll { path: path.to_string() });
        let prefix = format!("{}/", path);
        let mut nodes = self.nodes.lock().unwrap();
        nodes.remove(path);
        nodes.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>> {
        let nodes = self.nodes.lock().unwrap();
        if !matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(Error::NotADirectory { path: path.into() });
        }
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let mut names: Vec<String> = nodes
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(|rest| rest.to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn run(
        &self,
        program: &str,
        args: &[String],
        _cwd: Option<&str>,
        _env: &[(String, String)],
    ) -> Result<ProcessOutput> {
        self.record(Operation::Run {
            program: program.to_string(),
            args: args.to_vec(),
        });
        Ok(self
            .process_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}
