//! [`DotfilesTree`] builder for Stratum test scenarios.
//!
//! Lays out a real temporary dotfiles root — tool definitions, layer
//! directories, machine profiles — so tests can run the full pipeline
//! against the actual filesystem.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary dotfiles root with helper methods for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use stratum_test_utils::DotfilesTree;
///
/// let tree = DotfilesTree::new();
/// tree.add_layer_file("layers/vim/base", ".vimrc", "set nu\n");
/// tree.add_tool(
///     "vim",
///     "~/.vimrc",
///     "builtin:concat",
///     &[("base", "local", "layers/vim/base")],
/// );
/// tree.add_profile("laptop", &[("vim", "base")]);
/// ```
pub struct DotfilesTree {
    temp_dir: TempDir,
}

impl Default for DotfilesTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DotfilesTree {
    /// Create an empty temporary dotfiles root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The root path of the temporary tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The root path as a forward-slash string.
    pub fn root_str(&self) -> String {
        self.root().to_string_lossy().replace('\\', "/")
    }

    /// Write a file at `relative` (parents created), returning its absolute
    /// path.
    pub fn write(&self, relative: &str, content: &str) -> String {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path.to_string_lossy().replace('\\', "/")
    }

    /// Add a file inside a layer directory.
    pub fn add_layer_file(&self, layer_dir: &str, name: &str, content: &str) -> String {
        self.write(&format!("{layer_dir}/{name}"), content)
    }

    /// Write a structured tool definition at `tools/<name>/tool.toml`.
    pub fn add_tool(
        &self,
        name: &str,
        target: &str,
        merge_hook: &str,
        layers: &[(&str, &str, &str)],
    ) {
        let mut definition = format!("target = \"{target}\"\nmerge_hook = \"{merge_hook}\"\n");
        for (layer_name, source, path) in layers {
            definition.push_str(&format!(
                "\n[[layers]]\nname = \"{layer_name}\"\nsource = \"{source}\"\npath = \"{path}\"\n"
            ));
        }
        self.write(&format!("tools/{name}/tool.toml"), &definition);
    }

    /// Write a legacy flat tool definition at `tools/<name>/tool.conf`.
    pub fn add_legacy_tool(
        &self,
        name: &str,
        target: &str,
        merge_hook: &str,
        layers: &[(&str, &str)],
    ) {
        let mut definition =
            format!("target = \"{target}\"\nmerge_hook = \"{merge_hook}\"\n");
        for (layer_name, spec) in layers {
            definition.push_str(&format!("layers_{layer_name} = \"{spec}\"\n"));
        }
        self.write(&format!("tools/{name}/tool.conf"), &definition);
    }

    /// Write a machine profile at `profiles/<name>.toml`. Each entry maps a
    /// tool to its space-separated requested layer names.
    pub fn add_profile(&self, name: &str, tools: &[(&str, &str)]) {
        let list = tools
            .iter()
            .map(|(tool, _)| format!("\"{tool}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let mut profile = format!("profile = \"{name}\"\ntools = [{list}]\n\n[layers]\n");
        for (tool, layers) in tools {
            profile.push_str(&format!("{tool} = \"{layers}\"\n"));
        }
        self.write(&format!("profiles/{name}.toml"), &profile);
    }

    /// Assert that `relative` exists under the root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, relative: &str) {
        let path = self.root().join(relative);
        assert!(path.exists(), "Expected path to exist: {}", path.display());
    }

    /// Assert that the file at an absolute path contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(path: &str, content: &str) {
        let file_content = fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Could not read file: {path}"));
        assert!(
            file_content.contains(content),
            "Expected {path} to contain {content:?}, got:\n{file_content}"
        );
    }
}
