//! Scenario tests over the in-memory backend
//!
//! Production-shaped runs with every side effect captured in the backend's
//! operation log: layer ordering under a profile, failure isolation, backup
//! behavior for symlinked targets.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use stratum_core::{Orchestrator, OrchestratorOptions, RunReport};
use stratum_fs::{Backend, MemoryBackend};

const ROOT: &str = "/home/dev/dotfiles";

fn seed_tool(backend: &MemoryBackend, name: &str, target: &str, layers: &[&str]) {
    let mut definition = format!("target = \"{target}\"\nmerge_hook = \"builtin:concat\"\n");
    for layer in layers {
        definition.push_str(&format!(
            "\n[[layers]]\nname = \"{layer}\"\nsource = \"local\"\npath = \"layers/{name}/{layer}\"\n"
        ));
    }
    backend.seed_file(&format!("{ROOT}/tools/{name}/tool.toml"), &definition);
}

fn seed_profile(backend: &MemoryBackend, name: &str, tools: &[(&str, &str)]) {
    let list = tools
        .iter()
        .map(|(tool, _)| format!("\"{tool}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let mut profile = format!("profile = \"{name}\"\ntools = [{list}]\n\n[layers]\n");
    for (tool, layers) in tools {
        profile.push_str(&format!("{tool} = \"{layers}\"\n"));
    }
    backend.seed_file(&format!("{ROOT}/profiles/{name}.toml"), &profile);
}

fn run(backend: Arc<MemoryBackend>, profile: &str) -> RunReport {
    let mut orchestrator = Orchestrator::new(backend);
    orchestrator
        .init(ROOT, OrchestratorOptions::default())
        .unwrap();
    let machine = orchestrator.load_profile(profile).unwrap();
    orchestrator.run(&machine).unwrap()
}

#[test]
fn profile_order_overrides_definition_order() {
    let backend = Arc::new(MemoryBackend::new());
    seed_tool(&backend, "vim", "/home/dev/.vimrc", &["base", "work"]);
    backend.seed_file(&format!("{ROOT}/layers/vim/base/.vimrc"), "base\n");
    backend.seed_file(&format!("{ROOT}/layers/vim/work/.vimrc"), "work\n");
    // The profile requests the reverse of the definition's order.
    seed_profile(&backend, "laptop", &[("vim", "work base")]);

    assert!(run(backend.clone(), "laptop").success());

    let merged = backend.read_to_string("/home/dev/.vimrc").unwrap();
    assert!(merged.find("work\n").unwrap() < merged.find("base\n").unwrap());
}

#[test]
fn unknown_requested_layer_fails_only_that_tool() {
    let backend = Arc::new(MemoryBackend::new());
    seed_tool(&backend, "vim", "/home/dev/.vimrc", &["base"]);
    seed_tool(&backend, "git", "/home/dev/.gitconfig", &["base"]);
    backend.seed_file(&format!("{ROOT}/layers/vim/base/.vimrc"), "set nu\n");
    backend.seed_file(&format!("{ROOT}/layers/git/base/.gitconfig"), "[user]\n");
    seed_profile(&backend, "laptop", &[("vim", "base nope"), ("git", "base")]);

    let report = run(backend.clone(), "laptop");
    assert_eq!(report.failed_tools, vec!["vim"]);
    assert_eq!(report.succeeded, 1);
    assert!(!backend.exists("/home/dev/.vimrc"));
    assert!(backend.exists("/home/dev/.gitconfig"));
}

#[test]
fn absent_layer_directory_is_a_warning_not_a_failure() {
    let backend = Arc::new(MemoryBackend::new());
    seed_tool(&backend, "vim", "/home/dev/.vimrc", &["base", "optional"]);
    backend.seed_file(&format!("{ROOT}/layers/vim/base/.vimrc"), "set nu\n");
    // layers/vim/optional never seeded
    seed_profile(&backend, "laptop", &[("vim", "base optional")]);

    let report = run(backend.clone(), "laptop");
    assert!(report.success());
    let merged = backend.read_to_string("/home/dev/.vimrc").unwrap();
    assert!(merged.contains("set nu"));
    assert!(!merged.contains("layer: optional"));
}

#[test]
fn profile_tool_without_definition_is_skipped() {
    let backend = Arc::new(MemoryBackend::new());
    seed_tool(&backend, "vim", "/home/dev/.vimrc", &["base"]);
    backend.seed_file(&format!("{ROOT}/layers/vim/base/.vimrc"), "set nu\n");
    seed_profile(&backend, "laptop", &[("vim", "base"), ("tmux", "base")]);

    let report = run(backend, "laptop");
    assert_eq!(report.processed, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.success());
}

#[test]
fn symlinked_target_backed_up_as_link_capture() {
    let backend = Arc::new(MemoryBackend::new());
    seed_tool(&backend, "vim", "/home/dev/.vimrc", &["base"]);
    backend.seed_file(&format!("{ROOT}/layers/vim/base/.vimrc"), "set nu\n");
    backend.seed_symlink("/home/dev/.vimrc", "/old/location/.vimrc");
    seed_profile(&backend, "laptop", &[("vim", "base")]);

    assert!(run(backend.clone(), "laptop").success());

    // The backup holds the old link target string, never the pointee.
    let backups = backend.list_dir(&format!("{ROOT}/.backups")).unwrap();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with(".vimrc."));
    assert!(backups[0].ends_with(".link"));
    let capture = backend
        .read_to_string(&format!("{ROOT}/.backups/{}", backups[0]))
        .unwrap();
    assert_eq!(capture, "/old/location/.vimrc");

    // The target itself is a regular merged file now.
    assert!(!backend.is_symlink("/home/dev/.vimrc"));
    assert!(
        backend
            .read_to_string("/home/dev/.vimrc")
            .unwrap()
            .contains("set nu")
    );
}

#[test]
fn broken_tool_leaves_no_trace_on_its_target() {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed_file(
        &format!("{ROOT}/tools/broken/tool.toml"),
        "target = \"/home/dev/.broken\"\nmerge_hook = \"builtin:no-such-strategy\"\n\n[[layers]]\nname = \"base\"\nsource = \"local\"\npath = \"layers/broken/base\"\n",
    );
    backend.seed_file(&format!("{ROOT}/layers/broken/base/file"), "x\n");
    seed_profile(&backend, "laptop", &[("broken", "base")]);

    let report = run(backend.clone(), "laptop");
    assert_eq!(report.failed_tools, vec!["broken"]);
    assert!(backend.operations_touching("/home/dev/.broken").is_empty());
}
