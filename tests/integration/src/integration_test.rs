//! End-to-end integration tests against the real filesystem
//!
//! These tests lay out a complete dotfiles root with [`DotfilesTree`] and
//! drive it through the orchestrator the way the CLI does: init, load a
//! profile, run every tool.

use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use stratum_core::{Orchestrator, OrchestratorOptions, RunReport};
use stratum_fs::RealBackend;
use stratum_test_utils::DotfilesTree;

fn run_profile(tree: &DotfilesTree, profile: &str, dry_run: bool) -> RunReport {
    let mut orchestrator = Orchestrator::new(Arc::new(RealBackend::new()));
    orchestrator
        .init(&tree.root_str(), OrchestratorOptions { dry_run })
        .unwrap();
    let machine = orchestrator.load_profile(profile).unwrap();
    orchestrator.run(&machine).unwrap()
}

#[test]
fn full_run_composes_concat_json_and_source_targets() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();

    // vim: concat over two layers
    tree.add_layer_file("layers/vim/base", ".vimrc", "set number\n");
    tree.add_layer_file("layers/vim/work", ".vimrc", "set colorcolumn=100\n");
    tree.add_tool(
        "vim",
        &format!("{root}/out/.vimrc"),
        "builtin:concat",
        &[
            ("base", "local", "layers/vim/base"),
            ("work", "local", "layers/vim/work"),
        ],
    );

    // editor: recursive json merge, later layer wins per key
    tree.add_layer_file(
        "layers/editor/base",
        "settings.json",
        r#"{"tabSize": 4, "font": {"size": 12, "family": "mono"}}"#,
    );
    tree.add_layer_file(
        "layers/editor/work",
        "settings.json",
        r#"{"font": {"size": 14}}"#,
    );
    tree.add_tool(
        "editor",
        &format!("{root}/out/settings.json"),
        "builtin:json-merge",
        &[
            ("base", "local", "layers/editor/base"),
            ("work", "local", "layers/editor/work"),
        ],
    );

    // shell: generated source statements, pre-init strictly first
    tree.add_layer_file("layers/shell/base", "profile", "export EDITOR=vim\n");
    tree.add_layer_file("layers/shell/work", "config", "alias k=kubectl\n");
    tree.add_layer_file("layers/shell/work", "pre-init.sh", "umask 022\n");
    tree.add_tool(
        "shell",
        &format!("{root}/out/.profile"),
        "builtin:source",
        &[
            ("base", "local", "layers/shell/base"),
            ("work", "local", "layers/shell/work"),
        ],
    );

    tree.add_profile(
        "laptop",
        &[("vim", "base work"), ("editor", "base work"), ("shell", "base work")],
    );

    let report = run_profile(&tree, "laptop", false);
    assert_eq!(report.processed, 3);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 0);
    assert!(report.success());

    // concat: both layers present, profile order preserved
    let vimrc = fs::read_to_string(tree.root().join("out/.vimrc")).unwrap();
    assert!(vimrc.contains("# ===== layer: base ====="));
    assert!(vimrc.find("set number").unwrap() < vimrc.find("set colorcolumn").unwrap());

    // json-merge: nested override, unrelated keys kept
    let settings: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tree.root().join("out/settings.json")).unwrap())
            .unwrap();
    assert_eq!(settings["tabSize"], 4);
    assert_eq!(settings["font"]["size"], 14);
    assert_eq!(settings["font"]["family"], "mono");

    // source: guarded statements, pre-init block before every layer block
    let profile = fs::read_to_string(tree.root().join("out/.profile")).unwrap();
    assert!(profile.starts_with("# Generated by stratum for tool 'shell'"));
    assert!(profile.contains("[ -f \""));
    assert!(profile.contains("# layer: work"));
    assert!(profile.find("pre-init.sh").unwrap() < profile.find("# layer: base").unwrap());
}

#[test]
fn existing_target_is_backed_up_before_overwrite() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();
    tree.write("out/.vimrc", "handwritten config\n");
    tree.add_layer_file("layers/vim/base", ".vimrc", "set number\n");
    tree.add_tool(
        "vim",
        &format!("{root}/out/.vimrc"),
        "builtin:concat",
        &[("base", "local", "layers/vim/base")],
    );
    tree.add_profile("laptop", &[("vim", "base")]);

    let report = run_profile(&tree, "laptop", false);
    assert!(report.success());

    let backups: Vec<_> = fs::read_dir(tree.root().join(".backups"))
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    assert_eq!(backups.len(), 1);
    let name = backups[0].file_name().to_string_lossy().to_string();
    assert!(name.starts_with(".vimrc."), "unexpected backup name: {name}");
    assert_eq!(
        fs::read_to_string(backups[0].path()).unwrap(),
        "handwritten config\n"
    );

    // The target itself holds the merged content now.
    let vimrc = fs::read_to_string(tree.root().join("out/.vimrc")).unwrap();
    assert!(vimrc.contains("set number"));
    assert!(!vimrc.contains("handwritten"));
}

#[test]
fn repeated_runs_never_clobber_earlier_backups() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();
    tree.write("out/.vimrc", "original\n");
    tree.add_layer_file("layers/vim/base", ".vimrc", "set number\n");
    tree.add_tool(
        "vim",
        &format!("{root}/out/.vimrc"),
        "builtin:concat",
        &[("base", "local", "layers/vim/base")],
    );
    tree.add_profile("laptop", &[("vim", "base")]);

    assert!(run_profile(&tree, "laptop", false).success());
    assert!(run_profile(&tree, "laptop", false).success());

    let backups = fs::read_dir(tree.root().join(".backups")).unwrap().count();
    assert_eq!(backups, 2);
}

#[cfg(unix)]
#[test]
fn symlinked_target_replaced_without_touching_the_pointee() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();
    let old = tree.write("old-location/.vimrc", "precious old config\n");
    fs::create_dir_all(tree.root().join("out")).unwrap();
    std::os::unix::fs::symlink(&old, tree.root().join("out/.vimrc")).unwrap();

    tree.add_layer_file("layers/vim/base", ".vimrc", "set number\n");
    tree.add_tool(
        "vim",
        &format!("{root}/out/.vimrc"),
        "builtin:concat",
        &[("base", "local", "layers/vim/base")],
    );
    tree.add_profile("laptop", &[("vim", "base")]);

    assert!(run_profile(&tree, "laptop", false).success());

    // The file the old link pointed at is untouched.
    assert_eq!(fs::read_to_string(&old).unwrap(), "precious old config\n");

    // The target is a regular merged file now, not a symlink.
    let target = tree.root().join("out/.vimrc");
    assert!(!fs::symlink_metadata(&target).unwrap().file_type().is_symlink());
    assert!(fs::read_to_string(&target).unwrap().contains("set number"));

    // The backup captures where the old link pointed.
    let backups: Vec<_> = fs::read_dir(tree.root().join(".backups"))
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    assert_eq!(backups.len(), 1);
    let name = backups[0].file_name().to_string_lossy().to_string();
    assert!(name.ends_with(".link"), "unexpected backup name: {name}");
    assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), old);
}

#[test]
fn external_repo_layers_resolve_through_the_registry() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();

    // A checked-out external repository, plain directory on disk.
    tree.add_layer_file("checkouts/work/vim", ".vimrc", "set work_settings\n");
    tree.write(
        "repos.toml",
        &format!(
            "[repos.WORK]\nurl = \"git@example.com:work/dotfiles.git\"\npath = \"{root}/checkouts/work\"\n"
        ),
    );

    tree.add_layer_file("layers/vim/base", ".vimrc", "set number\n");
    tree.add_tool(
        "vim",
        &format!("{root}/out/.vimrc"),
        "builtin:concat",
        &[
            ("base", "local", "layers/vim/base"),
            ("work", "WORK", "vim"),
        ],
    );
    tree.add_profile("laptop", &[("vim", "base work")]);

    let report = run_profile(&tree, "laptop", false);
    assert!(report.success(), "failed: {:?}", report.failed_tools);

    let vimrc = fs::read_to_string(tree.root().join("out/.vimrc")).unwrap();
    assert!(vimrc.contains("set number"));
    assert!(vimrc.contains("set work_settings"));
    assert!(vimrc.contains(&format!("# source: {root}/checkouts/work/vim/.vimrc")));
}

#[test]
fn legacy_flat_definition_runs_end_to_end() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();
    tree.add_layer_file("layers/git/base", "gitconfig", "[user]\n\tname = Dev\n");
    tree.add_legacy_tool(
        "git",
        &format!("{root}/out/.gitconfig"),
        "builtin:concat",
        &[("base", "local:layers/git/base")],
    );
    tree.add_profile("laptop", &[("git", "base")]);

    let report = run_profile(&tree, "laptop", false);
    assert_eq!(report.succeeded, 1);
    let gitconfig = fs::read_to_string(tree.root().join("out/.gitconfig")).unwrap();
    assert!(gitconfig.contains("name = Dev"));
}

#[test]
fn dry_run_reports_actions_without_touching_the_tree() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();
    tree.add_layer_file("layers/vim/base", ".vimrc", "set number\n");
    tree.add_tool(
        "vim",
        &format!("{root}/out/.vimrc"),
        "builtin:concat",
        &[("base", "local", "layers/vim/base")],
    );
    tree.add_profile("laptop", &[("vim", "base")]);

    let report = run_profile(&tree, "laptop", true);
    assert!(report.success());
    assert_eq!(report.actions.len(), 1);
    assert!(report.actions[0].starts_with("[dry-run] Would merge 1 layer(s)"));

    assert!(!tree.root().join("out").exists());
    assert!(!tree.root().join(".backups").exists());
}

#[cfg(unix)]
#[test]
fn symlink_strategy_links_the_last_layers_file() {
    let tree = DotfilesTree::new();
    let root = tree.root_str();
    tree.add_layer_file("layers/git/base", ".gitconfig", "[user]\n\tname = Base\n");
    tree.add_layer_file("layers/git/work", ".gitconfig", "[user]\n\tname = Work\n");
    tree.add_tool(
        "git",
        &format!("{root}/out/.gitconfig"),
        "builtin:symlink",
        &[
            ("base", "local", "layers/git/base"),
            ("work", "local", "layers/git/work"),
        ],
    );
    tree.add_profile("laptop", &[("git", "base work")]);

    let report = run_profile(&tree, "laptop", false);
    assert!(report.success(), "failed: {:?}", report.failed_tools);

    let target = tree.root().join("out/.gitconfig");
    assert!(fs::symlink_metadata(&target).unwrap().file_type().is_symlink());
    assert_eq!(
        fs::read_link(&target).unwrap().to_string_lossy().replace('\\', "/"),
        format!("{root}/layers/git/work/.gitconfig")
    );
    assert!(fs::read_to_string(&target).unwrap().contains("name = Work"));
}

#[cfg(unix)]
#[test]
fn external_install_hook_runs_after_the_merge() {
    use std::os::unix::fs::PermissionsExt;

    let tree = DotfilesTree::new();
    let root = tree.root_str();
    tree.add_layer_file("layers/vim/base", ".vimrc", "set number\n");

    let hook = tree.write(
        "hooks/install-vim.sh",
        "#!/bin/sh\ntouch \"$STRATUM_ROOT/hook-ran\"\n",
    );
    let mut perms = fs::metadata(&hook).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&hook, perms).unwrap();

    tree.write(
        "tools/vim/tool.toml",
        &format!(
            r#"target = "{root}/out/.vimrc"
merge_hook = "builtin:concat"
install_hook = "{hook}"

[[layers]]
name = "base"
source = "local"
path = "layers/vim/base"
"#
        ),
    );
    tree.add_profile("laptop", &[("vim", "base")]);

    let report = run_profile(&tree, "laptop", false);
    assert!(report.success());
    tree.assert_exists("hook-ran");
    assert!(
        report
            .actions
            .iter()
            .any(|a| a.starts_with("Ran install hook "))
    );
}
