//! Per-layer file discovery
//!
//! All strategies locate a layer's contribution with the same search order:
//! exact target filename, then `config`, then `init`, then the first file
//! present (directory listings are sorted). The json-merge strategy narrows
//! the fallback to `*.json` files; the source strategy additionally looks
//! for an optional `pre-init` companion.

use stratum_fs::Backend;

/// Find a layer's contribution file using the standard search order.
pub fn discover_file(backend: &dyn Backend, layer_dir: &str, target_name: &str) -> Option<String> {
    for candidate in [target_name, "config", "init"] {
        let path = format!("{layer_dir}/{candidate}");
        if backend.is_file(&path) {
            return Some(path);
        }
    }
    first_file(backend, layer_dir, |_| true)
}

/// Find a layer's json-merge contribution: exact target filename, then the
/// first `*.json` file.
pub fn discover_json_file(
    backend: &dyn Backend,
    layer_dir: &str,
    target_name: &str,
) -> Option<String> {
    let exact = format!("{layer_dir}/{target_name}");
    if backend.is_file(&exact) {
        return Some(exact);
    }
    first_file(backend, layer_dir, |name| name.ends_with(".json"))
}

/// Find a layer's optional `pre-init` companion (`pre-init` or
/// `pre-init.<ext>`).
pub fn discover_pre_init(backend: &dyn Backend, layer_dir: &str) -> Option<String> {
    first_file(backend, layer_dir, |name| {
        name == "pre-init" || name.starts_with("pre-init.")
    })
}

fn first_file(
    backend: &dyn Backend,
    layer_dir: &str,
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    let names = backend.list_dir(layer_dir).ok()?;
    names
        .into_iter()
        .filter(|name| accept(name))
        .map(|name| format!("{layer_dir}/{name}"))
        .find(|path| backend.is_file(path))
}
