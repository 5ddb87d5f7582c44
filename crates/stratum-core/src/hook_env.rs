//! Fixed environment contract for externally invoked hook scripts

use stratum_config::ToolConfig;

/// Detected OS family exposed to hooks as `STRATUM_OS`.
pub fn os_family() -> &'static str {
    match std::env::consts::OS {
        "linux" => "linux",
        "macos" => "macos",
        "windows" => "windows",
        _ => "unknown",
    }
}

/// Build the fixed variable set passed to any external merge or install
/// script: tool name, colon-joined layer names, colon-joined resolved layer
/// paths (same order), expanded target path, dotfiles root, active profile
/// name, detected OS family, plus the tool's declared custom variables.
pub fn hook_environment(
    config: &ToolConfig,
    target: &str,
    root: &str,
    profile: &str,
) -> Vec<(String, String)> {
    let names: Vec<&str> = config.layers.iter().map(|l| l.name.as_str()).collect();
    let paths: Vec<&str> = config
        .layers
        .iter()
        .map(|l| l.resolved_path.as_str())
        .collect();

    let mut env = vec![
        ("STRATUM_TOOL".to_string(), config.tool_name.clone()),
        ("STRATUM_LAYERS".to_string(), names.join(":")),
        ("STRATUM_LAYER_PATHS".to_string(), paths.join(":")),
        ("STRATUM_TARGET".to_string(), target.to_string()),
        ("STRATUM_ROOT".to_string(), root.to_string()),
        ("STRATUM_PROFILE".to_string(), profile.to_string()),
        ("STRATUM_OS".to_string(), os_family().to_string()),
    ];
    for (key, value) in &config.env {
        env.push((key.clone(), value.clone()));
    }
    env
}
