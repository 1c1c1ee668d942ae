//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Mount point of the host directory inside the sandbox.
const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's trace files.
///
/// `/host` is the cwd Zellij was started from, usually the home directory,
/// so this normally resolves to `~/.local/share/zellij/dexterm`.
///
/// ```
/// use dexterm::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/dexterm")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/dexterm")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// Used for the `theme_file` option. Other paths come back unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_maps_to_host_mount() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/themes/dex.toml"), "/host/themes/dex.toml");
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(expand_tilde("/etc/dex.toml"), "/etc/dex.toml");
        assert_eq!(expand_tilde("~ash/dex.toml"), "~ash/dex.toml");
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
    }
}
