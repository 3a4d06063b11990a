//! Configuration paths and pack-relative path resolution

use std::path::{Component, Path, PathBuf};

/// Name used for the configuration directory
const APP_NAME: &str = "packcheck";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/packcheck/`
/// - macOS: `~/Library/Application Support/packcheck/`
/// - Windows: `%APPDATA%\packcheck\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Resolve a manifest-relative path, refusing anything that leaves `base`.
///
/// Works lexically so it does not require the target to exist: a missing
/// file must still be reported as missing, not as an escape. Symlinks are
/// not followed, so a link inside the pack that points elsewhere still
/// resolves.
pub fn resolve_within(base: &Path, relative: &str) -> Result<PathBuf, String> {
    let candidate = Path::new(relative);
    if relative.trim().is_empty() {
        return Err("path is empty".to_string());
    }
    if candidate.is_absolute() || candidate.has_root() {
        return Err(format!("absolute paths are not allowed: {}", relative));
    }

    let mut depth: usize = 0;
    for component in candidate.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("path escapes the pack directory: {}", relative))?;
            }
            Component::Prefix(_) | Component::RootDir => {
                return Err(format!("absolute paths are not allowed: {}", relative));
            }
        }
    }

    Ok(base.join(candidate))
}
