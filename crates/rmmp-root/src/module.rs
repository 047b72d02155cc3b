use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::{Result, RootError};

/// An installed module, as reported by the root manager.
///
/// KernelSU and APatch print flags and version codes as strings; both
/// spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "versionCode", deserialize_with = "text")]
    pub version_code: String,
    pub author: String,
    pub description: String,
    #[serde(deserialize_with = "flag")]
    pub enabled: bool,
    /// Whether the module declares an update channel.
    #[serde(rename = "update", deserialize_with = "flag")]
    pub has_update_channel: bool,
    #[serde(rename = "updateJson")]
    pub update_json: String,
    #[serde(deserialize_with = "flag")]
    pub web: bool,
    #[serde(deserialize_with = "flag")]
    pub action: bool,
    #[serde(deserialize_with = "flag")]
    pub remove: bool,
    pub dir_id: String,
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
    })
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Number(i64),
        Text(String),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Number(n) => n.to_string(),
        Text::Text(s) => s,
    })
}

/// Parse `module.prop`: `key=value` lines, `#` comments, whitespace trimmed.
/// Later keys win.
pub fn parse_module_prop(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Build a [`ModuleInfo`] from an on-disk module directory.
fn read_module(id: &str, dir: &Path) -> Result<ModuleInfo> {
    let prop_file = dir.join("module.prop");
    let content = fs::read_to_string(&prop_file).map_err(|e| RootError::io(&prop_file, e))?;
    let mut props = parse_module_prop(&content);
    let mut take = |key: &str| props.remove(key).unwrap_or_default();

    let update_json = take("updateJson");
    Ok(ModuleInfo {
        id: id.to_string(),
        name: take("name"),
        version: take("version"),
        version_code: take("versionCode"),
        author: take("author"),
        description: take("description"),
        enabled: !dir.join("disable").exists(),
        has_update_channel: !update_json.is_empty(),
        update_json,
        web: dir.join("webroot").is_dir(),
        action: dir.join("action.sh").is_file(),
        remove: dir.join("remove").exists(),
        dir_id: id.to_string(),
    })
}

/// Enumerate module directories under `modules_dir`.
///
/// `lost+found` and hidden directories are skipped. A module whose
/// `module.prop` cannot be read is logged and left out.
pub fn scan_modules_dir(modules_dir: &Path) -> Result<Vec<ModuleInfo>> {
    let entries = fs::read_dir(modules_dir).map_err(|e| RootError::io(modules_dir, e))?;

    let mut modules = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| RootError::io(modules_dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let id = entry.file_name().to_string_lossy().into_owned();
        if id == "lost+found" || id.starts_with('.') {
            continue;
        }

        match read_module(&id, &path) {
            Ok(module) => modules.push(module),
            Err(e) => warn!(module = %id, error = %e, "skipping unreadable module"),
        }
    }

    modules.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(modules)
}
