use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::pack::{InstallPaths, InstallRequest};

/// Registry key under which this pack's profile is stored in
/// `launcher_profiles.json`: lower-cased pack folder, dots stripped,
/// spaces turned into underscores.
pub fn profile_key(pack_folder: &str) -> String {
    pack_folder
        .to_lowercase()
        .replace('.', "")
        .replace(' ', "_")
}

/// Build the launcher profile object for this installation.
///
/// `lastUsed`/`created` are RFC 3339 timestamps; `icon` is only present
/// when the request carries one.
pub fn build_profile_entry(request: &InstallRequest, paths: &InstallPaths) -> Value {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut entry = Map::new();
    entry.insert("gameDir".into(), json!(paths.custom_dir.to_string_lossy()));
    entry.insert("lastUsed".into(), json!(now));
    entry.insert("created".into(), json!(now));
    entry.insert("lastVersionId".into(), json!(paths.profile_id));
    entry.insert("name".into(), json!(request.name));
    entry.insert("type".into(), json!("custom"));

    if !request.icon.is_empty() {
        entry.insert("icon".into(), json!(request.icon));
    }

    Value::Object(entry)
}

/// Insert or overwrite one entry in the launcher profile registry.
///
/// The whole document is read into a generic JSON tree, the `profiles`
/// object is patched by key, and the tree is re-serialized pretty-printed.
/// Every other top-level key and every sibling profile round-trips
/// untouched, in the same key order. Upserting the same key twice leaves
/// exactly one entry.
pub async fn upsert_profile(registry_file: &Path, key: &str, entry: Value) -> InstallerResult<()> {
    let raw = tokio::fs::read_to_string(registry_file)
        .await
        .map_err(|e| InstallerError::io(registry_file, e))?;

    let mut document: Value = serde_json::from_str(&raw)?;

    let profiles = document
        .get_mut("profiles")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            InstallerError::MalformedRegistry("missing top-level \"profiles\" object".into())
        })?;

    profiles.insert(key.to_string(), entry);

    let serialized = serde_json::to_string_pretty(&document)?;
    tokio::fs::write(registry_file, serialized)
        .await
        .map_err(|e| InstallerError::io(registry_file, e))?;

    info!("Launcher profile {:?} written to {:?}", key, registry_file);
    Ok(())
}
