use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One mod of the curated pack: a display name plus its download URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModEntry {
    pub name: String,
    #[serde(rename = "download")]
    pub url: String,
}

impl ModEntry {
    /// Canonical on-disk filename for this mod.
    ///
    /// Lower-cased display name with `.` turned into `-` and spaces into
    /// `_`, suffixed `.jar`. Two mods whose names sanitize to the same
    /// filename collide; the last download wins and the cleanup sweep
    /// cannot tell them apart. Known limitation.
    pub fn file_name(&self) -> String {
        let name = self
            .name
            .to_lowercase()
            .replace('.', "-")
            .replace(' ', "_");
        format!("{}.jar", name)
    }
}

/// Everything the frontend sends to start one installation.
/// Immutable once submitted; derived paths live in [`InstallPaths`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRequest {
    /// Display name for the launcher profile.
    pub name: String,
    pub mc_version: String,
    pub fabric_loader: String,
    pub mc_dir: PathBuf,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub mods: Vec<ModEntry>,
    pub pack_folder: String,
}

/// Paths derived from an [`InstallRequest`], computed once at submission.
#[derive(Debug, Clone)]
pub struct InstallPaths {
    /// Generated launcher version id, `fabric-loader-<loader>-<mc>`.
    pub profile_id: String,
    pub versions_dir: PathBuf,
    pub profile_dir: PathBuf,
    /// `<profile_dir>/<profile_id>.json`, the Fabric version manifest.
    pub profile_json: PathBuf,
    /// Pack installation root, a sibling of the game dir named after the pack.
    pub custom_dir: PathBuf,
    pub mod_dir: PathBuf,
    /// The vanilla launcher's `launcher_profiles.json`.
    pub registry_file: PathBuf,
}

impl InstallPaths {
    pub fn derive(request: &InstallRequest) -> Self {
        let profile_id = format!(
            "fabric-loader-{}-{}",
            request.fabric_loader, request.mc_version
        );
        let versions_dir = request.mc_dir.join("versions");
        let profile_dir = versions_dir.join(&profile_id);
        let profile_json = profile_dir.join(format!("{}.json", profile_id));

        let custom_dir = match request.mc_dir.parent() {
            Some(parent) => parent.join(&request.pack_folder),
            None => request.mc_dir.join("..").join(&request.pack_folder),
        };
        let mod_dir = custom_dir.join("mods");
        let registry_file = request.mc_dir.join("launcher_profiles.json");

        Self {
            profile_id,
            versions_dir,
            profile_dir,
            profile_json,
            custom_dir,
            mod_dir,
            registry_file,
        }
    }

    /// Empty jar the vanilla launcher expects next to the profile JSON.
    pub fn placeholder_jar(&self) -> PathBuf {
        self.profile_dir.join(format!("{}.jar", self.profile_id))
    }
}

/// List the version ids installed under `<mc_dir>/versions`.
///
/// Returns an empty vec, never an error, when the directory is absent or
/// unreadable. Order is whatever the filesystem yields.
pub fn available_versions(mc_dir: &Path) -> Vec<String> {
    let versions_dir = mc_dir.join("versions");

    let entries = match std::fs::read_dir(&versions_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut versions = Vec::new();
    for entry in entries.flatten() {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        versions.push(entry.file_name().to_string_lossy().to_string());
    }
    versions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> InstallRequest {
        InstallRequest {
            name: "My Pack Profile".into(),
            mc_version: "1.21.1".into(),
            fabric_loader: "0.16.10".into(),
            mc_dir: PathBuf::from("/home/player/.minecraft"),
            icon: String::new(),
            mods: vec![],
            pack_folder: "My Pack".into(),
        }
    }

    #[test]
    fn file_name_sanitizes_dots_and_spaces() {
        let entry = ModEntry {
            name: "Sodium Extra v1.2".into(),
            url: "https://example/sodium-extra.jar".into(),
        };
        assert_eq!(entry.file_name(), "sodium_extra_v1-2.jar");
    }

    #[test]
    fn file_name_for_simple_name() {
        let entry = ModEntry {
            name: "Sodium".into(),
            url: "https://example/sodium.jar".into(),
        };
        assert_eq!(entry.file_name(), "sodium.jar");
    }

    #[test]
    fn derived_paths_follow_the_launcher_layout() {
        let paths = InstallPaths::derive(&request());

        assert_eq!(paths.profile_id, "fabric-loader-0.16.10-1.21.1");
        assert_eq!(
            paths.profile_json,
            PathBuf::from(
                "/home/player/.minecraft/versions/fabric-loader-0.16.10-1.21.1/fabric-loader-0.16.10-1.21.1.json"
            )
        );
        assert_eq!(
            paths.placeholder_jar(),
            paths.profile_dir.join("fabric-loader-0.16.10-1.21.1.jar")
        );
        // The pack installs next to the game dir, not inside it.
        assert_eq!(paths.custom_dir, PathBuf::from("/home/player/My Pack"));
        assert_eq!(paths.mod_dir, PathBuf::from("/home/player/My Pack/mods"));
        assert_eq!(
            paths.registry_file,
            PathBuf::from("/home/player/.minecraft/launcher_profiles.json")
        );
    }

    #[test]
    fn available_versions_is_empty_for_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(available_versions(dir.path()).is_empty());
    }

    #[test]
    fn available_versions_lists_only_directories() {
        let dir = tempfile::tempdir().unwrap();
        let versions = dir.path().join("versions");
        std::fs::create_dir_all(versions.join("1.21.1")).unwrap();
        std::fs::create_dir_all(versions.join("fabric-loader-0.16.10-1.21.1")).unwrap();
        std::fs::write(versions.join("stray.txt"), b"x").unwrap();

        let mut found = available_versions(dir.path());
        found.sort();
        assert_eq!(found, vec!["1.21.1", "fabric-loader-0.16.10-1.21.1"]);
    }
}
