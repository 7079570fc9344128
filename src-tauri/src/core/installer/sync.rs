use std::path::Path;

use tracing::info;

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::pack::ModEntry;

/// Delete every file in `mod_dir` that is not part of the current mod set.
///
/// Only plain files are considered; subdirectories are never inspected or
/// removed. The first deletion failure aborts the sweep.
pub async fn sync_mod_dir(mod_dir: &Path, mods: &[ModEntry]) -> InstallerResult<()> {
    info!("Performing mod cleanup from old mods in {:?}", mod_dir);

    let mut entries = tokio::fs::read_dir(mod_dir)
        .await
        .map_err(|e| InstallerError::io(mod_dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| InstallerError::io(mod_dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| InstallerError::io(entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().to_string();
        let in_current_pack = mods.iter().any(|m| m.file_name() == file_name);

        if !in_current_pack {
            info!("Removing {}", file_name);
            tokio::fs::remove_file(entry.path())
                .await
                .map_err(|e| InstallerError::io(entry.path(), e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods() -> Vec<ModEntry> {
        vec![
            ModEntry {
                name: "Sodium".into(),
                url: "https://example/sodium.jar".into(),
            },
            ModEntry {
                name: "Lithium".into(),
                url: "https://example/lithium.jar".into(),
            },
        ]
    }

    #[tokio::test]
    async fn removes_files_not_in_current_pack() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("sodium.jar"), b"a")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("lithium.jar"), b"b")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("old-mod.jar"), b"c")
            .await
            .unwrap();

        sync_mod_dir(dir.path(), &mods()).await.unwrap();

        assert!(dir.path().join("sodium.jar").exists());
        assert!(dir.path().join("lithium.jar").exists());
        assert!(!dir.path().join("old-mod.jar").exists());
    }

    #[tokio::test]
    async fn never_touches_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("config-backup");
        tokio::fs::create_dir(&nested).await.unwrap();
        tokio::fs::write(nested.join("not-a-mod.jar"), b"x")
            .await
            .unwrap();

        sync_mod_dir(dir.path(), &mods()).await.unwrap();

        assert!(nested.join("not-a-mod.jar").exists());
    }

    #[tokio::test]
    async fn empty_mod_set_clears_all_files() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("sodium.jar"), b"a")
            .await
            .unwrap();

        sync_mod_dir(dir.path(), &[]).await.unwrap();

        assert!(!dir.path().join("sodium.jar").exists());
    }
}
