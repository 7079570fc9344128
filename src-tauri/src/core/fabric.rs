use tracing::info;

use crate::core::error::{InstallerError, InstallerResult};
use crate::core::fetch::ContentFetcher;
use crate::core::pack::{InstallPaths, InstallRequest};
use crate::core::profiles;

pub const FABRIC_META_BASE: &str = "https://meta.fabricmc.net/v2";

/// Fabric Meta endpoint serving the launcher-ready version manifest for
/// one loader/game version pair.
pub fn profile_json_url(mc_version: &str, loader_version: &str) -> String {
    format!(
        "{}/versions/loader/{}/{}/profile/json",
        FABRIC_META_BASE, mc_version, loader_version
    )
}

/// Install the Fabric loader profile and register it with the launcher.
///
/// Creates the version directory, drops an empty placeholder jar (the
/// vanilla launcher only resolves a profile whose version dir contains a
/// jar named exactly like the version id; it does not care that the jar
/// is empty), fetches the profile manifest from Fabric Meta, and upserts
/// this pack's entry into `launcher_profiles.json`.
pub async fn install_loader_profile(
    fetcher: &dyn ContentFetcher,
    request: &InstallRequest,
    paths: &InstallPaths,
) -> InstallerResult<()> {
    info!(
        "Installing Fabric {} for Minecraft {} as {:?}",
        request.fabric_loader, request.mc_version, paths.profile_id
    );

    tokio::fs::create_dir_all(&paths.profile_dir)
        .await
        .map_err(|e| InstallerError::io(&paths.profile_dir, e))?;

    let placeholder = paths.placeholder_jar();
    let _ = tokio::fs::remove_file(&placeholder).await;
    tokio::fs::File::create(&placeholder)
        .await
        .map_err(|e| InstallerError::io(&placeholder, e))?;

    info!("Downloading Fabric profile manifest...");
    let url = profile_json_url(&request.mc_version, &request.fabric_loader);
    fetcher.fetch(&url, &paths.profile_json).await?;

    info!("Creating launcher profile...");
    let key = profiles::profile_key(&request.pack_folder);
    let entry = profiles::build_profile_entry(request, paths);
    profiles::upsert_profile(&paths.registry_file, &key, entry).await?;

    Ok(())
}
