use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::core::error::InstallerError;
use crate::core::pack::{self, InstallRequest};
use crate::core::state::AppState;

/// Kick off an installation run.
///
/// Returns `false` when a run is already in progress; the request is
/// dropped, not queued.
#[tauri::command]
pub async fn start_installation(
    state: tauri::State<'_, Arc<Mutex<AppState>>>,
    request: InstallRequest,
) -> Result<bool, InstallerError> {
    info!(
        "Install requested for pack {:?} ({} mods)",
        request.pack_folder,
        request.mods.len()
    );
    let state = state.lock().await;
    Ok(state.installer.start(request))
}

/// Ask the running pipeline to cancel at its next poll point.
#[tauri::command]
pub async fn stop_installation(
    state: tauri::State<'_, Arc<Mutex<AppState>>>,
) -> Result<(), InstallerError> {
    let state = state.lock().await;
    state.installer.stop();
    Ok(())
}

/// Version ids installed under `<mc_dir>/versions`; empty when absent.
#[tauri::command]
pub fn get_minecraft_versions(mc_dir: PathBuf) -> Vec<String> {
    pack::available_versions(&mc_dir)
}
