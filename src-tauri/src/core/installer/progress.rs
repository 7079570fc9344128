use serde::Serialize;
use tauri::Emitter;

/// Event name the frontend listens on for pipeline progress.
pub const PROGRESS_EVENT: &str = "install://progress";

/// Snapshot of the run state emitted after every meaningful step.
///
/// Field names are part of the frontend contract, hence the PascalCase.
#[derive(Debug, Clone, Serialize)]
pub struct InstallProgress {
    #[serde(rename = "IsRunning")]
    pub is_running: bool,
    #[serde(rename = "IsFinish")]
    pub is_finish: bool,
    #[serde(rename = "IsCancel")]
    pub is_cancel: bool,
    #[serde(rename = "Percentage")]
    pub percentage: u8,
    #[serde(rename = "State")]
    pub state: String,
}

/// Fixed `State` labels. Per-mod reports carry the mod display name instead.
pub mod state_label {
    pub const MKMODDIR: &str = "MKMODDIR";
    pub const FABRIC: &str = "FABRIC";
    pub const CLEANUP: &str = "CLEANUP";
    pub const FINISH: &str = "FINISH";
    pub const CANCEL: &str = "CANCEL";
}

/// Where progress reports go. Fire-and-forget; implementations must not
/// block the pipeline worker.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: &InstallProgress);
}

/// Forwards progress reports to the frontend as Tauri events.
pub struct EventSink {
    app: tauri::AppHandle,
}

impl EventSink {
    pub fn new(app: tauri::AppHandle) -> Self {
        Self { app }
    }
}

impl ProgressSink for EventSink {
    fn emit(&self, progress: &InstallProgress) {
        let _ = self.app.emit(PROGRESS_EVENT, progress.clone());
    }
}
