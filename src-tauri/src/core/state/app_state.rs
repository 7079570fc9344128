use std::sync::Arc;

use crate::core::fetch::HttpFetcher;
use crate::core::installer::{EventSink, Installer};

/// Global application state managed by Tauri.
pub struct AppState {
    pub installer: Arc<Installer>,
}

impl AppState {
    pub fn new(app_handle: tauri::AppHandle) -> Self {
        let fetcher = Arc::new(HttpFetcher::new());
        let sink = Arc::new(EventSink::new(app_handle));

        Self {
            installer: Arc::new(Installer::new(fetcher, sink)),
        }
    }
}
