use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use super::progress::{state_label, InstallProgress, ProgressSink};
use super::sync::sync_mod_dir;
use crate::core::fabric;
use crate::core::fetch::ContentFetcher;
use crate::core::pack::{InstallPaths, InstallRequest};

/// Mod downloads fill the bar up to 90%; the two fixed post-steps
/// (loader profile install, stale-mod cleanup) get the 90 and 95
/// checkpoints since each is a single discrete operation.
const MODS_MAX_PERCENTAGE: usize = 90;

/// User preference files carried over from the original game dir the
/// first time a pack is installed.
const USER_FILES: [&str; 2] = ["options.txt", "servers.dat"];

/// Run state shared between the caller and the pipeline worker.
///
/// Only the worker transitions `running -> finished`; [`Installer::stop`]
/// only ever sets `running = false, cancelled = true`. There is no other
/// writer, so plain atomic stores are enough.
struct RunFlags {
    running: AtomicBool,
    finished: AtomicBool,
    cancelled: AtomicBool,
}

impl RunFlags {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Flip the run into the cancelled state.
    fn cancel(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

/// One accepted installation: the immutable request plus its derived paths.
struct InstallJob {
    request: InstallRequest,
    paths: InstallPaths,
}

/// Owns the run state machine and drives the installation pipeline on a
/// single background worker.
pub struct Installer {
    flags: RunFlags,
    active: Mutex<Option<InstallRequest>>,
    fetcher: Arc<dyn ContentFetcher>,
    sink: Arc<dyn ProgressSink>,
}

impl Installer {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            flags: RunFlags::new(),
            active: Mutex::new(None),
            fetcher,
            sink,
        }
    }

    /// Launch the pipeline for `request` on a background worker.
    ///
    /// Returns `false` without touching anything when a run is already
    /// active; there is no queueing.
    pub fn start(self: &Arc<Self>, request: InstallRequest) -> bool {
        let job = match self.begin(request) {
            Some(job) => job,
            None => return false,
        };

        let installer = Arc::clone(self);
        tauri::async_runtime::spawn(async move {
            installer.run(job).await;
        });
        true
    }

    /// Claim the run slot and derive all paths. `None` means a run is
    /// already active and the request was dropped.
    fn begin(&self, request: InstallRequest) -> Option<InstallJob> {
        if self
            .flags
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Installer already running, ignoring start request");
            return None;
        }
        self.flags.finished.store(false, Ordering::SeqCst);
        self.flags.cancelled.store(false, Ordering::SeqCst);

        let paths = InstallPaths::derive(&request);
        info!(
            "Running installer in directory {:?} for MC {} with {} mods",
            request.mc_dir,
            request.mc_version,
            request.mods.len()
        );

        if let Ok(mut active) = self.active.lock() {
            *active = Some(request.clone());
        }

        Some(InstallJob { request, paths })
    }

    /// Request cooperative cancellation. The worker only polls the flag at
    /// the top of the per-mod loop, so the in-flight download or fixed
    /// step always completes first.
    pub fn stop(&self) {
        match self.active_request() {
            Some(request) => info!("Stopping installer for pack {:?}", request.pack_folder),
            None => info!("Stopping installer"),
        }
        self.flags.cancel();
    }

    /// The request currently driven by the pipeline; `None` once the run
    /// reaches a terminal state.
    pub fn active_request(&self) -> Option<InstallRequest> {
        self.active.lock().ok().and_then(|guard| guard.clone())
    }

    fn clear_active(&self) {
        if let Ok(mut active) = self.active.lock() {
            *active = None;
        }
    }

    fn notify(&self, state: &str, percent: u8) {
        self.sink.emit(&InstallProgress {
            is_running: self.flags.is_running(),
            is_finish: self.flags.is_finished(),
            is_cancel: self.flags.is_cancelled(),
            percentage: percent,
            state: state.to_string(),
        });
    }

    /// The pipeline. Strictly sequential; cancellation is polled only at
    /// the top of the per-mod loop.
    async fn run(&self, job: InstallJob) {
        if let Err(e) = tokio::fs::create_dir_all(&job.paths.mod_dir).await {
            error!("Failed to create mod dir {:?}: {}", job.paths.mod_dir, e);
            self.flags.cancel();
            self.notify(state_label::MKMODDIR, 0);
            self.clear_active();
            return;
        }

        for file in USER_FILES {
            copy_once(&job.request.mc_dir, &job.paths.custom_dir, file).await;
        }

        let total = job.request.mods.len();
        for (index, entry) in job.request.mods.iter().enumerate() {
            // Cancellation poll point.
            if !self.flags.is_running() {
                break;
            }

            self.notify(&entry.name, mod_percent(index, total));
            info!("Installing {}", entry.name);

            let dest = job.paths.mod_dir.join(entry.file_name());
            if let Err(e) = self.fetcher.fetch(&entry.url, &dest).await {
                error!("Failed to install {}: {}", entry.name, e);
                self.flags.cancel();
                self.notify(&entry.name, mod_percent(index + 1, total));
                break;
            }
        }

        if self.flags.is_running() {
            if total > 0 {
                self.install_and_cleanup(&job).await;
            }
            if self.flags.is_running() {
                self.flags.running.store(false, Ordering::SeqCst);
                self.flags.finished.store(true, Ordering::SeqCst);
            }
        }

        if self.flags.is_cancelled() {
            self.notify(state_label::CANCEL, 0);
        } else {
            self.notify(state_label::FINISH, 100);
        }
        self.clear_active();
    }

    /// The two fixed post-steps, each a single discrete operation.
    async fn install_and_cleanup(&self, job: &InstallJob) {
        self.notify(state_label::FABRIC, 90);
        if let Err(e) =
            fabric::install_loader_profile(self.fetcher.as_ref(), &job.request, &job.paths).await
        {
            error!("Failed to install Fabric profile: {}", e);
            self.flags.cancel();
            self.notify(state_label::FABRIC, 90);
            return;
        }

        self.notify(state_label::CLEANUP, 95);
        if let Err(e) = sync_mod_dir(&job.paths.mod_dir, &job.request.mods).await {
            error!("Failed to clean up stale mods: {}", e);
            self.flags.cancel();
            self.notify(state_label::CLEANUP, 95);
        }
    }
}

/// Progress position of mod `index` out of `total` on the 0..90 band.
fn mod_percent(index: usize, total: usize) -> u8 {
    ((MODS_MAX_PERCENTAGE * index) / total) as u8
}

/// Copy one user preference file into the pack dir, once.
///
/// Advisory only: skipped when the source is missing or the destination
/// already exists, and a failed copy never aborts the pipeline.
async fn copy_once(mc_dir: &Path, custom_dir: &Path, file: &str) {
    let orig = mc_dir.join(file);
    if !orig.exists() {
        return;
    }

    let dest = custom_dir.join(file);
    if dest.exists() {
        info!("Skipping {} copy. Already exists", file);
        return;
    }

    match tokio::fs::copy(&orig, &dest).await {
        Ok(_) => info!("Copied {}", file),
        Err(e) => warn!("Failed to copy {} to {:?}: {}", file, dest, e),
    }
}
