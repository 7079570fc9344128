// ─── ModUpdater Core ───
// Backend for the Fabric modpack installer.
//
// Architecture:
//   core/
//     pack.rs     — Mod descriptors, install request, derived paths
//     fetch.rs    — ContentFetcher seam + streaming HTTP fetcher
//     fabric.rs   — Fabric loader profile installation
//     profiles.rs — launcher_profiles.json read-modify-write
//     installer/  — Run state machine, pipeline, progress, cleanup
//     state/      — Global application state

pub mod error;
pub mod fabric;
pub mod fetch;
pub mod http;
pub mod installer;
pub mod pack;
pub mod profiles;
pub mod state;
