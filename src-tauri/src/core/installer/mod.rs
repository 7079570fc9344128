pub mod controller;
pub mod progress;
pub mod sync;

pub use controller::Installer;
pub use progress::{EventSink, InstallProgress, ProgressSink};
