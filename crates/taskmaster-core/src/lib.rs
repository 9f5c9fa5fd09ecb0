pub mod activity;
pub mod config;
pub mod datetime;
pub mod error;
pub mod filter;
pub mod goal;
pub mod goals;
pub mod ids;
pub mod intent;
pub mod notify;
pub mod render;
pub mod samples;
pub mod storage;
pub mod task;
pub mod tasks;
pub mod workspace;

use std::rc::Rc;

pub use config::Config;
pub use intent::{Confirm, Intent};
pub use storage::KeyValueStore;
pub use workspace::{Modal, Workspace};

/// Builds and initializes a workspace on the system clock.
#[tracing::instrument(skip_all)]
pub fn open_workspace(store: Rc<dyn KeyValueStore>, cfg: Config) -> Workspace {
    let mut workspace = Workspace::new(store, Rc::new(datetime::SystemClock), cfg);
    workspace.initialize();
    workspace
}
