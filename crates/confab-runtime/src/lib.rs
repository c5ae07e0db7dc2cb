pub mod config;
pub mod context;
pub mod loader;
pub mod updater;

mod error;

pub use config::Config;
pub use context::{resolve_data_dir, AppContext};
pub use error::{Error, Result};
pub use loader::{spawn_schedule_load, ScheduleOutcome, ScheduleRequest, ScheduleTask};
pub use updater::{DataFileUpdater, UpdateOutcome, UpdateProgress};
