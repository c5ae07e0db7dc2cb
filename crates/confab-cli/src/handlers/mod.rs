pub mod favorites;
pub mod info;
pub mod init;
pub mod refresh;
pub mod schedule;
pub mod speakers;

use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn now_epoch() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
