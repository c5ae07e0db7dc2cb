use crate::handlers::refresh::render_progress;
use anyhow::{bail, Context, Result};
use confab_runtime::{AppContext, DataFileUpdater, UpdateOutcome};
use std::path::Path;

/// Seed the data directory with an event file, from a local path or by
/// downloading through the same verify/swap path a refresh uses.
pub fn handle(ctx: &AppContext, from: &str) -> Result<()> {
    std::fs::create_dir_all(ctx.data_dir())
        .with_context(|| format!("cannot create {}", ctx.data_dir().display()))?;

    if from.starts_with("http://") || from.starts_with("https://") {
        let updater = DataFileUpdater::new(from, ctx.event_file());
        if updater.run_once(render_progress) != UpdateOutcome::Replaced {
            bail!("could not fetch a valid event file from {}", from);
        }
    } else {
        let source = Path::new(from);
        confab_store::verify_event_file(source)
            .with_context(|| format!("{} is not a valid event file", source.display()))?;
        std::fs::copy(source, ctx.event_file())
            .with_context(|| format!("cannot copy {} into place", source.display()))?;
    }

    println!("Initialized {}", ctx.data_dir().display());
    Ok(())
}
