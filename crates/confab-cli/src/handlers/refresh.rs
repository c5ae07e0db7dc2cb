use anyhow::{bail, Result};
use confab_runtime::{AppContext, UpdateOutcome, UpdateProgress};

pub fn handle(ctx: &AppContext) -> Result<()> {
    let updater = match ctx.updater()? {
        Some(updater) => updater,
        None => bail!(
            "No update URL configured (set remote_url in config.toml \
             or update_file_url in the event file)"
        ),
    };

    updater.add_action("cli", |path| {
        println!("Data file replaced: {}", path.display());
    });

    let outcome = updater.run_once(render_progress);

    match outcome {
        UpdateOutcome::Replaced => Ok(()),
        // Failures keep the current data file; the schedule stays usable,
        // so this is informational rather than a hard error.
        UpdateOutcome::Failed => {
            println!("Keeping the current data file");
            Ok(())
        }
        UpdateOutcome::AlreadyRunning => {
            println!("An update is already in progress");
            Ok(())
        }
    }
}

pub(crate) fn render_progress(progress: UpdateProgress) {
    match progress {
        UpdateProgress::Downloading { url } => println!("Downloading {}", url),
        UpdateProgress::Downloaded { bytes } => println!("Downloaded {} bytes", bytes),
        UpdateProgress::Verified => println!("Verified data file"),
        UpdateProgress::Replaced { path } => println!("Swapped in {}", path.display()),
        UpdateProgress::Failed { reason } => println!("Update failed: {}", reason),
    }
}
