use crate::args::OutputFormat;
use anyhow::Result;
use confab_runtime::AppContext;

pub fn handle(ctx: &AppContext, format: OutputFormat) -> Result<()> {
    let store = ctx.open_event_store()?;
    let event = store.load_event()?;
    let days = store.load_days()?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&event)?);
        return Ok(());
    }

    println!("{}", event.title);
    if let Some(subtitle) = &event.subtitle {
        println!("{}", subtitle);
    }
    println!("Days: {}", days.len());
    match &event.update_file_url {
        Some(url) => println!("Update URL: {}", url),
        None => println!("Update URL: (none)"),
    }

    Ok(())
}
