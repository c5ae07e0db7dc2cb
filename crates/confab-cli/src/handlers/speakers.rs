use crate::args::OutputFormat;
use anyhow::Result;
use confab_engine::{filter_speakers, group_speakers_by_initial, section_index_titles};
use confab_runtime::AppContext;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub fn handle(
    ctx: &AppContext,
    search: Option<&str>,
    favorites_only: bool,
    format: OutputFormat,
) -> Result<()> {
    let speakers = ctx.open_event_store()?.load_speakers()?;
    let favorites = ctx.open_favorites()?.load()?;

    let filtered = filter_speakers(speakers, search, favorites_only, &favorites);
    let sections = group_speakers_by_initial(filtered);

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    if sections.is_empty() {
        if favorites_only {
            println!("You currently have no favorited speakers");
        } else {
            println!("No speakers found");
        }
        return Ok(());
    }

    let color = std::io::stdout().is_terminal();
    for section in &sections {
        if color {
            println!("{}", section.label.bold());
        } else {
            println!("{}", section.label);
        }
        for speaker in &section.speakers {
            let marker = if favorites.contains_speaker(speaker.id) {
                " *"
            } else {
                ""
            };
            match &speaker.twitter {
                Some(handle) if !handle.is_empty() => {
                    let at_handle = if handle.starts_with('@') {
                        handle.clone()
                    } else {
                        format!("@{}", handle)
                    };
                    println!("  [{}] {} ({}){}", speaker.id, speaker.name, at_handle, marker);
                }
                _ => println!("  [{}] {}{}", speaker.id, speaker.name, marker),
            }
        }
    }

    let index = section_index_titles(&sections);
    if !index.is_empty() {
        println!("\nIndex: {}", index.join(" "));
    }

    Ok(())
}
