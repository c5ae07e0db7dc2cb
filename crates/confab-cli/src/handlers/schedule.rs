use crate::args::OutputFormat;
use crate::handlers::now_epoch;
use anyhow::{anyhow, bail, Result};
use confab_engine::{classify_sections, ScheduleSection, SectionStatus};
use confab_runtime::{spawn_schedule_load, AppContext, ScheduleOutcome, ScheduleRequest};
use confab_types::ScheduleDay;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub fn handle(
    ctx: &AppContext,
    day_number: Option<usize>,
    favorites_only: bool,
    at: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let utc_offset_secs = ctx.config()?.utc_offset_secs;
    let now = at.unwrap_or_else(now_epoch);

    let days = ctx.open_event_store()?.load_days()?;
    if days.is_empty() {
        bail!("The event file has no schedule days");
    }
    let day = pick_day(&days, day_number, now)?;

    // Load, filter and group off this thread; the worker reopens its own
    // store handles, so a swap that happened since `load_days` is fine.
    let task = spawn_schedule_load(ScheduleRequest {
        event_file: ctx.event_file(),
        appdata_file: ctx.appdata_file(),
        day: day.clone(),
        favorites_only,
        utc_offset_secs,
    })?;

    let (sections, issues) = match task.wait() {
        ScheduleOutcome::Loaded { sections, issues } => (sections, issues),
        ScheduleOutcome::Failed(reason) => bail!(reason),
    };

    for issue in &issues {
        eprintln!("warning: {}", issue);
    }

    let statuses = classify_sections(&sections, now);

    match format {
        OutputFormat::Json => print_json(&day, &sections, &statuses)?,
        OutputFormat::Plain => print_plain(&day, &sections, &statuses, favorites_only),
    }

    Ok(())
}

fn pick_day(days: &[ScheduleDay], day_number: Option<usize>, now: i64) -> Result<ScheduleDay> {
    match day_number {
        Some(n) => days
            .get(n.wrapping_sub(1))
            .cloned()
            .ok_or_else(|| anyhow!("No day {} (the event has {} days)", n, days.len())),
        None => Ok(days
            .iter()
            .find(|day| day.begin_time <= now && now < day.end_time)
            .unwrap_or(&days[0])
            .clone()),
    }
}

fn section_header(section: &ScheduleSection, status: SectionStatus) -> String {
    match status {
        SectionStatus::Live => format!("{} (LIVE now)", section.label),
        SectionStatus::UpNext => format!("{} (coming up next)", section.label),
        _ => section.label.clone(),
    }
}

fn print_plain(
    day: &ScheduleDay,
    sections: &[ScheduleSection],
    statuses: &[SectionStatus],
    favorites_only: bool,
) {
    if sections.is_empty() {
        if favorites_only {
            println!("No sessions match your current filter");
        } else {
            println!("No sessions scheduled");
        }
        return;
    }

    let color = std::io::stdout().is_terminal();
    println!("{}", day.title);

    for (section, &status) in sections.iter().zip(statuses) {
        let header = section_header(section, status);
        if color && status == SectionStatus::Live {
            println!("\n{}", header.bold().green());
        } else if color {
            println!("\n{}", header.bold());
        } else {
            println!("\n{}", header);
        }

        for session in &section.sessions {
            println!(
                "  [{}] {}  ({}, {}, {})",
                session.id, session.title, session.speaker.name, session.track.name,
                session.location.name
            );
        }
    }
}

fn print_json(
    day: &ScheduleDay,
    sections: &[ScheduleSection],
    statuses: &[SectionStatus],
) -> Result<()> {
    let payload = serde_json::json!({
        "day": day,
        "sections": sections
            .iter()
            .zip(statuses)
            .map(|(section, status)| {
                serde_json::json!({
                    "label": section.label,
                    "start_time": section.start_time,
                    "status": status,
                    "sessions": section.sessions,
                })
            })
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
