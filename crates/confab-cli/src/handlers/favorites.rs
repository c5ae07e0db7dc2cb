use crate::args::{FavoriteTarget, FavoritesCommand};
use anyhow::Result;
use confab_runtime::AppContext;

pub fn handle(ctx: &AppContext, command: FavoritesCommand) -> Result<()> {
    let mut store = ctx.open_favorites()?;

    match command {
        FavoritesCommand::List => {
            let favorites = store.load()?;

            let mut sessions: Vec<i64> = favorites.sessions.iter().copied().collect();
            sessions.sort_unstable();
            let mut speakers: Vec<i64> = favorites.speakers.iter().copied().collect();
            speakers.sort_unstable();

            println!("Favorite sessions: {}", format_ids(&sessions));
            println!("Favorite speakers: {}", format_ids(&speakers));
        }
        FavoritesCommand::Add { kind, id } => {
            match kind {
                FavoriteTarget::Session => store.add_session(id)?,
                FavoriteTarget::Speaker => store.add_speaker(id)?,
            }
            println!("Favorited {} {}", kind_name(kind), id);
        }
        FavoritesCommand::Remove { kind, id } => {
            match kind {
                FavoriteTarget::Session => store.remove_session(id)?,
                FavoriteTarget::Speaker => store.remove_speaker(id)?,
            }
            println!("Unfavorited {} {}", kind_name(kind), id);
        }
    }

    Ok(())
}

fn kind_name(kind: FavoriteTarget) -> &'static str {
    match kind {
        FavoriteTarget::Session => "session",
        FavoriteTarget::Speaker => "speaker",
    }
}

fn format_ids(ids: &[i64]) -> String {
    if ids.is_empty() {
        "(none)".to_string()
    } else {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
