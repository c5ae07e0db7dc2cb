use crate::args::{Cli, Commands};
use crate::handlers;
use anyhow::Result;
use confab_runtime::{resolve_data_dir, AppContext};

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let ctx = AppContext::new(data_dir);

    match cli.command {
        Commands::Init { from } => handlers::init::handle(&ctx, &from),
        Commands::Info => handlers::info::handle(&ctx, cli.format),
        Commands::Schedule {
            day,
            favorites,
            at,
        } => handlers::schedule::handle(&ctx, day, favorites, at, cli.format),
        Commands::Speakers { search, favorites } => {
            handlers::speakers::handle(&ctx, search.as_deref(), favorites, cli.format)
        }
        Commands::Favorites { command } => handlers::favorites::handle(&ctx, command),
        Commands::Refresh => handlers::refresh::handle(&ctx),
    }
}
