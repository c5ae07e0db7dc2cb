mod args;
mod commands;
mod handlers;

pub use args::{Cli, Commands, FavoriteTarget, FavoritesCommand, OutputFormat};
pub use commands::run;
