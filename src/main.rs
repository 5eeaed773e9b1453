use pokebase;

mod artwork;
mod config;
mod favorites;
mod screen;

use crate::artwork::Artwork;
use crate::config::{Command, Config};
use crate::pokebase::Session;
use crate::screen::{ErrorAction, ERROR_MESSAGE};

use clap::Parser;
use std::io::{self, BufRead, Write};
use tokio::task;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();

    let session = Session::new(config.session())?;
    let store = config.store();
    let locale = config.locale();

    match config.command.clone() {
        Command::Explore { limit } => {
            let mut explore = screen::Explore::new(limit, config.concurrency());
            explore.appear(&session.pokeapi).await;

            while explore.shows_error() {
                let action = ask().await?;
                explore.error_action(action, &session.pokeapi).await;
            }

            println!("{}", explore.view());
        }
        Command::Show { id } => {
            let mut detail = screen::Detail::new(id);
            detail.load(&session.pokeapi, &store, &locale).await;

            while detail.shows_error() {
                let action = ask().await?;
                detail
                    .error_action(action, &session.pokeapi, &store, &locale)
                    .await;
            }

            println!("{}", detail.view());
        }
        Command::Favorite { id } => {
            let mut detail = screen::Detail::new(id);
            detail.load(&session.pokeapi, &store, &locale).await;

            while detail.shows_error() {
                let action = ask().await?;
                detail
                    .error_action(action, &session.pokeapi, &store, &locale)
                    .await;
            }

            if detail.state() == screen::State::Ready && !detail.is_favorite() {
                detail.toggle_favorite(&store).await;

                while detail.shows_error() {
                    let action = ask().await?;
                    detail
                        .error_action(action, &session.pokeapi, &store, &locale)
                        .await;
                }
            }

            println!("{}", detail.view());
        }
        Command::Unfavorite { id } => {
            store.remove(id).await?;

            println!("Pokémon #{id} is no longer a favorite.");
        }
        Command::Favorites => {
            let mut favorites = screen::Favorites::new();
            favorites.load(&store).await;

            while favorites.shows_error() {
                let action = ask().await?;
                favorites.error_action(action, &store).await;
            }

            println!("{}", favorites.view());
        }
        Command::Cards { name } => {
            let mut cards = screen::Cards::new(name);
            cards.load(&session.pokemon_tcg).await;

            while cards.shows_error() {
                let action = ask().await?;
                cards.error_action(action, &session.pokemon_tcg).await;
            }

            println!("{}", cards.view());
        }
        Command::Artwork { id } => {
            let artwork = Artwork::fetch(id, &session, artwork::cache_dir().as_deref()).await?;

            match artwork.path {
                Some(path) => println!("{}", path.display()),
                None => println!("{} bytes (not cached)", artwork.bytes.len()),
            }
        }
    }

    Ok(())
}

/// Shows the error dialog and waits for the user to pick an action.
///
/// Closing the input counts as [`ErrorAction::Exit`].
async fn ask() -> Result<ErrorAction, anywho::Error> {
    Ok(task::spawn_blocking(|| {
        let stdin = io::stdin();

        loop {
            eprint!("{ERROR_MESSAGE} [r]etry / [e]xit: ");
            let _ = io::stderr().flush();

            let mut answer = String::new();

            if stdin.lock().read_line(&mut answer)? == 0 {
                return Ok::<_, io::Error>(ErrorAction::Exit);
            }

            match answer.trim().to_lowercase().as_str() {
                "r" | "retry" => return Ok(ErrorAction::Retry),
                "e" | "exit" => return Ok(ErrorAction::Exit),
                _ => {}
            }
        }
    })
    .await??)
}
