use crate::favorites::Store;
use crate::pokebase::pokemon;
use crate::pokebase::session::{self, pokeapi, pokemon_tcg};
use crate::pokebase::{Concurrency, Locale};

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Browse the Pokédex from your terminal.
#[derive(Debug, Parser)]
#[command(name = "pokedex", version)]
pub struct Config {
    /// Base URL of PokeAPI
    #[arg(long, env = "POKEDEX_API_URL", default_value = pokeapi::URL)]
    pub api_url: String,

    /// Base URL of the official artwork
    #[arg(long, env = "POKEDEX_ARTWORK_URL", default_value = pokemon::ARTWORK_URL)]
    pub artwork_url: String,

    /// Base URL of the Pokémon TCG API
    #[arg(long, env = "POKEDEX_TCG_API_URL", default_value = pokemon_tcg::URL)]
    pub tcg_api_url: String,

    /// API key for the Pokémon TCG API
    #[arg(long, env = "POKEMONTCG_API_KEY", hide_env_values = true)]
    pub tcg_api_key: Option<String>,

    /// Timeout of every request, in seconds
    #[arg(long, env = "POKEDEX_TIMEOUT", default_value_t = 15)]
    pub timeout: u64,

    /// Maximum detail requests in flight at once (0 means unbounded)
    #[arg(long, env = "POKEDEX_MAX_CONCURRENT_REQUESTS", default_value_t = 0)]
    pub max_concurrent_requests: usize,

    /// Automatic retries of a failed request
    #[arg(long, env = "POKEDEX_RETRIES", default_value_t = 0)]
    pub retries: usize,

    /// Path of the favorites file
    #[arg(long, env = "POKEDEX_FAVORITES")]
    pub favorites: Option<PathBuf>,

    /// Language of flavor texts (defaults to the system language)
    #[arg(long, env = "POKEDEX_LANGUAGE")]
    pub language: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the catalog, with the details of every Pokémon
    Explore {
        /// Maximum amount of Pokémon to list
        #[arg(long, default_value_t = 5000)]
        limit: usize,
    },
    /// Show the details of a Pokémon
    Show { id: pokemon::Id },
    /// Mark a Pokémon as favorite
    Favorite { id: pokemon::Id },
    /// Unmark a favorite Pokémon
    Unfavorite { id: pokemon::Id },
    /// List favorite Pokémon
    Favorites,
    /// Search trading cards of a Pokémon
    Cards { name: String },
    /// Download the official artwork of a Pokémon
    Artwork { id: pokemon::Id },
}

impl Config {
    pub fn session(&self) -> session::Options {
        session::Options {
            pokeapi_url: self.api_url.clone(),
            artwork_url: self.artwork_url.clone(),
            pokemon_tcg_url: self.tcg_api_url.clone(),
            pokemon_tcg_api_key: self.tcg_api_key.clone(),
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
        }
    }

    pub fn concurrency(&self) -> Concurrency {
        Concurrency::limited(self.max_concurrent_requests)
    }

    pub fn locale(&self) -> Locale {
        self.language
            .as_deref()
            .map(Locale::new)
            .unwrap_or_else(Locale::current)
    }

    pub fn store(&self) -> Store {
        match self.favorites.clone().or_else(Store::default_path) {
            Some(path) => Store::open(path),
            None => {
                log::warn!("No data directory available! Favorites will not persist.");

                Store::in_memory()
            }
        }
    }
}
