use crate::pokebase::hydrate;
use crate::pokebase::{Concurrency, Gathered, Pokemon, Source};
use crate::screen::{self, ErrorAction, State};

use futures_util::StreamExt;
use std::fmt::Write;

/// The catalog grid: every Pokémon, fully hydrated.
pub struct Explore {
    state: State,
    pokemon: Gathered<Pokemon>,
    limit: usize,
    concurrency: Concurrency,
    is_loaded: bool,
    shows_error: bool,
}

impl Explore {
    pub fn new(limit: usize, concurrency: Concurrency) -> Self {
        Self {
            state: State::Idle,
            pokemon: Gathered::new(),
            limit,
            concurrency,
            is_loaded: false,
            shows_error: false,
        }
    }

    /// Loads the catalog, unless it was loaded already.
    pub async fn appear(&mut self, source: &impl Source) {
        if self.is_loaded {
            return;
        }

        self.load(source).await;
    }

    /// Lists the catalog and hydrates every entry.
    ///
    /// Ends [`State::Empty`] only when the catalog itself is empty. Once the
    /// list succeeds the screen is [`State::Ready`], even if every detail
    /// request failed.
    pub async fn load(&mut self, source: &impl Source) {
        self.is_loaded = true;
        self.state = State::Loading;
        self.pokemon.clear();

        let summaries = match source.list(self.limit).await {
            Ok(summaries) => summaries,
            Err(error) => {
                log::error!("{error}");

                self.state = State::failed(&error);
                self.shows_error = true;
                return;
            }
        };

        if summaries.is_empty() {
            self.state = State::Empty;
            return;
        }

        let details = hydrate::details(source, &summaries, self.concurrency);
        let mut details = std::pin::pin!(details);

        while let Some(result) = details.next().await {
            let _ = self.pokemon.record(result);
        }

        self.pokemon.successes.sort_by_key(|pokemon| pokemon.id);

        if self.pokemon.failures > 0 {
            log::warn!(
                "{} of {} Pokémon could not be loaded",
                self.pokemon.failures,
                self.pokemon.failures + self.pokemon.len()
            );
        }

        self.state = State::Ready;
    }

    pub async fn error_action(&mut self, action: ErrorAction, source: &impl Source) {
        match action {
            ErrorAction::Retry => {
                self.shows_error = false;
                self.is_loaded = false;

                self.appear(source).await;
            }
            ErrorAction::Exit => {
                self.shows_error = false;
            }
        }
    }

    pub fn pokemon(&self) -> &[Pokemon] {
        &self.pokemon.successes
    }

    pub fn shows_error(&self) -> bool {
        self.shows_error
    }

    pub fn view(&self) -> String {
        if let Some(placeholder) = screen::placeholder(self.state) {
            return placeholder.to_owned();
        }

        let mut view = String::new();

        for pokemon in self.pokemon() {
            let types: Vec<_> = pokemon.types.iter().map(ToString::to_string).collect();

            let _ = writeln!(
                view,
                "#{id:0>4}  {name:<16}{types}",
                id = pokemon.id,
                name = pokemon.name,
                types = types.join("/"),
            );
        }

        let _ = write!(view, "{} Pokémon", self.pokemon.len());

        if self.pokemon.failures > 0 {
            let _ = write!(view, " ({} unavailable)", self.pokemon.failures);
        }

        view
    }
}
