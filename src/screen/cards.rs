use crate::pokebase::session::pokemon_tcg::PokemonTcg;
use crate::pokebase::Card;
use crate::screen::{self, ErrorAction, State};

use std::fmt::Write;

/// Trading cards featuring a Pokémon.
pub struct Cards {
    name: String,
    state: State,
    cards: Vec<Card>,
    shows_error: bool,
}

impl Cards {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: State::Idle,
            cards: Vec::new(),
            shows_error: false,
        }
    }

    pub async fn load(&mut self, pokemon_tcg: &PokemonTcg) {
        self.state = State::Loading;

        match pokemon_tcg.search(&self.name).await {
            Ok(cards) => {
                self.state = if cards.is_empty() {
                    State::Empty
                } else {
                    State::Ready
                };
                self.cards = cards;
            }
            Err(error) => {
                log::error!("{error}");

                self.state = State::failed(&error);
                self.shows_error = true;
            }
        }
    }

    pub async fn error_action(&mut self, action: ErrorAction, pokemon_tcg: &PokemonTcg) {
        self.shows_error = false;

        if action == ErrorAction::Retry {
            self.load(pokemon_tcg).await;
        }
    }

    pub fn shows_error(&self) -> bool {
        self.shows_error
    }

    pub fn view(&self) -> String {
        if let Some(placeholder) = screen::placeholder(self.state) {
            return placeholder.to_owned();
        }

        let mut view = String::new();

        for card in &self.cards {
            let _ = writeln!(
                view,
                "{id:<14}{name:<24}{set:<24}{image}",
                id = card.id.as_str(),
                name = card.name,
                set = card.set,
                image = card.image_url,
            );
        }

        let _ = write!(view, "{} cards of {}", self.cards.len(), self.name);

        view
    }
}
