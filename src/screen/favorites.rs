use crate::favorites::{Snapshot, Store};
use crate::screen::{self, ErrorAction, State};

use std::fmt::Write;

/// Every Pokémon marked as favorite.
pub struct Favorites {
    state: State,
    favorites: Vec<Snapshot>,
    shows_error: bool,
}

impl Favorites {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            favorites: Vec::new(),
            shows_error: false,
        }
    }

    pub async fn load(&mut self, store: &Store) {
        self.state = State::Loading;

        match store.list().await {
            Ok(favorites) => {
                self.state = if favorites.is_empty() {
                    State::Empty
                } else {
                    State::Ready
                };
                self.favorites = favorites;
            }
            Err(error) => {
                log::error!("Failed to load favorites: {error}");

                self.state = State::Error;
                self.shows_error = true;
            }
        }
    }

    pub async fn error_action(&mut self, action: ErrorAction, store: &Store) {
        self.shows_error = false;

        if action == ErrorAction::Retry {
            self.load(store).await;
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

        for snapshot in &self.favorites {
            let _ = writeln!(
                view,
                "#{id:0>4}  {name:<16}{color}",
                id = snapshot.id,
                name = snapshot.name,
                color = snapshot.color,
            );
        }

        let _ = write!(view, "{} favorites", self.favorites.len());

        view
    }
}
