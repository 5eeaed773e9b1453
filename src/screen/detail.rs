use crate::favorites::Store;
use crate::pokebase::pokemon::{self, Stat};
use crate::pokebase::{Locale, Pokemon, Source, Species};
use crate::screen::{self, ErrorAction, State};

use std::fmt::Write;

/// A single Pokémon, with its flavor text, stats and favorite status.
pub struct Detail {
    id: pokemon::Id,
    state: State,
    pokemon: Option<Pokemon>,
    species: Option<Species>,
    is_favorite: bool,
    toggle_failed: bool,
    shows_error: bool,
}

impl Detail {
    pub fn new(id: pokemon::Id) -> Self {
        Self {
            id,
            state: State::Idle,
            pokemon: None,
            species: None,
            is_favorite: false,
            toggle_failed: false,
            shows_error: false,
        }
    }

    pub async fn load(&mut self, source: &impl Source, favorites: &Store, locale: &Locale) {
        self.state = State::Loading;
        self.toggle_failed = false;

        let pokemon = match source.pokemon(self.id).await {
            Ok(pokemon) => pokemon,
            Err(error) => {
                log::error!("{error}");

                self.state = State::failed(&error);
                self.shows_error = true;
                return;
            }
        };

        self.species = match source.species(self.id, locale).await {
            Ok(species) => Some(species),
            Err(error) => {
                log::warn!("Species of #{id} unavailable: {error}", id = self.id);
                None
            }
        };

        self.pokemon = Some(pokemon);

        match favorites.is_favorite(self.id).await {
            Ok(is_favorite) => {
                self.is_favorite = is_favorite;
                self.state = State::Ready;
            }
            Err(error) => self.fail(error),
        }
    }

    /// Adds or removes the Pokémon from the favorites.
    ///
    /// If storage fails, retrying from the error dialog toggles again instead
    /// of reloading.
    pub async fn toggle_favorite(&mut self, favorites: &Store) {
        let result = if self.is_favorite {
            favorites.remove(self.id).await
        } else {
            favorites.add(self.id, self.pokemon.as_ref()).await
        };

        match result {
            Ok(()) => {
                self.is_favorite = !self.is_favorite;

                if self.toggle_failed {
                    self.toggle_failed = false;
                    self.state = State::Ready;
                }
            }
            Err(error) => {
                self.toggle_failed = true;
                self.fail(error);
            }
        }
    }

    pub async fn error_action(
        &mut self,
        action: ErrorAction,
        source: &impl Source,
        favorites: &Store,
        locale: &Locale,
    ) {
        self.shows_error = false;

        match action {
            ErrorAction::Retry if self.toggle_failed => {
                self.toggle_favorite(favorites).await;
            }
            ErrorAction::Retry => {
                self.load(source, favorites, locale).await;
            }
            ErrorAction::Exit => {}
        }
    }

    fn fail(&mut self, error: anywho::Error) {
        log::error!("{error}");

        self.state = State::Error;
        self.shows_error = true;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn flavor_text(&self) -> Option<&str> {
        self.species
            .as_ref()
            .map(|species| species.flavor_text.as_str())
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn shows_error(&self) -> bool {
        self.shows_error
    }

    pub fn view(&self) -> String {
        if let Some(placeholder) = screen::placeholder(self.state) {
            return placeholder.to_owned();
        }

        let Some(pokemon) = &self.pokemon else {
            return String::new();
        };

        let mut view = String::new();
        let types: Vec<_> = pokemon.types.iter().map(ToString::to_string).collect();

        let _ = writeln!(
            view,
            "#{id:0>4} {name}{star}",
            id = pokemon.id,
            name = pokemon.name,
            star = if self.is_favorite { " ★" } else { "" }
        );
        let _ = writeln!(view, "Types:  {}", types.join(", "));
        let _ = writeln!(
            view,
            "Height: {:.1} m  Weight: {:.1} kg",
            f64::from(pokemon.height) / 10.0,
            f64::from(pokemon.weight) / 10.0
        );

        if let Some(flavor_text) = self.flavor_text().filter(|text| !text.is_empty()) {
            let _ = writeln!(view, "\n{flavor_text}");
        }

        let _ = writeln!(view);

        for (stat, value) in pokemon.stats.iter() {
            let _ = writeln!(view, "{:<8} {value:>3} {}", stat.label(), bar(value, 20));
        }

        let _ = write!(view, "{:<8} {:>3}", "Total", pokemon.stats.total());

        view
    }
}

/// Renders a stat as a horizontal bar of the given width.
fn bar(value: u32, width: u32) -> String {
    let filled = (value.min(Stat::MAX) * width + Stat::MAX / 2) / Stat::MAX;

    format!(
        "{}{}",
        "█".repeat(filled as usize),
        "░".repeat((width - filled) as usize)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::fake::{self, Fake};

    use tempfile::TempDir;

    const BULBASAUR: pokemon::Id = pokemon::Id::new(1);

    #[tokio::test]
    async fn loads_details_species_and_favorite_status() {
        let source = Fake::new([1]);
        let favorites = Store::in_memory();
        let mut detail = Detail::new(BULBASAUR);

        detail.load(&source, &favorites, &Locale::new("es")).await;

        assert_eq!(detail.state(), State::Ready);
        assert_eq!(detail.pokemon.as_ref(), Some(&fake::pokemon(1)));
        assert_eq!(detail.flavor_text(), Some("Flavor text (es)"));
        assert!(!detail.is_favorite());
    }

    #[tokio::test]
    async fn toggling_updates_status_without_reloading() {
        let source = Fake::new([1]);
        let favorites = Store::in_memory();
        let mut detail = Detail::new(BULBASAUR);

        detail.load(&source, &favorites, &Locale::default()).await;
        detail.toggle_favorite(&favorites).await;

        assert!(detail.is_favorite());
        assert!(favorites.is_favorite(BULBASAUR).await.expect("Check favorite"));

        let snapshots = favorites.list().await.expect("List favorites");
        assert_eq!(snapshots[0].name, "pokemon-1");
        assert_eq!(snapshots[0].color, "water");

        detail.toggle_favorite(&favorites).await;

        assert!(!detail.is_favorite());
        assert!(favorites.list().await.expect("List favorites").is_empty());
    }

    #[tokio::test]
    async fn missing_pokemon_raises_the_error_dialog() {
        let source = Fake::new([1]).failing([1]);
        let favorites = Store::in_memory();
        let mut detail = Detail::new(BULBASAUR);

        detail.load(&source, &favorites, &Locale::default()).await;

        assert_eq!(detail.state(), State::Error);
        assert!(detail.shows_error());
        assert!(detail.pokemon.as_ref().is_none());

        detail
            .error_action(ErrorAction::Exit, &source, &favorites, &Locale::default())
            .await;

        assert!(!detail.shows_error());
    }

    #[tokio::test]
    async fn retrying_a_failed_toggle_toggles_again() {
        let source = Fake::new([1]);
        let favorites = Store::in_memory();
        let directory = TempDir::new().expect("Create temporary directory");
        let unreadable = Store::open(directory.path());
        let mut detail = Detail::new(BULBASAUR);

        detail.load(&source, &favorites, &Locale::default()).await;
        detail.toggle_favorite(&unreadable).await;

        assert_eq!(detail.state(), State::Error);
        assert!(detail.shows_error());
        assert!(!detail.is_favorite());

        detail
            .error_action(ErrorAction::Retry, &source, &favorites, &Locale::default())
            .await;

        assert_eq!(detail.state(), State::Ready);
        assert!(!detail.shows_error());
        assert!(detail.is_favorite());
        assert!(favorites.is_favorite(BULBASAUR).await.expect("Check favorite"));
    }

    #[tokio::test]
    async fn view_renders_stat_bars() {
        let source = Fake::new([1]);
        let favorites = Store::in_memory();
        let mut detail = Detail::new(BULBASAUR);

        detail.load(&source, &favorites, &Locale::default()).await;
        let view = detail.view();

        assert!(view.starts_with("#0001 pokemon-1\n"));
        assert!(view.contains("Height: 1.0 m  Weight: 10.0 kg"));
        assert!(view.contains("Flavor text (en)"));
        assert!(view.contains(&format!("Speed    255 {}", "█".repeat(20))));
        assert!(view.contains(&format!("Defense    0 {}", "░".repeat(20))));
        assert!(view.ends_with("Total    305"));
    }

    #[test]
    fn bars_are_proportional() {
        assert_eq!(bar(0, 10), "░".repeat(10));
        assert_eq!(bar(128, 10), format!("{}{}", "█".repeat(5), "░".repeat(5)));
        assert_eq!(bar(999, 10), "█".repeat(10));
    }
}
