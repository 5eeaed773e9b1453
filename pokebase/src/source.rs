use crate::pokemon::{self, Summary};
use crate::{Locale, Pokemon, Result, Species};

/// Where Pokémon data comes from.
///
/// [`PokeApi`](crate::session::pokeapi::PokeApi) is the production
/// implementation.
pub trait Source {
    /// Lists up to `limit` catalog entries. Entries without a valid
    /// identifier are skipped.
    fn list(&self, limit: usize) -> impl Future<Output = Result<Vec<Summary>>>;

    fn pokemon(&self, id: pokemon::Id) -> impl Future<Output = Result<Pokemon>>;

    fn species(&self, id: pokemon::Id, locale: &Locale) -> impl Future<Output = Result<Species>>;
}

