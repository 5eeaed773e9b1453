use crate::pokemon::{self, ListResponse, Summary};
use crate::session;
use crate::{Locale, Pokemon, Result, Source, Species};

use bytes::Bytes;

pub const URL: &str = "https://pokeapi.co/api/v2/";

#[derive(Debug, Clone)]
pub struct PokeApi {
    client: reqwest::Client,
    url: String,
    artwork_url: String,
    retries: usize,
}

impl PokeApi {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        artwork_url: impl Into<String>,
        retries: usize,
    ) -> Self {
        let url = session::base(url.into());
        let artwork_url = artwork_url.into().trim_end_matches('/').to_owned();

        log::info!("PokeAPI session started ({url})");

        Self {
            client,
            url,
            artwork_url,
            retries,
        }
    }

    pub async fn list(&self, limit: usize) -> Result<Vec<Summary>> {
        let url = format!("{base}pokemon", base = self.url);

        log::info!("Listing Pokémon: {url}?limit={limit}");

        let response: ListResponse = session::fetch(self.retries, || {
            self.client.get(&url).query(&[("limit", limit)])
        })
        .await?;

        let total = response.results.len();
        let summaries: Vec<_> = response
            .results
            .into_iter()
            .filter_map(|entry| Summary::parse(entry.name, &entry.url))
            .collect();

        if summaries.len() < total {
            log::warn!(
                "{} entries without a valid identifier were skipped",
                total - summaries.len()
            );
        }

        log::info!("Listed {} of {} Pokémon", summaries.len(), response.count);

        Ok(summaries)
    }

    pub async fn pokemon(&self, id: pokemon::Id) -> Result<Pokemon> {
        let url = format!("{base}pokemon/{id}/", base = self.url);

        log::info!("Fetching Pokémon: {url}");

        let response = session::fetch(self.retries, || self.client.get(&url)).await?;

        Ok(Pokemon::from_response(response))
    }

    pub async fn species(&self, id: pokemon::Id, locale: &Locale) -> Result<Species> {
        let url = format!("{base}pokemon-species/{id}/", base = self.url);

        log::info!("Fetching species: {url}");

        let response = session::fetch(self.retries, || self.client.get(&url)).await?;

        Ok(Species::from_response(response, locale))
    }

    pub async fn download_artwork(&self, id: pokemon::Id) -> Result<Bytes> {
        let url = format!("{base}/{id}.png", base = self.artwork_url);

        log::info!("Downloading artwork: {url}");

        let response = session::send(self.retries, || self.client.get(&url)).await?;

        Ok(response.bytes().await?)
    }
}

impl Source for PokeApi {
    fn list(&self, limit: usize) -> impl Future<Output = Result<Vec<Summary>>> {
        PokeApi::list(self, limit)
    }

    fn pokemon(&self, id: pokemon::Id) -> impl Future<Output = Result<Pokemon>> {
        PokeApi::pokemon(self, id)
    }

    fn species(&self, id: pokemon::Id, locale: &Locale) -> impl Future<Output = Result<Species>> {
        PokeApi::species(self, id, locale)
    }
}
