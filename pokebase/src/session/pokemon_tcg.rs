use crate::session;
use crate::{Card, Result, card};

use serde::Deserialize;

pub const URL: &str = "https://api.pokemontcg.io/v2/";

#[derive(Debug, Clone)]
pub struct PokemonTcg {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    retries: usize,
}

impl PokemonTcg {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        api_key: Option<String>,
        retries: usize,
    ) -> Self {
        if let Some(api_key) = api_key.as_ref() {
            log::info!(
                "PokemonTCG session started (API key: {})",
                api_key.replace(|c: char| c.is_alphanumeric(), "*")
            )
        } else {
            log::warn!("PokemonTCG session started without an API key!")
        }

        Self {
            client,
            url: session::base(url.into()),
            api_key,
            retries,
        }
    }

    /// Searches every card whose name matches the given Pokémon name.
    pub async fn search(&self, name: &str) -> Result<Vec<Card>> {
        let url = format!("{base}cards", base = self.url);
        let query = format!("name:{name}");

        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            data: Vec<card::Response>,
        }

        log::info!("Searching cards: {url}?q={query}");

        let response: Response =
            session::fetch(self.retries, || self.get(&url).query(&[("q", &query)])).await?;

        Ok(response.data.into_iter().map(Card::from_response).collect())
    }

    fn get(&self, url: impl AsRef<str>) -> reqwest::RequestBuilder {
        let request = self.client.get(url.as_ref());

        if let Some(api_key) = &self.api_key {
            request.header("X-Api-Key", api_key)
        } else {
            request
        }
    }
}
