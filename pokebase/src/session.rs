pub mod pokeapi;
pub mod pokemon_tcg;

use crate::{Error, Result, pokemon};

use pokeapi::PokeApi;
use pokemon_tcg::PokemonTcg;

use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Every remote service the Pokédex talks to, sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct Session {
    pub pokeapi: PokeApi,
    pub pokemon_tcg: PokemonTcg,
}

impl Session {
    pub fn new(options: Options) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(options.timeout)
            .build()?;

        Ok(Self {
            pokeapi: PokeApi::new(
                client.clone(),
                options.pokeapi_url,
                options.artwork_url,
                options.retries,
            ),
            pokemon_tcg: PokemonTcg::new(
                client,
                options.pokemon_tcg_url,
                options.pokemon_tcg_api_key,
                options.retries,
            ),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    pub pokeapi_url: String,
    /// Base of the artwork template, `{artwork_url}/{id}.png`.
    pub artwork_url: String,
    pub pokemon_tcg_url: String,
    pub pokemon_tcg_api_key: Option<String>,
    /// Applies to every single request.
    pub timeout: Duration,
    /// Automatic retries per request before giving up.
    pub retries: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pokeapi_url: pokeapi::URL.to_owned(),
            artwork_url: pokemon::ARTWORK_URL.to_owned(),
            pokemon_tcg_url: pokemon_tcg::URL.to_owned(),
            pokemon_tcg_api_key: None,
            timeout: Duration::from_secs(15),
            retries: 0,
        }
    }
}

async fn fetch<T>(retries: usize, request: impl Fn() -> reqwest::RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = send(retries, request).await?;
    let bytes = response.bytes().await?;

    Ok(serde_json::from_slice(&bytes)?)
}

async fn send(
    retries: usize,
    request: impl Fn() -> reqwest::RequestBuilder,
) -> Result<reqwest::Response> {
    let request = &request;

    retry(retries, || async move {
        let response = request().send().await?;
        let status = response.status();

        if status.is_success() {
            log::debug!("{url}: {status}", url = response.url());

            Ok::<_, Error>(response)
        } else {
            Err(Error::BadResponse(status))
        }
    })
    .await
}

async fn retry<T, E, F>(mut retries: usize, f: impl Fn() -> F) -> Result<T, E>
where
    E: fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    loop {
        let result = f().await;

        match result {
            Ok(response) => {
                break Ok(response);
            }
            Err(error) => {
                if retries > 0 {
                    log::warn!(
                        "{error} ({retries} {} left)",
                        if retries == 1 { "retry" } else { "retries" }
                    );
                    retries -= 1;
                } else {
                    break Err(error);
                }
            }
        }
    }
}

/// Ensures `url` ends with a slash, so relative paths can be appended.
fn base(url: String) -> String {
    if url.ends_with('/') {
        url
    } else {
        format!("{url}/")
    }
}
