use crate::pokebase::pokemon;
use crate::pokebase::Session;

use bytes::Bytes;
use futures_util::TryFutureExt;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Clone)]
pub struct Artwork {
    pub id: pokemon::Id,
    pub bytes: Bytes,
    pub path: Option<PathBuf>,
}

impl Artwork {
    /// Fetches the official artwork of a Pokémon, reading it from the cache
    /// when possible and storing it there otherwise.
    ///
    /// Without a cache directory the artwork is always downloaded.
    pub async fn fetch(
        id: pokemon::Id,
        session: &Session,
        cache: Option<&Path>,
    ) -> Result<Self, anywho::Error> {
        let Some(cache) = cache else {
            log::warn!("No cache directory available! Artwork will not be cached.");

            let bytes = session.pokeapi.download_artwork(id).await?;

            return Ok(Self {
                id,
                bytes,
                path: None,
            });
        };

        let path = cache.join(format!("{id}.png"));

        let fetch_from_cache = async {
            let bytes = fs::read(&path).await?;

            Ok(Bytes::from(bytes))
        };

        let download = async {
            let bytes = session.pokeapi.download_artwork(id).await?;

            Ok::<_, anywho::Error>(bytes)
        };

        let bytes = fetch_from_cache
            .or_else(|_: anywho::Error| download)
            .await?;

        if !fs::try_exists(&path).await.unwrap_or_default() {
            let _ = fs::create_dir_all(path.parent().unwrap_or(&path)).await;
            let _ = fs::write(&path, &bytes).await;
        }

        let path = fs::try_exists(&path)
            .await
            .unwrap_or_default()
            .then_some(path);

        Ok(Self { id, bytes, path })
    }
}

impl fmt::Debug for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artwork")
            .field("id", &self.id)
            .field("bytes", &self.bytes.len())
            .field("path", &self.path)
            .finish()
    }
}

pub fn cache_dir() -> Option<PathBuf> {
    Some(
        dirs::cache_dir()?
            .join(env!("CARGO_PKG_NAME"))
            .join("artwork"),
    )
}
