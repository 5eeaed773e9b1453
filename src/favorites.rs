use crate::pokebase::pokemon::{self, Stats};
use crate::pokebase::Pokemon;

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;
use tokio::task;

/// A copy of a favorite [`Pokemon`], independent of the catalog it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: pokemon::Id,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "u32::is_zero")]
    pub height: u32,
    #[serde(default, skip_serializing_if = "u32::is_zero")]
    pub weight: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub stats: Stats,
}

impl Snapshot {
    pub fn new(id: pokemon::Id, pokemon: Option<&Pokemon>) -> Self {
        match pokemon {
            Some(pokemon) => Self {
                id,
                name: pokemon.name.clone(),
                image_url: pokemon.image_url.clone(),
                height: pokemon.height,
                weight: pokemon.weight,
                color: pokemon.color().to_owned(),
                stats: pokemon.stats,
            },
            None => Self {
                id,
                name: String::new(),
                image_url: String::new(),
                height: 0,
                weight: 0,
                color: String::new(),
                stats: Stats::default(),
            },
        }
    }
}

/// The local store of favorite Pokémon.
///
/// Every operation reads the store afresh, so changes made through one
/// handle are visible to any other right away.
#[derive(Debug, Clone)]
pub struct Store {
    storage: Storage,
}

#[derive(Debug, Clone)]
enum Storage {
    File(PathBuf),
    Memory(Arc<Mutex<Vec<Snapshot>>>),
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        log::info!("Favorites stored at {}", path.display());

        Self {
            storage: Storage::File(path),
        }
    }

    /// A store that only lives as long as the process.
    pub fn in_memory() -> Self {
        Self {
            storage: Storage::Memory(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        Some(
            dirs::data_dir()?
                .join(env!("CARGO_PKG_NAME"))
                .join("favorites.ron"),
        )
    }

    pub async fn is_favorite(&self, id: pokemon::Id) -> Result<bool, anywho::Error> {
        Ok(self
            .load()
            .await?
            .iter()
            .any(|snapshot| snapshot.id == id))
    }

    /// Stores a [`Snapshot`] of the given [`Pokemon`], unless one with the same
    /// identifier exists already.
    ///
    /// The existence check and the insertion are not atomic: two concurrent
    /// calls for the same identifier may both insert.
    pub async fn add(
        &self,
        id: pokemon::Id,
        pokemon: Option<&Pokemon>,
    ) -> Result<(), anywho::Error> {
        let mut snapshots = self.load().await?;

        if snapshots.iter().any(|snapshot| snapshot.id == id) {
            log::debug!("Pokémon #{id} is a favorite already");
            return Ok(());
        }

        snapshots.push(Snapshot::new(id, pokemon));

        self.save(snapshots).await
    }

    /// Removes every [`Snapshot`] with the given identifier, if any.
    pub async fn remove(&self, id: pokemon::Id) -> Result<(), anywho::Error> {
        let mut snapshots = self.load().await?;
        let total = snapshots.len();

        snapshots.retain(|snapshot| snapshot.id != id);

        if snapshots.len() == total {
            return Ok(());
        }

        self.save(snapshots).await
    }

    /// Lists every favorite, sorted by identifier.
    pub async fn list(&self) -> Result<Vec<Snapshot>, anywho::Error> {
        let mut snapshots = self.load().await?;
        snapshots.sort_by_key(|snapshot| snapshot.id);

        Ok(snapshots)
    }

    async fn load(&self) -> Result<Vec<Snapshot>, anywho::Error> {
        match &self.storage {
            Storage::File(path) => {
                if !fs::try_exists(path).await? {
                    return Ok(Vec::new());
                }

                let contents = fs::read_to_string(path).await?;

                Ok(task::spawn_blocking(move || ron::from_str(&contents)).await??)
            }
            Storage::Memory(snapshots) => Ok(snapshots
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()),
        }
    }

    async fn save(&self, snapshots: Vec<Snapshot>) -> Result<(), anywho::Error> {
        match &self.storage {
            Storage::File(path) => {
                let contents = task::spawn_blocking(move || {
                    ron::ser::to_string_pretty(&snapshots, ron::ser::PrettyConfig::default())
                })
                .await??;

                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).await?;
                }

                fs::write(path, contents).await?;

                Ok(())
            }
            Storage::Memory(memory) => {
                *memory.lock().unwrap_or_else(PoisonError::into_inner) = snapshots;

                Ok(())
            }
        }
    }
}
