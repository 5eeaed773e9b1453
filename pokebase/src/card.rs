use serde::{Deserialize, Serialize};

use std::fmt;

/// A trading card featuring some Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Id,
    pub name: String,
    pub set: String,
    pub image_url: String,
}

impl Card {
    pub(crate) fn from_response(response: Response) -> Self {
        Self {
            id: Id(response.id),
            name: response.name,
            set: response.set.name,
            image_url: response.images.small,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub(crate) String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
pub(crate) struct Response {
    id: String,
    name: String,
    set: Set,
    images: Images,
}

#[derive(Deserialize)]
struct Set {
    name: String,
}

#[derive(Deserialize)]
struct Images {
    small: String,
}
