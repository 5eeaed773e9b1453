use serde::{Deserialize, Serialize};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

pub const ARTWORK_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: Id,
    pub name: String,
    pub image_url: String,
    /// Height in decimeters.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    pub types: Vec<Type>,
    pub stats: Stats,
}

impl Pokemon {
    pub(crate) fn from_response(response: Response) -> Self {
        Self {
            id: response.id,
            name: response.name,
            image_url: artwork_url(response.id),
            height: response.height,
            weight: response.weight,
            types: response.types.into_iter().map(|slot| slot.type_.name).collect(),
            stats: Stats::from_iter(
                response
                    .stats
                    .iter()
                    .map(|entry| (entry.stat.name.as_str(), entry.base_stat)),
            ),
        }
    }

    /// The color key of the primary type.
    pub fn color(&self) -> &'static str {
        self.types.first().copied().unwrap_or_default().color()
    }
}

/// A catalog entry, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub id: Id,
    pub name: String,
    pub image_url: String,
}

impl Summary {
    /// Builds a [`Summary`] out of a list entry, taking the identifier from the
    /// last segment of its resource URL.
    ///
    /// Relative URLs are accepted. Returns `None` if the segment is not a
    /// number.
    pub fn parse(name: impl Into<String>, url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);

        let id: Id = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .next_back()?
            .parse()
            .ok()?;

        Some(Self {
            id,
            name: name.into(),
            image_url: artwork_url(id),
        })
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Id(pub(crate) u32);

impl Id {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Identifier `0` never names a real entry.
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl From<u32> for Id {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for Id {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub fn artwork_url(id: Id) -> String {
    format!("{ARTWORK_URL}/{id}.png")
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Normal,
    Fire,
    Fighting,
    Water,
    Flying,
    Grass,
    Poison,
    Electric,
    Ground,
    Psychic,
    Rock,
    Ice,
    Bug,
    Dragon,
    Ghost,
    Dark,
    Steel,
    Fairy,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Type {
    pub fn color(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Fire => "fire",
            Self::Fighting => "fighting",
            Self::Water => "water",
            Self::Flying => "flying",
            Self::Grass => "grass",
            Self::Poison => "poison",
            Self::Electric => "electric",
            Self::Ground => "ground",
            Self::Psychic => "psychic",
            Self::Rock => "rock",
            Self::Ice => "ice",
            Self::Bug => "bug",
            Self::Dragon => "dragon",
            Self::Ghost => "ghost",
            Self::Dark => "dark",
            Self::Steel => "steel",
            Self::Fairy => "fairy",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub hp: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub special_attack: u32,
    #[serde(default)]
    pub special_defense: u32,
    #[serde(default)]
    pub speed: u32,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::ALL.into_iter().map(|stat| (stat, self.get(stat)))
    }

    pub fn total(&self) -> u32 {
        self.iter().map(|(_, value)| value).sum()
    }

    fn slot(&mut self, stat: Stat) -> &mut u32 {
        match stat {
            Stat::Hp => &mut self.hp,
            Stat::Attack => &mut self.attack,
            Stat::Defense => &mut self.defense,
            Stat::SpecialAttack => &mut self.special_attack,
            Stat::SpecialDefense => &mut self.special_defense,
            Stat::Speed => &mut self.speed,
        }
    }
}

impl<'a> FromIterator<(&'a str, u32)> for Stats {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        let mut stats = Self::default();

        for (name, value) in iter {
            if let Some(stat) = Stat::from_name(name) {
                *stats.slot(stat) = value;
            }
        }

        stats
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl Stat {
    pub const ALL: [Self; 6] = [
        Self::Hp,
        Self::Attack,
        Self::Defense,
        Self::SpecialAttack,
        Self::SpecialDefense,
        Self::Speed,
    ];

    /// Highest base value any stat can reach.
    pub const MAX: u32 = 255;

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "hp" => Self::Hp,
            "attack" => Self::Attack,
            "defense" => Self::Defense,
            "special-attack" => Self::SpecialAttack,
            "special-defense" => Self::SpecialDefense,
            "speed" => Self::Speed,
            _ => None?,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::SpecialAttack => "Sp. Atk",
            Self::SpecialDefense => "Sp. Def",
            Self::Speed => "Speed",
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ListResponse {
    pub count: usize,
    pub results: Vec<ListEntry>,
}

#[derive(Deserialize)]
pub(crate) struct ListEntry {
    pub name: String,
    pub url: String,
}

#[derive(Deserialize)]
pub(crate) struct Response {
    id: Id,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatEntry>,
}

#[derive(Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_: Named<Type>,
}

#[derive(Deserialize)]
struct StatEntry {
    base_stat: u32,
    stat: Named<String>,
}

#[derive(Deserialize)]
struct Named<T> {
    name: T,
}
