use crate::Locale;
use crate::pokemon;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Species {
    pub id: pokemon::Id,
    pub flavor_text: String,
}

impl Species {
    pub(crate) fn from_response(response: Response, locale: &Locale) -> Self {
        let entries = &response.flavor_text_entries;

        let flavor_text = entries
            .iter()
            .find(|entry| entry.language.name == locale.as_str())
            .or_else(|| entries.first())
            .map(|entry| normalize(&entry.flavor_text))
            .unwrap_or_default();

        Self {
            id: response.id,
            flavor_text,
        }
    }
}

fn normalize(text: &str) -> String {
    text.replace(['\n', '\u{c}'], " ")
}

#[derive(Deserialize)]
pub(crate) struct Response {
    id: pokemon::Id,
    #[serde(default)]
    flavor_text_entries: Vec<FlavorText>,
}

#[derive(Deserialize)]
struct FlavorText {
    flavor_text: String,
    language: Language,
}

#[derive(Deserialize)]
struct Language {
    name: String,
}
