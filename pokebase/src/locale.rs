use serde::{Deserialize, Serialize};

use std::borrow::Borrow;
use std::env;
use std::fmt;

/// A language code, like `en` or `ja`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(pub(crate) String);

impl Locale {
    pub fn new(code: impl AsRef<str>) -> Self {
        let code = code.as_ref();
        let language = code
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or(code)
            .trim();

        if language.is_empty() || language == "C" || language == "POSIX" {
            return Self::default();
        }

        Self(language.to_lowercase())
    }

    /// The language of the current environment, following the usual
    /// `LC_ALL` > `LC_MESSAGES` > `LANG` precedence.
    pub fn current() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .into_iter()
            .filter_map(|variable| env::var(variable).ok())
            .find(|value| !value.is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_owned())
    }
}

impl Borrow<str> for Locale {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
