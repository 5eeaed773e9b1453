pub mod card;
pub mod gather;
pub mod hydrate;
pub mod locale;
pub mod pokemon;
pub mod session;
pub mod source;
pub mod species;

mod error;

pub use card::Card;
pub use error::Error;
pub use gather::{Concurrency, Gathered};
pub use locale::Locale;
pub use pokemon::Pokemon;
pub use reqwest::StatusCode;
pub use session::Session;
pub use source::Source;
pub use species::Species;

pub type Result<T, E = Error> = std::result::Result<T, E>;
