pub mod cards;
pub mod detail;
pub mod explore;
pub mod favorites;

pub use cards::Cards;
pub use detail::Detail;
pub use explore::Explore;
pub use favorites::Favorites;

use crate::pokebase;

/// Shown whenever a screen fails, whatever the cause.
pub const ERROR_MESSAGE: &str = "Something went wrong.";

/// What a screen is currently presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
    Unreachable,
    Empty,
}

impl State {
    pub fn failed(error: &pokebase::Error) -> Self {
        if error.is_unreachable() {
            Self::Unreachable
        } else {
            Self::Error
        }
    }
}

/// The choices offered by the error dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    Retry,
    Exit,
}

fn placeholder(state: State) -> Option<&'static str> {
    match state {
        State::Idle | State::Ready => None,
        State::Loading => Some("Loading..."),
        State::Empty => Some("Nothing to show."),
        State::Error | State::Unreachable => Some(ERROR_MESSAGE),
    }
}
