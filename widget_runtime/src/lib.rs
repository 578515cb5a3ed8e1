//! Runtime for a single embeddable server status widget.
//!
//! A [`PollLoop`] periodically asks a [`StatusSource`] for the server status,
//! renders the outcome with [`render`] and writes the markup into an
//! [`OutputSurface`]. [`HttpStatusFetcher`] is the production source; it
//! decodes the status API body through [`validate`].

mod error;
mod fetcher;
mod poll_loop;
pub mod render;
mod surface;
mod validator;

pub use error::WidgetError;
pub use fetcher::{DEFAULT_TIMEOUT, HttpStatusFetcher, StatusSource};
pub use poll_loop::{LoopState, PollLoop, validate_config};
pub use render::{Theme, render, render_loading};
pub use surface::{OutputSurface, WatchSurface};
pub use validator::validate;

pub use types::{
    FailureKind, PlayerEntry, PollFailure, PollResult, ServerStatus, ThemeKind,
    WidgetConfig,
};
