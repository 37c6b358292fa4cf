//! HTTP Handlers

mod health;
mod ping;
mod synthesize;
mod voices;

pub use health::*;
pub use ping::*;
pub use synthesize::*;
pub use voices::*;
