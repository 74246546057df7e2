// modgate: swappable content-moderation adapters
//
// This is the library root. `moderation` holds the provider trait and the
// vendor adapters; `config` loads settings and credentials for them.

pub mod config;
pub mod error;
pub mod moderation;
pub mod output;

pub use error::{ModerationError, Result, TransportError};
