// Content moderation: trait-based abstraction for swappable vendors.
//
// The ModerationProvider trait defines the interface. OpenAiModerator and
// MistralModerator implement it against each vendor's HTTP API, and Moderator
// picks one of them at runtime. Callers only ever see ModerationResult.

pub mod mistral;
pub mod models;
pub mod openai;
pub mod provider;
pub mod traits;

mod http;

pub use models::{MistralModerationModel, OpenAiModerationModel, UnknownModel};
pub use provider::Moderator;
pub use traits::{ModerationProvider, ModerationRequest, ModerationResult};
