//! Roster engine: remote user source and background fetch execution.
mod engine;
mod source;
mod types;
mod wire;

pub use engine::{page_items, EngineHandle};
pub use source::{RandomUserSource, SourceSettings, UserSource, DEFAULT_BASE_URL};
pub use types::{EngineError, EngineEvent, PageRequest, ServerPageToken, UserPage};
pub use wire::decode_page;
