use std::fmt;

use roster_core::{Category, FetchTicket, LoadError, UserListItem};
use serde::Deserialize;

/// Parameters of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub category: Category,
    pub page: u32,
    pub page_size: u32,
}

/// Opaque token the server returns with each page (a seed string or a number).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ServerPageToken {
    Text(String),
    Number(u64),
}

impl fmt::Display for ServerPageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerPageToken::Text(text) => f.write_str(text),
            ServerPageToken::Number(number) => write!(f, "{number}"),
        }
    }
}

/// One decoded page, items in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPage {
    pub items: Vec<UserListItem>,
    pub server_page: u32,
    pub server_page_size: u32,
    pub page_token: ServerPageToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        ticket: FetchTicket,
        result: Result<UserPage, LoadError>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
