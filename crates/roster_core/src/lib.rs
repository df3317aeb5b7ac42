//! Roster core: paged user stores, display diffing, selection and the
//! message/effect update function that ties them together.
mod diff;
mod effect;
mod error;
mod item;
mod msg;
mod selection;
mod state;
mod store;
mod update;
mod view_model;

pub use diff::{apply_changes, diff_ids, diff_items, ListChange};
pub use effect::Effect;
pub use error::LoadError;
pub use item::{Category, LayoutMode, UserId, UserListItem};
pub use msg::Msg;
pub use selection::{EditMode, SelectionController, ToolbarState};
pub use state::{AppState, CategoryPane};
pub use store::{
    Completion, FetchKind, FetchTicket, LoadStatus, PagedUserStore, RefreshPolicy, StoreSettings,
    DEFAULT_PAGE_SIZE,
};
pub use update::update;
pub use view_model::{AppViewModel, ErrorNotice, PaneView, PhotoView, UserRowView};
