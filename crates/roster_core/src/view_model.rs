use crate::{Category, LayoutMode, LoadError, ToolbarState, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub active: Category,
    pub layout: LayoutMode,
    pub panes: Vec<PaneView>,
    pub toolbar: ToolbarState,
    pub error: Option<ErrorNotice>,
    pub photo: Option<PhotoView>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn active_pane(&self) -> Option<&PaneView> {
        self.panes.iter().find(|pane| pane.category == self.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneView {
    pub category: Category,
    pub title: &'static str,
    pub rows: Vec<UserRowView>,
    pub is_loading: bool,
    pub reached_end: bool,
    pub current_page: u32,
    pub editing: bool,
    pub selected_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRowView {
    pub id: UserId,
    pub display_name: String,
    pub subtitle: String,
    pub email: String,
    pub thumbnail_url: Option<String>,
    pub selected: bool,
}

/// Dismissable notice for the most recent failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub category: Category,
    pub error: LoadError,
}

impl ErrorNotice {
    pub fn message(&self) -> String {
        format!("Could not load {} users: {}", self.category, self.error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoView {
    pub category: Category,
    pub id: UserId,
    pub display_name: String,
    pub url: Option<String>,
}
