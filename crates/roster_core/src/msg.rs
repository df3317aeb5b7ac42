use crate::{Category, FetchTicket, LoadError, UserId, UserListItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A category pane became visible. Loads page 1 the first time.
    PaneActivated(Category),
    /// A category pane was torn down; its store is discarded.
    PaneTornDown(Category),
    /// Pull-to-refresh.
    RefreshRequested(Category),
    /// The list was scrolled near its bottom.
    NextPageRequested(Category),
    /// Engine completion for a fetch.
    PageLoaded {
        ticket: FetchTicket,
        result: Result<Vec<UserListItem>, LoadError>,
    },
    /// User picked a category in the segmented control or swiped to it.
    CategorySelected(Category),
    /// User tapped the floating layout button.
    LayoutToggled,
    /// User tapped Edit/Done on the toolbar.
    EditToggled,
    /// User tapped a row in the active pane.
    ItemTapped(UserId),
    /// User confirmed deletion of the current selection.
    DeleteConfirmed,
    /// User closed the photo viewer.
    PhotoClosed,
    /// User dismissed the error notice.
    ErrorDismissed,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
