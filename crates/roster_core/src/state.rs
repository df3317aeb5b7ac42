use crate::view_model::{AppViewModel, ErrorNotice, PaneView, PhotoView, UserRowView};
use crate::{Category, LayoutMode, PagedUserStore, SelectionController, StoreSettings};

/// One category's list and its edit-mode selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPane {
    pub(crate) store: PagedUserStore,
    pub(crate) selection: SelectionController,
    pub(crate) activated: bool,
}

impl CategoryPane {
    fn new(store: PagedUserStore) -> Self {
        Self {
            store,
            selection: SelectionController::new(),
            activated: false,
        }
    }

    pub fn store(&self) -> &PagedUserStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    fn view(&self) -> PaneView {
        let rows = self
            .store
            .items()
            .iter()
            .map(|item| UserRowView {
                id: item.id.clone(),
                display_name: item.display_name.clone(),
                subtitle: item.subtitle.clone(),
                email: item.email.clone(),
                thumbnail_url: item.thumbnail_url.clone(),
                selected: self.selection.is_selected(&item.id),
            })
            .collect();
        let category = self.store.category();
        PaneView {
            category,
            title: category.title(),
            rows,
            is_loading: self.store.is_loading(),
            reached_end: self.store.reached_end(),
            current_page: self.store.current_page(),
            editing: self.selection.is_editing(),
            selected_count: self.selection.selected_count(),
        }
    }
}

/// Both category panes plus the shell state shared between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    panes: [CategoryPane; 2],
    active: Category,
    layout: LayoutMode,
    pub(crate) error: Option<ErrorNotice>,
    pub(crate) photo: Option<PhotoView>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(StoreSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: StoreSettings) -> Self {
        Self {
            panes: Category::ALL.map(|category| {
                CategoryPane::new(PagedUserStore::new(category, settings))
            }),
            active: Category::default(),
            layout: LayoutMode::default(),
            error: None,
            photo: None,
            dirty: false,
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn pane(&self, category: Category) -> &CategoryPane {
        &self.panes[category.index()]
    }

    pub fn store(&self, category: Category) -> &PagedUserStore {
        &self.pane(category).store
    }

    pub fn selection(&self, category: Category) -> &SelectionController {
        &self.pane(category).selection
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            active: self.active,
            layout: self.layout,
            panes: self.panes.iter().map(CategoryPane::view).collect(),
            toolbar: self.pane(self.active).selection.toolbar(),
            error: self.error.clone(),
            photo: self.photo.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn pane_mut(&mut self, category: Category) -> &mut CategoryPane {
        &mut self.panes[category.index()]
    }

    pub(crate) fn set_active(&mut self, category: Category) {
        self.active = category;
    }

    pub(crate) fn toggle_layout(&mut self) {
        self.layout.toggle();
    }

    /// Replaces the pane with an empty one. Generations keep counting so
    /// responses addressed to the old store are recognised as stale.
    pub(crate) fn discard_pane(&mut self, category: Category) {
        let old = &self.panes[category.index()].store;
        let store =
            PagedUserStore::with_generation(category, old.settings(), old.generation() + 1);
        self.panes[category.index()] = CategoryPane::new(store);
    }
}
