use std::collections::BTreeSet;

use crate::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

/// Multi-select state for one pane's edit mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionController {
    mode: EditMode,
    selected: BTreeSet<UserId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn enter_edit(&mut self) {
        self.mode = EditMode::Editing;
    }

    /// Leaves edit mode and forgets the selection.
    pub fn exit_edit(&mut self) {
        self.mode = EditMode::Viewing;
        self.selected.clear();
    }

    pub fn toggle_edit(&mut self) {
        if self.is_editing() {
            self.exit_edit();
        } else {
            self.enter_edit();
        }
    }

    /// Flips selection of `id`. Ignored outside edit mode. Returns whether
    /// `id` is selected afterwards.
    pub fn toggle(&mut self, id: UserId) -> bool {
        if !self.is_editing() {
            return false;
        }
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: &UserId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Drops selected ids that are no longer visible.
    pub fn retain_visible(&mut self, mut is_visible: impl FnMut(&UserId) -> bool) {
        self.selected.retain(|id| is_visible(id));
    }

    /// Hands over the current selection and returns to viewing mode.
    pub fn confirm_delete(&mut self) -> BTreeSet<UserId> {
        let selected = std::mem::take(&mut self.selected);
        self.mode = EditMode::Viewing;
        selected
    }

    pub fn toolbar(&self) -> ToolbarState {
        let count = self.selected_count();
        let editing = self.is_editing();
        ToolbarState {
            edit_label: if editing { "Done" } else { "Edit" },
            delete_enabled: editing && count > 0,
            count_enabled: editing,
            count_label: format!("{count} selected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    pub edit_label: &'static str,
    pub delete_enabled: bool,
    pub count_enabled: bool,
    pub count_label: String,
}
