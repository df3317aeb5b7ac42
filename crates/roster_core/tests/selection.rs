use std::collections::BTreeSet;

use roster_core::{EditMode, SelectionController, UserId};

#[test]
fn toggles_are_ignored_outside_edit_mode() {
    let mut selection = SelectionController::new();
    assert_eq!(selection.mode(), EditMode::Viewing);

    assert!(!selection.toggle(UserId::new("a")));
    assert_eq!(selection.selected_count(), 0);
}

#[test]
fn toggle_selects_and_deselects() {
    let mut selection = SelectionController::new();
    selection.enter_edit();

    assert!(selection.toggle(UserId::new("a")));
    assert!(selection.toggle(UserId::new("b")));
    assert_eq!(selection.selected_count(), 2);

    assert!(!selection.toggle(UserId::new("a")));
    assert_eq!(selection.selected_count(), 1);
    assert!(selection.is_selected(&UserId::new("b")));
}

#[test]
fn exit_edit_clears_selection() {
    let mut selection = SelectionController::new();
    selection.enter_edit();
    selection.toggle(UserId::new("a"));

    selection.exit_edit();
    assert!(!selection.is_editing());
    assert_eq!(selection.selected_count(), 0);

    selection.enter_edit();
    assert!(!selection.is_selected(&UserId::new("a")));
}

#[test]
fn confirm_delete_returns_selection_and_exits_edit() {
    let mut selection = SelectionController::new();
    selection.enter_edit();
    selection.toggle(UserId::new("b"));
    selection.toggle(UserId::new("a"));

    let taken = selection.confirm_delete();

    let expected: BTreeSet<UserId> = [UserId::new("a"), UserId::new("b")].into_iter().collect();
    assert_eq!(taken, expected);
    assert_eq!(selection.mode(), EditMode::Viewing);
    assert_eq!(selection.selected_count(), 0);
}

#[test]
fn retain_visible_drops_missing_ids() {
    let mut selection = SelectionController::new();
    selection.enter_edit();
    selection.toggle(UserId::new("a"));
    selection.toggle(UserId::new("gone"));

    selection.retain_visible(|id| id.as_str() != "gone");
    assert_eq!(selection.selected_count(), 1);
}

#[test]
fn toolbar_reflects_mode_and_count() {
    let mut selection = SelectionController::new();
    let toolbar = selection.toolbar();
    assert_eq!(toolbar.edit_label, "Edit");
    assert!(!toolbar.delete_enabled);
    assert!(!toolbar.count_enabled);

    selection.enter_edit();
    let toolbar = selection.toolbar();
    assert_eq!(toolbar.edit_label, "Done");
    assert!(!toolbar.delete_enabled);
    assert!(toolbar.count_enabled);
    assert_eq!(toolbar.count_label, "0 selected");

    selection.toggle(UserId::new("a"));
    let toolbar = selection.toolbar();
    assert!(toolbar.delete_enabled);
    assert_eq!(toolbar.count_label, "1 selected");
}
