use roster_logging::{roster_debug, roster_info};

use crate::view_model::{ErrorNotice, PhotoView};
use crate::{
    diff_items, AppState, Category, Completion, Effect, FetchTicket, LoadError, Msg, UserId,
    UserListItem,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages are handled strictly one at a time, so the per-store loading
/// status is the only guard needed against overlapping triggers.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PaneActivated(category) => activate(&mut state, category),
        Msg::PaneTornDown(category) => {
            let previous = state.store(category).items().to_vec();
            state.discard_pane(category);
            if state.photo.as_ref().is_some_and(|photo| photo.category == category) {
                state.photo = None;
            }
            roster_info!("{} pane torn down", category);
            state.mark_dirty();
            list_changes(category, &previous, state.store(category).items())
        }
        Msg::RefreshRequested(category) => {
            let previous = state.store(category).items().to_vec();
            let pane = state.pane_mut(category);
            pane.activated = true;
            match pane.store.begin_refresh() {
                Some(ticket) => {
                    let store = &pane.store;
                    pane.selection.retain_visible(|id| store.contains(id));
                    state.mark_dirty();
                    let mut effects =
                        list_changes(category, &previous, state.store(category).items());
                    effects.push(fetch(&state, ticket));
                    effects
                }
                None => Vec::new(),
            }
        }
        Msg::NextPageRequested(category) => match state.pane_mut(category).store.begin_next_page() {
            Some(ticket) => {
                state.mark_dirty();
                vec![fetch(&state, ticket)]
            }
            None => Vec::new(),
        },
        Msg::PageLoaded { ticket, result } => page_loaded(&mut state, ticket, result),
        Msg::CategorySelected(category) => {
            if category == state.active() {
                return (state, Vec::new());
            }
            let previous = state.active();
            state.pane_mut(previous).selection.exit_edit();
            state.pane_mut(category).selection.exit_edit();
            state.set_active(category);
            state.photo = None;
            state.mark_dirty();

            let mut effects = vec![Effect::ScrollToTop { category }];
            effects.extend(activate(&mut state, category));
            effects
        }
        Msg::LayoutToggled => {
            state.toggle_layout();
            state.mark_dirty();
            Vec::new()
        }
        Msg::EditToggled => {
            let active = state.active();
            state.pane_mut(active).selection.toggle_edit();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ItemTapped(id) => {
            item_tapped(&mut state, id);
            Vec::new()
        }
        Msg::DeleteConfirmed => {
            let active = state.active();
            let pane = state.pane_mut(active);
            if !pane.selection.is_editing() || pane.selection.selected_count() == 0 {
                return (state, Vec::new());
            }
            let previous = pane.store.items().to_vec();
            let ids = pane.selection.confirm_delete();
            pane.store.mark_deleted(ids);
            state.mark_dirty();
            list_changes(active, &previous, state.store(active).items())
        }
        Msg::PhotoClosed => {
            if state.photo.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ErrorDismissed => {
            if state.error.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn activate(state: &mut AppState, category: Category) -> Vec<Effect> {
    let pane = state.pane_mut(category);
    if pane.activated {
        return Vec::new();
    }
    pane.activated = true;
    match pane.store.begin_refresh() {
        Some(ticket) => {
            state.mark_dirty();
            vec![fetch(state, ticket)]
        }
        None => Vec::new(),
    }
}

fn page_loaded(
    state: &mut AppState,
    ticket: FetchTicket,
    result: Result<Vec<UserListItem>, LoadError>,
) -> Vec<Effect> {
    let category = ticket.category;
    let previous = state.store(category).items().to_vec();
    let pane = state.pane_mut(category);

    match pane.store.complete(ticket, result) {
        Completion::Stale => Vec::new(),
        Completion::Failed(error) => {
            state.error = Some(ErrorNotice { category, error });
            state.mark_dirty();
            Vec::new()
        }
        Completion::Merged { .. } => {
            let store = &pane.store;
            pane.selection.retain_visible(|id| store.contains(id));
            state.mark_dirty();
            list_changes(category, &previous, state.store(category).items())
        }
    }
}

fn item_tapped(state: &mut AppState, id: UserId) {
    let active = state.active();
    let pane = state.pane_mut(active);
    let Some(item) = pane.store.get(&id) else {
        roster_debug!("{} tap on unknown item {}", active, id);
        return;
    };

    if pane.selection.is_editing() {
        pane.selection.toggle(id);
    } else {
        let photo = PhotoView {
            category: active,
            id: item.id.clone(),
            display_name: item.display_name.clone(),
            url: item.photo_url().map(ToOwned::to_owned),
        };
        state.photo = Some(photo);
    }
    state.mark_dirty();
}

fn fetch(state: &AppState, ticket: FetchTicket) -> Effect {
    Effect::FetchPage {
        ticket,
        page_size: state.store(ticket.category).settings().page_size,
    }
}

fn list_changes(
    category: Category,
    previous: &[UserListItem],
    next: &[UserListItem],
) -> Vec<Effect> {
    let changes = diff_items(previous, next);
    if changes.is_empty() {
        Vec::new()
    } else {
        vec![Effect::UpdateList { category, changes }]
    }
}
