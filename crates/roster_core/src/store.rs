use std::collections::HashSet;

use roster_logging::{roster_debug, roster_info, roster_warn};

use crate::{Category, LoadError, UserId, UserListItem};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// How `refresh` treats the current list while page 1 is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Keep the current list until page 1 arrives, then replace it in one step.
    /// A failed refresh leaves the previous list intact.
    #[default]
    Staged,
    /// Clear the list as soon as the refresh is dispatched. A failed refresh
    /// leaves the list empty.
    ResetBeforeFetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    pub page_size: u32,
    pub refresh_policy: RefreshPolicy,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Refresh,
    NextPage,
}

/// Identifies one outstanding fetch. A completion is only merged when its
/// ticket matches the store's current `Loading` ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub category: Category,
    pub generation: u64,
    pub kind: FetchKind,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading(FetchTicket),
}

/// Result of feeding a fetch completion into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The page was merged; `appended` new items became visible.
    Merged { appended: usize, reached_end: bool },
    /// The fetch failed; list state is unchanged and the store is idle again.
    Failed(LoadError),
    /// The ticket does not belong to the outstanding fetch; nothing changed.
    Stale,
}

/// Paging, dedup and soft-delete state for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedUserStore {
    category: Category,
    settings: StoreSettings,
    generation: u64,
    ordered_items: Vec<UserListItem>,
    seen_ids: HashSet<UserId>,
    deleted_ids: HashSet<UserId>,
    current_page: u32,
    status: LoadStatus,
    reached_end: bool,
}

impl PagedUserStore {
    pub fn new(category: Category, settings: StoreSettings) -> Self {
        Self::with_generation(category, settings, 0)
    }

    /// Creates an empty store whose fetch tickets start after `generation`.
    pub fn with_generation(category: Category, settings: StoreSettings, generation: u64) -> Self {
        Self {
            category,
            settings,
            generation,
            ordered_items: Vec::new(),
            seen_ids: HashSet::new(),
            deleted_ids: HashSet::new(),
            current_page: 0,
            status: LoadStatus::Idle,
            reached_end: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn settings(&self) -> StoreSettings {
        self.settings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn items(&self) -> &[UserListItem] {
        &self.ordered_items
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.ordered_items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn get(&self, id: &UserId) -> Option<&UserListItem> {
        self.ordered_items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.seen_ids.contains(id)
    }

    pub fn is_deleted(&self, id: &UserId) -> bool {
        self.deleted_ids.contains(id)
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_ids.len()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading(_))
    }

    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    /// Starts a page-1 fetch. Returns `None` while another fetch is outstanding.
    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        if let LoadStatus::Loading(pending) = self.status {
            roster_debug!(
                "{} refresh suppressed: page {} in flight",
                self.category,
                pending.page
            );
            return None;
        }

        self.generation += 1;
        if self.settings.refresh_policy == RefreshPolicy::ResetBeforeFetch {
            self.reset_session();
        }
        Some(self.start(FetchKind::Refresh, 1))
    }

    /// Starts a fetch for the page after the last merged one. Returns `None`
    /// while loading or once the end of data was reached.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        if let LoadStatus::Loading(pending) = self.status {
            roster_debug!(
                "{} next page suppressed: page {} in flight",
                self.category,
                pending.page
            );
            return None;
        }
        if self.reached_end {
            roster_debug!("{} next page suppressed: end of data", self.category);
            return None;
        }

        let page = self.current_page + 1;
        Some(self.start(FetchKind::NextPage, page))
    }

    fn start(&mut self, kind: FetchKind, page: u32) -> FetchTicket {
        let ticket = FetchTicket {
            category: self.category,
            generation: self.generation,
            kind,
            page,
        };
        self.status = LoadStatus::Loading(ticket);
        ticket
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<UserListItem>, LoadError>,
    ) -> Completion {
        if self.status != LoadStatus::Loading(ticket) {
            roster_warn!(
                "{} dropping stale page {} (generation {}, current {})",
                self.category,
                ticket.page,
                ticket.generation,
                self.generation
            );
            return Completion::Stale;
        }
        self.status = LoadStatus::Idle;

        let items = match result {
            Ok(items) => items,
            Err(err) => {
                roster_warn!("{} page {} failed: {}", self.category, ticket.page, err);
                return Completion::Failed(err);
            }
        };

        let received = items.len();
        let appended = match ticket.kind {
            FetchKind::Refresh => {
                self.reset_session();
                self.current_page = 1;
                self.reached_end = items.is_empty();
                self.append_dedup_keeping_order(items)
            }
            FetchKind::NextPage if items.is_empty() => {
                self.reached_end = true;
                0
            }
            FetchKind::NextPage => {
                self.current_page = ticket.page;
                self.append_dedup_keeping_order(items)
            }
        };

        roster_info!(
            "{} page {} merged: received={} appended={} total={}",
            self.category,
            ticket.page,
            received,
            appended,
            self.ordered_items.len()
        );
        Completion::Merged {
            appended,
            reached_end: self.reached_end,
        }
    }

    /// Appends items in server order, skipping deleted and already-seen ids.
    /// The first-seen copy keeps its position and fields. Returns how many
    /// items were appended.
    pub fn append_dedup_keeping_order(
        &mut self,
        incoming: impl IntoIterator<Item = UserListItem>,
    ) -> usize {
        let mut appended = 0;
        for item in incoming {
            if self.deleted_ids.contains(&item.id) {
                continue;
            }
            if !self.seen_ids.insert(item.id.clone()) {
                continue;
            }
            self.ordered_items.push(item);
            appended += 1;
        }
        appended
    }

    /// Soft-deletes `ids`: they leave the list now and are filtered out of every
    /// later page for the lifetime of this store. Returns how many visible
    /// items were removed.
    pub fn mark_deleted(&mut self, ids: impl IntoIterator<Item = UserId>) -> usize {
        let before = self.ordered_items.len();
        for id in ids {
            self.seen_ids.remove(&id);
            self.deleted_ids.insert(id);
        }
        let deleted = &self.deleted_ids;
        self.ordered_items.retain(|item| !deleted.contains(&item.id));
        let removed = before - self.ordered_items.len();
        roster_info!(
            "{} marked deleted: removed={} suppressed_total={}",
            self.category,
            removed,
            self.deleted_ids.len()
        );
        removed
    }

    fn reset_session(&mut self) {
        self.ordered_items.clear();
        self.seen_ids.clear();
        self.current_page = 0;
        self.reached_end = false;
    }
}
