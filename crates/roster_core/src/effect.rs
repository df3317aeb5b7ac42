use crate::{Category, FetchTicket, ListChange};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage { ticket: FetchTicket, page_size: u32 },
    UpdateList {
        category: Category,
        changes: Vec<ListChange>,
    },
    ScrollToTop { category: Category },
}
