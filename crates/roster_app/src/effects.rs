use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use roster_core::{Category, Effect, ListChange, Msg};
use roster_engine::{page_items, EngineEvent, EngineHandle};
use roster_logging::{roster_debug, roster_info, roster_warn};

/// Executes effects from `update` and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    response_wait: Duration,
    in_flight: usize,
    updated_at: HashMap<Category, DateTime<Utc>>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, response_wait: Duration) -> Self {
        Self {
            engine,
            response_wait,
            in_flight: 0,
            updated_at: HashMap::new(),
        }
    }

    pub fn updated_at(&self, category: Category) -> Option<DateTime<Utc>> {
        self.updated_at.get(&category).copied()
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { ticket, page_size } => {
                    self.in_flight += 1;
                    self.engine.fetch(ticket, page_size);
                }
                Effect::UpdateList { category, changes } => {
                    let (removed, moved, inserted) = summarize(&changes);
                    roster_debug!(
                        "UpdateList {} removed={} moved={} inserted={}",
                        category,
                        removed,
                        moved,
                        inserted
                    );
                }
                Effect::ScrollToTop { category } => {
                    roster_debug!("ScrollToTop {}", category);
                }
            }
        }
    }

    /// Blocks until the next fetch completes. Returns `None` when nothing is in
    /// flight or the wait times out.
    pub fn next_msg(&mut self) -> Option<Msg> {
        if self.in_flight == 0 {
            return None;
        }
        let Some(event) = self.engine.recv_timeout(self.response_wait) else {
            roster_warn!(
                "no fetch completion within {:?}; {} still in flight",
                self.response_wait,
                self.in_flight
            );
            return None;
        };
        self.in_flight -= 1;

        match event {
            EngineEvent::PageFetched { ticket, result } => {
                if let Ok(page) = &result {
                    roster_info!(
                        "{} page {} fetched: {} items, token {}",
                        ticket.category,
                        page.server_page,
                        page.items.len(),
                        page.page_token
                    );
                    self.updated_at.insert(ticket.category, Utc::now());
                }
                Some(Msg::PageLoaded {
                    ticket,
                    result: page_items(result),
                })
            }
        }
    }
}

fn summarize(changes: &[ListChange]) -> (usize, usize, usize) {
    changes
        .iter()
        .fold((0, 0, 0), |(removed, moved, inserted), change| match change {
            ListChange::Remove { .. } => (removed + 1, moved, inserted),
            ListChange::Move { .. } => (removed, moved + 1, inserted),
            ListChange::Insert { .. } => (removed, moved, inserted + 1),
        })
}
