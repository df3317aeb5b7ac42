use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use roster_core::{FetchTicket, LoadError, UserListItem};
use roster_logging::{roster_error, roster_info, roster_warn};

use crate::source::{RandomUserSource, SourceSettings, UserSource};
use crate::{EngineError, EngineEvent, PageRequest};

enum EngineCommand {
    Fetch { ticket: FetchTicket, page_size: u32 },
}

/// Runs fetches on a background tokio runtime and hands completions back
/// over a channel, so the owner of the state never blocks on IO.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SourceSettings) -> Result<Self, EngineError> {
        let source = RandomUserSource::new(settings)?;
        Self::with_source(Arc::new(source))
    }

    pub fn with_source(source: Arc<dyn UserSource>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        let worker_tx = event_tx.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let event_tx = worker_tx.clone();
                runtime.spawn(async move {
                    handle_command(source.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_tx,
            event_rx,
        })
    }

    pub fn fetch(&self, ticket: FetchTicket, page_size: u32) {
        roster_info!(
            "FetchPage {} page={} generation={} size={}",
            ticket.category,
            ticket.page,
            ticket.generation,
            page_size
        );
        if self
            .cmd_tx
            .send(EngineCommand::Fetch { ticket, page_size })
            .is_err()
        {
            roster_error!(
                "Engine thread is gone; failing {} page {}",
                ticket.category,
                ticket.page
            );
            let _ = self.event_tx.send(EngineEvent::PageFetched {
                ticket,
                result: Err(LoadError::Network("fetch engine stopped".into())),
            });
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    source: &dyn UserSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { ticket, page_size } => {
            let request = PageRequest {
                category: ticket.category,
                page: ticket.page,
                page_size,
            };
            let result = source.fetch_page(request).await;
            if let Err(err) = &result {
                roster_warn!("{} page {} failed: {}", ticket.category, ticket.page, err);
            }
            let _ = event_tx.send(EngineEvent::PageFetched { ticket, result });
        }
    }
}

/// Strips a fetched page down to what the store merges.
pub fn page_items(
    result: Result<crate::UserPage, LoadError>,
) -> Result<Vec<UserListItem>, LoadError> {
    result.map(|page| page.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{Category, FetchKind};

    #[test]
    fn fetch_fails_the_ticket_when_the_worker_is_gone() {
        roster_logging::initialize_for_tests();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        drop(cmd_rx);
        let engine = EngineHandle {
            cmd_tx,
            event_tx,
            event_rx,
        };
        let ticket = FetchTicket {
            category: Category::Female,
            generation: 1,
            kind: FetchKind::Refresh,
            page: 1,
        };

        engine.fetch(ticket, 20);

        match engine.try_recv() {
            Some(EngineEvent::PageFetched { ticket: got, result }) => {
                assert_eq!(got, ticket);
                assert!(matches!(result, Err(LoadError::Network(_))));
            }
            other => panic!("expected a failed completion, got {other:?}"),
        }
    }
}
