use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use roster_core::{
    update, AppState, Category, Effect, FetchKind, FetchTicket, LoadError, Msg, UserListItem,
};
use roster_engine::{
    page_items, EngineEvent, EngineHandle, PageRequest, ServerPageToken, UserPage, UserSource,
};

/// Serves canned pages keyed by (category, page) and records every request.
#[derive(Default)]
struct ScriptedSource {
    pages: HashMap<(Category, u32), Result<Vec<UserListItem>, LoadError>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    fn with_page(mut self, category: Category, page: u32, ids: &[&str]) -> Self {
        let items = ids
            .iter()
            .map(|id| UserListItem::new(*id, format!("User {id}"), "", ""))
            .collect();
        self.pages.insert((category, page), Ok(items));
        self
    }

    fn with_failure(mut self, category: Category, page: u32, error: LoadError) -> Self {
        self.pages.insert((category, page), Err(error));
        self
    }
}

#[async_trait::async_trait]
impl UserSource for ScriptedSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<UserPage, LoadError> {
        self.requests.lock().unwrap().push(request);
        let items = self
            .pages
            .get(&(request.category, request.page))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))?;
        Ok(UserPage {
            server_page: request.page,
            server_page_size: items.len() as u32,
            page_token: ServerPageToken::Text("scripted".into()),
            items,
        })
    }
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

fn ticket(category: Category, kind: FetchKind, page: u32) -> FetchTicket {
    FetchTicket {
        category,
        generation: 1,
        kind,
        page,
    }
}

#[test]
fn engine_reports_completion_for_ticket() {
    roster_logging::initialize_for_tests();
    let source = Arc::new(ScriptedSource::default().with_page(Category::Male, 1, &["a", "b"]));
    let engine = EngineHandle::with_source(source.clone()).expect("engine");

    let sent = ticket(Category::Male, FetchKind::Refresh, 1);
    engine.fetch(sent, 20);

    let EngineEvent::PageFetched { ticket, result } = next_event(&engine);
    assert_eq!(ticket, sent);
    let page = result.expect("page");
    assert_eq!(page.items.len(), 2);

    let requests = source.requests.lock().unwrap();
    assert_eq!(
        requests.as_slice(),
        &[PageRequest {
            category: Category::Male,
            page: 1,
            page_size: 20,
        }]
    );
}

#[test]
fn engine_forwards_failures() {
    let source = Arc::new(ScriptedSource::default().with_failure(
        Category::Female,
        2,
        LoadError::Server(500),
    ));
    let engine = EngineHandle::with_source(source).expect("engine");

    engine.fetch(ticket(Category::Female, FetchKind::NextPage, 2), 20);

    let EngineEvent::PageFetched { result, .. } = next_event(&engine);
    assert_eq!(page_items(result), Err(LoadError::Server(500)));
}

#[test]
fn try_recv_is_empty_without_work() {
    let engine = EngineHandle::with_source(Arc::new(ScriptedSource::default())).expect("engine");
    assert!(engine.try_recv().is_none());
}

#[test]
fn effects_round_trip_through_engine_into_state() {
    roster_logging::initialize_for_tests();
    let source = Arc::new(
        ScriptedSource::default()
            .with_page(Category::Male, 1, &["a", "b", "c"])
            .with_page(Category::Male, 2, &["c", "d"]),
    );
    let engine = EngineHandle::with_source(source).expect("engine");

    let mut state = AppState::new();
    let mut pending = vec![Msg::PaneActivated(Category::Male)];
    let mut step = 0;
    while let Some(msg) = pending.pop() {
        let (next, effects) = update(state, msg);
        state = next;
        for effect in effects {
            if let Effect::FetchPage { ticket, page_size } = effect {
                engine.fetch(ticket, page_size);
                let EngineEvent::PageFetched { ticket, result } = next_event(&engine);
                pending.push(Msg::PageLoaded {
                    ticket,
                    result: page_items(result),
                });
            }
        }
        if pending.is_empty() && step < 2 {
            step += 1;
            pending.push(Msg::NextPageRequested(Category::Male));
        }
    }

    let store = state.store(Category::Male);
    let ids: Vec<&str> = store.items().iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
    // Page 3 came back empty.
    assert!(store.reached_end());
    assert_eq!(store.current_page(), 2);
}
