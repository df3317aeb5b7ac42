use std::sync::Once;

use pretty_assertions::assert_eq;
use roster_core::{
    Category, Completion, FetchTicket, PagedUserStore, StoreSettings, UserId, UserListItem,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(roster_logging::initialize_for_tests);
}

fn user(n: u32) -> UserListItem {
    UserListItem::new(
        format!("id-{n}"),
        format!("User {n}"),
        "Somewhere",
        format!("user{n}@example.com"),
    )
}

fn users(range: std::ops::RangeInclusive<u32>) -> Vec<UserListItem> {
    range.map(user).collect()
}

fn ids(store: &PagedUserStore) -> Vec<String> {
    store.items().iter().map(|item| item.id.to_string()).collect()
}

fn expected(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
    range.map(|n| format!("id-{n}")).collect()
}

fn load_refresh(store: &mut PagedUserStore, items: Vec<UserListItem>) -> Completion {
    let ticket = store.begin_refresh().expect("refresh dispatched");
    store.complete(ticket, Ok(items))
}

fn load_next(store: &mut PagedUserStore, items: Vec<UserListItem>) -> (FetchTicket, Completion) {
    let ticket = store.begin_next_page().expect("next page dispatched");
    let completion = store.complete(ticket, Ok(items));
    (ticket, completion)
}

#[test]
fn overlapping_pages_are_merged_without_duplicates() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Male, StoreSettings::default());

    load_refresh(&mut store, users(1..=20));
    assert_eq!(ids(&store), expected(1..=20));
    assert_eq!(store.current_page(), 1);
    assert!(!store.reached_end());

    let (ticket, completion) = load_next(&mut store, users(15..=34));
    assert_eq!(ticket.page, 2);
    assert_eq!(
        completion,
        Completion::Merged {
            appended: 14,
            reached_end: false
        }
    );
    assert_eq!(store.items().len(), 34);
    assert_eq!(ids(&store), expected(1..=34));
    assert_eq!(store.current_page(), 2);
}

#[test]
fn first_seen_copy_keeps_position_and_fields() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Female, StoreSettings::default());
    load_refresh(&mut store, vec![user(1), user(2), user(3)]);

    let renamed = UserListItem::new("id-2", "Renamed", "Elsewhere", "other@example.com");
    load_next(&mut store, vec![user(4), renamed, user(5)]);

    assert_eq!(ids(&store), vec!["id-1", "id-2", "id-3", "id-4", "id-5"]);
    let kept = store.get(&UserId::new("id-2")).expect("present");
    assert_eq!(kept.display_name, "User 2");
    assert_eq!(kept.email, "user2@example.com");
}

#[test]
fn repeated_ids_inside_one_page_are_collapsed() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Male, StoreSettings::default());
    load_refresh(&mut store, vec![user(1), user(2), user(1), user(3), user(2)]);

    assert_eq!(ids(&store), vec!["id-1", "id-2", "id-3"]);
}

#[test]
fn reappending_a_merged_page_changes_nothing() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Male, StoreSettings::default());
    load_refresh(&mut store, users(1..=10));
    load_next(&mut store, users(11..=20));
    let before = store.clone();

    let appended = store.append_dedup_keeping_order(users(11..=20));
    assert_eq!(appended, 0);
    assert_eq!(store, before);
    assert_eq!(ids(&store), expected(1..=20));
}

#[test]
fn deleted_ids_are_not_resurrected_by_later_pages() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Male, StoreSettings::default());
    load_refresh(&mut store, users(1..=20));

    let removed = store.mark_deleted([UserId::new("id-5"), UserId::new("id-10")]);
    assert_eq!(removed, 2);
    assert!(!store.contains(&UserId::new("id-5")));
    assert!(store.is_deleted(&UserId::new("id-5")));

    load_next(&mut store, users(3..=25));

    let visible = ids(&store);
    assert!(!visible.contains(&"id-5".to_string()));
    assert!(!visible.contains(&"id-10".to_string()));
    assert_eq!(visible.len(), 23);
    assert_eq!(visible.last().map(String::as_str), Some("id-25"));
}

#[test]
fn deleted_ids_survive_refresh() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Female, StoreSettings::default());
    load_refresh(&mut store, users(1..=5));
    store.mark_deleted([UserId::new("id-3")]);

    load_refresh(&mut store, users(1..=5));

    assert_eq!(ids(&store), vec!["id-1", "id-2", "id-4", "id-5"]);
    assert_eq!(store.deleted_count(), 1);
}

#[test]
fn deleting_unknown_ids_still_suppresses_them() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Male, StoreSettings::default());
    load_refresh(&mut store, users(1..=3));

    let removed = store.mark_deleted([UserId::new("id-9")]);
    assert_eq!(removed, 0);

    load_next(&mut store, users(8..=10));
    assert_eq!(ids(&store), vec!["id-1", "id-2", "id-3", "id-8", "id-10"]);
}

#[test]
fn page_of_only_known_items_still_advances_cursor() {
    init_logging();
    let mut store = PagedUserStore::new(Category::Male, StoreSettings::default());
    load_refresh(&mut store, users(1..=5));

    let (_, completion) = load_next(&mut store, users(1..=5));

    assert_eq!(
        completion,
        Completion::Merged {
            appended: 0,
            reached_end: false
        }
    );
    assert_eq!(store.current_page(), 2);
    assert!(!store.reached_end());
}
