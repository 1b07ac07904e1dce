//! Paging, index continuity, and finite-feed tests.

use typofeed_core::{
    FeedError, FeedSettings, FeedState, GenerationConfig, PageOutcome, PaginatedFeed, Region,
};

fn assert_contiguous(feed: &PaginatedFeed) {
    for (i, record) in feed.records().iter().enumerate() {
        assert_eq!(record.index, i as u64 + 1, "Gap or reorder at position {i}");
    }
}

#[test]
fn fresh_feed_has_nothing() {
    let feed = PaginatedFeed::new(FeedSettings::default());
    assert_eq!(feed.state(), FeedState::Fresh);
    assert!(feed.records().is_empty());
    assert!(!feed.has_more());
    assert_eq!(feed.last_index(), 0);
}

#[test]
fn initialize_generates_first_page() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    let outcome = feed
        .initialize(GenerationConfig::for_region(Region::Usa, 1, "init"))
        .unwrap();

    assert_eq!(outcome, PageOutcome::Appended { first_index: 1, count: 20 });
    assert_eq!(feed.state(), FeedState::Populated);
    assert!(feed.has_more());
    assert_contiguous(&feed);
}

#[test]
fn request_more_extends_by_page_size() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    feed.initialize(GenerationConfig::for_region(Region::Poland, 4, "more")).unwrap();

    for page in 1..=12 {
        let outcome = feed.request_more().unwrap();
        let expected_first = 20 + (page - 1) * 10 + 1;
        assert_eq!(
            outcome,
            PageOutcome::Appended { first_index: expected_first, count: 10 }
        );
        assert_eq!(feed.records().len() as u64, 20 + page * 10);
    }
    assert_contiguous(&feed);
    assert_eq!(feed.last_index(), 140);
}

#[test]
fn request_more_before_initialize_fails() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    let err = feed.request_more().unwrap_err();
    assert!(matches!(err, FeedError::NotInitialized), "got {err:?}");
}

#[test]
fn custom_page_sizes_are_honoured() {
    let settings = FeedSettings {
        initial_page_size: 3,
        page_size: 2,
        ..FeedSettings::default()
    };
    let mut feed = PaginatedFeed::new(settings);
    feed.initialize(GenerationConfig::for_region(Region::Georgia, 0, "sizes")).unwrap();
    assert_eq!(feed.records().len(), 3);
    feed.request_more().unwrap();
    assert_eq!(feed.records().len(), 5);
    assert_contiguous(&feed);
}

#[test]
fn identifiers_are_practically_unique() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    feed.initialize(GenerationConfig::for_region(Region::Usa, 0, "ids")).unwrap();
    for _ in 0..8 {
        feed.request_more().unwrap();
    }
    let mut ids: Vec<_> = feed.records().iter().map(|r| r.identifier.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), feed.records().len());
}

#[test]
fn bounded_feed_truncates_and_exhausts() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    let config = GenerationConfig::for_region(Region::Usa, 0, "bounded").with_total_count(25);
    feed.initialize(config).unwrap();
    assert!(feed.has_more());

    let outcome = feed.request_more().unwrap();
    assert_eq!(outcome, PageOutcome::Appended { first_index: 21, count: 5 });
    assert!(!feed.has_more());

    assert_eq!(feed.request_more().unwrap(), PageOutcome::Exhausted);
    assert_eq!(feed.records().len(), 25);
    assert_contiguous(&feed);
}

#[test]
fn bounded_feed_smaller_than_first_page() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    let config = GenerationConfig::for_region(Region::Poland, 0, "tiny").with_total_count(4);
    let outcome = feed.initialize(config).unwrap();
    assert_eq!(outcome, PageOutcome::Appended { first_index: 1, count: 4 });
    assert!(!feed.has_more());
}

#[test]
fn second_reservation_while_in_flight_is_rejected() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    feed.initialize(GenerationConfig::for_region(Region::Usa, 0, "flight")).unwrap();

    let ticket = feed.begin_page().unwrap();
    assert!(feed.page_in_flight());
    assert!(matches!(feed.begin_page(), Err(FeedError::PageInFlight)));

    let page = ticket.generate(feed.faker().as_ref());
    let outcome = feed.commit_page(ticket, page).unwrap();
    assert_eq!(outcome, PageOutcome::Appended { first_index: 21, count: 10 });
    assert!(!feed.page_in_flight());

    // Queue drains: the next reservation continues where the last ended.
    let next = feed.begin_page().unwrap();
    assert_eq!(next.start_index(), 31);
}

#[test]
fn snapshot_reflects_feed() {
    let mut feed = PaginatedFeed::new(FeedSettings::default());
    feed.initialize(GenerationConfig::for_region(Region::Georgia, 1, "snap")).unwrap();
    let snapshot = feed.snapshot();

    assert_eq!(snapshot.records.len(), 20);
    assert_eq!(snapshot.last_index, 20);
    assert!(snapshot.has_more);
    assert_eq!(snapshot.config.as_ref().map(|c| c.seed.as_str()), Some("snap"));

    let json = snapshot.to_json().unwrap();
    assert!(json.contains("\"region\":\"Georgia\""));
    assert!(json.contains("\"locale\":\"ka\""));
}
