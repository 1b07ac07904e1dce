//! Concurrent consumers: overlapping requests are serialized.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use typofeed_core::{
    CuratedFaker, FeedResult, FeedSettings, GenerationConfig, Locale, LocaleFaker, PageOutcome,
    PaginatedFeed, Region, SeedStream, SharedFeed,
};

fn shared(seed: &str) -> SharedFeed {
    let feed = SharedFeed::new(PaginatedFeed::new(FeedSettings::default()));
    feed.initialize(GenerationConfig::for_region(Region::Usa, 3, seed))
        .expect("initialize");
    feed
}

#[test]
fn concurrent_requests_keep_indices_contiguous() {
    let feed = shared("threads");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let feed = feed.clone();
            thread::spawn(move || feed.request_more().expect("request_more"))
        })
        .collect();
    for handle in handles {
        let outcome = handle.join().expect("thread panicked");
        assert!(matches!(outcome, PageOutcome::Appended { count: 10, .. }), "got {outcome:?}");
    }

    let snapshot = feed.snapshot().unwrap();
    assert_eq!(snapshot.records.len(), 100);
    for (i, record) in snapshot.records.iter().enumerate() {
        assert_eq!(record.index, i as u64 + 1);
    }
}

#[test]
fn concurrent_run_matches_sequential_run() {
    let concurrent = shared("same-stream");
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let feed = concurrent.clone();
            thread::spawn(move || feed.request_more().expect("request_more"))
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread panicked");
    }

    let sequential = shared("same-stream");
    for _ in 0..4 {
        sequential.request_more().unwrap();
    }

    assert_eq!(
        concurrent.snapshot().unwrap().records,
        sequential.snapshot().unwrap().records
    );
}

#[test]
fn reconfigure_through_handle_discards_pending_page() {
    let feed = shared("handle");

    let ticket = feed.with_feed(|f| f.begin_page()).unwrap().unwrap();
    let faker = feed.with_feed(|f| f.faker()).unwrap();
    let page = ticket.generate(faker.as_ref());

    feed.reconfigure(GenerationConfig::for_region(Region::Poland, 0, "other"))
        .unwrap();
    let outcome = feed.with_feed(|f| f.commit_page(ticket, page)).unwrap().unwrap();

    assert!(matches!(outcome, PageOutcome::Discarded { .. }));
    assert_eq!(feed.snapshot().unwrap().records.len(), 20);

    // Nothing is left waiting on the stale page.
    feed.request_more().unwrap();
    assert_eq!(feed.snapshot().unwrap().last_index, 30);
}

/// Delegates to CuratedFaker but panics on the `panic_on`-th name call (1-based).
struct PanickingFaker {
    name_calls: AtomicUsize,
    panic_on: usize,
}

impl LocaleFaker for PanickingFaker {
    fn name(&self, locale: Locale, rng: &mut SeedStream) -> FeedResult<String> {
        let call = self.name_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.panic_on {
            panic!("name backend crashed");
        }
        CuratedFaker.name(locale, rng)
    }

    fn address(&self, locale: Locale, rng: &mut SeedStream) -> FeedResult<String> {
        CuratedFaker.address(locale, rng)
    }

    fn phone(&self, region: Region, rng: &mut SeedStream) -> FeedResult<String> {
        CuratedFaker.phone(region, rng)
    }
}

#[test]
fn panic_during_generation_releases_reservation() {
    let faker = PanickingFaker {
        name_calls: AtomicUsize::new(0),
        panic_on: 21,
    };
    let feed = SharedFeed::new(PaginatedFeed::with_faker(FeedSettings::default(), faker));
    feed.initialize(GenerationConfig::for_region(Region::Usa, 1, "panic"))
        .expect("initialize");

    let crashing = feed.clone();
    let joined = thread::spawn(move || crashing.request_more()).join();
    assert!(joined.is_err(), "First page request should have panicked");

    assert!(!feed.with_feed(|f| f.page_in_flight()).unwrap());
    assert_eq!(feed.snapshot().unwrap().records.len(), 20);

    // A queued caller must get through instead of waiting forever.
    let (tx, rx) = mpsc::channel();
    let next = feed.clone();
    thread::spawn(move || {
        tx.send(next.request_more()).ok();
    });
    let outcome = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("request_more blocked after a panicked page")
        .expect("request_more");
    assert_eq!(outcome, PageOutcome::Appended { first_index: 21, count: 10 });
}
