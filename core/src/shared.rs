//! Thread-safe handle for consumers that fetch pages concurrently.
//!
//! RULE: page generation runs outside the lock, but only one page is
//! ever in flight. A second `request_more` waits until the first has
//! committed, so every page continues at `last_index + 1`.
//! A reconfigure while a page is generating bumps the epoch; the
//! pending page is then discarded on commit. If generation panics,
//! the reservation is released and the next caller proceeds.

use crate::{
    config::GenerationConfig,
    error::{FeedError, FeedResult},
    faker::{CuratedFaker, LocaleFaker},
    feed::{PageOutcome, PaginatedFeed},
    snapshot::FeedSnapshot,
    types::Epoch,
};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

pub struct SharedFeed<F: LocaleFaker = CuratedFaker> {
    inner: Arc<(Mutex<PaginatedFeed<F>>, Condvar)>,
}

impl<F: LocaleFaker> Clone for SharedFeed<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: LocaleFaker> SharedFeed<F> {
    pub fn new(feed: PaginatedFeed<F>) -> Self {
        Self {
            inner: Arc::new((Mutex::new(feed), Condvar::new())),
        }
    }

    pub fn initialize(&self, config: GenerationConfig) -> FeedResult<PageOutcome> {
        let outcome = self.lock()?.initialize(config);
        self.inner.1.notify_all();
        outcome
    }

    pub fn reconfigure(&self, config: GenerationConfig) -> FeedResult<PageOutcome> {
        let outcome = self.lock()?.reconfigure(config);
        self.inner.1.notify_all();
        outcome
    }

    /// Queue behind any in-flight page, then generate and commit the next one.
    pub fn request_more(&self) -> FeedResult<PageOutcome> {
        let (ticket, faker) = {
            let mut feed = self.lock()?;
            while feed.page_in_flight() {
                feed = self.inner.1.wait(feed).map_err(|_| poisoned())?;
            }
            (feed.begin_page()?, feed.faker())
        };

        let reservation = Reservation {
            shared: self,
            epoch: ticket.epoch(),
            armed: true,
        };
        let result = ticket.generate(faker.as_ref());
        reservation.disarm();

        let outcome = self.lock()?.commit_page(ticket, result);
        self.inner.1.notify_all();
        outcome
    }

    pub fn snapshot(&self) -> FeedResult<FeedSnapshot> {
        Ok(self.lock()?.snapshot())
    }

    /// Run `f` with exclusive access to the underlying feed.
    pub fn with_feed<T>(&self, f: impl FnOnce(&mut PaginatedFeed<F>) -> T) -> FeedResult<T> {
        let mut feed = self.lock()?;
        let out = f(&mut *feed);
        drop(feed);
        self.inner.1.notify_all();
        Ok(out)
    }

    fn lock(&self) -> FeedResult<MutexGuard<'_, PaginatedFeed<F>>> {
        self.inner.0.lock().map_err(|_| poisoned())
    }
}

/// Releases an in-flight reservation if page generation unwinds,
/// so queued callers are not left waiting on a page that never commits.
struct Reservation<'a, F: LocaleFaker> {
    shared: &'a SharedFeed<F>,
    epoch: Epoch,
    armed: bool,
}

impl<F: LocaleFaker> Reservation<'_, F> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<F: LocaleFaker> Drop for Reservation<'_, F> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Generation runs outside the lock, so a panic there leaves it unpoisoned.
        let mut feed = self
            .shared
            .inner
            .0
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        feed.abandon_page(self.epoch);
        drop(feed);
        self.shared.inner.1.notify_all();
    }
}

fn poisoned() -> FeedError {
    FeedError::Other(anyhow::anyhow!("feed lock poisoned"))
}
