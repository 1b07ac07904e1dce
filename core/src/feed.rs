//! The paginated feed: the heart of the generator.
//!
//! LIFECYCLE:
//!   Fresh      --initialize/reconfigure-->  Populated (first page, index 1..)
//!   Populated  --request_more------------>  Populated (next page, last + 1..)
//!   any        --reconfigure------------->  Populated (new sequence from index 1)
//!
//! A failed initialize/reconfigure is a no-op: the previous sequence,
//! config, cursor and epoch all survive.
//!
//! RULES:
//!   - Only the feed mutates its record sequence and PRNG cursor.
//!   - A page is applied all-or-nothing. A failed page leaves the
//!     sequence and the cursor exactly as they were.
//!   - At most one page is in flight. Pages reserved under an older
//!     epoch are discarded on commit, never appended.
//!   - request_more never re-seeds. Only (re)initialization does.

use crate::{
    config::{FeedSettings, GenerationConfig, NoiseMode},
    error::{FeedError, FeedResult},
    faker::{CuratedFaker, LocaleFaker},
    noise::NoiseInjector,
    record::{Record, RecordGenerator},
    rng::SeedStream,
    snapshot::FeedSnapshot,
    types::{Epoch, RecordIndex},
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Fresh,
    Populated,
}

/// What a page request did to the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Appended { first_index: RecordIndex, count: usize },
    /// The page was generated for a configuration that is no longer active.
    Discarded { epoch: Epoch },
    /// The feed reached its `total_count` bound.
    Exhausted,
}

/// A reserved page: everything needed to generate it without
/// borrowing the feed.
#[derive(Debug, Clone)]
pub struct PageTicket {
    epoch: Epoch,
    start_index: RecordIndex,
    size: usize,
    config: GenerationConfig,
    cursor: SeedStream,
    noise_mode: NoiseMode,
    identifier_len: usize,
}

/// A generated page waiting to be committed.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    records: Vec<Record>,
    cursor: SeedStream,
}

impl PageTicket {
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn start_index(&self) -> RecordIndex {
        self.start_index
    }

    /// Generate the page against a private copy of the cursor.
    pub fn generate<F: LocaleFaker + ?Sized>(&self, faker: &F) -> FeedResult<GeneratedPage> {
        let generator = RecordGenerator::new(
            faker,
            NoiseInjector::new(self.noise_mode),
            self.identifier_len,
        );
        let mut cursor = self.cursor.clone();
        let records = (0..self.size as RecordIndex)
            .map(|offset| generator.generate_record(self.start_index + offset, &self.config, &mut cursor))
            .collect::<FeedResult<Vec<_>>>()?;
        Ok(GeneratedPage { records, cursor })
    }
}

pub struct PaginatedFeed<F: LocaleFaker = CuratedFaker> {
    settings: FeedSettings,
    faker: Arc<F>,
    config: Option<GenerationConfig>,
    records: Vec<Record>,
    cursor: Option<SeedStream>,
    epoch: Epoch,
    in_flight: Option<Epoch>,
}

impl PaginatedFeed<CuratedFaker> {
    pub fn new(settings: FeedSettings) -> Self {
        Self::with_faker(settings, CuratedFaker)
    }
}

impl<F: LocaleFaker> PaginatedFeed<F> {
    pub fn with_faker(settings: FeedSettings, faker: F) -> Self {
        Self {
            settings,
            faker: Arc::new(faker),
            config: None,
            records: Vec::new(),
            cursor: None,
            epoch: 0,
            in_flight: None,
        }
    }

    // ── Transitions ────────────────────────────────────────────

    /// Start a fresh sequence for `config` and generate the first page.
    /// The new sequence replaces the current one only if that page
    /// succeeds. On any error the feed is left exactly as it was.
    pub fn initialize(&mut self, config: GenerationConfig) -> FeedResult<PageOutcome> {
        config.validate()?;
        self.settings.validate()?;

        let epoch = self.epoch + 1;
        let ticket = PageTicket {
            epoch,
            start_index: 1,
            size: page_len(config.total_count, 0, self.settings.initial_page_size),
            cursor: SeedStream::new(&config.seed),
            config,
            noise_mode: self.settings.noise_mode,
            identifier_len: self.settings.identifier_len,
        };
        let page = match ticket.generate(self.faker.as_ref()) {
            Ok(page) => page,
            Err(e) => {
                log::warn!("First page for epoch {epoch} failed, keeping epoch {}: {e}", self.epoch);
                return Err(e);
            }
        };

        let config = ticket.config;
        log::info!(
            "Feed initialized: region={} locale={} intensity={} seed={:?} epoch={}",
            config.region,
            config.locale,
            config.error_intensity,
            config.seed,
            epoch
        );
        self.epoch = epoch;
        self.config = Some(config);
        self.records = page.records;
        self.cursor = Some(page.cursor);
        self.in_flight = None;

        if self.records.is_empty() {
            Ok(PageOutcome::Exhausted)
        } else {
            Ok(PageOutcome::Appended {
                first_index: 1,
                count: self.records.len(),
            })
        }
    }

    /// Throw away every record and restart from index 1 under `config`.
    pub fn reconfigure(&mut self, config: GenerationConfig) -> FeedResult<PageOutcome> {
        config.validate()?;
        log::info!(
            "Reconfiguring feed: {} records in epoch {} will be replaced",
            self.records.len(),
            self.epoch
        );
        self.initialize(config)
    }

    /// Append the next page, continuing the current cursor.
    pub fn request_more(&mut self) -> FeedResult<PageOutcome> {
        let ticket = self.begin_page()?;
        let result = ticket.generate(self.faker.as_ref());
        self.commit_page(ticket, result)
    }

    // ── Two-phase page API ─────────────────────────────────────

    /// Reserve the next page. Fails with `PageInFlight` while another
    /// reservation is outstanding for the current epoch.
    pub fn begin_page(&mut self) -> FeedResult<PageTicket> {
        self.reserve(self.settings.page_size)
    }

    /// Give up a reservation without committing a page. Stale epochs
    /// are ignored.
    pub fn abandon_page(&mut self, epoch: Epoch) {
        if epoch == self.epoch && self.in_flight == Some(epoch) {
            log::warn!("Page reservation for epoch {epoch} abandoned");
            self.in_flight = None;
        }
    }

    /// Apply a generated page, or discard it if the feed moved on.
    pub fn commit_page(
        &mut self,
        ticket: PageTicket,
        result: FeedResult<GeneratedPage>,
    ) -> FeedResult<PageOutcome> {
        if ticket.epoch != self.epoch {
            log::warn!(
                "Discarding page for stale epoch {} (current {})",
                ticket.epoch,
                self.epoch
            );
            return Ok(PageOutcome::Discarded { epoch: ticket.epoch });
        }
        self.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Page starting at {} failed: {e}", ticket.start_index);
                return Err(e);
            }
        };

        if ticket.start_index != self.next_index() {
            return Err(FeedError::Other(anyhow::anyhow!(
                "page starts at {} but feed continues at {}",
                ticket.start_index,
                self.next_index()
            )));
        }

        if page.records.is_empty() {
            return Ok(PageOutcome::Exhausted);
        }

        let count = page.records.len();
        self.records.extend(page.records);
        self.cursor = Some(page.cursor);
        log::debug!(
            "Appended {count} records at {} (epoch {})",
            ticket.start_index,
            self.epoch
        );
        Ok(PageOutcome::Appended {
            first_index: ticket.start_index,
            count,
        })
    }

    fn reserve(&mut self, page_size: usize) -> FeedResult<PageTicket> {
        let config = self.config.as_ref().ok_or(FeedError::NotInitialized)?;
        let cursor = self.cursor.as_ref().ok_or(FeedError::NotInitialized)?;
        if self.in_flight == Some(self.epoch) {
            return Err(FeedError::PageInFlight);
        }

        let ticket = PageTicket {
            epoch: self.epoch,
            start_index: self.next_index(),
            size: page_len(config.total_count, self.records.len(), page_size),
            config: config.clone(),
            cursor: cursor.clone(),
            noise_mode: self.settings.noise_mode,
            identifier_len: self.settings.identifier_len,
        };
        self.in_flight = Some(self.epoch);
        Ok(ticket)
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn state(&self) -> FeedState {
        if self.records.is_empty() {
            FeedState::Fresh
        } else {
            FeedState::Populated
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn config(&self) -> Option<&GenerationConfig> {
        self.config.as_ref()
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// True while a page reserved under the current epoch is pending.
    pub fn page_in_flight(&self) -> bool {
        self.in_flight == Some(self.epoch)
    }

    /// Shared handle to the faker, for generating pages outside the feed.
    pub fn faker(&self) -> Arc<F> {
        Arc::clone(&self.faker)
    }

    pub fn last_index(&self) -> RecordIndex {
        self.records.last().map(|r| r.index).unwrap_or(0)
    }

    fn next_index(&self) -> RecordIndex {
        self.last_index() + 1
    }

    /// Unbounded feeds always have more once initialized.
    pub fn has_more(&self) -> bool {
        match &self.config {
            None => false,
            Some(config) => config
                .total_count
                .map_or(true, |total| (self.records.len() as u64) < total),
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            config: self.config.clone(),
            epoch: self.epoch,
            last_index: self.last_index(),
            has_more: self.has_more(),
            records: self.records.clone(),
        }
    }
}

/// Records the next page may hold, honouring an optional total bound.
fn page_len(total_count: Option<u64>, produced: usize, page_size: usize) -> usize {
    match total_count {
        Some(total) => {
            let remaining = total.saturating_sub(produced as u64);
            // <= page_size, so the cast cannot truncate.
            remaining.min(page_size as u64) as usize
        }
        None => page_size,
    }
}
