//! typofeed-core: deterministic synthetic personal records with typos.
//!
//! Control flow:
//!   PaginatedFeed -> RecordGenerator (x page size)
//!                 -> NoiseInjector (x 3 fields)
//!                 -> SeedStream

pub mod config;
pub mod error;
pub mod faker;
pub mod feed;
pub mod locale;
pub mod noise;
pub mod record;
pub mod rng;
pub mod shared;
pub mod snapshot;
pub mod types;

pub use config::{FeedSettings, GenerationConfig, NoiseMode};
pub use error::{FeedError, FeedResult};
pub use faker::{CuratedFaker, LocaleFaker};
pub use feed::{FeedState, PageOutcome, PageTicket, PaginatedFeed};
pub use locale::{Locale, Region};
pub use record::Record;
pub use rng::SeedStream;
pub use shared::SharedFeed;
