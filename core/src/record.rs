//! Record generation: one synthetic, typo-ridden personal record.
//!
//! Draw order per record (fixed, never reordered; reordering
//! changes every record produced by a given seed):
//!   1. identifier token
//!   2. raw name, raw address, raw phone (faker)
//!   3. noise on name, address, phone

use crate::{
    config::GenerationConfig,
    error::{FeedError, FeedResult},
    faker::LocaleFaker,
    noise::NoiseInjector,
    rng::SeedStream,
    types::RecordIndex,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub index: RecordIndex,
    pub identifier: String,
    pub name: String,
    pub address: String,
    pub phone: String,
}

pub struct RecordGenerator<'a, F: LocaleFaker + ?Sized> {
    faker: &'a F,
    injector: NoiseInjector,
    identifier_len: usize,
}

impl<'a, F: LocaleFaker + ?Sized> RecordGenerator<'a, F> {
    pub fn new(faker: &'a F, injector: NoiseInjector, identifier_len: usize) -> Self {
        Self {
            faker,
            injector,
            identifier_len,
        }
    }

    /// Build the record at `index`. A faker failure aborts the record;
    /// no record is ever returned with a missing field.
    pub fn generate_record(
        &self,
        index: RecordIndex,
        config: &GenerationConfig,
        rng: &mut SeedStream,
    ) -> FeedResult<Record> {
        let identifier = rng.token(self.identifier_len);

        let name = self
            .faker
            .name(config.locale, rng)
            .map_err(|e| generation_error(index, "name", e))?;
        let address = self
            .faker
            .address(config.locale, rng)
            .map_err(|e| generation_error(index, "address", e))?;
        let phone = self
            .faker
            .phone(config.region, rng)
            .map_err(|e| generation_error(index, "phone", e))?;

        let intensity = config.error_intensity;
        Ok(Record {
            index,
            identifier,
            name: self.injector.inject(&name, intensity, rng),
            address: self.injector.inject(&address, intensity, rng),
            phone: self.injector.inject(&phone, intensity, rng),
        })
    }
}

fn generation_error(index: RecordIndex, field: &'static str, source: FeedError) -> FeedError {
    match source {
        // Already tagged by a nested generator; keep the innermost context.
        e @ FeedError::Generation { .. } => e,
        other => FeedError::Generation {
            index,
            field,
            reason: other.to_string(),
        },
    }
}
