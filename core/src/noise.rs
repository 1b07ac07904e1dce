//! Typo injection: single-character corruption of generated fields.
//!
//! One edit consumes, in order:
//!   1. a draw for the edit kind (uniform over delete / insert / transpose)
//!   2. a draw for the position (uniform over 0..=len, counted in chars)
//!   3. insert only: a draw for the letter (uniform over a..=z)
//!
//! Boundary behaviour:
//!   - delete at `len` is a no-op.
//!   - insert at `len` appends.
//!   - transpose at 0 swaps chars 0 and 1; elsewhere it swaps
//!     `index - 1` and `index`. At `len` there is nothing to swap
//!     with, so the input comes back unchanged. Empty and
//!     single-character inputs are returned as they are.

use crate::{config::NoiseMode, rng::SeedStream, types::ErrorIntensity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Delete,
    Insert,
    Transpose,
}

impl EditKind {
    pub const ALL: [EditKind; 3] = [EditKind::Delete, EditKind::Insert, EditKind::Transpose];
}

/// Apply one edit. `letter` is only used by `Insert`.
pub fn apply_edit(input: &str, kind: EditKind, index: usize, letter: char) -> String {
    let mut chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let index = index.min(len);

    match kind {
        EditKind::Delete => {
            if index < len {
                chars.remove(index);
            }
        }
        EditKind::Insert => chars.insert(index, letter),
        EditKind::Transpose => {
            if index == 0 {
                if len >= 2 {
                    chars.swap(0, 1);
                }
            } else if index < len {
                chars.swap(index - 1, index);
            }
        }
    }
    chars.into_iter().collect()
}

pub struct NoiseInjector {
    mode: NoiseMode,
}

impl NoiseInjector {
    pub fn new(mode: NoiseMode) -> Self {
        Self { mode }
    }

    /// Number of edits applied per field at this intensity.
    pub fn edits_for(&self, intensity: ErrorIntensity) -> usize {
        match self.mode {
            NoiseMode::SingleEdit => 1,
            NoiseMode::Scaled => intensity as usize,
        }
    }

    /// Corrupt `input` according to the injector's mode.
    pub fn inject(&self, input: &str, intensity: ErrorIntensity, rng: &mut SeedStream) -> String {
        (0..self.edits_for(intensity)).fold(input.to_string(), |text, _| Self::random_edit(&text, rng))
    }

    /// Draw and apply exactly one edit.
    pub fn random_edit(input: &str, rng: &mut SeedStream) -> String {
        let kind = *rng.pick(&EditKind::ALL);
        let index = rng.next_below(input.chars().count() + 1);
        let letter = match kind {
            EditKind::Insert => (b'a' + rng.next_below(26) as u8) as char,
            _ => 'a',
        };
        apply_edit(input, kind, index, letter)
    }
}

impl Default for NoiseInjector {
    fn default() -> Self {
        Self::new(NoiseMode::default())
    }
}
