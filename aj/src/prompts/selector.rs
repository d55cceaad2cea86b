//! Prompt selection without replacement

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{Catalog, PromptError};
use crate::entry::SLOTS;

/// Source of uniform random indices
pub trait RandomSource {
    /// Pick an index in `0..upper`; callers guarantee `upper > 0`
    fn pick(&mut self, upper: usize) -> usize;
}

/// `RandomSource` backed by a `rand` generator
pub struct RngSource<R> {
    rng: R,
}

impl RngSource<ThreadRng> {
    /// Non-deterministic source using the thread-local generator
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// Replays a fixed sequence of indices (wrapped into range), cycling when exhausted
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    picks: Vec<usize>,
    next: usize,
}

impl SequenceSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn pick(&mut self, upper: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.next % self.picks.len()];
        self.next += 1;
        value % upper
    }
}

/// Draw one prompt uniformly from the catalog, skipping any in `exclude`
///
/// Returns `None` when every catalog prompt is excluded.
pub fn draw(catalog: &Catalog, exclude: &[String], rng: &mut dyn RandomSource) -> Option<String> {
    let candidates: Vec<&String> = catalog.prompts().iter().filter(|p| !exclude.contains(*p)).collect();
    debug!(candidates = candidates.len(), excluded = exclude.len(), "draw: called");

    if candidates.is_empty() {
        return None;
    }

    let index = rng.pick(candidates.len());
    Some(candidates[index].clone())
}

/// Fill every slot with pairwise-distinct prompts
pub fn draw_initial(catalog: &Catalog, rng: &mut dyn RandomSource) -> Result<[String; SLOTS], PromptError> {
    debug!(catalog = catalog.len(), "draw_initial: called");
    let too_small = || PromptError::CatalogTooSmall {
        needed: SLOTS,
        found: catalog.len(),
    };

    let mut chosen: Vec<String> = Vec::with_capacity(SLOTS);
    for _ in 0..SLOTS {
        let prompt = draw(catalog, &chosen, rng).ok_or_else(too_small)?;
        chosen.push(prompt);
    }

    chosen.try_into().map_err(|_| too_small())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn catalog(items: &[&str]) -> Catalog {
        Catalog::new(items.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_draw_skips_excluded() {
        let catalog = catalog(&["a", "b", "c", "d"]);
        let exclude = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut rng = SequenceSource::new(vec![0, 5, 9]);

        for _ in 0..3 {
            assert_eq!(draw(&catalog, &exclude, &mut rng).as_deref(), Some("d"));
        }
    }

    #[test]
    fn test_draw_exhausted_returns_none() {
        let catalog = catalog(&["a", "b", "c"]);
        let exclude = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(draw(&catalog, &exclude, &mut RngSource::seeded(1)), None);
    }

    #[test]
    fn test_draw_initial_exact_catalog() {
        let catalog = catalog(&["a", "b", "c"]);
        let prompts = draw_initial(&catalog, &mut SequenceSource::new(vec![2, 0, 0])).unwrap();
        assert_eq!(prompts, ["c".to_string(), "a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let catalog = Catalog::embedded();
        let first = draw_initial(&catalog, &mut RngSource::seeded(42)).unwrap();
        let second = draw_initial(&catalog, &mut RngSource::seeded(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sequence_source_wraps() {
        let mut rng = SequenceSource::new(vec![7]);
        assert_eq!(rng.pick(3), 1);
        assert_eq!(rng.pick(5), 2);
        assert_eq!(SequenceSource::default().pick(4), 0);
    }

    proptest! {
        #[test]
        fn prop_initial_draw_is_distinct_and_from_catalog(
            items in prop::collection::hash_set("[a-z]{1,8}", 3..40),
            seed in any::<u64>(),
        ) {
            let catalog = Catalog::new(items.into_iter().collect()).unwrap();
            let prompts = draw_initial(&catalog, &mut RngSource::seeded(seed)).unwrap();

            let unique: HashSet<&String> = prompts.iter().collect();
            prop_assert_eq!(unique.len(), SLOTS);
            for prompt in &prompts {
                prop_assert!(catalog.contains(prompt));
            }
        }

        #[test]
        fn prop_draw_never_returns_excluded(
            items in prop::collection::hash_set("[a-z]{1,8}", 4..20),
            excluded in 0usize..3,
            seed in any::<u64>(),
        ) {
            let catalog = Catalog::new(items.into_iter().collect()).unwrap();
            let exclude: Vec<String> = catalog.prompts().iter().take(excluded + 1).cloned().collect();
            let picked = draw(&catalog, &exclude, &mut RngSource::seeded(seed)).unwrap();
            prop_assert!(!exclude.contains(&picked));
        }
    }
}
