use std::collections::{HashMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::greetings::{GreetingPool, PoolKey, Recipient, Tone};

/// Four greetings for pools of five or more, three otherwise, never more than exist.
pub fn batch_size(pool_len: usize) -> usize {
    let wanted = if pool_len >= 5 { 4 } else { 3 };
    wanted.min(pool_len)
}

/// Picks a batch of distinct entries that were not shown before.
///
/// When fewer unused indices remain than the batch needs, the whole used set
/// is dropped and the batch is drawn from the full pool. Returned strings are
/// in shuffled order; the second value is the used set to keep for next time.
pub fn select_batch<R: Rng + ?Sized>(
    pool: &[String],
    used: &HashSet<usize>,
    rng: &mut R,
) -> (Vec<String>, HashSet<usize>) {
    let count = batch_size(pool.len());
    let mut available: Vec<usize> = (0..pool.len()).filter(|i| !used.contains(i)).collect();

    let mut updated = if available.len() < count {
        available = (0..pool.len()).collect();
        HashSet::new()
    } else {
        used.clone()
    };

    available.shuffle(rng);
    available.truncate(count);
    updated.extend(available.iter().copied());

    let picked = available.iter().map(|&i| pool[i].clone()).collect();
    (picked, updated)
}

/// Per-pool record of shown indices for the current session.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    used: HashMap<PoolKey, HashSet<usize>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next batch for the pair, or nothing when its pool is empty.
    pub fn next_batch<R: Rng + ?Sized>(
        &mut self,
        pools: &GreetingPool,
        recipient: Recipient,
        tone: Tone,
        rng: &mut R,
    ) -> Vec<String> {
        let pool = pools.pool(recipient, tone);
        if pool.is_empty() {
            tracing::debug!(%recipient, %tone, "empty pool, nothing to select");
            return Vec::new();
        }

        let key = PoolKey::new(recipient, tone);
        let used = self.used.entry(key).or_default();
        let (picked, updated) = select_batch(pool, used, rng);
        *used = updated;
        picked
    }

    #[cfg(test)]
    pub fn used(&self, recipient: Recipient, tone: Tone) -> Option<&HashSet<usize>> {
        self.used.get(&PoolKey::new(recipient, tone))
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }
}
