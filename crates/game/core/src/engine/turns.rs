//! Weighted-random turn order.
//!
//! Entities are sampled without replacement with probability proportional to
//! their speed. Each draw partitions `[0, 1)` into half-open intervals
//! `[lo, lo + speed / remaining)` over the remaining pool.

use crate::env::RngOracle;
use crate::state::{BattleEntity, EntityId};

/// Orders `entries` by weighted sampling without replacement.
///
/// If any weight is zero (or not a positive finite number), or the weights sum
/// to zero, the input order is returned unchanged and no draws are made.
pub fn weighted_order<T: Copy>(entries: &[(T, f32)], rng: &mut (impl RngOracle + ?Sized)) -> Vec<T> {
    let usable = entries.iter().all(|(_, w)| w.is_finite() && *w > 0.0);
    let total: f32 = entries.iter().map(|(_, w)| *w).sum();
    if !usable || total <= 0.0 || !total.is_finite() {
        return entries.iter().map(|(item, _)| *item).collect();
    }

    let mut pool: Vec<(T, f32)> = entries.to_vec();
    let mut remaining = total;
    let mut order = Vec::with_capacity(pool.len());

    while !pool.is_empty() {
        let r = rng.unit();
        let mut lo = 0.0f32;
        // Float drift can leave `r` past the last upper bound; it belongs to the last entry.
        let mut picked = pool.len() - 1;
        for (i, (_, weight)) in pool.iter().enumerate() {
            let hi = lo + weight / remaining;
            if r >= lo && r < hi {
                picked = i;
                break;
            }
            lo = hi;
        }

        let (item, weight) = pool.remove(picked);
        remaining -= weight;
        order.push(item);
    }

    order
}

/// Draws the turn order for `entities` weighted by their speed stat.
pub fn turn_order<'a>(
    entities: impl IntoIterator<Item = &'a BattleEntity>,
    rng: &mut (impl RngOracle + ?Sized),
) -> Vec<EntityId> {
    let entries: Vec<(EntityId, f32)> = entities
        .into_iter()
        .map(|e| (e.id, e.stats.speed))
        .collect();
    weighted_order(&entries, rng)
}
