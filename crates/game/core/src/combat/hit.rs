//! Dodge and critical-hit rolls.

use crate::env::RngOracle;
use crate::stats::EntityStats;

/// Draws one uniform value and compares it against `target.dodge_chance`.
///
/// A chance of 0 never dodges and a chance of 1 always does, since draws are in `[0, 1)`.
pub fn roll_dodge(target: &EntityStats, rng: &mut (impl RngOracle + ?Sized)) -> bool {
    rng.unit() < target.dodge_chance
}

/// Draws one uniform value and compares it against `target.crit_chance`.
///
/// The crit chance read is the *target's*, so a high value on an entity makes it
/// more likely to take critical hits.
pub fn roll_crit(target: &EntityStats, rng: &mut (impl RngOracle + ?Sized)) -> bool {
    rng.unit() < target.crit_chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;

    #[test]
    fn roll_is_strictly_below_chance() {
        let target = EntityStats::new(10.0, 0.0).with_chances(0.5, 0.5);
        let mut rng = SequenceRng::new(vec![0.49, 0.5]);
        assert!(roll_dodge(&target, &mut rng));
        assert!(!roll_dodge(&target, &mut rng));
    }

    #[test]
    fn extreme_chances() {
        let never = EntityStats::new(10.0, 0.0);
        let always = EntityStats::new(10.0, 0.0).with_chances(1.0, 1.0);
        let mut rng = SequenceRng::new(vec![0.0, 0.999]);
        assert!(!roll_crit(&never, &mut rng));
        assert!(roll_crit(&always, &mut rng));
    }
}
