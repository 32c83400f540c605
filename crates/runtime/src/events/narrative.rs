//! Human-readable battle log lines.

use battle_core::{BattleEvent, EntityId, HitFlags, Roster};

/// Renders `event` as a sentence using display names from `roster`.
///
/// Returns `None` for events that are not worth a line of their own
/// (move selection, zero-cost resource spending).
pub fn describe(event: &BattleEvent, roster: &Roster) -> Option<String> {
    let name = |id: EntityId| {
        roster
            .get(id)
            .map(|entity| entity.to_string())
            .unwrap_or_else(|| id.to_string())
    };

    let line = match event {
        BattleEvent::RoundStarted { round } => format!("===== ROUND {round} ====="),
        BattleEvent::MoveChosen { .. } => return None,
        BattleEvent::DamageResolved {
            source,
            target,
            skill,
            amount,
            flags,
        } => {
            let mut line = format!(
                "{} uses {skill} on {} for {amount:.1} damage",
                name(*source),
                name(*target)
            );
            let notes = hit_notes(*flags);
            if !notes.is_empty() {
                line.push_str(&format!(" ({})", notes.join(", ")));
            }
            line
        }
        BattleEvent::Healed {
            source,
            target,
            skill,
            amount,
        } => format!(
            "{} uses {skill} on {} and restores {amount:.1} health",
            name(*source),
            name(*target)
        ),
        BattleEvent::ResourceSpent { amount, .. } if *amount <= 0.0 => return None,
        BattleEvent::ResourceSpent { source, amount } => {
            format!("{} spends {amount:.1} resource", name(*source))
        }
        BattleEvent::EntityDied { entity } => format!("{} has fallen", name(*entity)),
        BattleEvent::BattleWon { round } => format!("Victory in round {round}!"),
        BattleEvent::BattleLost { round } => format!("Defeat in round {round}..."),
    };
    Some(line)
}

fn hit_notes(flags: HitFlags) -> Vec<&'static str> {
    [
        (HitFlags::DODGED, "dodged"),
        (HitFlags::CRIT, "crit"),
        (HitFlags::WEAKNESS, "weakness"),
        (HitFlags::RESISTED, "resisted"),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.contains(*flag))
    .map(|(_, note)| note)
    .collect()
}
