//! Capture stone profiles.
//!
//! Consolidates per-kind multiplier parameters and the stone's capture record.

use soulbind_core::components::{CaptureStone, CapturedCreature};
use soulbind_core::constants::*;
use soulbind_core::enums::{CreatureKind, StoneKind};

/// Multiplier profile for a stone kind.
pub struct StoneProfile {
    /// Multiplier against any creature.
    pub base_multiplier: f64,
    /// Creature kind this stone is attuned to, if any.
    pub affinity: Option<CreatureKind>,
    /// Extra factor against the attuned kind.
    pub affinity_bonus: f64,
}

/// Get the profile for a stone kind.
pub fn get_profile(kind: StoneKind) -> StoneProfile {
    let attuned = |affinity| StoneProfile {
        base_multiplier: ELEMENTAL_STONE_MULTIPLIER,
        affinity: Some(affinity),
        affinity_bonus: STONE_AFFINITY_BONUS,
    };

    match kind {
        StoneKind::Plain => StoneProfile {
            base_multiplier: PLAIN_STONE_MULTIPLIER,
            affinity: None,
            affinity_bonus: 1.0,
        },
        StoneKind::Ember => attuned(CreatureKind::Ember),
        StoneKind::Tide => attuned(CreatureKind::Tide),
        StoneKind::Grove => attuned(CreatureKind::Grove),
        StoneKind::Gale => attuned(CreatureKind::Gale),
        StoneKind::Prism => StoneProfile {
            base_multiplier: PRISM_STONE_MULTIPLIER,
            affinity: None,
            affinity_bonus: 1.0,
        },
    }
}

/// Combined multiplier of `stone` against a creature of `kind`. Always positive.
pub fn total_capture_multiplier(stone: &CaptureStone, kind: CreatureKind) -> f64 {
    let profile = get_profile(stone.kind);
    let affinity = if profile.affinity == Some(kind) {
        profile.affinity_bonus
    } else {
        1.0
    };
    (profile.base_multiplier * affinity * stone.refinement).max(MIN_STONE_MULTIPLIER)
}

/// Record a creature into the stone's roster.
pub fn capture_creature(stone: &mut CaptureStone, creature: CapturedCreature) {
    tracing::info!(
        stone_id = stone.id,
        creature_id = creature.creature_id,
        "creature bound into stone"
    );
    stone.captured.push(creature);
}
