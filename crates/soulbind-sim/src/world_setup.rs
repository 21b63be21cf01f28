//! Entity spawn factories for setting up the capture world.
//!
//! Creates the player, wild creatures and capture stones with
//! appropriate component bundles.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use soulbind_core::components::*;
use soulbind_core::constants::*;
use soulbind_core::enums::*;

/// Spawn the player entity.
pub fn spawn_player(world: &mut World, name: &str) -> hecs::Entity {
    world.spawn((Player {
        name: name.to_string(),
    },))
}

/// Max health of a creature at `level`.
pub fn max_health_for_level(level: u32) -> f64 {
    BASE_CREATURE_HEALTH + HEALTH_PER_LEVEL * level as f64
}

/// Spawn a creature with an explicit health value (clamped to its max).
pub fn spawn_creature(
    world: &mut World,
    id: u32,
    name: &str,
    kind: CreatureKind,
    level: u32,
    health: f64,
) -> hecs::Entity {
    let max = max_health_for_level(level);
    world.spawn((
        Creature {
            id,
            name: name.to_string(),
            kind,
            level,
        },
        Health {
            current: health.clamp(0.0, max),
            max,
        },
    ))
}

/// Spawn a creature at full health.
pub fn spawn_healthy_creature(
    world: &mut World,
    id: u32,
    name: &str,
    kind: CreatureKind,
    level: u32,
) -> hecs::Entity {
    spawn_creature(world, id, name, kind, level, max_health_for_level(level))
}

/// Spawn an empty capture stone.
pub fn spawn_stone(world: &mut World, id: u32, kind: StoneKind, refinement: f64) -> hecs::Entity {
    world.spawn((CaptureStone {
        id,
        kind,
        refinement,
        captured: Vec::new(),
    },))
}

/// Spawn a single wild creature with random kind, level and wear.
pub fn spawn_wild_creature(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    next_id: &mut u32,
) -> hecs::Entity {
    let kind = CreatureKind::ALL[rng.gen_range(0..CreatureKind::ALL.len())];
    let level = rng.gen_range(WILD_LEVEL_MIN..=WILD_LEVEL_MAX);
    // Wild creatures are often hurt from fights with each other
    let health_ratio: f64 = rng.gen_range(0.2..=1.0);

    let names = species_names(kind);
    let name = names[rng.gen_range(0..names.len())];

    let id = *next_id;
    *next_id += 1;
    spawn_creature(
        world,
        id,
        name,
        kind,
        level,
        max_health_for_level(level) * health_ratio,
    )
}

/// Populate the meadow with `count` wild creatures.
pub fn populate_meadow(world: &mut World, rng: &mut ChaCha8Rng, next_id: &mut u32, count: usize) {
    for _ in 0..count {
        spawn_wild_creature(world, rng, next_id);
    }
}

fn species_names(kind: CreatureKind) -> &'static [&'static str] {
    match kind {
        CreatureKind::Ember => &["Cinderkit", "Flarefox", "Ashmoth"],
        CreatureKind::Tide => &["Brineling", "Shellwhip", "Mistcarp"],
        CreatureKind::Grove => &["Mossback", "Thornhare", "Budling"],
        CreatureKind::Gale => &["Skitterwing", "Gustowl", "Zephyrat"],
        CreatureKind::Stone => &["Pebbleguard", "Cragmole", "Slatebeak"],
        CreatureKind::Shade => &["Duskwisp", "Gloamcat", "Umbrafly"],
    }
}
