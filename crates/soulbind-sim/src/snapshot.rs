//! Snapshot builder: projects the world and the controller into a `SessionSnapshot`.

use hecs::World;

use soulbind_core::components::{CaptureStone, Captured, Creature, Health};
use soulbind_core::events::CaptureEvent;
use soulbind_core::state::{CreatureView, ResolutionView, SessionSnapshot, StoneView};
use soulbind_core::types::SimTime;

use crate::controller::CaptureController;

/// Build the snapshot for one tick. Read-only over the world.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    controller: &CaptureController,
    events: Vec<CaptureEvent>,
    resolutions: Vec<ResolutionView>,
) -> SessionSnapshot {
    SessionSnapshot {
        time: *time,
        attempt: controller.view(),
        creatures: build_creatures(world),
        stones: build_stones(world),
        events,
        resolutions,
    }
}

fn build_creatures(world: &World) -> Vec<CreatureView> {
    let mut query = world.query::<(&Creature, &Health, Option<&Captured>)>();
    let mut creatures: Vec<CreatureView> = query
        .iter()
        .map(|(_entity, (creature, health, captured))| CreatureView {
            id: creature.id,
            name: creature.name.clone(),
            kind: creature.kind,
            level: creature.level,
            health: health.current,
            max_health: health.max,
            captured: captured.is_some(),
        })
        .collect();
    creatures.sort_by_key(|c| c.id);
    creatures
}

fn build_stones(world: &World) -> Vec<StoneView> {
    let mut query = world.query::<&CaptureStone>();
    let mut stones: Vec<StoneView> = query
        .iter()
        .map(|(_entity, stone)| StoneView {
            id: stone.id,
            kind: stone.kind,
            captured: stone.captured.clone(),
        })
        .collect();
    stones.sort_by_key(|s| s.id);
    stones
}
