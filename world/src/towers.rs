//! Authoritative tower state management utilities.

use std::collections::BTreeMap;

use waypoint_defence_core::{TowerId, TowerKind, TowerSnapshot, WorldPoint};

/// State of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell centre occupied by the tower.
    pub(crate) position: WorldPoint,
    /// Frames until the tower may fire again.
    pub(crate) cooldown: u32,
}

impl TowerState {
    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            cooldown: self.cooldown,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Stores a freshly built tower with zero cooldown and returns its identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, position: WorldPoint) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                position,
                cooldown: 0,
            },
        );
        id
    }

    /// Reports whether a tower already stands on the exact cell centre.
    pub(crate) fn occupies(&self, position: WorldPoint) -> bool {
        self.entries.values().any(|tower| tower.position == position)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    /// Counts every positive cooldown down by one frame.
    pub(crate) fn tick_cooldowns(&mut self) {
        for tower in self.entries.values_mut() {
            tower.cooldown = tower.cooldown.saturating_sub(1);
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = TowerRegistry::new();
        let first = registry.insert(TowerKind::Blaster, WorldPoint::new(20.0, 20.0));
        let second = registry.insert(TowerKind::Frost, WorldPoint::new(60.0, 20.0));

        assert_eq!(first, TowerId::new(0));
        assert_eq!(second, TowerId::new(1));
    }

    #[test]
    fn occupancy_matches_exact_cell_centres() {
        let mut registry = TowerRegistry::new();
        let _ = registry.insert(TowerKind::Sniper, WorldPoint::new(60.0, 20.0));

        assert!(registry.occupies(WorldPoint::new(60.0, 20.0)));
        assert!(!registry.occupies(WorldPoint::new(100.0, 20.0)));
    }

    #[test]
    fn cooldowns_never_underflow() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Mortar, WorldPoint::new(20.0, 20.0));
        if let Some(tower) = registry.get_mut(id) {
            tower.cooldown = 1;
        }

        registry.tick_cooldowns();
        registry.tick_cooldowns();

        let cooldowns: Vec<u32> = registry.iter().map(|tower| tower.cooldown).collect();
        assert_eq!(cooldowns, vec![0]);
    }
}
