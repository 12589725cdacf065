#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure build-menu system that turns tower selection and clicks into placement commands.

use waypoint_defence_core::{Command, PlacementError, TowerKind, WorldPoint};

/// Declarative placement preview describing a potential tower construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Kind of tower proposed for placement.
    pub kind: TowerKind,
    /// Snapped cell centre the tower would occupy.
    pub cell: WorldPointKey,
    /// Reason the placement would be rejected, if any.
    pub rejection: Option<PlacementError>,
}

impl PlacementPreview {
    /// Indicates whether the preview represents a valid placement location.
    #[must_use]
    pub const fn placeable(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Cell centre captured in whole world units so previews stay `Eq`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldPointKey {
    /// Horizontal coordinate of the cell centre.
    pub x: i32,
    /// Vertical coordinate of the cell centre.
    pub y: i32,
}

impl WorldPointKey {
    /// Converts the key back into a world point.
    #[must_use]
    pub fn to_point(self) -> WorldPoint {
        WorldPoint::new(self.x as f32, self.y as f32)
    }

    fn from_point(point: WorldPoint) -> Self {
        Self {
            x: point.x().round() as i32,
            y: point.y().round() as i32,
        }
    }
}

/// Build-menu system tracking the selected tower type.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    selected: Option<TowerKind>,
}

impl Builder {
    /// Creates a new builder system with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Tower type currently selected in the build menu.
    #[must_use]
    pub const fn selected(&self) -> Option<TowerKind> {
        self.selected
    }

    /// Selects a tower type, or clears the selection with `None`.
    pub fn select(&mut self, kind: Option<TowerKind>) {
        self.selected = kind;
    }

    /// Translates a click into a placement command for the selected tower.
    ///
    /// Fails with [`PlacementError::NoTowerSelected`] before any other check;
    /// the remaining checks belong to the world.
    pub fn handle_click(
        &self,
        click: WorldPoint,
        out: &mut Vec<Command>,
    ) -> Result<TowerKind, PlacementError> {
        let kind = self.selected.ok_or(PlacementError::NoTowerSelected)?;
        out.push(Command::PlaceTower {
            kind,
            position: click,
        });
        Ok(kind)
    }

    /// Describes what would happen if the hovered cell were clicked.
    ///
    /// The `check` closure should mirror the world's `query::placement_check`
    /// so the preview matches the eventual placement outcome.
    pub fn preview<F>(&self, cursor: Option<WorldPoint>, check: F) -> Option<PlacementPreview>
    where
        F: FnOnce(TowerKind, WorldPoint) -> Result<WorldPoint, PlacementError>,
    {
        let kind = self.selected?;
        let cursor = cursor?;
        let (cell, rejection) = match check(kind, cursor) {
            Ok(cell) => (cell, None),
            Err(reason) => (cursor.snapped_to_grid(), Some(reason)),
        };
        Some(PlacementPreview {
            kind,
            cell: WorldPointKey::from_point(cell),
            rejection,
        })
    }
}
