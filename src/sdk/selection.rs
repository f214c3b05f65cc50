use super::region::{BoundingBox, Coordinate};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One of the two pins the user can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Origin,
    Destination,
}

impl Slot {
    pub fn label(&self) -> &'static str {
        match self {
            Slot::Origin => "Origin",
            Slot::Destination => "Destination",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the next accepted click goes when both pins may already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    Editing(Slot),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Selected location must be within {region}.")]
    OutOfRegion { region: String },
}

/// What an accepted click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// An empty slot received its first pin.
    Placed(Slot),
    /// A pin under edit was moved; editing is back to idle.
    Moved(Slot),
    /// Both pins are placed and nothing is being edited.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    origin: Option<Coordinate>,
    destination: Option<Coordinate>,
    editing: EditMode,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn editing(&self) -> EditMode {
        self.editing
    }

    pub fn get(&self, slot: Slot) -> Option<Coordinate> {
        match slot {
            Slot::Origin => self.origin,
            Slot::Destination => self.destination,
        }
    }

    /// Both pins, once both are placed.
    pub fn pair(&self) -> Option<(Coordinate, Coordinate)> {
        self.origin.zip(self.destination)
    }

    /// Applies a map click. Out-of-region clicks leave every field untouched.
    pub fn handle_click(
        &mut self,
        region: &BoundingBox,
        lat: f64,
        lng: f64,
    ) -> Result<ClickOutcome, SelectionError> {
        if !region.contains(lat, lng) {
            return Err(SelectionError::OutOfRegion {
                region: region.name.clone(),
            });
        }

        let clicked = Coordinate::new(lat, lng);
        let outcome = match self.editing {
            EditMode::Editing(slot) => {
                self.set(slot, clicked);
                self.editing = EditMode::Idle;
                ClickOutcome::Moved(slot)
            }
            EditMode::Idle if self.origin.is_none() => {
                self.origin = Some(clicked);
                ClickOutcome::Placed(Slot::Origin)
            }
            EditMode::Idle if self.destination.is_none() => {
                self.destination = Some(clicked);
                ClickOutcome::Placed(Slot::Destination)
            }
            EditMode::Idle => ClickOutcome::Ignored,
        };
        Ok(outcome)
    }

    /// Redirects the next accepted click to `slot`. Only placed pins can be
    /// activated; returns whether edit mode changed.
    pub fn activate_edit(&mut self, slot: Slot) -> bool {
        if self.get(slot).is_none() {
            log::debug!("Ignoring edit activation for unplaced {} pin", slot);
            return false;
        }
        self.editing = EditMode::Editing(slot);
        true
    }

    fn set(&mut self, slot: Slot, coord: Coordinate) {
        match slot {
            Slot::Origin => self.origin = Some(coord),
            Slot::Destination => self.destination = Some(coord),
        }
    }
}
