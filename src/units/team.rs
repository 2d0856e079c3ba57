//! Teams - the units fighting for one side.
//!
//! A team holds handles into the state's unit arena, in recruitment order.
//! Teams are disjoint, and a team running empty ends the level (computer)
//! or the game (human).

use serde::{Deserialize, Serialize};

use super::kind::UnitKind;
use crate::core::{Side, UnitId};

/// The members of one side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    side: Side,
    capacity: usize,
    members: Vec<UnitId>,
}

impl Team {
    /// Create an empty team.
    #[must_use]
    pub fn new(side: Side, capacity: usize) -> Self {
        Self {
            side,
            capacity,
            members: Vec::with_capacity(capacity),
        }
    }

    /// Side this team fights for.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Kinds this team may recruit.
    #[must_use]
    pub fn allowed_kinds(&self) -> &'static [UnitKind] {
        UnitKind::for_side(self.side)
    }

    /// Maximum team size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Members in recruitment order.
    #[must_use]
    pub fn members(&self) -> &[UnitId] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether the team has no members left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Free slots left before the team is full.
    #[must_use]
    pub fn vacancies(&self) -> usize {
        self.capacity.saturating_sub(self.members.len())
    }

    /// Check whether a unit belongs to this team.
    #[must_use]
    pub fn contains(&self, unit: UnitId) -> bool {
        self.members.contains(&unit)
    }

    /// Add a member.
    ///
    /// Returns false (and adds nothing) if the team is full or the unit is
    /// already a member.
    pub fn add(&mut self, unit: UnitId) -> bool {
        if self.vacancies() == 0 || self.contains(unit) {
            return false;
        }
        self.members.push(unit);
        true
    }

    /// Remove a member, preserving the order of the rest.
    ///
    /// Returns true if the unit was found and removed.
    pub fn remove(&mut self, unit: UnitId) -> bool {
        if let Some(pos) = self.members.iter().position(|&m| m == unit) {
            self.members.remove(pos);
            true
        } else {
            false
        }
    }
}
