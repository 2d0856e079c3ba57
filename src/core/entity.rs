//! Unit handles.
//!
//! Every unit on the board lives in the state's arena and is referred to
//! everywhere else (teams, placements, selection, actions) by a `UnitId`.
//!
//! ## Usage
//!
//! ```
//! use tactics_engine::core::UnitId;
//!
//! let first = UnitId::FIRST;
//! let second = first.next();
//!
//! assert_eq!(first.raw(), 0);
//! assert_eq!(second.raw(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Handle for a unit stored in the game state arena.
///
/// Handles are allocated monotonically and never reused within a match,
/// so a stale handle simply fails to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// The first handle handed out by a fresh arena.
    pub const FIRST: UnitId = UnitId(0);

    /// Get the handle following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_monotonic() {
        let a = UnitId::FIRST;
        let b = a.next();
        let c = b.next();

        assert!(a < b && b < c);
        assert_eq!(c.raw(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UnitId(7)), "Unit(7)");
    }

    #[test]
    fn test_serialization() {
        let id = UnitId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: UnitId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
