//! Pointer events delivered by the host surface.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Pointer input relevant to hover interactions.
///
/// `target` identifies a drawn element by its index in the painter's
/// element list (for the treemap, the tile index).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Pointer moved; the host did not resolve a target.
    Move {
        /// Pointer position
        position: Point,
    },
    /// Pointer entered an element.
    Enter {
        /// Element index
        target: usize,
        /// Pointer position
        position: Point,
    },
    /// Pointer left an element.
    Leave {
        /// Element index
        target: usize,
    },
}

impl PointerEvent {
    /// Pointer position, if the event carries one.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Move { position } | Self::Enter { position, .. } => Some(*position),
            Self::Leave { .. } => None,
        }
    }

    /// Targeted element, if any.
    #[must_use]
    pub const fn target(&self) -> Option<usize> {
        match self {
            Self::Enter { target, .. } | Self::Leave { target } => Some(*target),
            Self::Move { .. } => None,
        }
    }
}
