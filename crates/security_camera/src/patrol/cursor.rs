//! `PatrolCursor`: stateful traversal over a `PatrolRoute`.

use serde::{Deserialize, Serialize};

use super::route::PatrolRoute;

/// How the cursor behaves at the ends of the route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatrolMode {
    /// 0, 1, .., N-1, 0, 1, ..
    Loop,
    /// 0, 1, .., N-1, N-2, .., 0, 1, ..
    #[default]
    Bounce,
}

/// Current position and heading along a patrol route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatrolCursor {
    index: usize,
    /// Always +1 or -1.
    direction: i32,
    mode: PatrolMode,
    len: usize,
}

impl PatrolCursor {
    /// Cursor parked on the first waypoint, heading forward.
    pub fn new(route: &PatrolRoute, mode: PatrolMode) -> Self {
        Self {
            index: 0,
            direction: 1,
            mode,
            len: route.len(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn mode(&self) -> PatrolMode {
        self.mode
    }

    /// Step to the next waypoint and return its index.
    ///
    /// Bounce mode flips direction when the next step would leave the route,
    /// so endpoints are visited once per pass. A one-waypoint route never
    /// moves.
    pub fn advance(&mut self) -> usize {
        if self.len <= 1 {
            self.index = 0;
            return self.index;
        }

        debug_assert!(
            self.direction == 1 || self.direction == -1,
            "patrol direction must be +1 or -1, got {}",
            self.direction
        );

        let len = self.len as i64;
        let index = self.index as i64;
        let next = match self.mode {
            PatrolMode::Loop => (index + self.direction as i64).rem_euclid(len),
            PatrolMode::Bounce => {
                if index + self.direction as i64 == len {
                    self.direction = -1;
                } else if index + self.direction as i64 == -1 {
                    self.direction = 1;
                }
                index + self.direction as i64
            }
        };

        self.index = next as usize;
        self.index
    }
}
