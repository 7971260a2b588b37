use crate::foundation::error::{EdgeFxError, EdgeFxResult};

/// Inclusive integer pixel rectangle, `x1..=x2` by `y1..=y2`.
///
/// Coordinates may be negative: halo requests routinely reach outside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Left column (inclusive).
    pub x1: i32,
    /// Bottom row (inclusive).
    pub y1: i32,
    /// Right column (inclusive).
    pub x2: i32,
    /// Top row (inclusive).
    pub y2: i32,
}

impl Bounds {
    /// Build bounds from inclusive corners. `x2 < x1` or `y2 < y1` is rejected.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> EdgeFxResult<Self> {
        if x2 < x1 || y2 < y1 {
            return Err(EdgeFxError::validation(format!(
                "bounds ({x1},{y1})-({x2},{y2}) are inverted"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Bounds of a `width` x `height` canvas anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> EdgeFxResult<Self> {
        if width == 0 || height == 0 {
            return Err(EdgeFxError::validation("canvas size must be non-zero"));
        }
        let w = i32::try_from(width)
            .map_err(|_| EdgeFxError::validation("canvas width exceeds i32"))?;
        let h = i32::try_from(height)
            .map_err(|_| EdgeFxError::validation("canvas height exceeds i32"))?;
        Ok(Self {
            x1: 0,
            y1: 0,
            x2: w - 1,
            y2: h - 1,
        })
    }

    pub fn width(self) -> usize {
        (self.x2 - self.x1 + 1) as usize
    }

    pub fn height(self) -> usize {
        (self.y2 - self.y1 + 1) as usize
    }

    pub fn area(self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    /// Grow the rectangle by `halo` pixels on each side.
    pub fn expand(self, halo: Halo) -> Self {
        Self {
            x1: self.x1 - halo.left,
            y1: self.y1 - halo.bottom,
            x2: self.x2 + halo.right,
            y2: self.y2 + halo.top,
        }
    }

    /// Overlap of two rectangles, `None` when they are disjoint.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);
        if x1 > x2 || y1 > y2 {
            None
        } else {
            Some(Self { x1, y1, x2, y2 })
        }
    }
}

/// Per-side pixel enlargement of an area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Halo {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

impl Halo {
    /// The same enlargement on all four sides.
    pub const fn uniform(px: i32) -> Self {
        Self {
            left: px,
            right: px,
            bottom: px,
            top: px,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
