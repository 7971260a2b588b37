use crate::{
    foundation::core::Bounds,
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::Channel,
    plane::buffer::{Plane, PlaneBuf, black_value},
};

/// How reads outside the source canvas are satisfied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Replicate the nearest in-canvas edge pixel (streak edges).
    #[default]
    Hold,
    /// Read the black point.
    Black,
}

/// A padded input area: one plane per channel, all covering `bounds`.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    bounds: Bounds,
    planes: Vec<PlaneBuf>,
}

impl Region {
    pub fn new(bounds: Bounds, planes: Vec<PlaneBuf>) -> EdgeFxResult<Self> {
        for (i, p) in planes.iter().enumerate() {
            if p.width() != bounds.width() || p.height() != bounds.height() {
                return Err(EdgeFxError::validation(format!(
                    "region plane {i} is {}x{}, bounds are {}x{}",
                    p.width(),
                    p.height(),
                    bounds.width(),
                    bounds.height()
                )));
            }
        }
        Ok(Self { bounds, planes })
    }

    pub(crate) fn from_extracted(bounds: Bounds, planes: Vec<PlaneBuf>) -> Self {
        debug_assert!(
            planes
                .iter()
                .all(|p| p.width() == bounds.width() && p.height() == bounds.height())
        );
        Self { bounds, planes }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn plane(&self, index: usize) -> Option<&PlaneBuf> {
        self.planes.get(index)
    }

    pub fn planes(&self) -> &[PlaneBuf] {
        &self.planes
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }
}

/// Copy `area` out of `src` (which covers `src_bounds`), resolving out-of-canvas reads
/// with `boundary`. `outside` is the value used by [`Boundary::Black`].
pub(crate) fn extract_plane<C: Channel>(
    src: &Plane<C>,
    src_bounds: Bounds,
    area: Bounds,
    boundary: Boundary,
    outside: C,
) -> Plane<C> {
    Plane::from_fn(area.width(), area.height(), |x, y| {
        let gx = area.x1 + x as i32;
        let gy = area.y1 + y as i32;
        match boundary {
            Boundary::Hold => {
                let cx = gx.clamp(src_bounds.x1, src_bounds.x2);
                let cy = gy.clamp(src_bounds.y1, src_bounds.y2);
                src.get((cx - src_bounds.x1) as usize, (cy - src_bounds.y1) as usize)
            }
            Boundary::Black => {
                if src_bounds.contains(gx, gy) {
                    src.get((gx - src_bounds.x1) as usize, (gy - src_bounds.y1) as usize)
                } else {
                    outside
                }
            }
        }
    })
}

impl PlaneBuf {
    /// Extract `area` from this plane, which covers `src_bounds`.
    pub fn extract(&self, src_bounds: Bounds, area: Bounds, boundary: Boundary, black: f32) -> Self {
        match self {
            Self::U8(p) => {
                let outside = black_value(black);
                Self::U8(extract_plane(p, src_bounds, area, boundary, outside))
            }
            Self::U16(p) => {
                let outside = black_value(black);
                Self::U16(extract_plane(p, src_bounds, area, boundary, outside))
            }
            Self::F16(p) => {
                let outside = black_value(black);
                Self::F16(extract_plane(p, src_bounds, area, boundary, outside))
            }
            Self::F32(p) => {
                let outside = black_value(black);
                Self::F32(extract_plane(p, src_bounds, area, boundary, outside))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plane/region.rs"]
mod tests;
