use crate::{
    foundation::core::Bounds,
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::PixelFormat,
    plane::buffer::PlaneBuf,
};

#[derive(Clone, Debug, PartialEq)]
struct SubTile {
    plane: PlaneBuf,
    cooked: bool,
}

/// One output tile: a rectangle of the image with a sub-tile per channel.
///
/// Sub-tiles already marked cooked (e.g. served from a cache) are skipped by the filter.
#[derive(Clone, Debug, PartialEq)]
pub struct TileList {
    bounds: Bounds,
    format: PixelFormat,
    black: f32,
    white: f32,
    tiles: Vec<SubTile>,
}

impl TileList {
    /// Allocate `channels` uncooked sub-tiles covering `bounds`.
    pub fn new(
        bounds: Bounds,
        format: PixelFormat,
        channels: usize,
        black: f32,
        white: f32,
    ) -> EdgeFxResult<Self> {
        if channels == 0 {
            return Err(EdgeFxError::validation("tile list needs at least one channel"));
        }
        format.check_black_white(black, white)?;
        let tiles = (0..channels)
            .map(|_| SubTile {
                plane: PlaneBuf::new(format, bounds.width(), bounds.height()),
                cooked: false,
            })
            .collect();
        Ok(Self {
            bounds,
            format,
            black,
            white,
            tiles,
        })
    }

    /// Tile list with black at 0 and white at the format default.
    pub fn full_range(bounds: Bounds, format: PixelFormat, channels: usize) -> EdgeFxResult<Self> {
        Self::new(bounds, format, channels, 0.0, format.default_white())
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn black(&self) -> f32 {
        self.black
    }

    pub fn white(&self) -> f32 {
        self.white
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn plane(&self, index: usize) -> Option<&PlaneBuf> {
        self.tiles.get(index).map(|t| &t.plane)
    }

    pub fn is_cooked(&self, index: usize) -> bool {
        self.tiles.get(index).is_some_and(|t| t.cooked)
    }

    pub fn mark_cooked(&mut self, index: usize) {
        if let Some(t) = self.tiles.get_mut(index) {
            t.cooked = true;
        }
    }

    pub fn uncooked_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.cooked).count()
    }

    /// Visit every uncooked sub-tile with its channel index, then mark it cooked.
    ///
    /// Stops at the first error; the failing sub-tile stays uncooked.
    pub(crate) fn cook_each<F>(&mut self, mut f: F) -> EdgeFxResult<usize>
    where
        F: FnMut(usize, &mut PlaneBuf) -> EdgeFxResult<()>,
    {
        let mut cooked = 0;
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            if tile.cooked {
                continue;
            }
            f(index, &mut tile.plane)?;
            tile.cooked = true;
            cooked += 1;
        }
        Ok(cooked)
    }

    /// Fill every sub-tile with the black point.
    pub fn clear_to_black(&mut self) {
        for t in &mut self.tiles {
            t.plane.clear_to_black(self.black);
        }
    }

    pub fn planes(&self) -> impl Iterator<Item = &PlaneBuf> {
        self.tiles.iter().map(|t| &t.plane)
    }

    pub fn into_planes(self) -> Vec<PlaneBuf> {
        self.tiles.into_iter().map(|t| t.plane).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plane/tile.rs"]
mod tests;
