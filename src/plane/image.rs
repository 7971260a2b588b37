use crate::{
    foundation::core::Bounds,
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::PixelFormat,
    plane::buffer::PlaneBuf,
    plane::region::{Boundary, Region},
};

/// Multi-channel image covering a canvas, one [`PlaneBuf`] per channel.
///
/// Serves both as an in-memory upstream input (see [`crate::RegionProvider`]) and as the
/// assembly target for cooked tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    bounds: Bounds,
    format: PixelFormat,
    black: f32,
    white: f32,
    planes: Vec<PlaneBuf>,
}

impl Image {
    /// Black image with `channels` planes and full-range black/white points.
    pub fn new(bounds: Bounds, format: PixelFormat, channels: usize) -> Self {
        let planes = (0..channels)
            .map(|_| PlaneBuf::new(format, bounds.width(), bounds.height()))
            .collect();
        Self {
            bounds,
            format,
            black: 0.0,
            white: format.default_white(),
            planes,
        }
    }

    /// Wrap existing planes. All planes must share one format and cover `bounds`.
    pub fn from_planes(bounds: Bounds, planes: Vec<PlaneBuf>) -> EdgeFxResult<Self> {
        let format = planes
            .first()
            .map(PlaneBuf::format)
            .ok_or_else(|| EdgeFxError::validation("image needs at least one plane"))?;
        for (i, p) in planes.iter().enumerate() {
            if p.format() != format {
                return Err(EdgeFxError::validation(format!(
                    "image plane {i} is {}, expected {format}",
                    p.format()
                )));
            }
            if p.width() != bounds.width() || p.height() != bounds.height() {
                return Err(EdgeFxError::validation(format!(
                    "image plane {i} is {}x{}, bounds are {}x{}",
                    p.width(),
                    p.height(),
                    bounds.width(),
                    bounds.height()
                )));
            }
        }
        Ok(Self {
            bounds,
            format,
            black: 0.0,
            white: format.default_white(),
            planes,
        })
    }

    /// Override the black/white points used for integer formats.
    pub fn with_black_white(mut self, black: f32, white: f32) -> EdgeFxResult<Self> {
        self.format.check_black_white(black, white)?;
        if black >= white {
            return Err(EdgeFxError::validation(format!(
                "black point {black} must be below white point {white}"
            )));
        }
        self.black = black;
        self.white = white;
        Ok(self)
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

    pub fn channels(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, index: usize) -> Option<&PlaneBuf> {
        self.planes.get(index)
    }

    pub fn planes(&self) -> &[PlaneBuf] {
        &self.planes
    }

    /// Copy `area` of every channel, resolving reads outside the canvas with `boundary`.
    pub fn region(&self, area: Bounds, boundary: Boundary) -> Region {
        self.region_channels(area, boundary, self.planes.len())
    }

    /// Like [`Image::region`], limited to the first `channels` planes.
    pub fn region_channels(&self, area: Bounds, boundary: Boundary, channels: usize) -> Region {
        let planes = self
            .planes
            .iter()
            .take(channels)
            .map(|p| p.extract(self.bounds, area, boundary, self.black))
            .collect();
        Region::from_extracted(area, planes)
    }

    /// Write `planes` (covering `bounds`) into the matching channels of this image.
    pub fn blit(&mut self, bounds: Bounds, planes: &[PlaneBuf]) {
        assert!(
            planes.len() <= self.planes.len(),
            "blit of {} planes into a {}-channel image",
            planes.len(),
            self.planes.len()
        );
        for (dst, src) in self.planes.iter_mut().zip(planes) {
            dst.blit_from(self.bounds, src, bounds);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plane/image.rs"]
mod tests;
