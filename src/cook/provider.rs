use crate::{
    foundation::core::Bounds,
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::PixelFormat,
    plane::image::Image,
    plane::region::{Boundary, Region},
};

/// A request for a padded input area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionRequest {
    pub bounds: Bounds,
    pub time: f32,
    pub boundary: Boundary,
    pub format: PixelFormat,
    /// Number of channel planes wanted, starting at channel 0.
    pub planes: usize,
}

/// Upstream input of the filter.
///
/// Called concurrently from tile workers, hence `Sync`. A provider that cannot produce the
/// area returns an error (usually [`EdgeFxError::Upstream`]); the engine then blacks out the
/// tile and forwards the error.
pub trait RegionProvider: Sync {
    fn input_region(&self, req: &RegionRequest) -> EdgeFxResult<Region>;

    /// Hand a region back once its tile is cooked.
    fn release_region(&self, region: Region) {
        drop(region);
    }
}

impl<P: RegionProvider + ?Sized> RegionProvider for &P {
    fn input_region(&self, req: &RegionRequest) -> EdgeFxResult<Region> {
        (**self).input_region(req)
    }

    fn release_region(&self, region: Region) {
        (**self).release_region(region)
    }
}

impl RegionProvider for Image {
    fn input_region(&self, req: &RegionRequest) -> EdgeFxResult<Region> {
        if req.format != self.format() {
            return Err(EdgeFxError::upstream(format!(
                "input is {}, {} was requested",
                self.format(),
                req.format
            )));
        }
        if req.planes > self.channels() {
            return Err(EdgeFxError::upstream(format!(
                "input has {} channels, {} were requested",
                self.channels(),
                req.planes
            )));
        }
        Ok(self.region_channels(req.bounds, req.boundary, req.planes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cook/provider.rs"]
mod tests;
