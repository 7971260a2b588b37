use rayon::prelude::*;

use crate::{
    cook::area::{NeededArea, input_request_bounds, needed_input_areas},
    cook::context::CookContext,
    cook::provider::{RegionProvider, RegionRequest},
    filter::dispatch::filter_tiles,
    foundation::core::Bounds,
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::PixelFormat,
    plane::image::Image,
    plane::region::{Boundary, Region},
    plane::tile::TileList,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

impl Default for TileThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Options for [`EdgeEnhance::cook_image`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CookOpts {
    pub tile: TileSize,
    pub threading: TileThreading,
}

/// Layout of the tiles allocated by [`EdgeEnhance::cook_image`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputSpec {
    pub format: PixelFormat,
    pub channels: usize,
    pub black: f32,
    pub white: f32,
}

impl OutputSpec {
    /// Full-range output with `channels` planes.
    pub fn new(format: PixelFormat, channels: usize) -> Self {
        Self {
            format,
            channels,
            black: 0.0,
            white: format.default_white(),
        }
    }

    /// Same format, channel count and black/white points as `image`.
    pub fn like(image: &Image) -> Self {
        Self {
            format: image.format(),
            channels: image.channels(),
            black: image.black(),
            white: image.white(),
        }
    }

    pub fn with_black_white(mut self, black: f32, white: f32) -> Self {
        self.black = black;
        self.white = white;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CookStats {
    pub tiles_total: u64,
    pub tiles_cooked: u64,
    pub tiles_failed: u64,
    pub sub_tiles_cooked: u64,
}

/// Split `area` into row-major tiles of at most `tile` pixels. Edge tiles are clipped.
pub fn tile_grid(area: Bounds, tile: TileSize) -> EdgeFxResult<Vec<Bounds>> {
    if tile.width == 0 || tile.height == 0 {
        return Err(EdgeFxError::validation(format!(
            "tile size {}x{} must be non-zero",
            tile.width, tile.height
        )));
    }
    let (tw, th) = (i64::from(tile.width), i64::from(tile.height));
    let cols = (area.width() as i64 + tw - 1) / tw;
    let rows = (area.height() as i64 + th - 1) / th;

    let mut out = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        let y1 = i64::from(area.y1) + row * th;
        let y2 = (y1 + th - 1).min(i64::from(area.y2));
        for col in 0..cols {
            let x1 = i64::from(area.x1) + col * tw;
            let x2 = (x1 + tw - 1).min(i64::from(area.x2));
            // Every corner lies inside `area`, so the narrowing is lossless.
            out.push(Bounds {
                x1: x1 as i32,
                y1: y1 as i32,
                x2: x2 as i32,
                y2: y2 as i32,
            });
        }
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> EdgeFxResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(EdgeFxError::validation(
            "tile threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        EdgeFxError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

/// The edge enhance filter node: an input plus the settings that do not vary per cook.
///
/// Kernel and coefficients live in the [`CookContext`]; one node can cook any number of
/// contexts, and one context is shared by every tile of a cook.
#[derive(Clone, Debug)]
pub struct EdgeEnhance<P> {
    input: P,
    fast: bool,
    bypass: bool,
    boundary: Boundary,
}

impl<P: RegionProvider> EdgeEnhance<P> {
    pub fn new(input: P) -> Self {
        Self {
            input,
            fast: false,
            bypass: false,
            boundary: Boundary::Hold,
        }
    }

    /// Use the approximate narrowing conversion for integer formats.
    pub fn with_fast(mut self, fast: bool) -> Self {
        self.fast = fast;
        self
    }

    /// Copy the input through instead of filtering.
    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }

    /// Policy for halo pixels outside the input canvas. Defaults to [`Boundary::Hold`].
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn input(&self) -> &P {
        &self.input
    }

    pub fn is_fast(&self) -> bool {
        self.fast
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Input areas this node reads to cook `output_area`.
    pub fn needed_input_areas(&self, output_area: Bounds, input_ok: bool) -> Vec<NeededArea> {
        needed_input_areas(output_area, input_ok, self.bypass)
    }

    /// Cook every uncooked sub-tile of one output tile.
    ///
    /// Requests the tile bounds grown by one pixel, filters each channel against it and
    /// releases the region. When the input cannot supply the region the whole tile is
    /// cleared to black and the input's error is returned. Returns the number of sub-tiles
    /// written.
    #[tracing::instrument(skip(self, ctx, tiles), fields(bounds = ?tiles.bounds()))]
    pub fn cook_tile(&self, ctx: &CookContext, tiles: &mut TileList) -> EdgeFxResult<usize> {
        let tile_bounds = tiles.bounds();
        let req = RegionRequest {
            bounds: if self.bypass {
                tile_bounds
            } else {
                input_request_bounds(tile_bounds)
            },
            time: ctx.time(),
            boundary: self.boundary,
            format: tiles.format(),
            planes: tiles.len(),
        };

        let region = match self.input.input_region(&req) {
            Ok(region) => region,
            Err(err) => {
                tracing::warn!(error = %err, "input region unavailable, clearing tile to black");
                tiles.clear_to_black();
                return Err(err);
            }
        };

        tracing::debug!(uncooked = tiles.uncooked_count(), "cooking tile");
        let cooked = if self.bypass {
            copy_through(tiles, &region)
        } else {
            filter_tiles(tiles, &region, ctx.kernel(), self.fast)
        };
        self.input.release_region(region);
        cooked
    }

    /// Cook a batch of tiles, in parallel unless `threading.parallel` is off.
    ///
    /// Every tile is attempted even when some fail. The first error in tile order is
    /// returned.
    pub fn cook_tiles(
        &self,
        ctx: &CookContext,
        tiles: &mut [TileList],
        threading: &TileThreading,
    ) -> EdgeFxResult<CookStats> {
        let results: Vec<EdgeFxResult<usize>> = if threading.parallel {
            let pool = build_thread_pool(threading.threads)?;
            pool.install(|| {
                tiles
                    .par_iter_mut()
                    .map(|t| self.cook_tile(ctx, t))
                    .collect()
            })
        } else {
            tiles.iter_mut().map(|t| self.cook_tile(ctx, t)).collect()
        };

        let mut stats = CookStats::default();
        let mut first_err = None;
        for result in results {
            stats.tiles_total += 1;
            match result {
                Ok(n) => {
                    stats.tiles_cooked += 1;
                    stats.sub_tiles_cooked += n as u64;
                }
                Err(err) => {
                    stats.tiles_failed += 1;
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }

        match first_err {
            Some(err) => {
                tracing::warn!(
                    failed = stats.tiles_failed,
                    total = stats.tiles_total,
                    "tiles failed"
                );
                Err(err)
            }
            None => Ok(stats),
        }
    }

    /// Cook `area` tile by tile and assemble the result.
    #[tracing::instrument(skip(self, ctx, out, opts))]
    pub fn cook_image(
        &self,
        ctx: &CookContext,
        area: Bounds,
        out: &OutputSpec,
        opts: &CookOpts,
    ) -> EdgeFxResult<(Image, CookStats)> {
        let mut tiles = tile_grid(area, opts.tile)?
            .into_iter()
            .map(|b| TileList::new(b, out.format, out.channels, out.black, out.white))
            .collect::<EdgeFxResult<Vec<_>>>()?;
        tracing::debug!(tiles = tiles.len(), "dispatching tiles");

        let stats = self.cook_tiles(ctx, &mut tiles, &opts.threading)?;

        let mut image =
            Image::new(area, out.format, out.channels).with_black_white(out.black, out.white)?;
        for tile in tiles {
            let bounds = tile.bounds();
            image.blit(bounds, &tile.into_planes());
        }
        Ok((image, stats))
    }
}

fn copy_through(tiles: &mut TileList, region: &Region) -> EdgeFxResult<usize> {
    let tile_bounds = tiles.bounds();
    tiles.cook_each(|index, out| {
        let src = region.plane(index).unwrap_or_else(|| {
            panic!(
                "region has {} planes, tile channel {index} has no input",
                region.len()
            )
        });
        out.blit_from(tile_bounds, src, region.bounds());
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/cook/engine.rs"]
mod tests;
