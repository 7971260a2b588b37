//! edgefx is a tiled 3x3 edge enhance filter over multi-format pixel planes.
//!
//! A cook runs in three steps:
//!
//! - Declare the one pixel halo with [`image_bounds`] and [`needed_input_areas`]
//! - Build a [`CookContext`] from the enhancement parameters and the cook resolution
//! - Cook output tiles with [`EdgeEnhance`], either one [`TileList`] at a time or a whole
//!   area through [`EdgeEnhance::cook_image`]
//!
//! Channels are stored natively as `u8`, `u16`, `f16` or `f32`; the sweep widens to `f32`,
//! convolves and narrows back with either an accurate or a fast conversion.
#![forbid(unsafe_code)]

mod config;
mod cook;
mod filter;
mod foundation;
mod kernel;
mod pixel;
mod plane;

pub use crate::foundation::core::{Bounds, Halo};
pub use crate::foundation::error::{EdgeFxError, EdgeFxResult};

pub use crate::pixel::channel::{Channel, PixelFormat};
pub use crate::pixel::convert::Converter;

pub use crate::plane::buffer::{Plane, PlaneBuf};
pub use crate::plane::image::Image;
pub use crate::plane::region::{Boundary, Region};
pub use crate::plane::tile::TileList;

pub use crate::kernel::edge::{EdgeCoefficients, Kernel3x3};

pub use crate::filter::dispatch::{FilterOp, filter_buf, filter_tiles};
pub use crate::filter::sweep::{filter_plane, halo_matches};

pub use crate::cook::area::{
    KERNEL_HALO, NeededArea, image_bounds, input_request_bounds, needed_input_areas,
};
pub use crate::cook::context::{CookContext, CookRequest};
pub use crate::cook::engine::{
    CookOpts, CookStats, EdgeEnhance, OutputSpec, TileSize, TileThreading, tile_grid,
};
pub use crate::cook::params::{EdgeParams, EdgeSide, Keyframe, ParamSource, ParamTrack};
pub use crate::cook::provider::{RegionProvider, RegionRequest};

pub use crate::config::FilterConfig;
