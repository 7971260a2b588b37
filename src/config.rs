use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    cook::context::CookRequest,
    cook::engine::{CookOpts, OutputSpec, TileSize, TileThreading},
    cook::params::EdgeParams,
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::PixelFormat,
    plane::region::Boundary,
};

/// JSON-facing settings for one edge enhance run.
///
/// Every field is optional; see [`FilterConfig::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub params: EdgeParams,
    pub fade: f32,
    /// Resolution being cooked, `[width, height]`. `None` means full resolution.
    pub res: Option<[u32; 2]>,
    /// Full image resolution the cook is a proxy of. `None` means the same as `res`.
    pub full_res: Option<[u32; 2]>,
    pub format: PixelFormat,
    pub fast: bool,
    /// Black point for integer formats. `None` means `0`.
    pub black: Option<f32>,
    /// White point for integer formats. `None` means the format maximum.
    pub white: Option<f32>,
    pub boundary: Boundary,
    pub tile: TileSize,
    pub threading: TileThreading,
    pub bypass: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            params: EdgeParams::default(),
            fade: 1.0,
            res: None,
            full_res: None,
            format: PixelFormat::U8,
            fast: false,
            black: None,
            white: None,
            boundary: Boundary::Hold,
            tile: TileSize::default(),
            threading: TileThreading::default(),
            bypass: false,
        }
    }
}

impl FilterConfig {
    /// Parse a config from a JSON reader. The result is not validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> EdgeFxResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| EdgeFxError::serde(format!("parse filter config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> EdgeFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open filter config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> EdgeFxResult<()> {
        self.params.validate()?;
        if !self.fade.is_finite() {
            return Err(EdgeFxError::validation("fade must be finite"));
        }
        if self.tile.width == 0 || self.tile.height == 0 {
            return Err(EdgeFxError::validation(format!(
                "tile size {}x{} must be non-zero",
                self.tile.width, self.tile.height
            )));
        }
        if self.threading.threads == Some(0) {
            return Err(EdgeFxError::validation(
                "threading 'threads' must be >= 1 when set",
            ));
        }

        let (black, white) = self.black_white();
        self.format.check_black_white(black, white)?;
        self.cook_request(0.0).scale_factors()?;
        Ok(())
    }

    /// Resolved black and white points.
    pub fn black_white(&self) -> (f32, f32) {
        (
            self.black.unwrap_or(0.0),
            self.white.unwrap_or_else(|| self.format.default_white()),
        )
    }

    pub fn cook_opts(&self) -> CookOpts {
        CookOpts {
            tile: self.tile,
            threading: self.threading.clone(),
        }
    }

    pub fn output_spec(&self, channels: usize) -> OutputSpec {
        let (black, white) = self.black_white();
        OutputSpec::new(self.format, channels).with_black_white(black, white)
    }

    pub fn cook_request(&self, time: f32) -> CookRequest {
        let req = CookRequest::at(time).with_fade(self.fade);
        match (self.res, self.full_res) {
            (None, None) => req,
            (res, full_res) => {
                let [fw, fh] = full_res.or(res).unwrap_or([1, 1]);
                let [w, h] = res.unwrap_or([fw, fh]);
                req.with_resolution((w, h), (fw, fh))
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
