use crate::{
    cook::params::{EdgeSide, ParamSource},
    foundation::error::{EdgeFxError, EdgeFxResult},
    kernel::edge::{EdgeCoefficients, Kernel3x3},
};

/// What the host asks for when it starts a cook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CookRequest {
    /// Time the parameters are sampled at.
    pub time: f32,
    /// Frame-scope fade, `1.0` for full strength.
    pub fade: f32,
    /// Resolution being cooked.
    pub res: (u32, u32),
    /// Full image resolution. Proxy cooks have `res < full_res`.
    pub full_res: (u32, u32),
}

impl Default for CookRequest {
    fn default() -> Self {
        Self {
            time: 0.0,
            fade: 1.0,
            res: (1, 1),
            full_res: (1, 1),
        }
    }
}

impl CookRequest {
    pub fn at(time: f32) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn with_fade(mut self, fade: f32) -> Self {
        self.fade = fade;
        self
    }

    /// Cook at `res` out of a full resolution of `full_res`.
    pub fn with_resolution(mut self, res: (u32, u32), full_res: (u32, u32)) -> Self {
        self.res = res;
        self.full_res = full_res;
        self
    }

    /// Per-axis `res / full_res`.
    pub fn scale_factors(&self) -> EdgeFxResult<(f32, f32)> {
        let (w, h) = self.res;
        let (fw, fh) = self.full_res;
        if w == 0 || h == 0 || fw == 0 || fh == 0 {
            return Err(EdgeFxError::validation(format!(
                "cook resolution {w}x{h} of {fw}x{fh} must be non-zero"
            )));
        }
        Ok((w as f32 / fw as f32, h as f32 / fh as f32))
    }

    /// Fade times the smaller scale factor.
    pub fn effect_strength(&self) -> EdgeFxResult<f32> {
        if !self.fade.is_finite() {
            return Err(EdgeFxError::validation("fade must be finite"));
        }
        let (sx, sy) = self.scale_factors()?;
        Ok(self.fade * sx.min(sy))
    }
}

/// Immutable per-cook state shared by every tile of that cook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CookContext {
    time: f32,
    effect: f32,
    coefficients: EdgeCoefficients,
    kernel: Kernel3x3,
}

impl CookContext {
    /// Sample the four enhancement parameters at `req.time`, scale them by the effect
    /// strength and build the kernel.
    #[tracing::instrument(skip(params))]
    pub fn new(params: &dyn ParamSource, req: CookRequest) -> EdgeFxResult<Self> {
        let effect = req.effect_strength()?;
        let [left, right, top, bottom] = EdgeSide::ALL.map(|side| params.edge(side, req.time));
        let raw = EdgeCoefficients::new(left, right, top, bottom);
        if ![left, right, top, bottom].iter().all(|v| v.is_finite()) {
            return Err(EdgeFxError::validation(format!(
                "enhancement parameters must be finite, got {raw:?}"
            )));
        }

        let coefficients = raw.scaled(effect);
        let kernel = Kernel3x3::edge_enhance(coefficients);
        tracing::debug!(
            effect,
            ?coefficients,
            weights = ?kernel.weights(),
            "built edge enhance kernel"
        );
        Ok(Self {
            time: req.time,
            effect,
            coefficients,
            kernel,
        })
    }

    /// Context for already-scaled coefficients (effect strength `1`).
    pub fn from_coefficients(time: f32, coefficients: EdgeCoefficients) -> Self {
        Self {
            time,
            effect: 1.0,
            coefficients,
            kernel: Kernel3x3::edge_enhance(coefficients),
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn effect(&self) -> f32 {
        self.effect
    }

    pub fn coefficients(&self) -> EdgeCoefficients {
        self.coefficients
    }

    pub fn kernel(&self) -> &Kernel3x3 {
        &self.kernel
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cook/context.rs"]
mod tests;
