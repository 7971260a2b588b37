use std::marker::PhantomData;

use crate::{
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::Channel,
};

/// Float <-> native conversion strategy for channel type `C`.
///
/// Integer channels map `[black, white]` onto `[0, 1]`. The accurate path (`FAST = false`)
/// rounds and clamps results into `[black, white]`; the fast path skips the clamp and only
/// saturates at the native type range. Float channels pass values through untouched in both
/// modes.
#[derive(Clone, Copy, Debug)]
pub struct Converter<C: Channel, const FAST: bool> {
    black: f32,
    white: f32,
    range: f32,
    inv_range: f32,
    _channel: PhantomData<C>,
}

impl<C: Channel, const FAST: bool> Converter<C, FAST> {
    /// Build a converter with explicit black and white points.
    ///
    /// Float channels accept any finite pair and ignore it.
    pub fn new(black: f32, white: f32) -> EdgeFxResult<Self> {
        if !black.is_finite() || !white.is_finite() {
            return Err(EdgeFxError::validation(
                "black/white points must be finite",
            ));
        }
        if !C::IS_FLOAT {
            if black >= white {
                return Err(EdgeFxError::validation(format!(
                    "black point {black} must be below white point {white}"
                )));
            }
            if black < 0.0 || white > C::MAX {
                return Err(EdgeFxError::validation(format!(
                    "black/white points must lie within [0, {}] for {}",
                    C::MAX,
                    C::FORMAT
                )));
            }
        }
        let range = white - black;
        Ok(Self {
            black,
            white,
            range,
            inv_range: if range == 0.0 { 1.0 } else { 1.0 / range },
            _channel: PhantomData,
        })
    }

    /// Converter spanning the full native range (`0..=MAX`).
    pub fn full_range() -> Self {
        let range = C::MAX;
        Self {
            black: 0.0,
            white: C::MAX,
            range,
            inv_range: 1.0 / range,
            _channel: PhantomData,
        }
    }

    pub fn black(&self) -> f32 {
        self.black
    }

    pub fn white(&self) -> f32 {
        self.white
    }

    #[inline]
    pub fn to_float(&self, v: C) -> f32 {
        if C::IS_FLOAT {
            v.to_f32()
        } else {
            (v.to_f32() - self.black) * self.inv_range
        }
    }

    #[inline]
    pub fn from_float(&self, v: f32) -> C {
        if C::IS_FLOAT {
            return C::from_f32_round(v);
        }
        let native = v * self.range + self.black;
        if FAST {
            C::from_f32_trunc(native + 0.5)
        } else {
            // NaN survives `clamp`; the saturating cast then maps it to 0.
            C::from_f32_round(native.clamp(self.black, self.white))
        }
    }

    /// Native value of 0.0, used to fill tiles whose input is unavailable.
    pub fn neutral(&self) -> C {
        self.from_float(0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/convert.rs"]
mod tests;
