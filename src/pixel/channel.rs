use std::fmt;
use std::str::FromStr;

use half::f16;

use crate::foundation::error::{EdgeFxError, EdgeFxResult};

/// Native storage representation of one image channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// IEEE half precision float.
    F16,
    /// IEEE single precision float.
    F32,
}

impl PixelFormat {
    pub fn bytes_per_channel(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 | Self::F16 => 2,
            Self::F32 => 4,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Native value mapped to 1.0 when no explicit white point is given.
    pub fn default_white(self) -> f32 {
        match self {
            Self::U8 => <u8 as Channel>::MAX,
            Self::U16 => <u16 as Channel>::MAX,
            Self::F16 => <f16 as Channel>::MAX,
            Self::F32 => <f32 as Channel>::MAX,
        }
    }

    /// Check black/white points against this format.
    ///
    /// Both must be finite. Integer formats also need `0 <= black < white <= default_white`.
    pub fn check_black_white(self, black: f32, white: f32) -> EdgeFxResult<()> {
        if !black.is_finite() || !white.is_finite() {
            return Err(EdgeFxError::validation("black/white points must be finite"));
        }
        if self.is_float() {
            return Ok(());
        }
        let max = self.default_white();
        if black < 0.0 || white > max || black >= white {
            return Err(EdgeFxError::validation(format!(
                "black/white points {black}/{white} must satisfy 0 <= black < white <= {max} for {self}"
            )));
        }
        Ok(())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::F16 => "f16",
            Self::F32 => "f32",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelFormat {
    type Err = EdgeFxError;

    fn from_str(s: &str) -> EdgeFxResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u8" | "8" | "byte" => Ok(Self::U8),
            "u16" | "16" | "short" => Ok(Self::U16),
            "f16" | "half" => Ok(Self::F16),
            "f32" | "float" => Ok(Self::F32),
            other => Err(EdgeFxError::validation(format!(
                "unknown pixel format '{other}'"
            ))),
        }
    }
}

/// Capability contract for a native channel type.
///
/// The conversion strategy in [`crate::Converter`] is written once against this trait; the
/// implementations only describe how a value widens to `f32` and narrows back.
pub trait Channel: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag of this representation.
    const FORMAT: PixelFormat;
    /// Float channels are full-range: no black/white mapping, no clamping.
    const IS_FLOAT: bool;
    /// Default white point.
    const MAX: f32;

    /// Widen to `f32` without any black/white mapping.
    fn to_f32(self) -> f32;

    /// Narrow with round-to-nearest, saturating at the native range.
    fn from_f32_round(v: f32) -> Self;

    /// Narrow by truncation, saturating at the native range.
    fn from_f32_trunc(v: f32) -> Self;
}

impl Channel for u8 {
    const FORMAT: PixelFormat = PixelFormat::U8;
    const IS_FLOAT: bool = false;
    const MAX: f32 = 255.0;

    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_f32_round(v: f32) -> Self {
        v.round() as u8
    }

    #[inline]
    fn from_f32_trunc(v: f32) -> Self {
        v as u8
    }
}

impl Channel for u16 {
    const FORMAT: PixelFormat = PixelFormat::U16;
    const IS_FLOAT: bool = false;
    const MAX: f32 = 65535.0;

    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    #[inline]
    fn from_f32_round(v: f32) -> Self {
        v.round() as u16
    }

    #[inline]
    fn from_f32_trunc(v: f32) -> Self {
        v as u16
    }
}

impl Channel for f16 {
    const FORMAT: PixelFormat = PixelFormat::F16;
    const IS_FLOAT: bool = true;
    const MAX: f32 = 1.0;

    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    #[inline]
    fn from_f32_round(v: f32) -> Self {
        f16::from_f32(v)
    }

    // No cheaper sound narrowing exists for half floats.
    #[inline]
    fn from_f32_trunc(v: f32) -> Self {
        f16::from_f32(v)
    }
}

impl Channel for f32 {
    const FORMAT: PixelFormat = PixelFormat::F32;
    const IS_FLOAT: bool = true;
    const MAX: f32 = 1.0;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32_round(v: f32) -> Self {
        v
    }

    #[inline]
    fn from_f32_trunc(v: f32) -> Self {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/channel.rs"]
mod tests;
