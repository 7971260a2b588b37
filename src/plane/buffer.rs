use half::f16;

use crate::{
    foundation::core::Bounds,
    foundation::error::{EdgeFxError, EdgeFxResult},
    pixel::channel::{Channel, PixelFormat},
};

/// Row-major single-channel pixel buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane<C> {
    width: usize,
    height: usize,
    data: Vec<C>,
}

impl<C: Channel> Plane<C> {
    /// Zero-initialized plane.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, C::default())
    }

    pub fn filled(width: usize, height: usize, value: C) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap existing row-major data. The length must be exactly `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<C>) -> EdgeFxResult<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| EdgeFxError::validation("plane size overflow"))?;
        if data.len() != expected {
            return Err(EdgeFxError::validation(format!(
                "plane data has {} values, expected {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a plane by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> C) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[C] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [C] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<C> {
        self.data
    }

    pub fn get(&self, x: usize, y: usize) -> C {
        self.data[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: C) {
        self.data[y * self.width + x] = value;
    }

    pub fn row(&self, y: usize) -> &[C] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn fill(&mut self, value: C) {
        self.data.fill(value);
    }

    /// Sub-rectangle of this plane starting at `(x0, y0)`.
    pub fn crop(&self, x0: usize, y0: usize, width: usize, height: usize) -> Self {
        assert!(
            x0 + width <= self.width && y0 + height <= self.height,
            "crop {width}x{height}@({x0},{y0}) exceeds {}x{} plane",
            self.width,
            self.height
        );
        Self::from_fn(width, height, |x, y| self.get(x0 + x, y0 + y))
    }
}

/// Native value of the black point; float formats are full-range and use 0.0.
pub(crate) fn black_value<C: Channel>(black: f32) -> C {
    if C::IS_FLOAT {
        C::from_f32_round(0.0)
    } else {
        C::from_f32_round(black)
    }
}

/// A [`Plane`] of any supported native representation.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaneBuf {
    /// 8-bit unsigned channel.
    U8(Plane<u8>),
    /// 16-bit unsigned channel.
    U16(Plane<u16>),
    /// Half float channel.
    F16(Plane<f16>),
    /// Single float channel.
    F32(Plane<f32>),
}

impl PlaneBuf {
    /// Zero-initialized plane of the given format.
    pub fn new(format: PixelFormat, width: usize, height: usize) -> Self {
        match format {
            PixelFormat::U8 => Self::U8(Plane::new(width, height)),
            PixelFormat::U16 => Self::U16(Plane::new(width, height)),
            PixelFormat::F16 => Self::F16(Plane::new(width, height)),
            PixelFormat::F32 => Self::F32(Plane::new(width, height)),
        }
    }

    pub fn format(&self) -> PixelFormat {
        match self {
            Self::U8(_) => PixelFormat::U8,
            Self::U16(_) => PixelFormat::U16,
            Self::F16(_) => PixelFormat::F16,
            Self::F32(_) => PixelFormat::F32,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::U8(p) => p.width(),
            Self::U16(p) => p.width(),
            Self::F16(p) => p.width(),
            Self::F32(p) => p.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::U8(p) => p.height(),
            Self::U16(p) => p.height(),
            Self::F16(p) => p.height(),
            Self::F32(p) => p.height(),
        }
    }

    /// Fill with the native value of the black point (0.0 for float formats).
    pub fn clear_to_black(&mut self, black: f32) {
        fn clear<C: Channel>(p: &mut Plane<C>, black: f32) {
            p.fill(black_value(black));
        }
        match self {
            Self::U8(p) => clear(p, black),
            Self::U16(p) => clear(p, black),
            Self::F16(p) => clear(p, black),
            Self::F32(p) => clear(p, black),
        }
    }

    /// Raw native value at `(x, y)` widened to `f32`, without black/white mapping.
    pub fn sample_f32(&self, x: usize, y: usize) -> f32 {
        match self {
            Self::U8(p) => p.get(x, y).to_f32(),
            Self::U16(p) => p.get(x, y).to_f32(),
            Self::F16(p) => Channel::to_f32(p.get(x, y)),
            Self::F32(p) => p.get(x, y),
        }
    }

    /// All raw native values widened to `f32`, row-major.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        fn widen<C: Channel>(p: &Plane<C>) -> Vec<f32> {
            p.data().iter().map(|v| v.to_f32()).collect()
        }
        match self {
            Self::U8(p) => widen(p),
            Self::U16(p) => widen(p),
            Self::F16(p) => widen(p),
            Self::F32(p) => widen(p),
        }
    }

    pub fn as_u8(&self) -> Option<&Plane<u8>> {
        match self {
            Self::U8(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<&Plane<u16>> {
        match self {
            Self::U16(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_f16(&self) -> Option<&Plane<f16>> {
        match self {
            Self::F16(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&Plane<f32>> {
        match self {
            Self::F32(p) => Some(p),
            _ => None,
        }
    }

    /// Copy the overlap of `src` (covering `src_bounds`) into `self` (covering `dst_bounds`).
    ///
    /// Both planes must share a format and match their bounds.
    pub fn blit_from(&mut self, dst_bounds: Bounds, src: &PlaneBuf, src_bounds: Bounds) {
        fn blit<C: Channel>(dst: &mut Plane<C>, dst_b: Bounds, src: &Plane<C>, src_b: Bounds) {
            let Some(overlap) = dst_b.intersect(src_b) else {
                return;
            };
            let w = overlap.width();
            for y in overlap.y1..=overlap.y2 {
                let sy = (y - src_b.y1) as usize;
                let sx = (overlap.x1 - src_b.x1) as usize;
                let dy = (y - dst_b.y1) as usize;
                let dx = (overlap.x1 - dst_b.x1) as usize;
                let src_row = &src.row(sy)[sx..sx + w];
                let dst_width = dst.width();
                let start = dy * dst_width + dx;
                dst.data_mut()[start..start + w].copy_from_slice(src_row);
            }
        }

        assert_eq!(
            (self.width(), self.height()),
            (dst_bounds.width(), dst_bounds.height()),
            "destination plane does not cover its bounds"
        );
        assert_eq!(
            (src.width(), src.height()),
            (src_bounds.width(), src_bounds.height()),
            "source plane does not cover its bounds"
        );
        match (self, src) {
            (Self::U8(d), Self::U8(s)) => blit(d, dst_bounds, s, src_bounds),
            (Self::U16(d), Self::U16(s)) => blit(d, dst_bounds, s, src_bounds),
            (Self::F16(d), Self::F16(s)) => blit(d, dst_bounds, s, src_bounds),
            (Self::F32(d), Self::F32(s)) => blit(d, dst_bounds, s, src_bounds),
            (d, s) => panic!(
                "blit between mismatched formats {} and {}",
                d.format(),
                s.format()
            ),
        }
    }
}

impl From<Plane<u8>> for PlaneBuf {
    fn from(p: Plane<u8>) -> Self {
        Self::U8(p)
    }
}

impl From<Plane<u16>> for PlaneBuf {
    fn from(p: Plane<u16>) -> Self {
        Self::U16(p)
    }
}

impl From<Plane<f16>> for PlaneBuf {
    fn from(p: Plane<f16>) -> Self {
        Self::F16(p)
    }
}

impl From<Plane<f32>> for PlaneBuf {
    fn from(p: Plane<f32>) -> Self {
        Self::F32(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plane/buffer.rs"]
mod tests;
