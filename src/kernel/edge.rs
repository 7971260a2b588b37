/// Per-side edge enhancement amounts, already scaled by the effect strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EdgeCoefficients {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl EdgeCoefficients {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Multiply every side by `effect`.
    pub fn scaled(self, effect: f32) -> Self {
        Self {
            left: self.left * effect,
            right: self.right * effect,
            top: self.top * effect,
            bottom: self.bottom * effect,
        }
    }

    pub fn sum(self) -> f32 {
        self.left + self.right + self.top + self.bottom
    }
}

/// Row-major 3x3 convolution weights. Index `4` is the centre pixel.
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Kernel3x3 {
    weights: [f32; 9],
}

impl Kernel3x3 {
    /// Pass-through kernel.
    pub const IDENTITY: Self = Self {
        weights: [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    };

    pub fn from_weights(weights: [f32; 9]) -> Self {
        Self { weights }
    }

    /// Directional edge enhancement kernel.
    ///
    /// Each side subtracts its neighbours on that side; the centre compensates so the weights
    /// always sum to one and flat areas pass through unchanged. All-zero coefficients give
    /// [`Kernel3x3::IDENTITY`].
    pub fn edge_enhance(c: EdgeCoefficients) -> Self {
        let EdgeCoefficients {
            left: l,
            right: r,
            top: t,
            bottom: b,
        } = c;
        Self {
            weights: [
                -l - t,
                -t,
                -r - t,
                -l,
                1.0 + 3.0 * (l + r + t + b),
                -r,
                -l - b,
                -b,
                -r - b,
            ],
        }
    }

    pub fn weights(&self) -> &[f32; 9] {
        &self.weights
    }

    /// Weight applied to the neighbour at offset `(dx, dy)`, both in `-1..=1`.
    pub fn weight(&self, dx: i32, dy: i32) -> f32 {
        assert!(
            (-1..=1).contains(&dx) && (-1..=1).contains(&dy),
            "offset ({dx},{dy}) is outside a 3x3 kernel"
        );
        self.weights[((dy + 1) * 3 + (dx + 1)) as usize]
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Kernel3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/edge.rs"]
mod tests;
