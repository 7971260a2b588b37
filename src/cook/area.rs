use crate::foundation::core::{Bounds, Halo};

/// Pixels the 3x3 kernel reads beyond each side of the pixel it writes.
pub const KERNEL_HALO: Halo = Halo::uniform(1);

/// Image bounds of the filtered result: the input bounds grown by the kernel halo.
///
/// Edges sampled from a held boundary smear outwards by one pixel.
pub fn image_bounds(input_bounds: Bounds) -> Bounds {
    input_bounds.expand(KERNEL_HALO)
}

/// One upstream dependency: the area of input `input` needed to cook an output area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeededArea {
    pub input: usize,
    pub bounds: Bounds,
}

/// Declare the input area needed to cook `output_area`.
///
/// Nothing is declared when the input is in error. A bypassed node reads exactly the output
/// area, otherwise the area grows by [`KERNEL_HALO`] regardless of the kernel weights.
pub fn needed_input_areas(output_area: Bounds, input_ok: bool, bypass: bool) -> Vec<NeededArea> {
    if !input_ok {
        return Vec::new();
    }
    let bounds = if bypass {
        output_area
    } else {
        output_area.expand(KERNEL_HALO)
    };
    vec![NeededArea { input: 0, bounds }]
}

/// Padded area requested from the input for one output tile.
pub fn input_request_bounds(tile: Bounds) -> Bounds {
    tile.expand(KERNEL_HALO)
}

#[cfg(test)]
#[path = "../../tests/unit/cook/area.rs"]
mod tests;
