use crate::{
    kernel::edge::Kernel3x3,
    pixel::channel::Channel,
    pixel::convert::Converter,
    plane::buffer::Plane,
};

/// Convolve `input` with `kernel` into `out`.
///
/// `input` must carry a one pixel halo: it is exactly two pixels wider and taller than `out`,
/// and `out(x, y)` is centred on `input(x + 1, y + 1)`. Anything else is a caller bug and
/// panics.
///
/// Samples are widened with `conv`, accumulated in `f32` in kernel index order, and narrowed
/// back through `conv`. Every output pixel depends only on its own neighbourhood.
pub fn filter_plane<C: Channel, const FAST: bool>(
    out: &mut Plane<C>,
    input: &Plane<C>,
    kernel: &Kernel3x3,
    conv: &Converter<C, FAST>,
) {
    assert_halo(out.width(), out.height(), input.width(), input.height());

    let w = out.width();
    let h = out.height();
    let istride = w + 2;
    let k = kernel.weights();
    let src = input.data();
    let dst = out.data_mut();

    for y in 0..h {
        // Rows are stored bottom-up: `lower` is y - 1, `upper` is y + 1.
        let lower = &src[y * istride..(y + 1) * istride];
        let middle = &src[(y + 1) * istride..(y + 2) * istride];
        let upper = &src[(y + 2) * istride..(y + 3) * istride];
        let scan = &mut dst[y * w..(y + 1) * w];

        for (x, px) in scan.iter_mut().enumerate() {
            let mut sum = conv.to_float(lower[x]) * k[0];
            sum += conv.to_float(lower[x + 1]) * k[1];
            sum += conv.to_float(lower[x + 2]) * k[2];

            sum += conv.to_float(middle[x]) * k[3];
            sum += conv.to_float(middle[x + 1]) * k[4];
            sum += conv.to_float(middle[x + 2]) * k[5];

            sum += conv.to_float(upper[x]) * k[6];
            sum += conv.to_float(upper[x + 1]) * k[7];
            sum += conv.to_float(upper[x + 2]) * k[8];

            *px = conv.from_float(sum);
        }
    }
}

/// `true` when an input of `in_w` x `in_h` is a valid halo for an `out_w` x `out_h` output.
pub fn halo_matches(out_w: usize, out_h: usize, in_w: usize, in_h: usize) -> bool {
    in_w == out_w + 2 && in_h == out_h + 2
}

pub(crate) fn assert_halo(out_w: usize, out_h: usize, in_w: usize, in_h: usize) {
    assert!(
        halo_matches(out_w, out_h, in_w, in_h),
        "input region {in_w}x{in_h} is not a one pixel halo around output {out_w}x{out_h}"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/filter/sweep.rs"]
mod tests;
