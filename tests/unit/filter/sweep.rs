use super::*;
use crate::kernel::edge::EdgeCoefficients;
use half::f16;

fn ramp_u8(w: usize, h: usize) -> Plane<u8> {
    Plane::from_fn(w, h, |x, y| ((x * 37 + y * 11) % 256) as u8)
}

#[test]
fn identity_reproduces_integer_interior_exactly() {
    let input = ramp_u8(7, 6);
    let mut out = Plane::<u8>::new(5, 4);
    filter_plane(&mut out, &input, &Kernel3x3::IDENTITY, &Converter::<u8, false>::full_range());
    assert_eq!(out, input.crop(1, 1, 5, 4));

    let input16 = Plane::<u16>::from_fn(6, 5, |x, y| (x * 9000 + y * 1234) as u16);
    let mut out16 = Plane::<u16>::new(4, 3);
    let zero = Kernel3x3::edge_enhance(EdgeCoefficients::default());
    filter_plane(&mut out16, &input16, &zero, &Converter::<u16, true>::full_range());
    assert_eq!(out16, input16.crop(1, 1, 4, 3));
}

#[test]
fn identity_reproduces_float_interior() {
    let input = Plane::<f32>::from_fn(5, 5, |x, y| x as f32 * 0.1 - y as f32 * 0.37);
    let mut out = Plane::<f32>::new(3, 3);
    filter_plane(&mut out, &input, &Kernel3x3::IDENTITY, &Converter::<f32, false>::full_range());
    for y in 0..3 {
        for x in 0..3 {
            assert!((out.get(x, y) - input.get(x + 1, y + 1)).abs() < 1e-6);
        }
    }

    let half_in = Plane::<f16>::from_fn(4, 4, |x, y| f16::from_f32((x + y) as f32 * 0.25));
    let mut half_out = Plane::<f16>::new(2, 2);
    filter_plane(&mut half_out, &half_in, &Kernel3x3::IDENTITY, &Converter::<f16, false>::full_range());
    assert_eq!(half_out, half_in.crop(1, 1, 2, 2));
}

#[test]
fn flat_input_is_preserved_by_edge_kernel() {
    let k = Kernel3x3::edge_enhance(EdgeCoefficients::new(0.5, 0.5, 0.5, 0.5));
    let input = Plane::<u16>::filled(6, 6, 100);
    let mut out = Plane::<u16>::new(4, 4);
    filter_plane(&mut out, &input, &k, &Converter::<u16, false>::full_range());
    assert!(out.data().iter().all(|v| *v == 100));
}

#[test]
fn single_bright_pixel_is_weighted_by_kernel_position() {
    // Impulse at input (2,2): output(x,y) reads it through weight index
    // (2 - y) * 3 + (2 - x) for the 3x3 window rooted at (x,y).
    let mut input = Plane::<f32>::new(5, 5);
    input.set(2, 2, 1.0);
    let k = Kernel3x3::edge_enhance(EdgeCoefficients::new(0.1, 0.2, 0.3, 0.4));
    let mut out = Plane::<f32>::new(3, 3);
    filter_plane(&mut out, &input, &k, &Converter::<f32, false>::full_range());
    for y in 0..3 {
        for x in 0..3 {
            let idx = (2 - y) * 3 + (2 - x);
            assert_eq!(out.get(x, y), k.weights()[idx]);
        }
    }
}

#[test]
fn edge_is_enhanced_and_clamped_for_integers() {
    // Vertical step 0 | 200 with left enhancement.
    let input = Plane::<u8>::from_fn(6, 3, |x, _| if x < 3 { 0 } else { 200 });
    let k = Kernel3x3::edge_enhance(EdgeCoefficients::new(1.0, 0.0, 0.0, 0.0));
    let mut out = Plane::<u8>::new(4, 1);
    filter_plane(&mut out, &input, &k, &Converter::<u8, false>::full_range());
    // x=0: all zero; x=1: centre 0 with right column 200 (weight 0) => 0;
    // x=2: centre 200, left column 0 => 200 * 4 clamps to 255; x=3: flat 200.
    assert_eq!(out.data(), &[0, 0, 255, 200]);
}

#[test]
fn fast_and_accurate_agree_inside_range() {
    let input = ramp_u8(10, 10);
    let k = Kernel3x3::edge_enhance(EdgeCoefficients::new(0.05, 0.05, 0.05, 0.05));
    let mut a = Plane::<u8>::new(8, 8);
    let mut b = Plane::<u8>::new(8, 8);
    filter_plane(&mut a, &input, &k, &Converter::<u8, false>::full_range());
    filter_plane(&mut b, &input, &k, &Converter::<u8, true>::full_range());
    for (x, y) in a.data().iter().zip(b.data()) {
        assert!((i32::from(*x) - i32::from(*y)).abs() <= 1);
    }
}

#[test]
fn repeated_sweeps_are_identical() {
    let input = Plane::<f32>::from_fn(34, 18, |x, y| ((x * 7 + y * 3) % 13) as f32 / 13.0);
    let k = Kernel3x3::edge_enhance(EdgeCoefficients::new(0.3, -0.1, 0.25, 0.8));
    let conv = Converter::<f32, false>::full_range();
    let mut a = Plane::<f32>::new(32, 16);
    let mut b = Plane::<f32>::new(32, 16);
    filter_plane(&mut a, &input, &k, &conv);
    filter_plane(&mut b, &input, &k, &conv);
    assert_eq!(a, b);
}

#[test]
fn halo_matches_requires_exactly_two_extra() {
    assert!(halo_matches(4, 4, 6, 6));
    assert!(!halo_matches(4, 4, 4, 4));
    assert!(!halo_matches(4, 4, 6, 7));
    assert!(!halo_matches(4, 4, 8, 8));
}

#[test]
#[should_panic(expected = "one pixel halo")]
fn missing_halo_panics() {
    let input = Plane::<u8>::new(4, 4);
    let mut out = Plane::<u8>::new(4, 4);
    filter_plane(&mut out, &input, &Kernel3x3::IDENTITY, &Converter::<u8, false>::full_range());
}

#[test]
#[should_panic(expected = "one pixel halo")]
fn oversized_halo_panics() {
    let input = Plane::<f32>::new(7, 6);
    let mut out = Plane::<f32>::new(4, 4);
    filter_plane(&mut out, &input, &Kernel3x3::IDENTITY, &Converter::<f32, true>::full_range());
}

#[test]
fn first_kernel_row_reads_the_lower_input_row() {
    // Row 0 (y - 1 of the output pixel) is 30, row 1 is 20, row 2 is 10.
    let input = Plane::<f32>::from_fn(3, 3, |_, y| [30.0, 20.0, 10.0][y]);
    let mut w = [0.0; 9];
    w[1] = 1.0;
    let conv = Converter::<f32, false>::full_range();
    let mut out = Plane::<f32>::new(1, 1);
    filter_plane(&mut out, &input, &Kernel3x3::from_weights(w), &conv);
    assert_eq!(out.get(0, 0), 30.0);

    let mut w = [0.0; 9];
    w[7] = 1.0;
    filter_plane(&mut out, &input, &Kernel3x3::from_weights(w), &conv);
    assert_eq!(out.get(0, 0), 10.0);
}
