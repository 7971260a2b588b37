use super::*;
use half::f16;

#[test]
fn full_range_u8_roundtrips_every_value() {
    let conv = Converter::<u8, false>::full_range();
    for v in 0..=255u8 {
        assert_eq!(conv.from_float(conv.to_float(v)), v);
    }
}

#[test]
fn full_range_u16_roundtrips_sampled_values() {
    let conv = Converter::<u16, false>::full_range();
    for v in (0..=u16::MAX).step_by(257) {
        assert_eq!(conv.from_float(conv.to_float(v)), v);
    }
}

#[test]
fn accurate_path_clamps_to_white_point() {
    let conv = Converter::<u8, false>::new(16.0, 235.0).unwrap();
    assert_eq!(conv.to_float(16), 0.0);
    assert!((conv.to_float(235) - 1.0).abs() < 1e-6);
    assert_eq!(conv.from_float(2.0), 235);
    assert_eq!(conv.from_float(-1.0), 16);
}

#[test]
fn fast_path_only_saturates_at_native_range() {
    let conv = Converter::<u8, true>::new(16.0, 235.0).unwrap();
    // 1.1 * 219 + 16 = 256.9: past the white point and past u8.
    assert_eq!(conv.from_float(1.1), 255);
    // 1.05 * 219 + 16 = 245.95: past the white point only.
    assert_eq!(conv.from_float(1.05), 246);
    assert_eq!(conv.from_float(-1.0), 0);
}

#[test]
fn float_channels_ignore_black_white_and_do_not_clamp() {
    let conv = Converter::<f32, false>::new(0.0, 1.0).unwrap();
    assert_eq!(conv.from_float(3.5), 3.5);
    assert_eq!(conv.from_float(-0.25), -0.25);

    let half = Converter::<f16, true>::full_range();
    assert_eq!(half.from_float(2.0), f16::from_f32(2.0));
    assert_eq!(half.to_float(f16::from_f32(-1.5)), -1.5);
}

#[test]
fn invalid_black_white_points_are_rejected() {
    assert!(Converter::<u8, false>::new(100.0, 100.0).is_err());
    assert!(Converter::<u8, false>::new(200.0, 100.0).is_err());
    assert!(Converter::<u8, false>::new(0.0, 300.0).is_err());
    assert!(Converter::<u16, false>::new(f32::NAN, 1.0).is_err());
    assert!(Converter::<f32, false>::new(0.0, 0.0).is_ok());
}

#[test]
fn neutral_is_black_point() {
    assert_eq!(Converter::<u8, false>::new(16.0, 235.0).unwrap().neutral(), 16);
    assert_eq!(Converter::<u16, true>::full_range().neutral(), 0);
    assert_eq!(Converter::<f32, false>::full_range().neutral(), 0.0);
}
