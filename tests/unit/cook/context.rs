use super::*;
use crate::cook::params::{EdgeParams, Keyframe, ParamTrack};

#[test]
fn full_resolution_cook_uses_fade_only() {
    let req = CookRequest::at(0.0).with_fade(0.5);
    assert_eq!(req.scale_factors().unwrap(), (1.0, 1.0));
    assert_eq!(req.effect_strength().unwrap(), 0.5);
}

#[test]
fn proxy_cook_scales_by_smaller_axis() {
    let req = CookRequest::default().with_resolution((50, 75), (100, 100));
    assert_eq!(req.scale_factors().unwrap(), (0.5, 0.75));
    assert_eq!(req.effect_strength().unwrap(), 0.5);
}

#[test]
fn bad_requests_are_rejected() {
    let zero = CookRequest::default().with_resolution((0, 10), (10, 10));
    assert!(zero.effect_strength().is_err());
    let nan = CookRequest::default().with_fade(f32::NAN);
    assert!(matches!(
        nan.effect_strength(),
        Err(EdgeFxError::Validation(_))
    ));
}

#[test]
fn context_builds_scaled_kernel() {
    let params = EdgeCoefficients::new(0.5, 0.5, 0.5, 0.5);
    let req = CookRequest::default().with_fade(0.5);
    let ctx = CookContext::new(&params, req).unwrap();

    assert_eq!(ctx.effect(), 0.5);
    assert_eq!(ctx.coefficients(), EdgeCoefficients::new(0.25, 0.25, 0.25, 0.25));
    assert_eq!(
        *ctx.kernel(),
        Kernel3x3::edge_enhance(EdgeCoefficients::new(0.25, 0.25, 0.25, 0.25))
    );
}

#[test]
fn zero_parameters_give_identity() {
    let ctx = CookContext::new(&EdgeParams::default(), CookRequest::default()).unwrap();
    assert!(ctx.kernel().is_identity());
}

#[test]
fn zero_fade_gives_identity() {
    let params = EdgeCoefficients::new(1.0, 2.0, 3.0, 4.0);
    let ctx = CookContext::new(&params, CookRequest::default().with_fade(0.0)).unwrap();
    assert!(ctx.kernel().is_identity());
}

#[test]
fn parameters_are_sampled_at_request_time() {
    let mut params = EdgeParams::default();
    params.left = ParamTrack::keyframed(vec![
        Keyframe {
            time: 0.0,
            value: 0.0,
        },
        Keyframe {
            time: 2.0,
            value: 1.0,
        },
    ])
    .unwrap();
    let ctx = CookContext::new(&params, CookRequest::at(1.0)).unwrap();
    assert_eq!(ctx.time(), 1.0);
    assert_eq!(ctx.coefficients().left, 0.5);
    assert_eq!(ctx.coefficients().right, 0.0);
}

#[test]
fn non_finite_parameters_are_rejected() {
    let params = EdgeCoefficients::new(f32::INFINITY, 0.0, 0.0, 0.0);
    assert!(CookContext::new(&params, CookRequest::default()).is_err());
}

#[test]
fn from_coefficients_skips_scaling() {
    let c = EdgeCoefficients::new(0.1, 0.2, 0.3, 0.4);
    let ctx = CookContext::from_coefficients(3.0, c);
    assert_eq!(ctx.effect(), 1.0);
    assert_eq!(ctx.coefficients(), c);
    assert_eq!(ctx.time(), 3.0);
}
