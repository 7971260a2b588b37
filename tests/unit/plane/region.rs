use super::*;
use crate::pixel::channel::PixelFormat;

fn ramp() -> (Plane<u8>, Bounds) {
    // 3x2 canvas: row 0 = 1 2 3, row 1 = 4 5 6
    let p = Plane::<u8>::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
    (p, Bounds::new(0, 0, 2, 1).unwrap())
}

#[test]
fn hold_replicates_edges() {
    let (p, canvas) = ramp();
    let area = canvas.expand(crate::foundation::core::Halo::uniform(1));
    let out = extract_plane(&p, canvas, area, Boundary::Hold, 0);
    assert_eq!(out.width(), 5);
    assert_eq!(out.height(), 4);
    assert_eq!(out.row(0), &[1, 1, 2, 3, 3]);
    assert_eq!(out.row(1), &[1, 1, 2, 3, 3]);
    assert_eq!(out.row(2), &[4, 4, 5, 6, 6]);
    assert_eq!(out.row(3), &[4, 4, 5, 6, 6]);
}

#[test]
fn black_fills_outside_canvas() {
    let (p, canvas) = ramp();
    let area = Bounds::new(-1, 0, 1, 0).unwrap();
    let out = extract_plane(&p, canvas, area, Boundary::Black, 200);
    assert_eq!(out.data(), &[200, 1, 2]);
}

#[test]
fn interior_extraction_is_a_plain_copy() {
    let (p, canvas) = ramp();
    let area = Bounds::new(1, 0, 2, 1).unwrap();
    for boundary in [Boundary::Hold, Boundary::Black] {
        let out = extract_plane(&p, canvas, area, boundary, 0);
        assert_eq!(out.data(), &[2, 3, 5, 6]);
    }
}

#[test]
fn region_rejects_planes_not_covering_bounds() {
    let b = Bounds::new(0, 0, 2, 2).unwrap();
    assert!(Region::new(b, vec![PlaneBuf::new(PixelFormat::U8, 3, 3)]).is_ok());
    assert!(Region::new(b, vec![PlaneBuf::new(PixelFormat::U8, 3, 2)]).is_err());
}

#[test]
fn boundary_defaults_to_hold_and_serializes_lowercase() {
    assert_eq!(Boundary::default(), Boundary::Hold);
    assert_eq!(serde_json::to_string(&Boundary::Black).unwrap(), "\"black\"");
}
