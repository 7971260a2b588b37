use super::*;
use crate::foundation::core::{Bounds, Halo};
use crate::kernel::edge::EdgeCoefficients;
use crate::pixel::channel::PixelFormat;
use half::f16;

fn tile_bounds() -> Bounds {
    Bounds::new(0, 0, 3, 2).unwrap()
}

fn region_of(planes: Vec<PlaneBuf>) -> Region {
    Region::new(tile_bounds().expand(Halo::uniform(1)), planes).unwrap()
}

#[test]
fn filters_every_channel_against_matching_region_plane() {
    let region = region_of(vec![
        Plane::<u8>::filled(6, 5, 10).into(),
        Plane::<u8>::filled(6, 5, 20).into(),
        Plane::<u8>::filled(6, 5, 30).into(),
    ]);
    let mut tiles = TileList::full_range(tile_bounds(), PixelFormat::U8, 3).unwrap();
    let k = Kernel3x3::edge_enhance(EdgeCoefficients::new(0.2, 0.2, 0.2, 0.2));
    let n = FilterOp::new(&k, false).filter(&mut tiles, &region).unwrap();
    assert_eq!(n, 3);
    for (i, expect) in [10u8, 20, 30].into_iter().enumerate() {
        let p = tiles.plane(i).unwrap().as_u8().unwrap();
        assert!(p.data().iter().all(|v| *v == expect));
    }
    assert_eq!(tiles.uncooked_count(), 0);
}

#[test]
fn cooked_sub_tiles_are_left_alone() {
    let region = region_of(vec![
        Plane::<f32>::filled(6, 5, 0.5).into(),
        Plane::<f32>::filled(6, 5, 0.5).into(),
    ]);
    let mut tiles = TileList::full_range(tile_bounds(), PixelFormat::F32, 2).unwrap();
    tiles.mark_cooked(0);
    let n = FilterOp::new(&Kernel3x3::IDENTITY, true)
        .filter(&mut tiles, &region)
        .unwrap();
    assert_eq!(n, 1);
    assert!(tiles.plane(0).unwrap().to_f32_vec().iter().all(|v| *v == 0.0));
    assert!(tiles.plane(1).unwrap().to_f32_vec().iter().all(|v| *v == 0.5));
}

#[test]
fn every_format_takes_the_same_path() {
    let k = Kernel3x3::IDENTITY;
    for format in [PixelFormat::U8, PixelFormat::U16, PixelFormat::F16, PixelFormat::F32] {
        for fast in [false, true] {
            let input: PlaneBuf = match format {
                PixelFormat::U8 => Plane::<u8>::from_fn(6, 5, |x, y| (x + 6 * y) as u8).into(),
                PixelFormat::U16 => Plane::<u16>::from_fn(6, 5, |x, y| (x + 6 * y) as u16).into(),
                PixelFormat::F16 => {
                    Plane::<f16>::from_fn(6, 5, |x, y| f16::from_f32((x + 6 * y) as f32)).into()
                }
                PixelFormat::F32 => Plane::<f32>::from_fn(6, 5, |x, y| (x + 6 * y) as f32).into(),
            };
            let mut out = PlaneBuf::new(format, 4, 3);
            filter_buf(&mut out, &input, &k, 0.0, format.default_white(), fast).unwrap();
            for y in 0..3 {
                for x in 0..4 {
                    assert_eq!(
                        out.sample_f32(x, y),
                        input.sample_f32(x + 1, y + 1),
                        "{format} fast={fast} at ({x},{y})"
                    );
                }
            }
        }
    }
}

#[test]
fn black_white_points_shape_integer_clamping() {
    let input: PlaneBuf = Plane::<u8>::from_fn(3, 3, |x, _| if x == 2 { 200 } else { 20 }).into();
    let k = Kernel3x3::edge_enhance(EdgeCoefficients::new(0.0, 1.0, 0.0, 0.0));
    let mut accurate = PlaneBuf::new(PixelFormat::U8, 1, 1);
    filter_buf(&mut accurate, &input, &k, 16.0, 235.0, false).unwrap();
    // Centre 20 with a bright right column: pushed below the black point and clamped.
    assert_eq!(accurate.sample_f32(0, 0), 16.0);

    let mut fast = PlaneBuf::new(PixelFormat::U8, 1, 1);
    filter_buf(&mut fast, &input, &k, 16.0, 235.0, true).unwrap();
    assert_eq!(fast.sample_f32(0, 0), 0.0);
}

#[test]
fn invalid_black_white_points_surface_as_errors() {
    let input: PlaneBuf = Plane::<u8>::new(3, 3).into();
    let mut out = PlaneBuf::new(PixelFormat::U8, 1, 1);
    assert!(filter_buf(&mut out, &input, &Kernel3x3::IDENTITY, 0.0, 400.0, false).is_err());
}

#[test]
#[should_panic(expected = "output tile is u8 but input region is f32")]
fn format_mismatch_panics() {
    let input: PlaneBuf = Plane::<f32>::new(3, 3).into();
    let mut out = PlaneBuf::new(PixelFormat::U8, 1, 1);
    let _ = filter_buf(&mut out, &input, &Kernel3x3::IDENTITY, 0.0, 255.0, false);
}

#[test]
#[should_panic(expected = "has no input")]
fn missing_region_channel_panics() {
    let region = region_of(vec![Plane::<u8>::new(6, 5).into()]);
    let mut tiles = TileList::full_range(tile_bounds(), PixelFormat::U8, 2).unwrap();
    let _ = FilterOp::new(&Kernel3x3::IDENTITY, false).filter(&mut tiles, &region);
}

#[test]
#[should_panic(expected = "one pixel halo")]
fn region_without_halo_panics() {
    let region = Region::new(tile_bounds(), vec![Plane::<u8>::new(4, 3).into()]).unwrap();
    let mut tiles = TileList::full_range(tile_bounds(), PixelFormat::U8, 1).unwrap();
    let _ = FilterOp::new(&Kernel3x3::IDENTITY, false).filter(&mut tiles, &region);
}
