use crate::{
    filter::sweep::{assert_halo, filter_plane},
    foundation::error::EdgeFxResult,
    kernel::edge::Kernel3x3,
    pixel::channel::Channel,
    pixel::convert::Converter,
    plane::buffer::{Plane, PlaneBuf},
    plane::region::Region,
    plane::tile::TileList,
};

/// The edge enhance operation bound to one cook's kernel.
#[derive(Clone, Copy, Debug)]
pub struct FilterOp<'a> {
    kernel: &'a Kernel3x3,
    fast: bool,
}

impl<'a> FilterOp<'a> {
    pub fn new(kernel: &'a Kernel3x3, fast: bool) -> Self {
        Self { kernel, fast }
    }

    pub fn kernel(&self) -> &Kernel3x3 {
        self.kernel
    }

    pub fn is_fast(&self) -> bool {
        self.fast
    }

    /// Filter every uncooked sub-tile of `tiles` against the region plane with the same
    /// channel index. Returns the number of sub-tiles written.
    ///
    /// Panics when the region is missing a channel, differs in format, or is not a one pixel
    /// halo around the tile.
    pub fn filter(&self, tiles: &mut TileList, region: &Region) -> EdgeFxResult<usize> {
        let tb = tiles.bounds();
        let rb = region.bounds();
        assert_halo(tb.width(), tb.height(), rb.width(), rb.height());

        let (black, white) = (tiles.black(), tiles.white());
        tiles.cook_each(|index, out| {
            let input = region.plane(index).unwrap_or_else(|| {
                panic!(
                    "region has {} planes, tile channel {index} has no input",
                    region.len()
                )
            });
            filter_buf(out, input, self.kernel, black, white, self.fast)
        })
    }
}

/// Filter every uncooked sub-tile of `tiles` with `kernel`. See [`FilterOp::filter`].
pub fn filter_tiles(
    tiles: &mut TileList,
    region: &Region,
    kernel: &Kernel3x3,
    fast: bool,
) -> EdgeFxResult<usize> {
    FilterOp::new(kernel, fast).filter(tiles, region)
}

/// Run the sweep on a type-erased plane pair, selecting the conversion strategy by format
/// and `fast`.
pub fn filter_buf(
    out: &mut PlaneBuf,
    input: &PlaneBuf,
    kernel: &Kernel3x3,
    black: f32,
    white: f32,
    fast: bool,
) -> EdgeFxResult<()> {
    match (out, input) {
        (PlaneBuf::U8(o), PlaneBuf::U8(i)) => run(o, i, kernel, black, white, fast),
        (PlaneBuf::U16(o), PlaneBuf::U16(i)) => run(o, i, kernel, black, white, fast),
        (PlaneBuf::F16(o), PlaneBuf::F16(i)) => run(o, i, kernel, black, white, fast),
        (PlaneBuf::F32(o), PlaneBuf::F32(i)) => run(o, i, kernel, black, white, fast),
        (o, i) => panic!(
            "output tile is {} but input region is {}",
            o.format(),
            i.format()
        ),
    }
}

fn run<C: Channel>(
    out: &mut Plane<C>,
    input: &Plane<C>,
    kernel: &Kernel3x3,
    black: f32,
    white: f32,
    fast: bool,
) -> EdgeFxResult<()> {
    if fast {
        let conv = Converter::<C, true>::new(black, white)?;
        filter_plane(out, input, kernel, &conv);
    } else {
        let conv = Converter::<C, false>::new(black, white)?;
        filter_plane(out, input, kernel, &conv);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/filter/dispatch.rs"]
mod tests;
