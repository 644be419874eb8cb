/// Single coordinate axis, also used for the grid side length.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major linear cell index, `y * side + x`.
pub type CellIndex = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Splits a linear index into coordinates for a square grid of `side`.
pub const fn index_to_coords(index: CellIndex, side: Coord) -> Coord2 {
    let side = side as CellIndex;
    ((index % side) as Coord, (index / side) as Coord)
}

pub const fn coords_to_index((x, y): Coord2, side: Coord) -> CellIndex {
    (y as CellIndex) * (side as CellIndex) + (x as CellIndex)
}
