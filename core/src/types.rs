/// Single coordinate axis used for board width, height, rows and columns.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major position of a cell, `row * width + col`.
pub type CellIndex = usize;

/// Two-dimensional coordinates `(row, col)`.
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

/// Splits a row-major index into `(row, col)` for a board `width` cells wide.
///
/// The caller guarantees the index is in range, which keeps both parts below `Coord::MAX`.
pub const fn index_to_coords(index: CellIndex, width: Coord) -> Coord2 {
    let width = width as CellIndex;
    ((index / width) as Coord, (index % width) as Coord)
}

pub const fn coords_to_index((row, col): Coord2, width: Coord) -> CellIndex {
    row as CellIndex * width as CellIndex + col as CellIndex
}

/// In-bounds neighbors of `center` on a grid of `bounds = (rows, cols)`, in row-major order.
///
/// Clips the 3x3 block around the center to the grid, so corners yield 3 and edges 5.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    let (rows, cols) = bounds;
    let row_span = row.saturating_sub(1)..=row.saturating_add(1).min(rows.saturating_sub(1));
    let col_span = col.saturating_sub(1)..=col.saturating_add(1).min(cols.saturating_sub(1));

    row_span
        .flat_map(move |r| col_span.clone().map(move |c| (r, c)))
        .filter(move |&pos| pos != center)
}
