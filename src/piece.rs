//! Piece catalog: the seven shapes as 4x4 bitmasks, random selection.

use rand::Rng;

/// Side of the square bounding box every piece lives in.
pub const PIECE_SIZE: usize = 4;

/// Piece kinds (I, J, L, O, S, T, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [Self::I, Self::J, Self::L, Self::O, Self::S, Self::T, Self::Z];

    /// Spawn pattern, one nibble per row. Bit 3 is column 0.
    const fn rows(self) -> [u8; PIECE_SIZE] {
        match self {
            Self::I => [0b0000, 0b1111, 0b0000, 0b0000],
            Self::J => [0b1000, 0b1110, 0b0000, 0b0000],
            Self::L => [0b0010, 0b1110, 0b0000, 0b0000],
            Self::O => [0b1100, 0b1100, 0b0000, 0b0000],
            Self::S => [0b0110, 0b1100, 0b0000, 0b0000],
            Self::T => [0b0100, 0b1110, 0b0000, 0b0000],
            Self::Z => [0b1100, 0b0110, 0b0000, 0b0000],
        }
    }
}

/// A shape inside its bounding box. Rotating yields a new value; the
/// original is untouched so a rejected rotation costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rows: [u8; PIECE_SIZE],
}

impl Piece {
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rows: kind.rows(),
        }
    }

    /// Uniform pick among the seven kinds, independent of earlier picks.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())];
        Self::new(kind)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    fn mask(col: usize) -> u8 {
        0b1000 >> col
    }

    /// True if cell (row, col) of the bounding box is part of the piece.
    #[inline]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.rows[row] & Self::mask(col) != 0
    }

    /// Occupied `(row, col)` pairs of the bounding box.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..PIECE_SIZE).flat_map(move |row| {
            (0..PIECE_SIZE)
                .filter(move |&col| self.is_set(row, col))
                .map(move |col| (row, col))
        })
    }

    /// Quarter turn about the box centre: new (i, j) = old (S-1-j, i).
    pub fn rotated(&self) -> Self {
        let mut rows = [0u8; PIECE_SIZE];
        for (i, row) in rows.iter_mut().enumerate() {
            for j in 0..PIECE_SIZE {
                if self.is_set(PIECE_SIZE - 1 - j, i) {
                    *row |= Self::mask(j);
                }
            }
        }
        Self {
            kind: self.kind,
            rows,
        }
    }
}
