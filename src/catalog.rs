//! 駒の動きの定義。
//!
//! 各駒種について、10 方向(8 近傍 + 桂馬の 2 方向)それぞれに何マスまで進めるかを持つ。
//! 値は 0 (進めない), 1 (1 マスのみ), 9 (盤端または他の駒に当たるまで) のいずれか。
//! 表は上向き(先手)の駒について定義し、下向きの駒は段方向の差分を反転して使う。

use std::iter::FusedIterator;

use crate::shogi::*;

/// 駒の移動方向。
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Direction(u32);

impl Direction {
    pub const U: Direction = Direction(0);
    pub const RU: Direction = Direction(1);
    pub const R: Direction = Direction(2);
    pub const RD: Direction = Direction(3);
    pub const D: Direction = Direction(4);
    pub const LD: Direction = Direction(5);
    pub const L: Direction = Direction(6);
    pub const LU: Direction = Direction(7);
    pub const RUU: Direction = Direction(8);
    pub const LUU: Direction = Direction(9);

    /// 有効値かどうかを返す。
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::LUU.0
    }

    /// 全方向を列挙する。
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        [
            Self::U,
            Self::RU,
            Self::R,
            Self::RD,
            Self::D,
            Self::LD,
            Self::L,
            Self::LU,
            Self::RUU,
            Self::LUU,
        ]
        .into_iter()
    }

    /// 指定した向きの駒がこの方向へ 1 歩進んだときの (筋, 段) の差分を返す。
    ///
    /// 右は１筋側(筋の番号が減る側)。下向きの駒は段の差分のみ反転する。
    pub const fn delta(self, orientation: Orientation) -> (i32, i32) {
        const TABLE: [(i32, i32); 10] = [
            (0, -1),
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
            (1, 0),
            (1, -1),
            (-1, -2),
            (1, -2),
        ];

        debug_assert!(self.is_valid());

        let (dc, dr) = TABLE[self.0 as usize];
        match orientation {
            Orientation::Up => (dc, dr),
            Orientation::Down => (dc, -dr),
        }
    }
}

impl From<Direction> for usize {
    fn from(dir: Direction) -> Self {
        debug_assert!(dir.is_valid());

        dir.0 as Self
    }
}

impl std::fmt::Debug for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::U => write!(f, "Direction::U"),
            Self::RU => write!(f, "Direction::RU"),
            Self::R => write!(f, "Direction::R"),
            Self::RD => write!(f, "Direction::RD"),
            Self::D => write!(f, "Direction::D"),
            Self::LD => write!(f, "Direction::LD"),
            Self::L => write!(f, "Direction::L"),
            Self::LU => write!(f, "Direction::LU"),
            Self::RUU => write!(f, "Direction::RUU"),
            Self::LUU => write!(f, "Direction::LUU"),
            _ => write!(f, "Direction({})", self.0),
        }
    }
}

/// 飛び駒の最大移動距離。盤の 1 辺より大きければ何でもよい。
pub const RANGE_UNLIMITED: u8 = 9;

/// 駒種 `pk` が方向 `dir` へ進める最大距離を返す。
pub const fn range(pk: PieceKind, dir: Direction) -> u8 {
    const N: u8 = RANGE_UNLIMITED;

    // 列の並びは U, RU, R, RD, D, LD, L, LU, RUU, LUU。
    #[rustfmt::skip]
    const TABLE: [[u8; 10]; 16] = [
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0], // NO_PIECE_KIND
        [1, 0, 0, 0, 0, 0, 0, 0, 0, 0], // PAWN
        [N, 0, 0, 0, 0, 0, 0, 0, 0, 0], // LANCE
        [0, 0, 0, 0, 0, 0, 0, 0, 1, 1], // KNIGHT
        [1, 1, 0, 1, 0, 1, 0, 1, 0, 0], // SILVER
        [0, N, 0, N, 0, N, 0, N, 0, 0], // BISHOP
        [N, 0, N, 0, N, 0, N, 0, 0, 0], // ROOK
        [1, 1, 1, 0, 1, 0, 1, 1, 0, 0], // GOLD
        [1, 1, 1, 1, 1, 1, 1, 1, 0, 0], // KING
        [1, 1, 1, 0, 1, 0, 1, 1, 0, 0], // PRO_PAWN
        [1, 1, 1, 0, 1, 0, 1, 1, 0, 0], // PRO_LANCE
        [1, 1, 1, 0, 1, 0, 1, 1, 0, 0], // PRO_KNIGHT
        [1, 1, 1, 0, 1, 0, 1, 1, 0, 0], // PRO_SILVER
        [1, N, 1, N, 1, N, 1, N, 0, 0], // HORSE
        [N, 1, N, 1, N, 1, N, 1, 0, 0], // DRAGON
        [1, 1, 1, 1, 1, 1, 1, 1, 0, 0], // JADE
    ];

    debug_assert!(pk.is_valid());
    debug_assert!(dir.is_valid());

    TABLE[pk.inner() as usize][dir.0 as usize]
}

/// 駒種 `pk` が飛び利きを持つかどうかを返す。
pub fn is_slider(pk: PieceKind) -> bool {
    Direction::iter().any(|dir| range(pk, dir) == RANGE_UNLIMITED)
}
