//! 将棋の基本要素たち。
//!
//! 駒などは enum ではなく、いわゆる newtype で表現する。
//! 成駒や陣営をビット演算で求められるように内部値を割り当てたいため。
//!
//! 筋、段、マスの内部値は以下のように割り当てている:
//!
//! * 筋は１筋, ２筋, ..., ９筋の順。
//! * 段は一段目, 二段目, ..., 九段目の順。
//! * マスは１一, １二, ..., ９九の順。
//!
//! UI 側は盤面を (行, 列) のインデックスで扱う。行 0 が一段目(後手の最奥段)、列 0 が９筋である。
//! 相互変換は `Square::from_index()`, `Square::row_index()`, `Square::col_index()` で行う。

use std::iter::FusedIterator;

/// 陣営。先手が手前(盤面下側)、後手が奥(盤面上側)。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Side(u32);

pub const BLACK: Side = Side(0);
pub const WHITE: Side = Side(1);

impl Side {
    /// 有効値かどうかを返す。
    pub const fn is_valid(self) -> bool {
        self.0 == BLACK.0 || self.0 == WHITE.0
    }

    /// 敵陣営を返す。
    pub const fn inv(self) -> Side {
        Self(self.0 ^ 1)
    }

    /// 陣営の駒の向きを返す。先手は上向き、後手は下向き。
    pub const fn orientation(self) -> Orientation {
        if self.0 == BLACK.0 {
            Orientation::Up
        } else {
            Orientation::Down
        }
    }

    /// 棋譜で使う手番記号を返す。
    pub const fn mark(self) -> char {
        if self.0 == BLACK.0 {
            '☗'
        } else {
            '☖'
        }
    }

    /// 陣営を昇順に列挙する。(`BLACK`、`WHITE` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        [BLACK, WHITE].into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl From<Side> for usize {
    fn from(side: Side) -> Self {
        debug_assert!(side.is_valid());

        side.0 as Self
    }
}

impl std::fmt::Debug for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            BLACK => write!(f, "BLACK"),
            WHITE => write!(f, "WHITE"),
            _ => write!(f, "Side({})", self.0),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            BLACK => write!(f, "先手"),
            WHITE => write!(f, "後手"),
            side => write!(f, "無効な陣営({})", side.0),
        }
    }
}

/// 駒の向き。
///
/// 陣営から一意に決まるので駒には持たせず、必要な箇所で `Side::orientation()` から求める。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Orientation {
    /// 段が小さくなる方向へ進む(先手)。
    Up,
    /// 段が大きくなる方向へ進む(後手)。
    Down,
}

impl Orientation {
    /// 前進したときの段の差分を返す。
    pub const fn forward(self) -> i32 {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

/// 盤面の筋。たとえば `COL_3` は３筋。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Col(i32);

pub const COL_1: Col = Col(0);
pub const COL_2: Col = Col(1);
pub const COL_3: Col = Col(2);
pub const COL_4: Col = Col(3);
pub const COL_5: Col = Col(4);
pub const COL_6: Col = Col(5);
pub const COL_7: Col = Col(6);
pub const COL_8: Col = Col(7);
pub const COL_9: Col = Col(8);

impl Col {
    /// 筋が盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        COL_1.0 <= self.0 && self.0 <= COL_9.0
    }

    /// 筋の番号(1..=9)を返す。
    pub const fn to_number(self) -> u32 {
        debug_assert!(self.is_on_board());

        (self.0 + 1) as u32
    }

    /// 全ての筋を昇順に列挙する。(`COL_1`, `COL_2`, ..., `COL_9` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        [
            COL_1, COL_2, COL_3, COL_4, COL_5, COL_6, COL_7, COL_8, COL_9,
        ]
        .into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl std::ops::Add<i32> for Col {
    type Output = Col;

    fn add(self, rhs: i32) -> Col {
        Col(self.0 + rhs)
    }
}

impl std::ops::Sub<i32> for Col {
    type Output = Col;

    fn sub(self, rhs: i32) -> Col {
        Col(self.0 - rhs)
    }
}

impl std::ops::Sub<Self> for Col {
    type Output = i32;

    fn sub(self, rhs: Self) -> i32 {
        self.0 - rhs.0
    }
}

impl std::fmt::Debug for Col {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "COL_{}", self.0 + 1)
        } else {
            write!(f, "Col({})", self.0)
        }
    }
}

impl std::fmt::Display for Col {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const ZENKAKU: [&str; 9] = ["１", "２", "３", "４", "５", "６", "７", "８", "９"];

        if self.is_on_board() {
            f.write_str(ZENKAKU[self.0 as usize])
        } else {
            write!(f, "無効な筋({})", self.0)
        }
    }
}

/// 盤面の段。たとえば `ROW_3` は三段目。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Row(i32);

pub const ROW_1: Row = Row(0);
pub const ROW_2: Row = Row(1);
pub const ROW_3: Row = Row(2);
pub const ROW_4: Row = Row(3);
pub const ROW_5: Row = Row(4);
pub const ROW_6: Row = Row(5);
pub const ROW_7: Row = Row(6);
pub const ROW_8: Row = Row(7);
pub const ROW_9: Row = Row(8);

impl Row {
    /// 段が盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        ROW_1.0 <= self.0 && self.0 <= ROW_9.0
    }

    /// 段の番号(1..=9)を返す。
    pub const fn to_number(self) -> u32 {
        debug_assert!(self.is_on_board());

        (self.0 + 1) as u32
    }

    /// 段が指定した陣営にとって敵陣(奥の 3 段)かどうかを返す。
    pub const fn is_promotion_zone(self, side: Side) -> bool {
        self.is_far(side, 3)
    }

    /// 段が指定した陣営から見て最も奥の `n` 段に含まれるかどうかを返す。
    pub const fn is_far(self, side: Side, n: i32) -> bool {
        match side.orientation() {
            Orientation::Up => self.0 < ROW_1.0 + n,
            Orientation::Down => self.0 > ROW_9.0 - n,
        }
    }

    /// 全ての段を昇順に列挙する。(`ROW_1`, `ROW_2`, ..., `ROW_9` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        [
            ROW_1, ROW_2, ROW_3, ROW_4, ROW_5, ROW_6, ROW_7, ROW_8, ROW_9,
        ]
        .into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl std::ops::Add<i32> for Row {
    type Output = Row;

    fn add(self, rhs: i32) -> Row {
        Row(self.0 + rhs)
    }
}

impl std::ops::Sub<Self> for Row {
    type Output = i32;

    fn sub(self, rhs: Self) -> i32 {
        self.0 - rhs.0
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "ROW_{}", self.0 + 1)
        } else {
            write!(f, "Row({})", self.0)
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const KANJI: [&str; 9] = ["一", "二", "三", "四", "五", "六", "七", "八", "九"];

        if self.is_on_board() {
            f.write_str(KANJI[self.0 as usize])
        } else {
            write!(f, "無効な段({})", self.0)
        }
    }
}

/// 盤面のマス。たとえば `SQ_45` は４五。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Square(i32);

pub const SQ_11: Square = Square::from_col_row(COL_1, ROW_1);
pub const SQ_12: Square = Square::from_col_row(COL_1, ROW_2);
pub const SQ_13: Square = Square::from_col_row(COL_1, ROW_3);
pub const SQ_14: Square = Square::from_col_row(COL_1, ROW_4);
pub const SQ_15: Square = Square::from_col_row(COL_1, ROW_5);
pub const SQ_16: Square = Square::from_col_row(COL_1, ROW_6);
pub const SQ_17: Square = Square::from_col_row(COL_1, ROW_7);
pub const SQ_18: Square = Square::from_col_row(COL_1, ROW_8);
pub const SQ_19: Square = Square::from_col_row(COL_1, ROW_9);
pub const SQ_21: Square = Square::from_col_row(COL_2, ROW_1);
pub const SQ_22: Square = Square::from_col_row(COL_2, ROW_2);
pub const SQ_23: Square = Square::from_col_row(COL_2, ROW_3);
pub const SQ_24: Square = Square::from_col_row(COL_2, ROW_4);
pub const SQ_25: Square = Square::from_col_row(COL_2, ROW_5);
pub const SQ_26: Square = Square::from_col_row(COL_2, ROW_6);
pub const SQ_27: Square = Square::from_col_row(COL_2, ROW_7);
pub const SQ_28: Square = Square::from_col_row(COL_2, ROW_8);
pub const SQ_29: Square = Square::from_col_row(COL_2, ROW_9);
pub const SQ_31: Square = Square::from_col_row(COL_3, ROW_1);
pub const SQ_32: Square = Square::from_col_row(COL_3, ROW_2);
pub const SQ_33: Square = Square::from_col_row(COL_3, ROW_3);
pub const SQ_34: Square = Square::from_col_row(COL_3, ROW_4);
pub const SQ_35: Square = Square::from_col_row(COL_3, ROW_5);
pub const SQ_36: Square = Square::from_col_row(COL_3, ROW_6);
pub const SQ_37: Square = Square::from_col_row(COL_3, ROW_7);
pub const SQ_38: Square = Square::from_col_row(COL_3, ROW_8);
pub const SQ_39: Square = Square::from_col_row(COL_3, ROW_9);
pub const SQ_41: Square = Square::from_col_row(COL_4, ROW_1);
pub const SQ_42: Square = Square::from_col_row(COL_4, ROW_2);
pub const SQ_43: Square = Square::from_col_row(COL_4, ROW_3);
pub const SQ_44: Square = Square::from_col_row(COL_4, ROW_4);
pub const SQ_45: Square = Square::from_col_row(COL_4, ROW_5);
pub const SQ_46: Square = Square::from_col_row(COL_4, ROW_6);
pub const SQ_47: Square = Square::from_col_row(COL_4, ROW_7);
pub const SQ_48: Square = Square::from_col_row(COL_4, ROW_8);
pub const SQ_49: Square = Square::from_col_row(COL_4, ROW_9);
pub const SQ_51: Square = Square::from_col_row(COL_5, ROW_1);
pub const SQ_52: Square = Square::from_col_row(COL_5, ROW_2);
pub const SQ_53: Square = Square::from_col_row(COL_5, ROW_3);
pub const SQ_54: Square = Square::from_col_row(COL_5, ROW_4);
pub const SQ_55: Square = Square::from_col_row(COL_5, ROW_5);
pub const SQ_56: Square = Square::from_col_row(COL_5, ROW_6);
pub const SQ_57: Square = Square::from_col_row(COL_5, ROW_7);
pub const SQ_58: Square = Square::from_col_row(COL_5, ROW_8);
pub const SQ_59: Square = Square::from_col_row(COL_5, ROW_9);
pub const SQ_61: Square = Square::from_col_row(COL_6, ROW_1);
pub const SQ_62: Square = Square::from_col_row(COL_6, ROW_2);
pub const SQ_63: Square = Square::from_col_row(COL_6, ROW_3);
pub const SQ_64: Square = Square::from_col_row(COL_6, ROW_4);
pub const SQ_65: Square = Square::from_col_row(COL_6, ROW_5);
pub const SQ_66: Square = Square::from_col_row(COL_6, ROW_6);
pub const SQ_67: Square = Square::from_col_row(COL_6, ROW_7);
pub const SQ_68: Square = Square::from_col_row(COL_6, ROW_8);
pub const SQ_69: Square = Square::from_col_row(COL_6, ROW_9);
pub const SQ_71: Square = Square::from_col_row(COL_7, ROW_1);
pub const SQ_72: Square = Square::from_col_row(COL_7, ROW_2);
pub const SQ_73: Square = Square::from_col_row(COL_7, ROW_3);
pub const SQ_74: Square = Square::from_col_row(COL_7, ROW_4);
pub const SQ_75: Square = Square::from_col_row(COL_7, ROW_5);
pub const SQ_76: Square = Square::from_col_row(COL_7, ROW_6);
pub const SQ_77: Square = Square::from_col_row(COL_7, ROW_7);
pub const SQ_78: Square = Square::from_col_row(COL_7, ROW_8);
pub const SQ_79: Square = Square::from_col_row(COL_7, ROW_9);
pub const SQ_81: Square = Square::from_col_row(COL_8, ROW_1);
pub const SQ_82: Square = Square::from_col_row(COL_8, ROW_2);
pub const SQ_83: Square = Square::from_col_row(COL_8, ROW_3);
pub const SQ_84: Square = Square::from_col_row(COL_8, ROW_4);
pub const SQ_85: Square = Square::from_col_row(COL_8, ROW_5);
pub const SQ_86: Square = Square::from_col_row(COL_8, ROW_6);
pub const SQ_87: Square = Square::from_col_row(COL_8, ROW_7);
pub const SQ_88: Square = Square::from_col_row(COL_8, ROW_8);
pub const SQ_89: Square = Square::from_col_row(COL_8, ROW_9);
pub const SQ_91: Square = Square::from_col_row(COL_9, ROW_1);
pub const SQ_92: Square = Square::from_col_row(COL_9, ROW_2);
pub const SQ_93: Square = Square::from_col_row(COL_9, ROW_3);
pub const SQ_94: Square = Square::from_col_row(COL_9, ROW_4);
pub const SQ_95: Square = Square::from_col_row(COL_9, ROW_5);
pub const SQ_96: Square = Square::from_col_row(COL_9, ROW_6);
pub const SQ_97: Square = Square::from_col_row(COL_9, ROW_7);
pub const SQ_98: Square = Square::from_col_row(COL_9, ROW_8);
pub const SQ_99: Square = Square::from_col_row(COL_9, ROW_9);

impl Square {
    /// 筋と段からマスを作る。
    pub const fn from_col_row(col: Col, row: Row) -> Self {
        Self(9 * col.0 + row.0)
    }

    /// UI 側の (行, 列) インデックスからマスを作る。盤面外のインデックスを渡してはならない。
    ///
    /// 行 0 は一段目、列 0 は９筋に対応する。
    pub const fn from_index(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);

        Self::from_col_row(Col(8 - col as i32), Row(row as i32))
    }

    /// 筋と段が共に盤面内であればマスを返す。
    pub fn checked_from_col_row(col: Col, row: Row) -> Option<Self> {
        (col.is_on_board() && row.is_on_board()).then(|| Self::from_col_row(col, row))
    }

    /// マスが盤面内かどうかを返す。
    pub const fn is_on_board(self) -> bool {
        SQ_11.0 <= self.0 && self.0 <= SQ_99.0
    }

    /// マスの属する筋を返す。
    pub const fn col(self) -> Col {
        debug_assert!(self.is_on_board());

        Col(self.0 / 9)
    }

    /// マスの属する段を返す。
    pub const fn row(self) -> Row {
        debug_assert!(self.is_on_board());

        Row(self.0 % 9)
    }

    /// UI 側の行インデックスを返す。
    pub const fn row_index(self) -> usize {
        self.row().0 as usize
    }

    /// UI 側の列インデックスを返す。
    pub const fn col_index(self) -> usize {
        (COL_9.0 - self.col().0) as usize
    }

    /// マスが指定した陣営にとって敵陣かどうかを返す。
    pub const fn is_promotion_zone(self, side: Side) -> bool {
        self.row().is_promotion_zone(side)
    }

    /// 全マスを昇順に列挙する。(`SQ_11`, `SQ_12`, ..., `SQ_99` の順)
    pub fn iter(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        (SQ_11.0..SQ_99.0 + 1).map(Self)
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> i32 {
        self.0
    }
}

impl From<Square> for usize {
    fn from(sq: Square) -> Self {
        debug_assert!(sq.is_on_board());

        sq.0 as Self
    }
}

impl std::fmt::Debug for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "SQ_{}{}", self.col().to_number(), self.row().to_number())
        } else {
            write!(f, "Square({})", self.0)
        }
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", self.col(), self.row())
        } else {
            write!(f, "無効なマス({})", self.0)
        }
    }
}

/// 駒種(陣営の区別なし)。
///
/// 玉将は先手の「王」(`KING`)と後手の「玉」(`JADE`)の 2 種があるが、動きは同一。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct PieceKind(u32);

// (1 << 3) を OR すると成駒、7 で AND すると元の駒になる。
// JADE はこの規則の外にあるので、成り/成り戻しの際は個別に扱う。

pub const NO_PIECE_KIND: PieceKind = PieceKind(0);
pub const PAWN: PieceKind = PieceKind(1);
pub const LANCE: PieceKind = PieceKind(2);
pub const KNIGHT: PieceKind = PieceKind(3);
pub const SILVER: PieceKind = PieceKind(4);
pub const BISHOP: PieceKind = PieceKind(5);
pub const ROOK: PieceKind = PieceKind(6);
pub const GOLD: PieceKind = PieceKind(7);
pub const KING: PieceKind = PieceKind(8);
pub const PRO_PAWN: PieceKind = PieceKind(9);
pub const PRO_LANCE: PieceKind = PieceKind(10);
pub const PRO_KNIGHT: PieceKind = PieceKind(11);
pub const PRO_SILVER: PieceKind = PieceKind(12);
pub const HORSE: PieceKind = PieceKind(13);
pub const DRAGON: PieceKind = PieceKind(14);
pub const JADE: PieceKind = PieceKind(15);

impl PieceKind {
    /// 有効値かどうかを返す。`NO_PIECE_KIND` も有効とみなす。
    pub const fn is_valid(self) -> bool {
        NO_PIECE_KIND.0 <= self.0 && self.0 <= JADE.0
    }

    /// 有効値かつ実際の駒かどうかを返す。`NO_PIECE_KIND` は実際の駒ではない。
    pub const fn is_piece(self) -> bool {
        PAWN.0 <= self.0 && self.0 <= JADE.0
    }

    /// 成れる駒種かどうかを返す。
    pub const fn is_promotable(self) -> bool {
        PAWN.0 <= self.0 && self.0 <= ROOK.0
    }

    /// 成駒かどうかを返す。
    pub const fn is_promoted(self) -> bool {
        PRO_PAWN.0 <= self.0 && self.0 <= DRAGON.0
    }

    /// 玉将(王または玉)かどうかを返す。
    pub const fn is_king(self) -> bool {
        self.0 == KING.0 || self.0 == JADE.0
    }

    /// 手駒となりうる駒種かどうかを返す。
    ///
    /// 詰将棋の配置などのため、玉将も手駒になりうるものとする。
    pub const fn is_hand(self) -> bool {
        self.is_piece() && !self.is_promoted()
    }

    /// 成った駒種を返す。`self` は成れる駒種でなければならない。
    pub const fn to_promoted(self) -> Self {
        debug_assert!(self.is_promotable());

        Self(self.0 | (1 << 3))
    }

    /// 成っていない駒種を返す。成駒でなければ `self` をそのまま返す。
    pub const fn to_demoted(self) -> Self {
        if self.is_promoted() {
            Self(self.0 & 7)
        } else {
            self
        }
    }

    /// 盤面表示用の 1 文字表記を返す。
    pub const fn to_glyph(self) -> char {
        const TABLE: [char; 16] = [
            '・', '歩', '香', '桂', '銀', '角', '飛', '金', '王', 'と', '杏', '圭', '全', '馬', '龍',
            '玉',
        ];

        debug_assert!(self.is_valid());

        TABLE[self.0 as usize]
    }

    /// 実際の駒である駒種を昇順に列挙する。
    pub fn iter_piece(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        [
            PAWN, LANCE, KNIGHT, SILVER, BISHOP, ROOK, GOLD, KING, PRO_PAWN, PRO_LANCE, PRO_KNIGHT,
            PRO_SILVER, HORSE, DRAGON, JADE,
        ]
        .into_iter()
    }

    /// 手駒となりうる駒種を表示順に列挙する。(王, 玉, 飛, 角, 金, 銀, 桂, 香, 歩 の順)
    pub fn iter_hand(
    ) -> impl Iterator<Item = Self> + DoubleEndedIterator + ExactSizeIterator + FusedIterator {
        [KING, JADE, ROOK, BISHOP, GOLD, SILVER, KNIGHT, LANCE, PAWN].into_iter()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl From<PieceKind> for usize {
    fn from(pk: PieceKind) -> Self {
        debug_assert!(pk.is_valid());

        pk.0 as Self
    }
}

impl std::fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            NO_PIECE_KIND => write!(f, "NO_PIECE_KIND"),
            PAWN => write!(f, "PAWN"),
            LANCE => write!(f, "LANCE"),
            KNIGHT => write!(f, "KNIGHT"),
            SILVER => write!(f, "SILVER"),
            BISHOP => write!(f, "BISHOP"),
            ROOK => write!(f, "ROOK"),
            GOLD => write!(f, "GOLD"),
            KING => write!(f, "KING"),
            PRO_PAWN => write!(f, "PRO_PAWN"),
            PRO_LANCE => write!(f, "PRO_LANCE"),
            PRO_KNIGHT => write!(f, "PRO_KNIGHT"),
            PRO_SILVER => write!(f, "PRO_SILVER"),
            HORSE => write!(f, "HORSE"),
            DRAGON => write!(f, "DRAGON"),
            JADE => write!(f, "JADE"),
            _ => write!(f, "PieceKind({})", self.0),
        }
    }
}

/// 棋譜表記での駒名。成銀、成桂、成香は 2 文字になる。
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            PRO_SILVER => f.write_str("成銀"),
            PRO_KNIGHT => f.write_str("成桂"),
            PRO_LANCE => f.write_str("成香"),
            pk if pk.is_valid() => write!(f, "{}", pk.to_glyph()),
            pk => write!(f, "無効な駒種({})", pk.0),
        }
    }
}

/// 駒(陣営の区別あり)。
///
/// 先手の駒に (1 << 4) を OR すると後手の駒になる。
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Piece(u32);

pub const NO_PIECE: Piece = Piece(0);
pub const B_PAWN: Piece = Piece::new(BLACK, PAWN);
pub const B_LANCE: Piece = Piece::new(BLACK, LANCE);
pub const B_KNIGHT: Piece = Piece::new(BLACK, KNIGHT);
pub const B_SILVER: Piece = Piece::new(BLACK, SILVER);
pub const B_BISHOP: Piece = Piece::new(BLACK, BISHOP);
pub const B_ROOK: Piece = Piece::new(BLACK, ROOK);
pub const B_GOLD: Piece = Piece::new(BLACK, GOLD);
pub const B_KING: Piece = Piece::new(BLACK, KING);
pub const B_PRO_PAWN: Piece = Piece::new(BLACK, PRO_PAWN);
pub const B_PRO_LANCE: Piece = Piece::new(BLACK, PRO_LANCE);
pub const B_PRO_KNIGHT: Piece = Piece::new(BLACK, PRO_KNIGHT);
pub const B_PRO_SILVER: Piece = Piece::new(BLACK, PRO_SILVER);
pub const B_HORSE: Piece = Piece::new(BLACK, HORSE);
pub const B_DRAGON: Piece = Piece::new(BLACK, DRAGON);
pub const B_JADE: Piece = Piece::new(BLACK, JADE);
pub const W_PAWN: Piece = Piece::new(WHITE, PAWN);
pub const W_LANCE: Piece = Piece::new(WHITE, LANCE);
pub const W_KNIGHT: Piece = Piece::new(WHITE, KNIGHT);
pub const W_SILVER: Piece = Piece::new(WHITE, SILVER);
pub const W_BISHOP: Piece = Piece::new(WHITE, BISHOP);
pub const W_ROOK: Piece = Piece::new(WHITE, ROOK);
pub const W_GOLD: Piece = Piece::new(WHITE, GOLD);
pub const W_KING: Piece = Piece::new(WHITE, KING);
pub const W_PRO_PAWN: Piece = Piece::new(WHITE, PRO_PAWN);
pub const W_PRO_LANCE: Piece = Piece::new(WHITE, PRO_LANCE);
pub const W_PRO_KNIGHT: Piece = Piece::new(WHITE, PRO_KNIGHT);
pub const W_PRO_SILVER: Piece = Piece::new(WHITE, PRO_SILVER);
pub const W_HORSE: Piece = Piece::new(WHITE, HORSE);
pub const W_DRAGON: Piece = Piece::new(WHITE, DRAGON);
pub const W_JADE: Piece = Piece::new(WHITE, JADE);

impl Piece {
    /// 陣営と駒種を指定して駒を作る。pk は実際の駒でなければならない。
    pub const fn new(side: Side, pk: PieceKind) -> Self {
        debug_assert!(pk.is_piece());

        Self((side.0 << 4) | pk.0)
    }

    /// 有効値かつ実際の駒かどうかを返す。`NO_PIECE` は実際の駒ではない。
    pub const fn is_piece(self) -> bool {
        self.0 <= W_JADE.0 && (self.0 & 0xF) != 0
    }

    /// 指定した陣営の駒かどうかを返す。`NO_PIECE` に対しては常に false。
    pub const fn is_owned_by(self, side: Side) -> bool {
        self.is_piece() && ((self.0 >> 4) & 1) == side.0
    }

    /// 成れる駒かどうかを返す。
    pub const fn is_promotable(self) -> bool {
        self.kind().is_promotable()
    }

    /// 成駒かどうかを返す。
    pub const fn is_promoted(self) -> bool {
        self.kind().is_promoted()
    }

    /// 所属陣営を返す。`self` は実際の駒でなければならない。
    pub const fn side(self) -> Side {
        debug_assert!(self.is_piece());

        Side((self.0 >> 4) & 1)
    }

    /// 駒種を返す。
    pub const fn kind(self) -> PieceKind {
        PieceKind(self.0 & 0xF)
    }

    /// 成った駒を返す。`self` は成れる駒でなければならない。
    pub const fn to_promoted(self) -> Self {
        debug_assert!(self.is_promotable());

        Self(self.0 | (1 << 3))
    }

    /// 成っていない駒種を返す。
    pub const fn to_demoted_kind(self) -> PieceKind {
        self.kind().to_demoted()
    }

    /// 内部値を返す。`const` 文脈で使える。
    pub const fn inner(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if *self == NO_PIECE {
            return write!(f, "NO_PIECE");
        }
        if !self.is_piece() {
            return write!(f, "Piece({})", self.0);
        }

        let prefix = if self.side() == BLACK { "B" } else { "W" };
        write!(f, "{}_{:?}", prefix, self.kind())
    }
}

/// 指し手。
///
/// `u32` に pack されている:
///
/// * bit0-6:   移動先
/// * bit7-13:  移動元(駒打ちなら打った駒種)
/// * bit14:    駒打ちか
/// * bit15:    成りを要求するか
///
/// 成りフラグはあくまで要求であり、実際に成るかどうかは局面側で決まる(成れない場合は無視、
/// 行き所のない駒は要求がなくても成る)。
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Move(u32);

impl Move {
    const FLAG_DROP: u32 = 1 << 14;
    const FLAG_PROMOTION: u32 = 1 << 15;

    /// 盤上の駒を動かして成らない指し手を作る。
    pub const fn new_walk(src: Square, dst: Square) -> Self {
        debug_assert!(src.is_on_board());
        debug_assert!(dst.is_on_board());

        Self((dst.0 as u32) | ((src.0 as u32) << 7))
    }

    /// 盤上の駒を動かして成りを要求する指し手を作る。
    pub const fn new_walk_promotion(src: Square, dst: Square) -> Self {
        Self(Self::new_walk(src, dst).0 | Self::FLAG_PROMOTION)
    }

    /// 駒打ちの指し手を作る。
    ///
    /// `pk` は手駒となりうる駒種でなければならない。
    pub const fn new_drop(pk: PieceKind, dst: Square) -> Self {
        debug_assert!(pk.is_hand());
        debug_assert!(dst.is_on_board());

        Self((dst.0 as u32) | (pk.0 << 7) | Self::FLAG_DROP)
    }

    /// 指し手が有効かどうかを返す。盤面は考慮しない。
    pub const fn is_valid(self) -> bool {
        if self.is_drop() && self.is_promotion() {
            return false;
        }

        let dst = self.dst();

        if self.is_drop() {
            self.dropped_piece_kind().is_hand() && dst.is_on_board()
        } else {
            let src = self.src();
            src.0 != dst.0 && src.is_on_board() && dst.is_on_board()
        }
    }

    /// 駒打ちかどうかを返す。
    pub const fn is_drop(self) -> bool {
        (self.0 & Self::FLAG_DROP) != 0
    }

    /// 成りを要求しているかどうかを返す。
    pub const fn is_promotion(self) -> bool {
        (self.0 & Self::FLAG_PROMOTION) != 0
    }

    /// 移動先を返す。
    pub const fn dst(self) -> Square {
        Square((self.0 & 0x7F) as i32)
    }

    /// 移動元を返す。`self` は盤上の駒を動かす指し手でなければならない。
    pub const fn src(self) -> Square {
        debug_assert!(!self.is_drop());

        Square(((self.0 >> 7) & 0x7F) as i32)
    }

    /// 打った駒種を返す。`self` は駒打ちでなければならない。
    pub const fn dropped_piece_kind(self) -> PieceKind {
        debug_assert!(self.is_drop());

        PieceKind((self.0 >> 7) & 0x7F)
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        #[allow(dead_code)]
        #[derive(Debug)]
        enum MoveDebug {
            Walk { src: Square, dst: Square, promo: bool },
            Drop { pk: PieceKind, dst: Square },
        }

        if !self.is_valid() {
            return write!(f, "Move({})", self.0);
        }

        let mv_dbg = if self.is_drop() {
            MoveDebug::Drop {
                pk: self.dropped_piece_kind(),
                dst: self.dst(),
            }
        } else {
            MoveDebug::Walk {
                src: self.src(),
                dst: self.dst(),
                promo: self.is_promotion(),
            }
        };

        write!(f, "{:?}", mv_dbg)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if !self.is_valid() {
            return write!(f, "無効な指し手({})", self.0);
        }

        if self.is_drop() {
            write!(f, "{}{}打", self.dst(), self.dropped_piece_kind())?;
        } else {
            write!(f, "{}{}", self.src(), self.dst())?;
            if self.is_promotion() {
                f.write_str("成")?;
            }
        }

        Ok(())
    }
}

/// 盤面。
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Board([Piece; 81]);

impl Board {
    /// 空の盤面を返す。
    pub const fn empty() -> Self {
        Self([NO_PIECE; 81])
    }

    /// 平手初期盤面を返す。先手玉は「王」、後手玉は「玉」。
    pub const fn startpos() -> Self {
        #[rustfmt::skip]
        const INNER: [Piece; 81] = [
            W_LANCE,  NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_LANCE,
            W_KNIGHT, W_BISHOP, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, B_ROOK,   B_KNIGHT,
            W_SILVER, NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_SILVER,
            W_GOLD,   NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_GOLD,
            W_JADE,   NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_KING,
            W_GOLD,   NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_GOLD,
            W_SILVER, NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_SILVER,
            W_KNIGHT, W_ROOK,   W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, B_BISHOP, B_KNIGHT,
            W_LANCE,  NO_PIECE, W_PAWN, NO_PIECE, NO_PIECE, NO_PIECE, B_PAWN, NO_PIECE, B_LANCE,
        ];

        Self(INNER)
    }

    /// 盤上の駒の総数を返す。
    pub fn count_pieces(&self) -> usize {
        self.0.iter().filter(|pc| pc.is_piece()).count()
    }

    /// 駒のあるマスとその駒を列挙する。
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter()
            .map(move |sq| (sq, self[sq]))
            .filter(|(_, pc)| pc.is_piece())
    }
}

impl std::ops::Index<Square> for Board {
    type Output = Piece;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[usize::from(sq)]
    }
}

impl std::ops::IndexMut<Square> for Board {
    fn index_mut(&mut self, sq: Square) -> &mut Self::Output {
        &mut self.0[usize::from(sq)]
    }
}

/// 1 段につき 1 行。後手の駒には "v" を前置する。
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in Row::iter() {
            for col in Col::iter().rev() {
                let pc = self[Square::from_col_row(col, row)];
                if pc.is_owned_by(WHITE) {
                    f.write_str("v")?;
                } else {
                    f.write_str(" ")?;
                }
                write!(f, "{}", pc.kind().to_glyph())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// 手駒。
///
/// 駒種ごとの枚数を持つ単純な配列。枚数 0 は「持っていない」と同義で、
/// 列挙の際には現れない。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(transparent)]
pub struct Hand([u32; 16]);

impl Hand {
    /// 空の手駒を返す。
    pub const fn empty() -> Self {
        Self([0; 16])
    }

    /// 玉将 1 枚と、それ以外の駒を 1 組分全て持つ手駒を返す(駒の配置検討用)。
    ///
    /// `king` には `KING` または `JADE` を渡す。
    pub fn full(king: PieceKind) -> Self {
        debug_assert!(king.is_king());

        let mut hand = Self::empty();
        hand[king] = 1;
        hand[ROOK] = 1;
        hand[BISHOP] = 1;
        hand[GOLD] = 2;
        hand[SILVER] = 2;
        hand[KNIGHT] = 2;
        hand[LANCE] = 2;
        hand[PAWN] = 9;

        hand
    }

    /// 手駒が空かどうかを返す。
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// 手駒の総数を返す。
    pub fn count(&self) -> u32 {
        self.0.iter().sum()
    }

    /// 持っている駒種と枚数を表示順に列挙する。枚数 0 の駒種は現れない。
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u32)> + '_ {
        PieceKind::iter_hand()
            .map(move |pk| (pk, self[pk]))
            .filter(|&(_, n)| n > 0)
    }
}

impl std::ops::Index<PieceKind> for Hand {
    type Output = u32;

    /// 手駒とならない駒種を渡してはならない。
    fn index(&self, pk: PieceKind) -> &Self::Output {
        debug_assert!(pk.is_hand());

        &self.0[usize::from(pk)]
    }
}

impl std::ops::IndexMut<PieceKind> for Hand {
    /// 手駒とならない駒種を渡してはならない。
    fn index_mut(&mut self, pk: PieceKind) -> &mut Self::Output {
        debug_assert!(pk.is_hand());

        &mut self.0[usize::from(pk)]
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("なし");
        }

        for (pk, n) in self.iter() {
            write!(f, "{}", pk)?;
            if n >= 2 {
                write!(f, "{}", n)?;
            }
        }

        Ok(())
    }
}

/// 両陣営の手駒。`Side` でインデックスアクセスできる。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Hands([Hand; 2]);

impl Hands {
    /// 先手、後手の手駒から作る。
    pub const fn new(black: Hand, white: Hand) -> Self {
        Self([black, white])
    }

    /// 両陣営とも空の手駒を返す。
    pub const fn empty() -> Self {
        Self([Hand::empty(); 2])
    }

    /// 両陣営の手駒を先手、後手の順に列挙する。
    pub fn iter(&self) -> impl Iterator<Item = &Hand> + '_ {
        self.0.iter()
    }
}

impl std::ops::Index<Side> for Hands {
    type Output = Hand;

    fn index(&self, side: Side) -> &Self::Output {
        &self.0[usize::from(side)]
    }
}

impl std::ops::IndexMut<Side> for Hands {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.0[usize::from(side)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_square_index() {
        assert_eq!(Square::from_index(0, 0), SQ_91);
        assert_eq!(Square::from_index(8, 8), SQ_19);
        assert_eq!(Square::from_index(6, 2), SQ_77);

        for sq in Square::iter() {
            assert_eq!(Square::from_index(sq.row_index(), sq.col_index()), sq);
        }
    }

    #[test]
    fn test_square_display() {
        assert_eq!(SQ_76.to_string(), "７六");
        assert_eq!(format!("{:?}", SQ_76), "SQ_76");
    }

    #[test]
    fn test_promotion_zone() {
        assert!(ROW_3.is_promotion_zone(BLACK));
        assert!(!ROW_4.is_promotion_zone(BLACK));
        assert!(ROW_7.is_promotion_zone(WHITE));
        assert!(!ROW_6.is_promotion_zone(WHITE));

        assert!(ROW_2.is_far(BLACK, 2));
        assert!(!ROW_3.is_far(BLACK, 2));
        assert!(ROW_9.is_far(WHITE, 1));
        assert!(!ROW_8.is_far(WHITE, 1));
    }

    #[test]
    fn test_piece_kind() {
        for pk in [PAWN, LANCE, KNIGHT, SILVER, BISHOP, ROOK] {
            assert!(pk.is_promotable());
            assert_eq!(pk.to_promoted().to_demoted(), pk);
        }
        for pk in [GOLD, KING, JADE] {
            assert!(!pk.is_promotable());
            assert_eq!(pk.to_demoted(), pk);
        }
        assert_eq!(DRAGON.to_demoted(), ROOK);
        assert_eq!(PRO_SILVER.to_string(), "成銀");
        assert_eq!(PRO_SILVER.to_glyph(), '全');
    }

    #[test]
    fn test_piece() {
        assert_eq!(Piece::new(WHITE, HORSE), W_HORSE);
        assert_eq!(W_HORSE.side(), WHITE);
        assert_eq!(W_HORSE.kind(), HORSE);
        assert_eq!(W_HORSE.to_demoted_kind(), BISHOP);
        assert!(B_JADE.is_owned_by(BLACK));
        assert!(!NO_PIECE.is_owned_by(BLACK));
        assert!(!NO_PIECE.is_owned_by(WHITE));
        assert_eq!(format!("{:?}", W_PRO_PAWN), "W_PRO_PAWN");
    }

    #[test]
    fn test_startpos() {
        let board = Board::startpos();
        assert_eq!(board.count_pieces(), 40);
        assert_eq!(board[SQ_59], B_KING);
        assert_eq!(board[SQ_51], W_JADE);
        assert_eq!(board[SQ_22], W_BISHOP);
        assert_eq!(board[SQ_82], W_ROOK);
        assert_eq!(board[SQ_88], B_BISHOP);
        assert_eq!(board[SQ_28], B_ROOK);
    }

    #[test]
    fn test_hand() {
        let mut hand = Hand::empty();
        assert_eq!(hand.to_string(), "なし");

        hand[PAWN] = 3;
        hand[ROOK] = 1;
        assert_eq!(hand.iter().collect::<Vec<_>>(), [(ROOK, 1), (PAWN, 3)]);
        assert_eq!(hand.to_string(), "飛歩3");

        hand[ROOK] = 0;
        assert_eq!(hand.iter().collect::<Vec<_>>(), [(PAWN, 3)]);

        assert_eq!(Hand::full(KING).count(), 20);
    }

    #[test]
    fn test_move() {
        let mv = Move::new_walk_promotion(SQ_24, SQ_23);
        assert!(mv.is_valid());
        assert!(mv.is_promotion());
        assert_eq!(mv.src(), SQ_24);
        assert_eq!(mv.dst(), SQ_23);
        assert_eq!(mv.to_string(), "２四２三成");

        let mv = Move::new_drop(PAWN, SQ_55);
        assert!(mv.is_drop());
        assert_eq!(mv.dropped_piece_kind(), PAWN);
        assert_eq!(mv.to_string(), "５五歩打");
    }
}
