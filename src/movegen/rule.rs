//! 成りと二歩の判定。

use crate::shogi::*;

/// 駒 `pc` が `src` から `dst` へ動くときに成れるかどうかを返す。
///
/// 成れる駒種であり、かつ移動元か移動先の少なくとも一方が敵陣であれば成れる。
pub fn can_promote(pc: Piece, src: Square, dst: Square) -> bool {
    let side = pc.side();

    pc.is_promotable() && (src.is_promotion_zone(side) || dst.is_promotion_zone(side))
}

/// 駒 `pc` が `dst` へ動いたとき、成らなければ行き所がなくなるかどうかを返す。
///
/// 歩、香は最奥段、桂は奥の 2 段が該当する。
pub fn must_promote(pc: Piece, dst: Square) -> bool {
    let side = pc.side();

    match pc.kind() {
        PAWN | LANCE => dst.row().is_far(side, 1),
        KNIGHT => dst.row().is_far(side, 2),
        _ => false,
    }
}

/// 筋 `col` に陣営 `side` の(成っていない)歩があるかどうかを返す。
///
/// これが真なら、その筋に `side` が歩を打つと二歩になる。
pub fn is_nifu(board: &Board, side: Side, col: Col) -> bool {
    let pawn = Piece::new(side, PAWN);

    Row::iter().any(|row| board[Square::from_col_row(col, row)] == pawn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_can_promote() {
        assert!(can_promote(B_SILVER, SQ_44, SQ_43));
        // 敵陣から出る手も成れる。
        assert!(can_promote(B_SILVER, SQ_43, SQ_54));
        assert!(!can_promote(B_SILVER, SQ_45, SQ_44));

        assert!(can_promote(W_PAWN, SQ_56, SQ_57));
        assert!(!can_promote(W_PAWN, SQ_55, SQ_56));

        assert!(!can_promote(B_GOLD, SQ_44, SQ_43));
        assert!(!can_promote(B_KING, SQ_44, SQ_43));
        assert!(!can_promote(B_DRAGON, SQ_44, SQ_43));
    }

    #[test]
    fn test_must_promote() {
        assert!(must_promote(B_PAWN, SQ_51));
        assert!(!must_promote(B_PAWN, SQ_52));
        assert!(must_promote(B_LANCE, SQ_11));
        assert!(must_promote(B_KNIGHT, SQ_32));
        assert!(!must_promote(B_KNIGHT, SQ_33));

        assert!(must_promote(W_PAWN, SQ_59));
        assert!(must_promote(W_KNIGHT, SQ_78));
        assert!(!must_promote(W_KNIGHT, SQ_77));

        assert!(!must_promote(B_SILVER, SQ_51));
    }

    #[test]
    fn test_is_nifu() {
        let mut board = Board::empty();
        board[SQ_57] = B_PAWN;
        board[SQ_43] = W_PAWN;
        board[SQ_33] = B_PRO_PAWN;

        assert!(is_nifu(&board, BLACK, COL_5));
        assert!(!is_nifu(&board, WHITE, COL_5));
        assert!(!is_nifu(&board, BLACK, COL_4));
        assert!(is_nifu(&board, WHITE, COL_4));
        assert!(!is_nifu(&board, BLACK, COL_3));
    }
}
