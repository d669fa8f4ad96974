//! 駒打ちの打ち先の列挙。

use crate::shogi::*;

use super::{is_nifu, SquareArray};

/// 陣営 `side` が駒種 `pk` を打てるマスを全て返す。
///
/// 空きマス全てが対象。歩の場合は二歩となる筋を除く。
/// 行き所のない駒の打ち込みは禁止しない。
pub fn drop_squares(board: &Board, side: Side, pk: PieceKind) -> SquareArray {
    debug_assert!(pk.is_hand());

    Square::iter()
        .filter(|&sq| board[sq] == NO_PIECE)
        .filter(|&sq| pk != PAWN || !is_nifu(board, side, sq.col()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_drop_squares() {
        let board = Board::startpos();

        assert_eq!(drop_squares(&board, BLACK, GOLD).len(), 81 - 40);

        // 全ての筋に自分の歩があるので歩は打てない。
        assert!(drop_squares(&board, BLACK, PAWN).is_empty());
    }

    #[test]
    fn test_drop_squares_pawn() {
        let mut board = Board::empty();
        board[SQ_57] = B_PAWN;
        board[SQ_33] = W_PAWN;
        board[SQ_73] = B_PRO_PAWN;

        let sqs = drop_squares(&board, BLACK, PAWN);

        assert!(sqs.iter().all(|sq| sq.col() != COL_5));
        assert!(sqs.contains(&SQ_34));
        assert!(sqs.contains(&SQ_74));
        assert_eq!(sqs.len(), 81 - 9 - 2);
    }
}
