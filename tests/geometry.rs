use itertools::{iproduct, Itertools as _};
#[allow(unused_imports)]
use pretty_assertions::{assert_eq, assert_ne};

use shogiban::*;

/// 盤を 180 度回転したマスを返す。
fn rotate(sq: Square) -> Square {
    Square::from_index(8 - sq.row_index(), 8 - sq.col_index())
}

fn sorted(sqs: impl IntoIterator<Item = Square>) -> Vec<Square> {
    sqs.into_iter().sorted().collect()
}

fn all_squares() -> Vec<Square> {
    Square::iter().collect_vec()
}

fn all_sides() -> Vec<Side> {
    Side::iter().collect_vec()
}

/// 空の盤上では、移動先は常に盤内で、移動元を含まず、重複もない。
#[test]
fn test_reachable_on_empty_board() {
    for (pk, side, src) in iproduct!(PieceKind::iter_piece(), all_sides(), all_squares()) {
        let pc = Piece::new(side, pk);
        let mut board = Board::empty();
        board[src] = pc;

        let sqs = reachable_squares(&board, src, pc);

        assert!(sqs.iter().all(|sq| sq.is_on_board()));
        assert!(!sqs.contains(&src));
        assert!(sqs.iter().all_unique(), "{:?} at {:?}", pc, src);
    }
}

/// 後手の駒の移動先は、盤を回転した先手の駒の移動先と一致する。
#[test]
fn test_reachable_is_symmetric() {
    for (pk, src) in iproduct!(PieceKind::iter_piece(), all_squares()) {
        let mut board = Board::empty();
        board[src] = Piece::new(BLACK, pk);
        let sqs_black = reachable_squares(&board, src, Piece::new(BLACK, pk));

        let src_white = rotate(src);
        let mut board = Board::empty();
        board[src_white] = Piece::new(WHITE, pk);
        let sqs_white = reachable_squares(&board, src_white, Piece::new(WHITE, pk));

        assert_eq!(
            sorted(sqs_black.iter().copied().map(rotate)),
            sorted(sqs_white),
            "{:?} at {:?}",
            pk,
            src
        );
    }
}

/// 王と玉、および金と全ての小駒の成駒は同じ動きをする。
#[test]
fn test_equivalent_kinds() {
    for (src, side) in iproduct!(all_squares(), all_sides()) {
        let reach = |pk: PieceKind| {
            let pc = Piece::new(side, pk);
            let mut board = Board::empty();
            board[src] = pc;
            sorted(reachable_squares(&board, src, pc))
        };

        assert_eq!(reach(KING), reach(JADE));
        for pk in [PRO_PAWN, PRO_LANCE, PRO_KNIGHT, PRO_SILVER] {
            assert_eq!(reach(GOLD), reach(pk));
        }
    }
}

/// 中央の駒の移動先の数。
#[test]
fn test_reachable_count_at_center() {
    let expected = [
        (PAWN, 1),
        (LANCE, 4),
        (KNIGHT, 2),
        (SILVER, 5),
        (BISHOP, 16),
        (ROOK, 16),
        (GOLD, 6),
        (KING, 8),
        (HORSE, 20),
        (DRAGON, 20),
    ];

    for (pk, n) in expected {
        let pc = Piece::new(BLACK, pk);
        let mut board = Board::empty();
        board[SQ_55] = pc;

        assert_eq!(reachable_squares(&board, SQ_55, pc).len(), n, "{:?}", pk);
    }
}

/// 駒は敵駒を取れるが、自駒は取れない。
#[test]
fn test_blockers() {
    for (src, dst) in all_squares().into_iter().tuple_combinations() {
        for pk in [ROOK, BISHOP, KING] {
            let pc = Piece::new(BLACK, pk);

            let mut board = Board::empty();
            board[src] = pc;
            let reachable = reachable_squares(&board, src, pc).contains(&dst);

            board[dst] = W_PAWN;
            assert_eq!(reachable_squares(&board, src, pc).contains(&dst), reachable);

            board[dst] = B_PAWN;
            assert!(!reachable_squares(&board, src, pc).contains(&dst));
        }
    }
}
