//! 盤上の駒の移動先の列挙。

use crate::catalog::{self, Direction};
use crate::shogi::*;

use super::SquareArray;

/// 盤面 `board` のマス `src` にある駒 `pc` の移動先を全て返す。順序は方向順。
///
/// 各方向について、駒の動きの範囲内で 1 マスずつ進み、
///
/// * 盤外に出たら打ち切る。
/// * 自駒に当たったらそのマスを含めずに打ち切る。
/// * 敵駒に当たったらそのマスを含めて打ち切る。
/// * 空きマスなら含めて先へ進む。
///
/// よって結果に `src` 自身、盤外のマス、自駒のあるマスは含まれない。
/// 王手放置などの合法性は考慮しない。
pub fn reachable_squares(board: &Board, src: Square, pc: Piece) -> SquareArray {
    debug_assert!(pc.is_piece());

    let side = pc.side();
    let orientation = side.orientation();

    let mut sqs = SquareArray::new();

    for dir in Direction::iter() {
        let (dc, dr) = dir.delta(orientation);
        let (mut col, mut row) = (src.col(), src.row());

        for _ in 0..catalog::range(pc.kind(), dir) {
            col = col + dc;
            row = row + dr;

            let dst = match Square::checked_from_col_row(col, row) {
                Some(dst) => dst,
                None => break,
            };

            let pc_dst = board[dst];
            if pc_dst.is_owned_by(side) {
                break;
            }
            sqs.push(dst);
            if pc_dst != NO_PIECE {
                break;
            }
        }
    }

    sqs
}
