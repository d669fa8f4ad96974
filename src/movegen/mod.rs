mod drop;
mod rule;
mod walk;

pub use self::drop::*;
pub use self::rule::*;
pub use self::walk::*;

use arrayvec::ArrayVec;

use crate::position::Position;
use crate::shogi::*;

/// マス配列。
///
/// 盤上のマス数を上限とする。移動先が最も多い龍や馬でも 20 マスなので、駒打ち先の列挙にも使い回せる。
pub type SquareArray = ArrayVec<Square, 81>;

/// 指し手配列。
///
/// 玉将も手駒になりうるので、9 種の手駒を空きマス全てに打つ手と盤上の駒の手を合わせても
/// 収まるようにしておく。
pub type MoveArray = ArrayVec<Move, 1024>;

/// 指定した局面で手番の側が指せる全ての指し手を生成する。生成順は未規定。
///
/// 駒の動きと二歩以外の制約(自殺手、打ち歩詰めなど)は考慮しない。
/// 成れる手については成る手と成らない手の両方を生成するが、行き所のない駒の不成は生成しない。
pub fn generate_moves(pos: &Position) -> MoveArray {
    let us = pos.side_to_move();
    let board = pos.board();

    let mut mvs = MoveArray::new();

    for (src, pc) in board.pieces().filter(|&(_, pc)| pc.side() == us) {
        for dst in reachable_squares(board, src, pc) {
            if can_promote(pc, src, dst) {
                mvs.push(Move::new_walk_promotion(src, dst));
                if must_promote(pc, dst) {
                    continue;
                }
            }
            mvs.push(Move::new_walk(src, dst));
        }
    }

    for (pk, _) in pos.hands()[us].iter() {
        for dst in drop_squares(board, us, pk) {
            mvs.push(Move::new_drop(pk, dst));
        }
    }

    mvs
}
