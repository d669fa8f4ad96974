//! 局面と、局面に対する着手・編集操作。
//!
//! 着手・編集操作はいずれも検査を全て済ませてから局面を変更する。
//! エラーを返した場合、局面は一切変更されていない。

use crate::error::{Error, Result};
use crate::movegen::{self, SquareArray};
use crate::mylog;
use crate::notation;
use crate::shogi::*;

/// 1 手分の着手記録。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MoveRecord {
    /// 手数(1 から)。
    pub ply: u32,
    pub side: Side,
    /// 移動元。駒打ちなら `None`。
    pub src: Option<Square>,
    pub dst: Square,
    /// 着手前の駒種。
    pub kind: PieceKind,
    pub promoted: bool,
    /// 取った駒。駒取りでなければ `NO_PIECE`。
    pub captured: Piece,
}

impl MoveRecord {
    pub fn is_drop(&self) -> bool {
        self.src.is_none()
    }

    pub fn is_capture(&self) -> bool {
        self.captured != NO_PIECE
    }
}

/// 局面。
///
/// 盤面と手駒に加え、棋譜文字列と直前の手の移動先も持つ。
/// 履歴の各スナップショットがそれぞれ独立に持つので、履歴を戻ってから指しても表記が正しくなる。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    board: Board,
    hands: Hands,
    side_to_move: Side,
    ply: u32, // 次に指す手の手数。1 から始まる。

    record: String,           // 棋譜文字列(新しい手が先頭、カンマ区切り)
    last_dst: Option<Square>, // 直前の手の移動先
}

impl Position {
    /// 手番、盤面、両陣営の手駒を指定して局面を作る。
    /// 合法性チェックは一切行わない。
    pub fn new(side_to_move: Side, board: Board, hands: Hands) -> Self {
        Self {
            board,
            hands,
            side_to_move,
            ply: 1,
            record: String::new(),
            last_dst: None,
        }
    }

    /// 平手初期局面を返す。
    pub fn startpos() -> Self {
        Self::new(BLACK, Board::startpos(), Hands::empty())
    }

    /// 検討用の局面を返す。盤上は空で、全ての駒が両陣営の手駒にある。
    ///
    /// 先手は王将、後手は玉将を持つ。
    pub fn study() -> Self {
        Self::new(
            BLACK,
            Board::empty(),
            Hands::new(Hand::full(KING), Hand::full(JADE)),
        )
    }

    /// 次に指す手の手数を返す。
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// 手番を返す。
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// 盤面への参照を返す。
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 両陣営の手駒への参照を返す。
    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    /// 指定した陣営の手駒への参照を返す。
    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side]
    }

    /// 棋譜文字列を返す。新しい手ほど前に来る。
    pub fn record(&self) -> &str {
        &self.record
    }

    /// 直前の手の移動先を返す。
    pub fn last_dst(&self) -> Option<Square> {
        self.last_dst
    }

    /// 盤上の駒と両陣営の手駒の総数を返す。
    pub fn count_pieces(&self) -> u32 {
        let n_board = self.board.count_pieces() as u32;
        let n_hand: u32 = self.hands.iter().map(Hand::count).sum();

        n_board + n_hand
    }

    /// マス `src` にある駒の移動先を全て返す。空きマスなら空を返す。
    pub fn reachable_squares(&self, src: Square) -> SquareArray {
        let pc = self.board[src];
        if !pc.is_piece() {
            return SquareArray::new();
        }

        movegen::reachable_squares(&self.board, src, pc)
    }

    /// 手数を 1 に戻し、直前の移動先を忘れる。手番はそのまま。
    pub fn reset_ply(&mut self) {
        self.ply = 1;
        self.last_dst = None;
    }

    /// 履歴の起点となるよう、手番を先手、手数を 1 に戻し、直前の移動先を忘れる。
    ///
    /// 盤面、手駒、棋譜文字列はそのまま残る。
    pub fn rebase(&mut self) {
        self.reset_ply();
        self.side_to_move = BLACK;
    }

    /// 棋譜文字列を消去する。
    pub fn clear_record(&mut self) {
        self.record.clear();
    }

    /// 指し手 `mv` で局面を進め、着手記録を返す。
    ///
    /// 成りは以下のように決まる:
    ///
    /// * 成れない手なら `mv` の成りフラグは無視される。
    /// * 成れる手で成りフラグが立っていれば成る。
    /// * 成れる手で行き所がなくなる場合、成りフラグによらず成る。
    pub fn do_move(&mut self, mv: Move) -> Result<MoveRecord> {
        let rec = if !mv.is_valid() {
            Err(Error::inconsistent_selection(format!("無効な指し手: {:?}", mv)))
        } else if mv.is_drop() {
            self.do_move_drop(mv)
        } else {
            self.do_move_walk(mv)
        };
        let rec = match rec {
            Ok(rec) => rec,
            Err(e) => {
                mylog::log_move_rejected(mv, &e);
                return Err(e);
            }
        };

        let line = notation::format_move(&rec, self.last_dst);
        notation::prepend_record(&mut self.record, &line);
        mylog::log_move(&line);

        self.last_dst = Some(rec.dst);
        self.side_to_move = self.side_to_move.inv();
        self.ply += 1;

        Ok(rec)
    }

    fn do_move_walk(&mut self, mv: Move) -> Result<MoveRecord> {
        let us = self.side_to_move;
        let src = mv.src();
        let dst = mv.dst();

        let pc_src = self.board[src];
        if !pc_src.is_piece() {
            return Err(Error::inconsistent_selection(format!(
                "移動元 {} に駒がない",
                src
            )));
        }
        if pc_src.side() != us {
            return Err(Error::inconsistent_selection(format!(
                "移動元 {} の駒は{}の駒ではない",
                src, us
            )));
        }
        if !movegen::reachable_squares(&self.board, src, pc_src).contains(&dst) {
            return Err(Error::IllegalDestination(dst));
        }

        let promoted = movegen::can_promote(pc_src, src, dst)
            && (mv.is_promotion() || movegen::must_promote(pc_src, dst));
        let pc_dst = if promoted { pc_src.to_promoted() } else { pc_src };

        // 自駒のあるマスは移動先に含まれないので、取る駒は必ず相手の駒。
        let pc_captured = self.board[dst];
        if pc_captured.is_piece() {
            self.hands[us][pc_captured.to_demoted_kind()] += 1;
        }

        self.board[src] = NO_PIECE;
        self.board[dst] = pc_dst;

        Ok(MoveRecord {
            ply: self.ply,
            side: us,
            src: Some(src),
            dst,
            kind: pc_src.kind(),
            promoted,
            captured: pc_captured,
        })
    }

    fn do_move_drop(&mut self, mv: Move) -> Result<MoveRecord> {
        let us = self.side_to_move;
        let pk = self.resolve_drop_kind(mv.dropped_piece_kind());
        let dst = mv.dst();

        if self.hands[us][pk] == 0 {
            return Err(Error::inconsistent_selection(format!(
                "{}の手駒に{}がない",
                us, pk
            )));
        }
        if self.board[dst] != NO_PIECE {
            return Err(Error::IllegalDestination(dst));
        }
        if pk == PAWN && movegen::is_nifu(&self.board, us, dst.col()) {
            return Err(Error::NifuViolation(dst.col()));
        }

        self.hands[us][pk] -= 1;
        self.board[dst] = Piece::new(us, pk);

        Ok(MoveRecord {
            ply: self.ply,
            side: us,
            src: None,
            dst,
            kind: pk,
            promoted: false,
            captured: NO_PIECE,
        })
    }

    /// 打つ駒種を手番側の手駒に合わせる。
    ///
    /// 玉将は sfen 上で王と玉を区別しないので、手駒にない方が指定されたら他方を打つ。
    fn resolve_drop_kind(&self, pk: PieceKind) -> PieceKind {
        if !pk.is_king() || self.hands[self.side_to_move][pk] > 0 {
            return pk;
        }

        if pk == KING {
            JADE
        } else {
            KING
        }
    }

    /// 編集: 盤上の駒を `src` から `dst` へ動かす。`dst` にあった駒は `src` へ移る(交換)。
    ///
    /// `promote` が真で、動かす駒が成れる駒種なら成る。駒の動きや手番は考慮しない。
    pub fn edit_relocate(&mut self, src: Square, dst: Square, promote: bool) -> Result<()> {
        let pc_src = self.board[src];
        if !pc_src.is_piece() {
            return Err(Error::inconsistent_selection(format!(
                "移動元 {} に駒がない",
                src
            )));
        }
        if src == dst {
            return Err(Error::inconsistent_selection("移動元と移動先が同じ"));
        }

        let pc_moved = if promote && pc_src.is_promotable() {
            pc_src.to_promoted()
        } else {
            pc_src
        };

        self.board[src] = self.board[dst];
        self.board[dst] = pc_moved;
        mylog::log_edit(&format!("{} {:?} -> {}", src, pc_moved, dst));

        Ok(())
    }

    /// 編集: 陣営 `side` の手駒 `pk` を空きマス `dst` に置く。
    pub fn edit_drop(&mut self, side: Side, pk: PieceKind, dst: Square) -> Result<()> {
        if self.hands[side][pk] == 0 {
            return Err(Error::inconsistent_selection(format!(
                "{}の手駒に{}がない",
                side, pk
            )));
        }
        if self.board[dst] != NO_PIECE {
            return Err(Error::IllegalDestination(dst));
        }

        self.hands[side][pk] -= 1;
        self.board[dst] = Piece::new(side, pk);
        mylog::log_edit(&format!("{}の手駒 {} -> {}", side, pk, dst));

        Ok(())
    }

    /// 編集: 盤上の駒を陣営 `side` の手駒にする。成駒は元の駒種に戻る。
    pub fn edit_to_hand(&mut self, src: Square, side: Side) -> Result<()> {
        let pc = self.board[src];
        if !pc.is_piece() {
            return Err(Error::inconsistent_selection(format!(
                "移動元 {} に駒がない",
                src
            )));
        }

        let pk = pc.to_demoted_kind();
        self.board[src] = NO_PIECE;
        self.hands[side][pk] += 1;
        mylog::log_edit(&format!("{} {:?} -> {}の手駒", src, pc, side));

        Ok(())
    }

    /// 編集: 陣営 `from` の手駒 `pk` を 1 枚、陣営 `to` の手駒に移す。
    pub fn edit_transfer(&mut self, from: Side, pk: PieceKind, to: Side) -> Result<()> {
        if from == to {
            return Err(Error::inconsistent_selection("移動元と移動先の陣営が同じ"));
        }
        if self.hands[from][pk] == 0 {
            return Err(Error::inconsistent_selection(format!(
                "{}の手駒に{}がない",
                from, pk
            )));
        }

        self.hands[from][pk] -= 1;
        self.hands[to][pk] += 1;
        mylog::log_edit(&format!("{}の手駒 {} -> {}の手駒", from, pk, to));

        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// BOD 形式に近い局面図。
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "後手の持駒：{}", self.hands[WHITE])?;
        writeln!(f, "  ９ ８ ７ ６ ５ ４ ３ ２ １")?;
        writeln!(f, "+---------------------------+")?;
        for row in Row::iter() {
            f.write_str("|")?;
            for col in Col::iter().rev() {
                let pc = self.board[Square::from_col_row(col, row)];
                let prefix = if pc.is_owned_by(WHITE) { 'v' } else { ' ' };
                write!(f, "{}{}", prefix, pc.kind().to_glyph())?;
            }
            writeln!(f, "|{}", row)?;
        }
        writeln!(f, "+---------------------------+")?;
        writeln!(f, "先手の持駒：{}", self.hands[BLACK])?;
        writeln!(f, "手番：{}", self.side_to_move)?;

        Ok(())
    }
}
