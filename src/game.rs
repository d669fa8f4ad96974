//! 対局の進行管理。
//!
//! 局面の履歴、編集モード、駒の選択状態、自動再生を扱う。
//! 入力はマスのクリック(`Game::select_square`)と駒台のクリック(`Game::select_hand`)に正規化して受け取る。

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::movegen::{self, SquareArray};
use crate::mylog;
use crate::position::{MoveRecord, Position};
use crate::shogi::*;

/// 自動再生の既定の間隔。
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(1000);

/// 選択中の駒。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Selection {
    /// 盤上の駒。
    Square(Square),
    /// 駒台の駒(持ち主, 駒種)。
    Hand(Side, PieceKind),
}

/// 成りの意思表示。ダブルクリックなどで成りを要求したら `Requested`。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PromotionIntent {
    None,
    Requested,
}

/// 入力 1 回分の結果。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectOutcome {
    /// 駒を選択した。
    Selected,
    /// 選択を解除した。
    Cancelled,
    /// 指し手が確定し、履歴に追加された。
    Moved(MoveRecord),
    /// 編集操作を行った。
    Edited,
    /// 何もしなかった(空きマスや相手の駒のクリックなど)。
    Ignored,
}

/// 自動再生の識別子。新たに自動再生を始めると古いものは無効になる。
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct AutoplayToken(u64);

#[derive(Debug)]
struct Autoplay {
    token: AutoplayToken,
    interval: Duration,
    deadline: Instant,
}

/// 対局。
#[derive(Debug)]
pub struct Game {
    history: Vec<Position>, // 空になることはない
    cursor: usize,
    edit_mode: bool,

    selection: Option<Selection>,
    reachable: SquareArray, // 選択中の駒の移動先(打ち先)。編集モードでは常に空。

    autoplay: Option<Autoplay>,
    autoplay_serial: u64,
}

// 履歴は常に起点の局面を含むので、空にはならない。
#[allow(clippy::len_without_is_empty)]
impl Game {
    /// 指定した局面を起点とする対局を作る。対局モードで始まる。
    pub fn new(pos: Position) -> Self {
        Self {
            history: vec![pos],
            cursor: 0,
            edit_mode: false,

            selection: None,
            reachable: SquareArray::new(),

            autoplay: None,
            autoplay_serial: 0,
        }
    }

    /// 平手初期局面から始まる対局を作る。
    pub fn startpos() -> Self {
        Self::new(Position::startpos())
    }

    /// 検討用の局面から始まる対局を作る。駒を並べるため編集モードで始まる。
    pub fn study() -> Self {
        let mut this = Self::new(Position::study());
        this.edit_mode = true;
        this
    }

    /// 現在の局面を返す。
    pub fn position(&self) -> &Position {
        &self.history[self.cursor]
    }

    /// 現在の選択を返す。
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// 選択中の駒の移動先(打ち先)を返す。
    pub fn reachable(&self) -> &[Square] {
        &self.reachable
    }

    /// 現在の局面の棋譜文字列を返す。
    pub fn record(&self) -> &str {
        self.position().record()
    }

    /// 履歴上の現在位置を返す。
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 履歴の長さを返す。常に 1 以上。
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// 現在位置が履歴の末尾なら真を返す。
    pub fn is_at_end(&self) -> bool {
        self.cursor + 1 == self.history.len()
    }

    /// 局面を履歴に追加する。
    ///
    /// 現在位置より後の履歴は捨てられる。選択と自動再生は解除される。
    pub fn commit(&mut self, pos: Position) {
        self.stop_autoplay_with("履歴追加");
        self.clear_selection();

        self.history.truncate(self.cursor + 1);
        self.history.push(pos);
        self.cursor += 1;
        mylog::log_history("追加", self.cursor, self.history.len());
    }

    /// 指し手 `mv` を現在の局面に適用し、結果の局面を履歴に追加する。
    pub fn play_move(&mut self, mv: Move) -> Result<MoveRecord> {
        if self.edit_mode {
            return Err(Error::WrongMode("edit"));
        }

        let mut pos = self.position().clone();
        let rec = pos.do_move(mv)?;
        self.commit(pos);

        Ok(rec)
    }

    /// 履歴の先頭へ移動する。
    pub fn seek_start(&mut self) -> Option<&Position> {
        self.seek(0, "先頭")
    }

    /// 履歴の末尾へ移動する。
    pub fn seek_end(&mut self) -> Option<&Position> {
        self.seek(self.history.len() - 1, "末尾")
    }

    /// 履歴を 1 つ戻る。
    pub fn step_back(&mut self) -> Option<&Position> {
        self.seek(self.cursor.saturating_sub(1), "後退")
    }

    /// 履歴を 1 つ進む。
    pub fn step_forward(&mut self) -> Option<&Position> {
        let to = (self.cursor + 1).min(self.history.len() - 1);
        self.seek(to, "前進")
    }

    /// 履歴上の位置 `to` へ移動する。移動しなかった場合 `None` を返す。
    ///
    /// 編集モードでは移動しない。
    fn seek(&mut self, to: usize, action: &str) -> Option<&Position> {
        debug_assert!(to < self.history.len());

        if self.edit_mode || to == self.cursor {
            return None;
        }

        self.cursor = to;
        self.clear_selection();
        mylog::log_history(action, self.cursor, self.history.len());

        Some(self.position())
    }

    /// 編集モードを切り替え、切り替え後のモードを返す(編集モードなら真)。
    ///
    /// 編集モードを抜けると、編集後の局面(先手番、手数 1)を起点として履歴を作り直す。
    /// 棋譜文字列は引き継がれる。
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.stop_autoplay_with("モード切替");
        self.clear_selection();

        if self.edit_mode {
            let mut pos = self.position().clone();
            pos.rebase();
            self.history = vec![pos];
            self.cursor = 0;
            self.edit_mode = false;
        } else {
            self.edit_mode = true;
        }
        mylog::log_edit_mode(self.edit_mode);

        self.edit_mode
    }

    /// 局面を読み込み、それを起点として履歴を作り直す。対局モードになる。
    ///
    /// 手番と棋譜文字列は `pos` のものを使う。手数は 1 に戻る。
    pub fn load_position(&mut self, mut pos: Position) {
        self.stop_autoplay_with("局面読み込み");
        self.clear_selection();

        pos.reset_ply();
        self.history = vec![pos];
        self.cursor = 0;
        if self.edit_mode {
            self.edit_mode = false;
            mylog::log_edit_mode(false);
        }
        mylog::log_position(self.position());
    }

    /// 選択を解除する。
    pub fn cancel_selection(&mut self) {
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.reachable.clear();
    }

    /// マス `sq` のクリックを処理する。
    ///
    /// * 何も選択していなければ、そのマスの駒を選択する。
    ///   対局モードでは手番側の駒のみ選択でき、移動先も求める。
    /// * 選択中のマスなら選択を解除する。
    /// * 盤上の駒を選択中なら、そのマスへ動かす。
    /// * 駒台の駒を選択中なら、そのマスへ打つ。成否によらず選択は解除される。
    pub fn select_square(
        &mut self,
        sq: Square,
        intent: PromotionIntent,
    ) -> Result<SelectOutcome> {
        match self.selection {
            None => Ok(self.select_board_piece(sq)),
            Some(Selection::Square(src)) if src == sq => {
                self.clear_selection();
                Ok(SelectOutcome::Cancelled)
            }
            Some(Selection::Square(src)) => {
                if self.edit_mode {
                    self.edit_relocate(src, sq, intent)
                } else {
                    self.play_walk(src, sq, intent)
                }
            }
            Some(Selection::Hand(side, pk)) => {
                self.clear_selection();
                if self.edit_mode {
                    self.edit_drop(side, pk, sq)
                } else {
                    self.play_drop(pk, sq)
                }
            }
        }
    }

    fn select_board_piece(&mut self, sq: Square) -> SelectOutcome {
        let pos = &self.history[self.cursor];
        let pc = pos.board()[sq];

        if !pc.is_piece() {
            return SelectOutcome::Ignored;
        }

        if self.edit_mode {
            self.selection = Some(Selection::Square(sq));
            return SelectOutcome::Selected;
        }

        if !pc.is_owned_by(pos.side_to_move()) {
            return SelectOutcome::Ignored;
        }

        self.reachable = pos.reachable_squares(sq);
        self.selection = Some(Selection::Square(sq));

        SelectOutcome::Selected
    }

    fn play_walk(
        &mut self,
        src: Square,
        dst: Square,
        intent: PromotionIntent,
    ) -> Result<SelectOutcome> {
        let mv = match intent {
            PromotionIntent::None => Move::new_walk(src, dst),
            PromotionIntent::Requested => Move::new_walk_promotion(src, dst),
        };

        let rec = self.play_move(mv).map_err(|e| self.note_error(e))?;

        Ok(SelectOutcome::Moved(rec))
    }

    fn play_drop(&mut self, pk: PieceKind, dst: Square) -> Result<SelectOutcome> {
        let rec = self
            .play_move(Move::new_drop(pk, dst))
            .map_err(|e| self.note_error(e))?;

        Ok(SelectOutcome::Moved(rec))
    }

    fn edit_relocate(
        &mut self,
        src: Square,
        dst: Square,
        intent: PromotionIntent,
    ) -> Result<SelectOutcome> {
        let promote = intent == PromotionIntent::Requested;
        self.history[self.cursor]
            .edit_relocate(src, dst, promote)
            .map_err(|e| self.note_error(e))?;
        self.clear_selection();

        Ok(SelectOutcome::Edited)
    }

    fn edit_drop(&mut self, side: Side, pk: PieceKind, dst: Square) -> Result<SelectOutcome> {
        self.history[self.cursor]
            .edit_drop(side, pk, dst)
            .map_err(|e| self.note_error(e))?;

        Ok(SelectOutcome::Edited)
    }

    /// 駒台の駒 (`side`, `pk`) のクリックを処理する。
    ///
    /// 対局モード:
    ///
    /// * 駒台の駒を選択中なら選択を解除する。
    /// * そうでなければ、手番側の駒なら選択し、打ち先を求める。
    ///
    /// 編集モード:
    ///
    /// * 盤上の駒を選択中なら、その駒を `side` の手駒にする。
    /// * 相手側の駒台の駒を選択中なら、その駒を `side` の手駒に移す。
    /// * そうでなければ、クリックした駒を選択する。
    pub fn select_hand(&mut self, side: Side, pk: PieceKind) -> Result<SelectOutcome> {
        if self.edit_mode {
            match self.selection {
                Some(Selection::Square(src)) => {
                    self.history[self.cursor]
                        .edit_to_hand(src, side)
                        .map_err(|e| self.note_error(e))?;
                    self.clear_selection();
                    return Ok(SelectOutcome::Edited);
                }
                Some(Selection::Hand(from, pk_from)) if from != side => {
                    self.history[self.cursor]
                        .edit_transfer(from, pk_from, side)
                        .map_err(|e| self.note_error(e))?;
                    self.clear_selection();
                    return Ok(SelectOutcome::Edited);
                }
                _ => {}
            }
        } else {
            if matches!(self.selection, Some(Selection::Hand(..))) {
                self.clear_selection();
                return Ok(SelectOutcome::Cancelled);
            }
            if side != self.position().side_to_move() {
                return Ok(SelectOutcome::Ignored);
            }
        }

        self.select_hand_piece(side, pk)
    }

    fn select_hand_piece(&mut self, side: Side, pk: PieceKind) -> Result<SelectOutcome> {
        let pos = &self.history[self.cursor];

        if pos.hand(side)[pk] == 0 {
            let e = Error::inconsistent_selection(format!("{}の手駒に{}がない", side, pk));
            return Err(self.note_error(e));
        }

        self.reachable = if self.edit_mode {
            SquareArray::new()
        } else {
            movegen::drop_squares(pos.board(), side, pk)
        };
        self.selection = Some(Selection::Hand(side, pk));

        Ok(SelectOutcome::Selected)
    }

    /// エラーをログに記録してそのまま返す。
    fn note_error(&self, e: Error) -> Error {
        if let Error::InconsistentSelection(_) = e {
            mylog::log_inconsistent_selection(&e);
        }
        e
    }

    /// 自動再生を開始する。
    ///
    /// 実行中の自動再生は取り消される。直ちに 1 手進め、次の手は `now + interval` 以降の
    /// `poll_autoplay` で進める。
    /// 既に履歴の末尾にいる場合(1 手進めて末尾に達した場合も含む)や編集モードでは
    /// 次の手を予約せず `None` を返す。
    pub fn start_autoplay(&mut self, now: Instant, interval: Duration) -> Option<AutoplayToken> {
        self.stop_autoplay_with("再始動");

        self.step_forward()?;
        if self.is_at_end() {
            mylog::log_autoplay_stop("終端");
            return None;
        }

        self.autoplay_serial += 1;
        let token = AutoplayToken(self.autoplay_serial);
        self.autoplay = Some(Autoplay {
            token,
            interval,
            deadline: now + interval,
        });
        mylog::log_autoplay_start(interval.as_millis());

        Some(token)
    }

    /// 自動再生を 1 ステップ処理する。
    ///
    /// `token` が現在の自動再生のもので、かつ予定時刻に達していれば 1 手進め、その局面を返す。
    /// 末尾に達したら自動再生を終える。
    pub fn poll_autoplay(&mut self, token: AutoplayToken, now: Instant) -> Option<&Position> {
        let (interval, deadline) = match &self.autoplay {
            Some(ap) if ap.token == token => (ap.interval, ap.deadline),
            _ => return None,
        };
        if now < deadline {
            return None;
        }

        if self.step_forward().is_none() {
            self.stop_autoplay_with("終端");
            return None;
        }

        if self.is_at_end() {
            self.stop_autoplay_with("終端");
        } else if let Some(ap) = self.autoplay.as_mut() {
            ap.deadline = now + interval;
        }

        Some(self.position())
    }

    /// 自動再生を停止する。
    pub fn stop_autoplay(&mut self) {
        self.stop_autoplay_with("停止");
    }

    fn stop_autoplay_with(&mut self, reason: &str) {
        if self.autoplay.take().is_some() {
            mylog::log_autoplay_stop(reason);
        }
    }

    /// 自動再生中なら真を返す。
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// 自動再生の次の予定時刻を返す。
    pub fn autoplay_deadline(&self) -> Option<Instant> {
        self.autoplay.as_ref().map(|ap| ap.deadline)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    fn click(game: &mut Game, sq: Square) -> Result<SelectOutcome> {
        game.select_square(sq, PromotionIntent::None)
    }

    fn play(game: &mut Game, src: Square, dst: Square) {
        assert_eq!(click(game, src), Ok(SelectOutcome::Selected));
        assert!(matches!(click(game, dst), Ok(SelectOutcome::Moved(_))));
    }

    #[test]
    fn test_select_and_move() {
        let mut game = Game::startpos();

        // 相手の駒や空きマスは選択できない。
        assert_eq!(click(&mut game, SQ_33), Ok(SelectOutcome::Ignored));
        assert_eq!(click(&mut game, SQ_55), Ok(SelectOutcome::Ignored));
        assert_eq!(game.selection(), None);

        assert_eq!(click(&mut game, SQ_77), Ok(SelectOutcome::Selected));
        assert_eq!(game.selection(), Some(Selection::Square(SQ_77)));
        assert_eq!(game.reachable(), [SQ_76]);

        // 同じマスで解除。
        assert_eq!(click(&mut game, SQ_77), Ok(SelectOutcome::Cancelled));
        assert_eq!(game.selection(), None);
        assert!(game.reachable().is_empty());

        play(&mut game, SQ_77, SQ_76);
        assert_eq!(game.len(), 2);
        assert_eq!(game.cursor(), 1);
        assert_eq!(game.selection(), None);
        assert_eq!(game.position().side_to_move(), WHITE);
        assert_eq!(game.record(), "1 ☗７六歩(77)");
    }

    #[test]
    fn test_illegal_destination_keeps_selection() {
        let mut game = Game::startpos();

        click(&mut game, SQ_77).unwrap();
        assert_eq!(click(&mut game, SQ_75), Err(Error::IllegalDestination(SQ_75)));
        assert_eq!(game.selection(), Some(Selection::Square(SQ_77)));
        assert_eq!(game.len(), 1);
    }

    #[test]
    fn test_drop_clears_selection() {
        let mut game = Game::startpos();
        for (src, dst) in [(SQ_77, SQ_76), (SQ_33, SQ_34), (SQ_88, SQ_22), (SQ_31, SQ_22)] {
            play(&mut game, src, dst);
        }

        // 後手の手駒は選択できない。
        assert_eq!(game.select_hand(WHITE, BISHOP), Ok(SelectOutcome::Ignored));

        assert_eq!(game.select_hand(BLACK, BISHOP), Ok(SelectOutcome::Selected));
        assert_eq!(game.reachable().len(), 81 - 38);
        // 再度クリックで解除。
        assert_eq!(game.select_hand(BLACK, BISHOP), Ok(SelectOutcome::Cancelled));

        game.select_hand(BLACK, BISHOP).unwrap();
        assert_eq!(click(&mut game, SQ_11), Err(Error::IllegalDestination(SQ_11)));
        assert_eq!(game.selection(), None);

        game.select_hand(BLACK, BISHOP).unwrap();
        let outcome = click(&mut game, SQ_55).unwrap();
        match outcome {
            SelectOutcome::Moved(rec) => assert!(rec.is_drop()),
            _ => panic!("unexpected outcome: {:?}", outcome),
        }
        assert_eq!(game.position().board()[SQ_55], B_BISHOP);
        assert_eq!(game.position().count_pieces(), 40);
    }

    #[test]
    fn test_promotion_intent() {
        let mut board = Board::empty();
        board[SQ_24] = B_SILVER;
        let mut game = Game::new(Position::new(BLACK, board, Hands::empty()));

        click(&mut game, SQ_24).unwrap();
        let outcome = game.select_square(SQ_23, PromotionIntent::Requested).unwrap();
        assert!(matches!(outcome, SelectOutcome::Moved(rec) if rec.promoted));
        assert_eq!(game.position().board()[SQ_23], B_PRO_SILVER);
    }

    #[test]
    fn test_history_navigation() {
        let mut game = Game::startpos();
        play(&mut game, SQ_77, SQ_76);
        play(&mut game, SQ_33, SQ_34);
        play(&mut game, SQ_27, SQ_26);

        assert_eq!(game.seek_start().map(Position::ply), Some(1));
        assert!(game.seek_start().is_none());
        assert!(game.step_back().is_none());
        assert_eq!(game.cursor(), 0);

        assert!(game.step_forward().is_some());
        assert_eq!(game.cursor(), 1);

        assert!(game.seek_end().is_some());
        assert!(game.step_forward().is_none());
        assert_eq!(game.cursor(), 3);
        assert_eq!(game.len(), 4);
    }

    #[test]
    fn test_commit_truncates() {
        let mut game = Game::startpos();
        play(&mut game, SQ_77, SQ_76);
        play(&mut game, SQ_33, SQ_34);

        game.step_back();
        game.step_back();
        play(&mut game, SQ_27, SQ_26);

        assert_eq!(game.len(), 2);
        assert_eq!(game.cursor(), 1);
        assert_eq!(game.record(), "1 ☗２六歩(27)");
    }

    #[test]
    fn test_same_dst_after_step_back() {
        let mut game = Game::startpos();
        for (src, dst) in [(SQ_77, SQ_76), (SQ_33, SQ_34), (SQ_88, SQ_22)] {
            play(&mut game, src, dst);
        }
        play(&mut game, SQ_31, SQ_22);
        assert!(game.record().starts_with("4 ☖同　銀(31)"));

        // 戻ってから指し直すと、直前の手はその局面のものが使われる。
        game.step_back();
        game.step_back();
        play(&mut game, SQ_88, SQ_22);
        assert!(game.record().starts_with("3 ☗２二角(88)"));
    }

    #[test]
    fn test_edit_mode() {
        let mut game = Game::startpos();
        play(&mut game, SQ_77, SQ_76);

        assert!(game.toggle_edit_mode());
        assert!(game.is_edit_mode());
        assert_eq!(game.play_move(Move::new_walk(SQ_33, SQ_34)), Err(Error::WrongMode("edit")));
        assert!(game.step_back().is_none());

        // 相手の駒も自由に動かせる。交換になる。
        assert_eq!(click(&mut game, SQ_11), Ok(SelectOutcome::Selected));
        assert!(game.reachable().is_empty());
        assert_eq!(click(&mut game, SQ_19), Ok(SelectOutcome::Edited));
        assert_eq!(game.position().board()[SQ_19], W_LANCE);
        assert_eq!(game.position().board()[SQ_11], B_LANCE);

        // 盤上の駒を駒台へ。
        click(&mut game, SQ_28).unwrap();
        assert_eq!(game.select_hand(WHITE, ROOK), Ok(SelectOutcome::Edited));
        assert_eq!(game.position().hand(WHITE)[ROOK], 1);

        // 駒台から駒台へ。
        assert_eq!(game.select_hand(WHITE, ROOK), Ok(SelectOutcome::Selected));
        assert_eq!(game.select_hand(BLACK, ROOK), Ok(SelectOutcome::Edited));
        assert_eq!(game.position().hand(BLACK)[ROOK], 1);

        // 駒台から盤上へ。占有マスには置けない。
        game.select_hand(BLACK, ROOK).unwrap();
        assert_eq!(click(&mut game, SQ_59), Err(Error::IllegalDestination(SQ_59)));
        assert_eq!(game.selection(), None);
        game.select_hand(BLACK, ROOK).unwrap();
        assert_eq!(click(&mut game, SQ_55), Ok(SelectOutcome::Edited));
        assert_eq!(game.position().board()[SQ_55], B_ROOK);

        assert_eq!(game.position().count_pieces(), 40);

        assert!(!game.toggle_edit_mode());
        assert_eq!(game.len(), 1);
        assert_eq!(game.cursor(), 0);
        assert_eq!(game.position().side_to_move(), BLACK);
        assert_eq!(game.position().ply(), 1);
        assert_eq!(game.position().last_dst(), None);
        assert_eq!(game.record(), "1 ☗７六歩(77)");
        assert_eq!(game.position().board()[SQ_55], B_ROOK);
    }

    #[test]
    fn test_study() {
        let mut game = Game::study();
        assert!(game.is_edit_mode());

        game.select_hand(BLACK, KING).unwrap();
        click(&mut game, SQ_59).unwrap();
        game.select_hand(WHITE, JADE).unwrap();
        click(&mut game, SQ_51).unwrap();

        game.toggle_edit_mode();
        assert_eq!(game.position().board()[SQ_59], B_KING);
        assert_eq!(game.position().board()[SQ_51], W_JADE);
        assert_eq!(game.position().hand(BLACK).count(), 19);
    }

    #[test]
    fn test_load_position() {
        let mut game = Game::startpos();
        play(&mut game, SQ_77, SQ_76);
        game.toggle_edit_mode();

        game.load_position(Position::study());
        assert!(!game.is_edit_mode());
        assert_eq!(game.len(), 1);
        assert_eq!(game.record(), "");
        assert_eq!(game.position().board().count_pieces(), 0);
    }

    #[test]
    fn test_autoplay() {
        let mut game = Game::startpos();
        for (src, dst) in [(SQ_77, SQ_76), (SQ_33, SQ_34), (SQ_27, SQ_26)] {
            play(&mut game, src, dst);
        }
        game.seek_start();

        let t0 = Instant::now();
        let interval = Duration::from_millis(100);

        let token = game.start_autoplay(t0, interval).unwrap();
        assert_eq!(game.cursor(), 1);
        assert_eq!(game.autoplay_deadline(), Some(t0 + interval));

        // 予定時刻前は進まない。
        assert!(game.poll_autoplay(token, t0).is_none());
        assert_eq!(game.cursor(), 1);

        assert!(game.poll_autoplay(token, t0 + interval).is_some());
        assert_eq!(game.cursor(), 2);
        assert!(game.is_autoplaying());

        assert!(game.poll_autoplay(token, t0 + interval * 2).is_some());
        assert_eq!(game.cursor(), 3);
        assert!(!game.is_autoplaying());

        assert!(game.poll_autoplay(token, t0 + interval * 3).is_none());
        assert!(game.start_autoplay(t0, interval).is_none());
    }

    #[test]
    fn test_autoplay_cancel() {
        let mut game = Game::startpos();
        for (src, dst) in [(SQ_77, SQ_76), (SQ_33, SQ_34), (SQ_27, SQ_26)] {
            play(&mut game, src, dst);
        }
        game.seek_start();

        let t0 = Instant::now();
        let interval = Duration::from_millis(100);

        let stale = game.start_autoplay(t0, interval).unwrap();
        game.seek_start();
        let token = game.start_autoplay(t0, interval).unwrap();
        assert_ne!(stale, token);

        // 古い識別子は無視される。
        assert!(game.poll_autoplay(stale, t0 + interval).is_none());
        assert_eq!(game.cursor(), 1);

        game.stop_autoplay();
        assert!(!game.is_autoplaying());
        assert!(game.poll_autoplay(token, t0 + interval).is_none());
        assert_eq!(game.cursor(), 1);

        // 着手すると自動再生は止まる。
        let token = game.start_autoplay(t0, interval).unwrap();
        play(&mut game, SQ_17, SQ_16);
        assert!(!game.is_autoplaying());
        assert!(game.poll_autoplay(token, t0 + interval).is_none());
    }
}
