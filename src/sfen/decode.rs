use anyhow::{anyhow, bail, ensure, Context as _};

use crate::position::Position;
use crate::shogi::*;

/// sfen 文字列をデコードし、(開始局面, 指し手の配列) を返す。
/// 構文はチェックするが、合法性チェックは一切行わない。
///
/// 文字列の先頭と末尾の空白は無視される。
/// また、最初のトークンが "position" の場合、それは単に無視される。
pub fn sfen_decode(s: impl AsRef<str>) -> anyhow::Result<(Position, Vec<Move>)> {
    let s = s.as_ref().trim();

    let mut tokens = s.split_ascii_whitespace();

    let pos = sfen_decode_position_from_iter(&mut tokens)?;

    let mvs = if let Some(moves_magic) = tokens.next() {
        ensure!(
            moves_magic == "moves",
            r#""moves" expected, but got {}"#,
            moves_magic
        );
        tokens.map(sfen_decode_move_impl).collect::<Result<_, _>>()?
    } else {
        vec![]
    };

    Ok((pos, mvs))
}

/// sfen 局面文字列をデコードし、その局面を返す。
/// 構文はチェックするが、合法性チェックは一切行わない。
///
/// 先手の玉将は王将 (`KING`)、後手の玉将は玉将 (`JADE`) になる。
/// 返される局面の手数は常に 1 で、棋譜文字列は空。
pub fn sfen_decode_position(s: impl AsRef<str>) -> anyhow::Result<Position> {
    let s = s.as_ref().trim();

    let mut tokens = s.split_ascii_whitespace();

    let pos = sfen_decode_position_from_iter(&mut tokens)?;

    if let Some(token) = tokens.next() {
        bail!("position string has redundant token: {}", token);
    }

    Ok(pos)
}

fn sfen_decode_position_from_iter<'a, I>(it: &mut I) -> anyhow::Result<Position>
where
    I: Iterator<Item = &'a str>,
{
    let mut it = it.peekable();

    if it.peek().context("position string is empty")? == &"position" {
        it.next();
    }

    let magic = it.next().context("position string is empty")?;

    if magic == "startpos" {
        return Ok(Position::startpos());
    }

    ensure!(magic == "sfen", "invalid position string magic: {}", magic);

    let board = sfen_decode_board(it.next().context("board string not found")?)?;
    let side_to_move = sfen_decode_side(it.next().context("side string not found")?)?;
    let hands = sfen_decode_hands(it.next().context("hands string not found")?)?;
    let _ = sfen_decode_ply(it.next().context("ply string not found")?)?;

    Ok(Position::new(side_to_move, board, hands))
}

/// sfen 盤面文字列をデコードし、その盤面を返す。合法性チェックは一切行わない。
fn sfen_decode_board(s: &str) -> anyhow::Result<Board> {
    let mut board = Board::empty();

    let mut it = s.split('/');

    for row in Row::iter() {
        let row_s = it.next().context("board string must have exactly 9 rows")?;
        sfen_decode_board_row(row_s, row, &mut board)
            .with_context(|| format!("invalid board row {}: {}", row.to_number(), row_s))?;
    }

    if let Some(s) = it.next() {
        bail!("board string has redundant row: {}", s);
    }

    Ok(board)
}

fn sfen_decode_board_row(s: &str, row: Row, board: &mut Board) -> anyhow::Result<()> {
    #[derive(Debug)]
    struct State<'a> {
        board: &'a mut Board,
        col: Col,
        row: Row,
        promo: bool,
    }
    impl<'a> State<'a> {
        fn new(board: &'a mut Board, row: Row) -> Self {
            Self {
                board,
                row,
                col: COL_9,
                promo: false,
            }
        }
        fn update(&mut self, c: char) -> anyhow::Result<()> {
            match c {
                '+' => {
                    ensure!(!self.promo, "double '+' is not allowed");
                    self.check_row_overflow(1)?;
                    self.promo = true;
                }
                '1'..='9' => {
                    ensure!(!self.promo, "'+' cannot be placed before digit");
                    let n = decode_digit(c);
                    self.check_row_overflow(n)?;
                    self.col = self.col - n;
                }
                _ => {
                    let (side, mut pk) = sfen_decode_piece(c)?;
                    self.check_row_overflow(1)?;
                    if self.promo {
                        ensure!(pk.is_promotable(), "not promotable piece: {}", c);
                        pk = pk.to_promoted();
                        self.promo = false;
                    }
                    let sq = Square::from_col_row(self.col, self.row);
                    self.board[sq] = Piece::new(side, pk);
                    self.col = self.col - 1;
                }
            }
            Ok(())
        }
        fn finalize(&self) -> anyhow::Result<()> {
            ensure!(!self.promo, "remaining promotion flag");
            ensure!(
                self.col + 1 == COL_1,
                "board row must have exactly 9 columns"
            );
            Ok(())
        }
        fn check_row_overflow(&self, col_sub: i32) -> anyhow::Result<()> {
            ensure!((self.col - col_sub + 1).is_on_board(), "row overflow");
            Ok(())
        }
    }

    let mut state = State::new(board, row);
    for c in s.chars() {
        state.update(c)?;
    }
    state.finalize()?;

    Ok(())
}

/// 盤上および手駒の駒文字をデコードし、(陣営, 駒種) を返す。大文字は先手、小文字は後手。
///
/// 'K' は先手の王将、'k' は後手の玉将とする。
pub fn sfen_decode_piece(c: char) -> anyhow::Result<(Side, PieceKind)> {
    let side = if c.is_ascii_uppercase() { BLACK } else { WHITE };

    let pk = match c.to_ascii_uppercase() {
        'K' if side == BLACK => KING,
        'K' => JADE,
        'R' => ROOK,
        'B' => BISHOP,
        'G' => GOLD,
        'S' => SILVER,
        'N' => KNIGHT,
        'L' => LANCE,
        'P' => PAWN,
        _ => bail!("invalid piece char: {}", c),
    };

    Ok((side, pk))
}

/// sfen 手番文字列をデコードし、手番の陣営を返す。
fn sfen_decode_side(s: &str) -> anyhow::Result<Side> {
    match s {
        "b" => Ok(BLACK),
        "w" => Ok(WHITE),
        _ => bail!("invalid side string: {}", s),
    }
}

/// sfen 手駒文字列をデコードし、両陣営の手駒を返す。合法性チェックは一切行わない。
///
/// 検討用局面のため、玉将の手駒も受け付ける。
fn sfen_decode_hands(s: &str) -> anyhow::Result<Hands> {
    if s == "-" {
        return Ok(Hands::empty());
    }

    #[derive(Debug)]
    struct State {
        hands: Hands,
        count: u8,
    }
    impl State {
        fn new() -> Self {
            Self {
                hands: Hands::empty(),
                count: 0,
            }
        }
        fn update(&mut self, c: char) -> anyhow::Result<()> {
            match c {
                '0'..='9' => {
                    ensure!(
                        !(c == '0' && self.count == 0),
                        "leading zero is not allowed"
                    );
                    let d = decode_digit(c) as u8;
                    self.count = self
                        .count
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(d))
                        .context("count is too large")?;
                }
                _ => {
                    let (side, pk) = sfen_decode_piece(c)?;
                    let n = if self.count == 0 { 1 } else { self.count };
                    self.hands[side][pk] = self.hands[side][pk]
                        .checked_add(u32::from(n))
                        .context("hand overflow")?;
                    self.count = 0;
                }
            }
            Ok(())
        }
        fn finalize(&self) -> anyhow::Result<()> {
            ensure!(self.count == 0, "remaining count specifier");
            Ok(())
        }
    }

    let mut state = State::new();
    for c in s.chars() {
        state.update(c)?;
    }
    state.finalize()?;

    Ok(state.hands)
}

/// sfen 手数文字列をデコードし、その手数を返す。
fn sfen_decode_ply(s: &str) -> anyhow::Result<u32> {
    let ply: u32 = s
        .parse()
        .with_context(|| format!("invalid ply string: {}", s))?;
    ensure!(ply >= 1, "ply must be positive");

    Ok(ply)
}

/// sfen 指し手文字列をデコードし、その指し手を返す。
/// 構文はチェックするが、合法性チェックは一切行わない。
///
/// 文字列の先頭と末尾の空白は無視される。
pub fn sfen_decode_move(s: impl AsRef<str>) -> anyhow::Result<Move> {
    let s = s.as_ref().trim();

    sfen_decode_move_impl(s)
}

fn sfen_decode_move_impl(s: &str) -> anyhow::Result<Move> {
    ensure!(!s.is_empty(), "move string is empty");

    sfen_decode_move_walk(s)
        .or_else(|| sfen_decode_move_drop(s))
        .ok_or_else(|| anyhow!("invalid move string: {}", s))
}

fn sfen_decode_move_walk(s: &str) -> Option<Move> {
    let mut it = s.chars();

    let src_col = sfen_decode_move_col(it.next()?)?;
    let src_row = sfen_decode_move_row(it.next()?)?;
    let dst_col = sfen_decode_move_col(it.next()?)?;
    let dst_row = sfen_decode_move_row(it.next()?)?;

    let promo = if let Some(c) = it.next() {
        (c == '+').then(|| true)?
    } else {
        false
    };

    let src = Square::from_col_row(src_col, src_row);
    let dst = Square::from_col_row(dst_col, dst_row);
    if src == dst {
        return None;
    }

    it.next().is_none().then(|| {
        if promo {
            Move::new_walk_promotion(src, dst)
        } else {
            Move::new_walk(src, dst)
        }
    })
}

fn sfen_decode_move_drop(s: &str) -> Option<Move> {
    let mut it = s.chars();

    let pk = sfen_decode_move_drop_piece_kind(it.next()?)?;

    if it.next()? != '*' {
        return None;
    }

    let dst_col = sfen_decode_move_col(it.next()?)?;
    let dst_row = sfen_decode_move_row(it.next()?)?;

    it.next().is_none().then(|| {
        let dst = Square::from_col_row(dst_col, dst_row);
        Move::new_drop(pk, dst)
    })
}

/// sfen 形式のマス文字列 (例: "7g") をデコードし、そのマスを返す。
pub fn sfen_decode_square(s: impl AsRef<str>) -> anyhow::Result<Square> {
    let s = s.as_ref().trim();

    let mut it = s.chars();
    let sq = it
        .next()
        .and_then(sfen_decode_move_col)
        .zip(it.next().and_then(sfen_decode_move_row))
        .map(|(col, row)| Square::from_col_row(col, row))
        .filter(|_| it.next().is_none());

    sq.ok_or_else(|| anyhow!("invalid square string: {}", s))
}

fn sfen_decode_move_col(c: char) -> Option<Col> {
    match c {
        '1'..='9' => Some(COL_1 + (decode_digit(c) - 1)),
        _ => None,
    }
}

fn sfen_decode_move_row(c: char) -> Option<Row> {
    match c {
        'a'..='i' => Some(ROW_1 + i32::from(c as u8 - b'a')),
        _ => None,
    }
}

/// 駒打ちの駒種をデコードする。
///
/// 玉将は `KING` とする。後手の手駒の玉を打つ場合は `Position::do_move()` 側で読み替える。
fn sfen_decode_move_drop_piece_kind(c: char) -> Option<PieceKind> {
    match c {
        'K' => Some(KING),
        'R' => Some(ROOK),
        'B' => Some(BISHOP),
        'G' => Some(GOLD),
        'S' => Some(SILVER),
        'N' => Some(KNIGHT),
        'L' => Some(LANCE),
        'P' => Some(PAWN),
        _ => None,
    }
}

/// 10 進数字 1 文字を値に変換する。`c` は '0'..='9' でなければならない。
fn decode_digit(c: char) -> i32 {
    debug_assert!(c.is_ascii_digit());

    i32::from(c as u8 - b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(unused_imports)]
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn test_startpos() {
        let pos = sfen_decode_position("startpos").unwrap();
        assert_eq!(pos, Position::startpos());

        let pos = sfen_decode_position(
            "sfen lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
        )
        .unwrap();
        assert_eq!(pos, Position::startpos());
        assert_eq!(pos.board()[SQ_51], W_JADE);
        assert_eq!(pos.board()[SQ_59], B_KING);
    }

    #[test]
    fn test_hands() {
        let pos = sfen_decode_position("sfen 4k4/9/9/9/9/9/9/9/4K4 w R2Pb10p 3").unwrap();

        assert_eq!(pos.side_to_move(), WHITE);
        assert_eq!(pos.ply(), 1);
        assert_eq!(pos.hand(BLACK)[ROOK], 1);
        assert_eq!(pos.hand(BLACK)[PAWN], 2);
        assert_eq!(pos.hand(WHITE)[BISHOP], 1);
        assert_eq!(pos.hand(WHITE)[PAWN], 10);

        let pos = sfen_decode_position("sfen 9/9/9/9/9/9/9/9/9 b Kk 1").unwrap();
        assert_eq!(pos.hand(BLACK)[KING], 1);
        assert_eq!(pos.hand(WHITE)[JADE], 1);
    }

    #[test]
    fn test_invalid() {
        assert!(sfen_decode_position("").is_err());
        assert!(sfen_decode_position("sfen 9/9/9 b - 1").is_err());
        assert!(sfen_decode_position("sfen 10/9/9/9/9/9/9/9/9 b - 1").is_err());
        assert!(sfen_decode_position("sfen +g8/9/9/9/9/9/9/9/9 b - 1").is_err());
        assert!(sfen_decode_position("sfen 9/9/9/9/9/9/9/9/9 x - 1").is_err());
        assert!(sfen_decode_position("sfen 9/9/9/9/9/9/9/9/9 b 0P 1").is_err());
        assert!(sfen_decode_position("sfen 9/9/9/9/9/9/9/9/9 b - 0").is_err());
        assert!(sfen_decode_position("startpos moves 7g7f").is_err());
    }

    #[test]
    fn test_moves() {
        assert_eq!(
            sfen_decode_move("7g7f").unwrap(),
            Move::new_walk(SQ_77, SQ_76)
        );
        assert_eq!(
            sfen_decode_move("8h2b+").unwrap(),
            Move::new_walk_promotion(SQ_88, SQ_22)
        );
        assert_eq!(
            sfen_decode_move("P*5e").unwrap(),
            Move::new_drop(PAWN, SQ_55)
        );
        assert!(sfen_decode_move("").is_err());
        assert!(sfen_decode_move("7g7f=").is_err());
        assert!(sfen_decode_move("p*5e").is_err());
        assert!(sfen_decode_move("7g7g").is_err());
        assert!(sfen_decode_move("2b2b+").is_err());

        assert_eq!(sfen_decode_square("1a").unwrap(), SQ_11);
        assert_eq!(sfen_decode_square("9i").unwrap(), SQ_99);
        assert!(sfen_decode_square("0a").is_err());
        assert!(sfen_decode_square("1a2").is_err());

        let (pos, mvs) = sfen_decode("position startpos moves 7g7f 3c3d").unwrap();
        assert_eq!(pos, Position::startpos());
        assert_eq!(
            mvs,
            [Move::new_walk(SQ_77, SQ_76), Move::new_walk(SQ_33, SQ_34)]
        );
    }
}
