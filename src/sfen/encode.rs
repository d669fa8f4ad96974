use crate::position::Position;
use crate::shogi::*;

/// 開始局面と指し手の配列を sfen 文字列にエンコードする。
/// 合法性チェックは一切行わない。
///
/// 開始局面が平手初期局面の場合、局面文字列は "startpos" になる。
/// 指し手がなければ " moves" 以降は付かない。
pub fn sfen_encode<T>(pos: &Position, mvs: T) -> String
where
    T: AsRef<[Move]>,
{
    let mut s = sfen_encode_position(pos);

    let mvs = mvs.as_ref();
    if mvs.is_empty() {
        return s;
    }

    s.push_str(" moves");

    for &mv in mvs {
        s.push(' ');
        sfen_encode_move_impl(mv, &mut s);
    }

    s
}

/// 局面を sfen 局面文字列にエンコードする。
/// 合法性チェックは一切行わない。
///
/// 局面が平手初期局面の場合、"startpos" を返す。
/// 玉将は王と玉を区別せず、陣営のみで大文字小文字を決める。
pub fn sfen_encode_position(pos: &Position) -> String {
    let board = pos.board();
    let hands = pos.hands();

    if pos.side_to_move() == BLACK
        && *board == Board::startpos()
        && hands.iter().all(Hand::is_empty)
    {
        return "startpos".to_owned();
    }

    let mut s = String::new();

    s.push_str("sfen ");

    sfen_encode_board(board, &mut s);
    s.push(' ');

    sfen_encode_side(pos.side_to_move(), &mut s);
    s.push(' ');

    sfen_encode_hands(hands, &mut s);
    s.push(' ');

    // 手数は 1 固定とする。
    s.push('1');

    s
}

/// 盤面を sfen 盤面文字列にエンコードし、既存の文字列に追記する。
fn sfen_encode_board(board: &Board, s: &mut String) {
    for row in Row::iter() {
        if row != ROW_1 {
            s.push('/');
        }
        sfen_encode_board_row(board, row, s);
    }
}

fn sfen_encode_board_row(board: &Board, row: Row, s: &mut String) {
    #[derive(Debug)]
    struct State<'a> {
        s: &'a mut String,
        run_blank: u8,
    }
    impl<'a> State<'a> {
        fn new(s: &'a mut String) -> Self {
            Self { s, run_blank: 0 }
        }
        fn update(&mut self, pc: Piece) {
            if pc == NO_PIECE {
                self.run_blank += 1;
            } else {
                self.flush_run();
                if pc.is_promoted() {
                    self.s.push('+');
                }
                self.s.push(sfen_piece_char(pc.side(), pc.to_demoted_kind()));
            }
        }
        fn flush_run(&mut self) {
            if self.run_blank > 0 {
                self.s.push(char::from(b'0' + self.run_blank));
                self.run_blank = 0;
            }
        }
    }

    let mut state = State::new(s);
    for col in Col::iter().rev() {
        let sq = Square::from_col_row(col, row);
        state.update(board[sq]);
    }
    state.flush_run();
}

/// 成っていない駒種 `pk` の sfen 駒文字を返す。先手は大文字、後手は小文字。
fn sfen_piece_char(side: Side, pk: PieceKind) -> char {
    debug_assert!(pk.is_hand());

    const TABLE: [char; 16] = [
        '?', 'P', 'L', 'N', 'S', 'B', 'R', 'G', 'K', '?', '?', '?', '?', '?', '?', 'K',
    ];

    let c = TABLE[usize::from(pk)];
    if side == BLACK {
        c
    } else {
        c.to_ascii_lowercase()
    }
}

/// 手番の陣営を sfen 手番文字列にエンコードし、既存の文字列に追記する。
fn sfen_encode_side(side_to_move: Side, s: &mut String) {
    s.push(if side_to_move == BLACK { 'b' } else { 'w' });
}

/// 両陣営の手駒を sfen 手駒文字列にエンコードし、既存の文字列に追記する。
fn sfen_encode_hands(hands: &Hands, s: &mut String) {
    // 先手の手駒、後手の手駒の順に並べ、駒種は玉、飛、角、金、銀、桂、香、歩の順とする。
    // 玉将の手駒は sfen にはないので独自拡張。
    const PKS: [PieceKind; 7] = [ROOK, BISHOP, GOLD, SILVER, KNIGHT, LANCE, PAWN];

    if hands.iter().all(Hand::is_empty) {
        s.push('-');
        return;
    }

    for side in Side::iter() {
        let hand = &hands[side];

        let n_king = hand[KING] + hand[JADE];
        sfen_encode_hand_entry(side, KING, n_king, s);

        for pk in PKS {
            sfen_encode_hand_entry(side, pk, hand[pk], s);
        }
    }
}

fn sfen_encode_hand_entry(side: Side, pk: PieceKind, n: u32, s: &mut String) {
    if n == 0 {
        return;
    }
    if n >= 2 {
        s.push_str(&n.to_string());
    }
    s.push(sfen_piece_char(side, pk));
}

/// 指し手を sfen 指し手文字列にエンコードする。
/// 合法性チェックは一切行わない。
pub fn sfen_encode_move(mv: Move) -> String {
    let mut s = String::new();

    sfen_encode_move_impl(mv, &mut s);

    s
}

fn sfen_encode_move_impl(mv: Move, s: &mut String) {
    if mv.is_drop() {
        s.push(sfen_piece_char(BLACK, mv.dropped_piece_kind()));
        s.push('*');
        sfen_encode_move_square(mv.dst(), s);
    } else {
        sfen_encode_move_square(mv.src(), s);
        sfen_encode_move_square(mv.dst(), s);
        if mv.is_promotion() {
            s.push('+');
        }
    }
}

fn sfen_encode_move_square(sq: Square, s: &mut String) {
    s.push(char::from(b'0' + sq.col().to_number() as u8));
    s.push(char::from(b'a' + (sq.row().to_number() - 1) as u8));
}
