//! 棋譜表記。
//!
//! 1 手の表記は `<手数> <手番><移動先><駒>[成]<打 | (移動元)>` の形式。例: `1 ☗７六歩(77)`
//!
//! 移動先が直前の手の移動先と同じ場合は `同　` と表記する。
//! 直前の移動先は呼び出し側が渡す(局面ごとに保持しておき、局面の読み込み時にリセットする)。

use crate::position::MoveRecord;
use crate::shogi::*;

/// 棋譜文字列中の各手の区切り。
pub const RECORD_SEPARATOR: char = ',';

/// 1 手分の着手記録を棋譜表記に変換する。
///
/// `prev_dst` は直前の手の移動先(初手や局面読み込み直後は `None`)。
pub fn format_move(rec: &MoveRecord, prev_dst: Option<Square>) -> String {
    let dst = if prev_dst == Some(rec.dst) {
        "同　".to_owned()
    } else {
        rec.dst.to_string()
    };

    let mut s = format!("{} {}{}{}", rec.ply, rec.side.mark(), dst, rec.kind);

    if rec.promoted {
        s.push('成');
    }

    match rec.src {
        Some(src) => s.push_str(&format!(
            "({}{})",
            src.col().to_number(),
            src.row().to_number()
        )),
        None => s.push('打'),
    }

    s
}

/// 棋譜文字列の先頭に 1 手分の表記を追加する。棋譜文字列は新しい手ほど前に来る。
pub fn prepend_record(record: &mut String, line: &str) {
    if record.is_empty() {
        record.push_str(line);
    } else {
        record.insert(0, RECORD_SEPARATOR);
        record.insert_str(0, line);
    }
}

/// 棋譜文字列を 1 手ずつに分割する。新しい手から順に返る。
pub fn split_record(record: &str) -> impl Iterator<Item = &str> {
    record.split(RECORD_SEPARATOR).filter(|s| !s.is_empty())
}
