//! 操作ログ出力。

use log::{info, warn};

use crate::error::Error;
use crate::position::Position;
use crate::shogi::*;

/// 着手ログを出力する。
pub fn log_move(line: &str) {
    info!("指し手: {}", line);
}

/// 指し手が却下されたログを出力する。
///
/// ユーザーの操作ミスでないもの(呼び出し側の不整合)は警告とする。
pub fn log_move_rejected(mv: Move, e: &Error) {
    if e.is_user_error() {
        info!("指し手却下: {} ({})", mv, e);
    } else {
        warn!("指し手却下: {:?} ({})", mv, e);
    }
}

/// 選択状態の不整合を警告する。選択は解除される。
pub fn log_inconsistent_selection(e: &Error) {
    warn!("選択解除: {}", e);
}

/// 編集ログを出力する。
pub fn log_edit(desc: &str) {
    info!("編集: {}", desc);
}

/// 履歴カーソルの移動ログを出力する。
pub fn log_history(action: &str, cursor: usize, len: usize) {
    info!("履歴 {}: {}/{}", action, cursor, len - 1);
}

/// 編集モードの切り替えログを出力する。
pub fn log_edit_mode(on: bool) {
    if on {
        info!("# ---------- 編集モード開始 ---------- {{{{{{");
    } else {
        info!("# ---------- 編集モード終了 ---------- }}}}}}");
        info!("");
    }
}

/// 自動再生の開始ログを出力する。
pub fn log_autoplay_start(interval_ms: u128) {
    info!("自動再生開始 (間隔 {} ms)", interval_ms);
}

/// 自動再生の停止ログを出力する。
pub fn log_autoplay_stop(reason: &str) {
    info!("自動再生停止 ({})", reason);
}

/// 与えられた局面をログ出力する。
pub fn log_position(pos: &Position) {
    for line in pos.to_string().lines() {
        info!("{}", line);
    }
    info!("");
}
