use crate::shogi::*;

/// 局面操作のエラー。
///
/// いずれの場合も局面は一切変更されない。
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// 移動先が駒の動きの範囲外、または駒打ちの打ち先が空いていない。
    #[error("illegal destination: {0}")]
    IllegalDestination(Square),

    /// 二歩。
    #[error("two-pawn violation: {0}筋")]
    NifuViolation(Col),

    /// 移動元に駒がない、手駒がないなど、呼び出し側の不整合。
    #[error("inconsistent selection: {0}")]
    InconsistentSelection(String),

    /// 現在のモードでは行えない操作。
    #[error("not available in {0} mode")]
    WrongMode(&'static str),
}

impl Error {
    pub fn inconsistent_selection(msg: impl Into<String>) -> Self {
        Self::InconsistentSelection(msg.into())
    }

    /// ユーザーの操作ミスによるエラーかどうかを返す。
    ///
    /// 偽の場合は呼び出し側のバグを示す。
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::IllegalDestination(_) | Self::NifuViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
