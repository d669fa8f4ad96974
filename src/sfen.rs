//! sfen 形式の入出力。
//!
//! 玉将は先手を王将 (`K`)、後手を玉将 (`k`) として読み込む。
//! 検討用局面のため、手駒の玉将 (`K`, `k`) も受け付ける(独自拡張)。

mod decode;
mod encode;

pub use self::decode::*;
pub use self::encode::*;
