mod catalog;
mod error;
mod game;
mod movegen;
pub mod mylog;
mod notation;
mod position;
mod sfen;
mod shogi;

pub use self::catalog::*;
pub use self::error::*;
pub use self::game::*;
pub use self::movegen::*;
pub use self::notation::*;
pub use self::position::*;
pub use self::sfen::*;
pub use self::shogi::*;
