//! 与えられた棋譜を一定間隔で自動再生する。

use std::time::{Duration, Instant};

use anyhow::Context as _;
use structopt::StructOpt;

use shogiban::*;

#[derive(Debug, StructOpt)]
struct Opt {
    /// 1 手ごとの間隔(ミリ秒)。
    #[structopt(long, default_value = "1000")]
    interval_ms: u64,

    /// 開始局面と指し手 (例: "startpos moves 7g7f 3c3d")。
    sfen: String,
}

fn main() -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .chain(std::io::stdout())
        .apply()?;

    let opt = Opt::from_args();

    let mut game = init(&opt.sfen)?;

    replay(&mut game, Duration::from_millis(opt.interval_ms));

    Ok(())
}

/// 棋譜を最後まで指した対局を作り、履歴の先頭に戻して返す。
fn init(sfen: &str) -> anyhow::Result<Game> {
    let (pos, mvs) = sfen_decode(sfen)?;

    let mut game = Game::new(pos);
    for (i, &mv) in mvs.iter().enumerate() {
        game.play_move(mv).with_context(|| {
            format!("move {} ({}) is not applicable", i + 1, sfen_encode_move(mv))
        })?;
    }

    game.seek_start();

    Ok(game)
}

fn replay(game: &mut Game, interval: Duration) {
    mylog::log_position(game.position());

    let token = game.start_autoplay(Instant::now(), interval);
    if game.cursor() > 0 {
        mylog::log_position(game.position());
    }

    if let Some(token) = token {
        while let Some(deadline) = game.autoplay_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            if let Some(pos) = game.poll_autoplay(token, Instant::now()) {
                mylog::log_position(pos);
            }
        }
    }

    // 棋譜文字列は新しい手が先なので、逆順に出力する。
    let lines: Vec<_> = split_record(game.record()).collect();
    for line in lines.into_iter().rev() {
        println!("{}", line);
    }
}
