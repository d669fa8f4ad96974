//! 一人で盤を操作するシェル。マスや駒台のクリックを模したコマンドで局面を動かす。

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use anyhow::{bail, ensure, Context as _};
use structopt::StructOpt;

use shogiban::*;

#[derive(Debug, StructOpt)]
struct Opt {
    /// 初期局面 (sfen 局面文字列)。
    #[structopt(long)]
    sfen: Option<String>,

    /// 検討用局面(全ての駒が駒台にある)から始める。
    #[structopt(long, conflicts_with = "sfen")]
    study: bool,

    /// 操作ログを標準エラー出力に出す。
    #[structopt(long)]
    log: bool,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    if opt.log {
        fern::Dispatch::new()
            .format(|out, message, _record| out.finish(format_args!("{}", message)))
            .chain(std::io::stderr())
            .apply()?;
    }

    let game = if opt.study {
        Game::study()
    } else if let Some(sfen) = opt.sfen {
        let pos = sfen_decode_position(&sfen).context("invalid initial position")?;
        Game::new(pos)
    } else {
        Game::startpos()
    };

    let mut shell = Shell::new(game);

    shell.interact()?;

    Ok(())
}

#[derive(Debug)]
struct Shell {
    game: Game,
}

impl Shell {
    fn new(game: Game) -> Self {
        Self { game }
    }

    fn interact(&mut self) -> anyhow::Result<()> {
        use std::io::Write as _;

        self.print_position();

        loop {
            println!();
            print!("solo shell > ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                break;
            }

            let line = line.trim();
            let tokens: Vec<_> = line.split_ascii_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            let cmd = tokens[0];
            let args = &tokens[1..];

            match self.do_command(cmd, args) {
                Ok(ControlFlow::Break(_)) => break,
                Err(e) => println!("error: {:#}", e),
                _ => {}
            }
        }

        Ok(())
    }

    fn do_command(&mut self, cmd: &str, args: &[&str]) -> anyhow::Result<ControlFlow<()>> {
        match cmd {
            "quit" => return Ok(ControlFlow::Break(())),
            "position" => self.do_command_position(args)?,
            "study" => self.do_command_study(args)?,
            "click" => self.do_command_click(args)?,
            "hand" => self.do_command_hand(args)?,
            "cancel" => self.do_command_cancel(args)?,
            "move" => self.do_command_move(args)?,
            "edit" => self.do_command_edit(args)?,
            "start" | "end" | "back" | "forward" => self.do_command_seek(cmd)?,
            "play" => self.do_command_play(args)?,
            "print" => self.do_command_print(args)?,
            _ => bail!("unknown command: {}", cmd),
        }

        Ok(ControlFlow::Continue(()))
    }

    fn do_command_position(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let pos_s = args.join(" ");
        let pos = sfen_decode_position(pos_s)?;

        self.game.load_position(pos);

        self.print_position();

        Ok(())
    }

    fn do_command_study(&mut self, _args: &[&str]) -> anyhow::Result<()> {
        self.game = Game::study();

        self.print_position();

        Ok(())
    }

    /// `click <マス> [+]`: マスをクリックする。`+` はダブルクリック(成り)。
    fn do_command_click(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let sq_s = args.get(0).context("square is not specified")?;
        let sq = sfen_decode_square(sq_s)?;

        let intent = match args.get(1) {
            None => PromotionIntent::None,
            Some(&"+") => PromotionIntent::Requested,
            Some(s) => bail!("invalid promotion specifier: {}", s),
        };

        let outcome = self.game.select_square(sq, intent)?;
        self.print_outcome(outcome);

        Ok(())
    }

    /// `hand <駒>`: 駒台の駒をクリックする。駒は sfen の駒文字(大文字は先手、小文字は後手)。
    fn do_command_hand(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let pc_s = args.get(0).context("piece is not specified")?;

        let mut chars = pc_s.chars();
        let c = chars.next().context("piece is not specified")?;
        ensure!(chars.next().is_none(), "invalid piece: {}", pc_s);

        let (side, pk) = sfen_decode_piece(c)?;

        let outcome = self.game.select_hand(side, pk)?;
        self.print_outcome(outcome);

        Ok(())
    }

    fn do_command_cancel(&mut self, _args: &[&str]) -> anyhow::Result<()> {
        self.game.cancel_selection();

        Ok(())
    }

    fn do_command_move(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let mv_s = args.get(0).context("move is not specified")?;
        let mv = sfen_decode_move(mv_s)?;

        self.game.play_move(mv)?;

        self.print_position();

        Ok(())
    }

    fn do_command_edit(&mut self, _args: &[&str]) -> anyhow::Result<()> {
        if self.game.toggle_edit_mode() {
            println!("edit mode");
        } else {
            println!("game mode");
            self.print_position();
        }

        Ok(())
    }

    fn do_command_seek(&mut self, cmd: &str) -> anyhow::Result<()> {
        let moved = match cmd {
            "start" => self.game.seek_start().is_some(),
            "end" => self.game.seek_end().is_some(),
            "back" => self.game.step_back().is_some(),
            "forward" => self.game.step_forward().is_some(),
            _ => bail!("unknown seek command: {}", cmd),
        };
        ensure!(moved, "cannot {}", cmd);

        self.print_position();

        Ok(())
    }

    /// `play [間隔(ミリ秒)]`: 現在位置から履歴の末尾まで自動再生する。
    fn do_command_play(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let interval = match args.get(0) {
            Some(s) => Duration::from_millis(s.parse().context("invalid interval")?),
            None => DEFAULT_AUTOPLAY_INTERVAL,
        };

        let token = self.game.start_autoplay(Instant::now(), interval);
        self.print_position();

        let token = match token {
            Some(token) => token,
            None => return Ok(()),
        };

        while let Some(deadline) = self.game.autoplay_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            if let Some(pos) = self.game.poll_autoplay(token, Instant::now()) {
                println!();
                print!("{}", pos);
            }
        }

        Ok(())
    }

    fn do_command_print(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let obj_s = *args.get(0).context("object name is not specified")?;

        match obj_s {
            "position" => self.print_position(),
            "record" => {
                for line in split_record(self.game.record()) {
                    println!("{}", line);
                }
            }
            "sfen" => println!("{}", sfen_encode_position(self.game.position())),
            "selection" => self.print_selection(),
            "history" => println!("{}/{}", self.game.cursor(), self.game.len() - 1),
            _ => bail!("unknown object name"),
        }

        Ok(())
    }

    fn print_outcome(&self, outcome: SelectOutcome) {
        match outcome {
            SelectOutcome::Selected => self.print_selection(),
            SelectOutcome::Cancelled => println!("cancelled"),
            SelectOutcome::Ignored => println!("ignored"),
            SelectOutcome::Moved(_) | SelectOutcome::Edited => self.print_position(),
        }
    }

    fn print_selection(&self) {
        match self.game.selection() {
            None => println!("no selection"),
            Some(Selection::Square(sq)) => println!("selected: {}", sq),
            Some(Selection::Hand(side, pk)) => println!("selected: {}の手駒 {}", side, pk),
        }

        let sqs = self.game.reachable();
        if !sqs.is_empty() {
            let sqs_s: Vec<_> = sqs.iter().map(ToString::to_string).collect();
            println!("reachable: {}", sqs_s.join(" "));
        }
    }

    fn print_position(&self) {
        print!("{}", self.game.position());
        if let Some(line) = split_record(self.game.record()).next() {
            println!("直前の手：{}", line);
        }
    }
}
