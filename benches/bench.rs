use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shogiban::*;

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let pos = sfen_decode_position("sfen R8/2K1S1SSk/4B4/9/9/9/9/9/1L1L1L3 b RBGSNLP3g3n17p 1")
        .expect("invalid sfen");

    c.bench_function("reachable_squares_all", |b| {
        b.iter(|| reachable_all(black_box(&pos)))
    });

    c.bench_function("generate_moves", |b| {
        b.iter(|| generate_moves(black_box(&pos)).len())
    });

    c.bench_function("replay_kakugawari", |b| {
        b.iter(|| replay(black_box("startpos moves 7g7f 3c3d 8h2b+ 3a2b B*4e")))
    });
}

fn reachable_all(pos: &Position) -> usize {
    pos.board()
        .pieces()
        .map(|(sq, _)| pos.reachable_squares(sq).len())
        .sum()
}

fn replay(sfen: &str) -> usize {
    let (pos, mvs) = sfen_decode(sfen).expect("invalid sfen");

    let mut game = Game::new(pos);
    for mv in mvs {
        game.play_move(mv).expect("illegal move");
    }

    game.record().len()
}
