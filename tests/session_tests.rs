//! Session tests - swaps, cascades, objectives, rescues, hooks

mod common;

use anyhow::anyhow;

use japa_match::core::{
    find_matches, has_valid_moves, is_playable, CascadePass, DeityCounts, Grid, LevelConfig,
    LevelResult, ProgressUpdate, Session, SessionHooks, SessionSnapshot, SwapOutcome,
};
use japa_match::types::{BonusTier, Deity, GameMode, GameStatus, Position};

use common::{dead_board, dead_board_with_top, ScriptedSource};

fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn restored(
    level: &LevelConfig,
    mode: GameMode,
    grid: Grid,
    refills: &[usize],
) -> Session<ScriptedSource> {
    let snapshot = SessionSnapshot {
        level_id: level.id,
        grid,
        score: 0,
        moves_remaining: level.moves,
        counts: DeityCounts::new(),
        status: GameStatus::Playing,
        combo: 0,
    };
    Session::restore(level, mode, snapshot, ScriptedSource::new(refills, 7)).unwrap()
}

/// 8x8, palette 4: three swaps that each clear one three-run of Ganeshas
fn three_swap_session(level: &LevelConfig, mode: GameMode) -> Session<ScriptedSource> {
    restored(
        level,
        mode,
        dead_board_with_top("00300123", 8),
        &[0, 0, 3, 3, 0, 0],
    )
}

const THREE_SWAPS: [(Position, Position); 3] = [
    (Position::new(0, 2), Position::new(0, 3)),
    (Position::new(0, 2), Position::new(1, 2)),
    (Position::new(0, 3), Position::new(0, 4)),
];

#[test]
fn test_end_to_end_three_swaps_win() {
    let level = LevelConfig::new(1, 3, 80, 4);
    let mut session = three_swap_session(&level, GameMode::General);

    let first = session.swap(THREE_SWAPS[0].0, THREE_SWAPS[0].1);
    assert_eq!(first.outcome, SwapOutcome::Resolved);
    assert_eq!(first.passes.len(), 1);
    assert_eq!(first.score, 180);
    assert_eq!(first.status, GameStatus::Playing);
    assert!(!first.rescued);
    assert_eq!(session.grid().to_digits()[0], "00330123");

    let second = session.swap(THREE_SWAPS[1].0, THREE_SWAPS[1].1);
    assert_eq!(second.outcome, SwapOutcome::Resolved);
    assert_eq!(second.objective_completed, 2);
    assert_eq!(session.grid().to_digits()[0], "30030123");
    assert_eq!(session.grid().to_digits()[1], "23312301");
    assert_eq!(session.last_swap(), Some((Deity::Rama, Deity::Ganesha)));

    let third = session.swap(THREE_SWAPS[2].0, THREE_SWAPS[2].1);
    assert_eq!(third.outcome, SwapOutcome::Resolved);
    assert_eq!(third.status, GameStatus::Won);
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.moves_remaining(), 77);
    assert!(session.objective_completed() >= 3);
    assert!(session.score() >= 540);
    // 77 moves left earns three stars regardless of ratio
    assert_eq!(third.stars, Some(3));
    assert_eq!(session.stars(), 3);

    // Terminal: further swaps are rejected
    let (a, b) = session.hint().unwrap_or((pos(0, 0), pos(0, 1)));
    let after = session.swap(a, b);
    assert_eq!(after.outcome, SwapOutcome::Rejected);
    assert_eq!(session.moves_remaining(), 77);
}

#[test]
fn test_no_match_swap_is_reverted() {
    let level = LevelConfig::new(1, 3, 80, 4);
    let mut session = three_swap_session(&level, GameMode::General);
    let before = session.grid().clone();

    // (4,4)<->(4,5) on the dead rows makes nothing.
    let result = session.swap(pos(4, 4), pos(4, 5));
    assert_eq!(result.outcome, SwapOutcome::Reverted);
    assert!(result.passes.is_empty());
    assert_eq!(session.grid(), &before);
    assert_eq!(session.moves_remaining(), 80);
    assert_eq!(session.score(), 0);
    assert_eq!(session.last_swap(), None);
}

#[test]
fn test_illegal_requests_are_rejected() {
    let level = LevelConfig::new(1, 3, 80, 4);
    let mut session = three_swap_session(&level, GameMode::General);
    let before = session.grid().clone();

    for (a, b) in [
        (pos(0, 0), pos(1, 1)),
        (pos(0, 0), pos(0, 2)),
        (pos(7, 7), pos(8, 7)),
        (pos(2, 2), pos(2, 2)),
    ] {
        let result = session.swap(a, b);
        assert_eq!(result.outcome, SwapOutcome::Rejected, "{a:?} {b:?}");
    }
    assert_eq!(session.grid(), &before);
    assert_eq!(session.moves_remaining(), 80);
}

#[test]
fn test_empty_cell_swap_rejected() {
    let level = LevelConfig::new(1, 3, 80, 4);
    let mut grid = dead_board_with_top("00300123", 8);
    grid.set(pos(0, 3), None);
    let mut session = restored(&level, GameMode::General, grid, &[]);
    let result = session.swap(pos(0, 2), pos(0, 3));
    assert_eq!(result.outcome, SwapOutcome::Rejected);
}

#[test]
fn test_matching_swap_uses_exactly_one_move() {
    let level = LevelConfig::new(1, 50, 30, 6);
    for seed in 0..10u64 {
        let mut session = Session::with_seed(&level, GameMode::General, seed).unwrap();
        let (a, b) = session.hint().unwrap();
        let result = session.swap(a, b);
        assert_eq!(result.outcome, SwapOutcome::Resolved);
        assert_eq!(session.moves_remaining(), 29, "seed {seed}");
        assert!(session.grid().is_full());
        assert!(has_valid_moves(session.grid()));
    }
}

#[test]
fn test_chained_cascade_raises_combo() {
    let level = LevelConfig::new(1, 10, 80, 4);
    // Refill row 0 with three Shivas, which clear on a second pass.
    let mut session = restored(
        &level,
        GameMode::General,
        dead_board_with_top("00300123", 8),
        &[1, 1, 1, 0, 0, 3],
    );

    let result = session.swap(pos(0, 2), pos(0, 3));
    assert_eq!(result.passes.len(), 2);
    assert_eq!(result.passes[0].combo, 1);
    assert_eq!(result.passes[0].deities, vec![Deity::Ganesha]);
    assert_eq!(result.passes[0].score, 180);
    assert_eq!(result.passes[1].combo, 2);
    assert_eq!(result.passes[1].deities, vec![Deity::Shiva]);
    assert_eq!(result.passes[1].score, 270);
    assert_eq!(result.score, 450);
    assert_eq!(result.max_combo(), 2);
    assert_eq!(session.combo(), 2);
    assert_eq!(result.objective_completed, 2);
    assert_eq!(session.counts().get(Deity::Shiva), 1);
    assert_eq!(session.grid().to_digits()[0], "00330123");
}

#[test]
fn test_cascade_pass_details() {
    let level = LevelConfig::new(1, 10, 80, 4);
    let mut session = three_swap_session(&level, GameMode::General);
    let result = session.swap(THREE_SWAPS[0].0, THREE_SWAPS[0].1);
    let pass = &result.passes[0];

    assert_eq!(pass.matches.len(), 1);
    assert_eq!(pass.bonus, BonusTier::None);
    assert_eq!(
        pass.cleared.iter().copied().collect::<Vec<_>>(),
        vec![pos(0, 0), pos(0, 1), pos(0, 2)]
    );
    // Top row cleared: nothing falls, three cells spawn.
    assert!(pass.movements.is_empty());
    assert_eq!(pass.spawned.len(), 3);
    assert_eq!(result.matched.get(Deity::Ganesha), 1);
}

#[test]
fn test_deity_mode_only_counts_target() {
    let level = LevelConfig::new(1, 3, 80, 4);
    let mut session = three_swap_session(&level, GameMode::Deity(Deity::Shiva));

    let result = session.swap(THREE_SWAPS[0].0, THREE_SWAPS[0].1);
    assert_eq!(result.outcome, SwapOutcome::Resolved);
    assert_eq!(result.matched.get(Deity::Ganesha), 1);
    assert_eq!(result.objective_completed, 0);
    assert!(session.counts().is_empty());
    // The move and the points are still spent and earned.
    assert_eq!(result.moves_remaining, 79);
    assert_eq!(result.score, 180);
}

#[test]
fn test_deity_mode_counts_target_matches() {
    let level = LevelConfig::new(1, 3, 80, 4);
    let mut session = restored(
        &level,
        GameMode::Deity(Deity::Shiva),
        dead_board_with_top("00300123", 8),
        &[1, 1, 1, 0, 0, 3],
    );
    let result = session.swap(pos(0, 2), pos(0, 3));
    assert_eq!(result.matched.total(), 2);
    assert_eq!(result.objective_completed, 1);
    assert_eq!(session.counts().get(Deity::Shiva), 1);
    assert_eq!(session.counts().get(Deity::Ganesha), 0);
}

#[test]
fn test_dead_board_rescue() {
    // Clearing row 0 and refilling it with 0,1,2 leaves the dead pattern.
    let level = LevelConfig::new(1, 20, 15, 4).with_size(4, 4);
    let mut session = restored(
        &level,
        GameMode::General,
        Grid::from_digits(&["0030", "2301", "0123", "2301"]).unwrap(),
        &[0, 1, 2],
    );

    let result = session.swap(pos(0, 2), pos(0, 3));
    assert_eq!(result.outcome, SwapOutcome::Resolved);
    assert!(result.rescued);
    assert_eq!(result.passes.len(), 1);
    assert_eq!(result.moves_remaining, 14);
    assert_eq!(result.score, 180);
    assert_eq!(result.status, GameStatus::Playing);

    assert_ne!(session.grid(), &dead_board(4, 4));
    assert!(is_playable(session.grid()));
    assert!(find_matches(session.grid()).is_empty());
}

#[test]
fn test_last_move_without_target_loses() {
    let level = LevelConfig::new(1, 50, 1, 4);
    let mut session = three_swap_session(&level, GameMode::General);
    let result = session.swap(THREE_SWAPS[0].0, THREE_SWAPS[0].1);
    assert_eq!(result.status, GameStatus::Lost);
    assert_eq!(result.stars, None);
    assert_eq!(session.stars(), 0);
    assert_eq!(session.moves_remaining(), 0);
}

#[test]
fn test_win_checked_before_loss() {
    // The last move reaches the target: Won, not Lost.
    let level = LevelConfig::new(1, 1, 1, 4);
    let mut session = three_swap_session(&level, GameMode::General);
    let result = session.swap(THREE_SWAPS[0].0, THREE_SWAPS[0].1);
    assert_eq!(result.status, GameStatus::Won);
    assert_eq!(result.moves_remaining, 0);
    // completed 1 of 1 with no moves left
    assert_eq!(result.stars, Some(1));
}

#[derive(Default)]
struct Recorder {
    passes: Vec<(u32, BonusTier)>,
    progress: Vec<ProgressUpdate>,
    results: Vec<LevelResult>,
}

impl SessionHooks for Recorder {
    fn on_cascade_pass(&mut self, pass: &CascadePass) -> anyhow::Result<()> {
        self.passes.push((pass.combo, pass.bonus));
        Ok(())
    }

    fn on_progress(&mut self, update: &ProgressUpdate) -> anyhow::Result<()> {
        self.progress.push(*update);
        Ok(())
    }

    fn on_level_complete(&mut self, result: &LevelResult) -> anyhow::Result<()> {
        self.results.push(*result);
        Ok(())
    }
}

#[test]
fn test_hooks_receive_events() {
    let level = LevelConfig::new(5, 3, 80, 4);
    let mut session = three_swap_session(&level, GameMode::General);
    let mut recorder = Recorder::default();

    // A reverted swap reports nothing.
    session.swap_observed(pos(4, 4), pos(4, 5), &mut recorder);
    assert!(recorder.passes.is_empty());
    assert!(recorder.progress.is_empty());

    for (a, b) in THREE_SWAPS {
        session.swap_observed(a, b, &mut recorder);
    }

    assert!(recorder.passes.len() >= 3);
    assert_eq!(recorder.passes[0], (1, BonusTier::None));
    assert_eq!(recorder.progress.len(), 3);
    assert_eq!(recorder.progress[0].objective_completed, 1);
    assert_eq!(recorder.progress[0].objective_target, 3);
    assert_eq!(recorder.progress[0].counted.get(Deity::Ganesha), 1);

    assert_eq!(recorder.results.len(), 1);
    let won = recorder.results[0];
    assert_eq!(won.level_id, 5);
    assert_eq!(won.stars, 3);
    assert_eq!(won.best_score, session.score());
    assert_eq!(won.objective_completed, session.objective_completed());
}

struct Failing;

impl SessionHooks for Failing {
    fn on_cascade_pass(&mut self, _pass: &CascadePass) -> anyhow::Result<()> {
        Err(anyhow!("audio device gone"))
    }

    fn on_progress(&mut self, _update: &ProgressUpdate) -> anyhow::Result<()> {
        Err(anyhow!("storage full"))
    }

    fn on_level_complete(&mut self, _result: &LevelResult) -> anyhow::Result<()> {
        Err(anyhow!("storage full"))
    }
}

#[test]
fn test_failing_hooks_do_not_affect_state() {
    let level = LevelConfig::new(1, 3, 80, 4);
    let mut quiet = three_swap_session(&level, GameMode::General);
    let mut noisy = three_swap_session(&level, GameMode::General);

    for (a, b) in THREE_SWAPS {
        let expected = quiet.swap(a, b);
        let actual = noisy.swap_observed(a, b, &mut Failing);
        assert_eq!(actual, expected);
    }
    assert_eq!(noisy.snapshot(), quiet.snapshot());
    assert_eq!(noisy.status(), GameStatus::Won);
}

#[test]
fn test_cascade_is_capped() {
    // Every refill is Ganesha, so the top row rematches forever.
    let level = LevelConfig::new(1, 50, 10, 4).with_size(4, 4);
    let mut session = restored(
        &level,
        GameMode::General,
        Grid::from_digits(&["0030", "2301", "0123", "2301"]).unwrap(),
        &[0; 200],
    );

    let result = session.swap(pos(0, 2), pos(0, 3));
    assert_eq!(result.passes.len(), 20);
    assert_eq!(result.max_combo(), 20);
    // sum of 180 * (combo + 1) / 2 for combo 1..=20
    assert_eq!(result.score, 20_700);
    assert_eq!(result.objective_completed, 20);
    assert_eq!(result.status, GameStatus::Playing);
    // Finalized with the last refill's run still standing.
    assert!(!find_matches(session.grid()).is_empty());
}
