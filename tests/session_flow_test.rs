//! Integration test: full session flow
//!
//! Drives a session through start, play, crash, countdown, and restart
//! using only the public API. Most tests use a "corridor" config where
//! every gap sits at the same height, so a simple autopilot can fly
//! indefinitely without randomness deciding the outcome.

use flappy::accounts::{BestScoreStore, MemoryStore};
use flappy::game::CollisionKind;
use flappy::{ConfigError, GameConfig, GameEvent, GameSession, GapHeight, Phase, RecyclePolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Gap of 400 px with 159 px margins fills the 718 px playfield exactly,
/// pinning every gap to [159, 559].
fn corridor_config() -> GameConfig {
    GameConfig {
        gap_height: GapHeight::Fixed(400.0),
        gap_margin: 159.0,
        ..GameConfig::default()
    }
}

/// Flap whenever the player sinks to y = 480. Keeps it between roughly
/// 200 and 490, well inside the corridor gap.
fn autopilot(session: &mut GameSession, rng: &mut ChaCha8Rng) -> Vec<GameEvent> {
    if session.phase() == Phase::Playing && session.player().y >= 480.0 {
        session.apply_input(rng)
    } else {
        Vec::new()
    }
}

/// Run `frames` frames with the autopilot, returning every event.
fn fly(session: &mut GameSession, rng: &mut ChaCha8Rng, frames: u32) -> Vec<(u32, GameEvent)> {
    let mut log = Vec::new();
    for frame in 1..=frames {
        for e in autopilot(session, rng) {
            log.push((frame, e));
        }
        for e in session.tick(rng).events {
            log.push((frame, e));
        }
    }
    log
}

fn started(config: GameConfig, best: u32) -> (GameSession, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut session = GameSession::new(config, best).expect("valid config");
    session.start_session(&mut rng);
    (session, rng)
}

fn score_frames(log: &[(u32, GameEvent)]) -> Vec<u32> {
    log.iter()
        .filter(|(_, e)| matches!(e, GameEvent::ScoreIncrement { .. }))
        .map(|(f, _)| *f)
        .collect()
}

// =============================================================================
// Playing
// =============================================================================

#[test]
fn test_autopilot_survives_corridor() {
    let (mut session, mut rng) = started(corridor_config(), 0);
    let log = fly(&mut session, &mut rng, 3000);

    assert_eq!(session.phase(), Phase::Playing);
    assert!(!log
        .iter()
        .any(|(_, e)| matches!(e, GameEvent::Collision { .. })));
    assert_eq!(session.current_score(), 52);
}

#[test]
fn test_shift_policy_scores_when_obstacle_leaves_screen() {
    let (mut session, mut rng) = started(corridor_config(), 0);
    let log = fly(&mut session, &mut rng, 400);

    // First obstacle starts at x = 431 and is 78 wide: off screen after
    // ceil(509 / 6.2) = 83 frames, then one more every 348 / 6.2 frames.
    assert_eq!(score_frames(&log), vec![83, 139, 195, 251, 307, 363]);
}

#[test]
fn test_mark_policy_scores_when_player_clears_obstacle() {
    let config = GameConfig {
        recycle_policy: RecyclePolicy::MarkAndRegenerate,
        ..corridor_config()
    };
    let (mut session, mut rng) = started(config, 0);
    let log = fly(&mut session, &mut rng, 400);

    // Trailing edge passes the player's left edge (x = 43.1) on frame 76
    assert_eq!(score_frames(&log), vec![76, 132, 188, 244, 300, 356]);
    assert_eq!(session.stream().len(), 3);
}

#[test]
fn test_score_increments_one_at_a_time() {
    let (mut session, mut rng) = started(corridor_config(), 0);
    let mut last = 0;
    for _ in 0..1500 {
        autopilot(&mut session, &mut rng);
        let result = session.tick(&mut rng);
        let now = session.current_score();
        assert!(now == last || now == last + 1);
        let increments = result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreIncrement { .. }))
            .count() as u32;
        assert_eq!(increments, now - last);
        last = now;
    }
}

#[test]
fn test_milestone_fires_once_per_interval() {
    let (mut session, mut rng) = started(corridor_config(), 0);
    let log = fly(&mut session, &mut rng, 700);
    assert!(session.current_score() >= 11);

    let milestones: Vec<u32> = log
        .iter()
        .filter_map(|(_, e)| match e {
            GameEvent::Milestone { score } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(milestones, vec![5, 10]);

    // The milestone lands in the same frame as the fifth point
    let fifth = log
        .iter()
        .find(|(_, e)| *e == GameEvent::ScoreIncrement { score: 5 })
        .map(|(f, _)| *f);
    let milestone = log
        .iter()
        .find(|(_, e)| *e == GameEvent::Milestone { score: 5 })
        .map(|(f, _)| *f);
    assert_eq!(fifth, milestone);
}

#[test]
fn test_stream_invariants_hold_every_frame() {
    let config = GameConfig::default();
    let (mut session, mut rng) = started(config.clone(), 0);
    for _ in 0..200 {
        session.tick(&mut rng);
        let xs: Vec<f64> = session.obstacles().map(|o| o.x).collect();
        assert_eq!(xs.len(), 3);
        for pair in xs.windows(2) {
            assert!((pair[1] - pair[0] - config.pitch).abs() < 1e-6);
        }
        for o in session.obstacles() {
            assert!(o.gap_start >= config.gap_margin);
            assert!(o.gap_end() <= config.playable_height - config.gap_margin + 1e-9);
        }
        assert!(session.player().y <= config.floor());
    }
}

// =============================================================================
// Crash, countdown, restart
// =============================================================================

#[test]
fn test_free_fall_crashes_once() {
    let (mut session, mut rng) = started(GameConfig::default(), 0);
    let mut collisions = 0;
    for _ in 0..200 {
        let result = session.tick(&mut rng);
        collisions += result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Collision { .. }))
            .count();
    }
    assert_eq!(collisions, 1);
    assert_eq!(session.phase(), Phase::Cooldown);
    assert!(session.player().y <= session.config().floor());
}

#[test]
fn test_floor_crash_without_obstacles_in_reach() {
    // Obstacles start far away so only the floor can end the game
    let config = GameConfig {
        playable_width: 5000.0,
        ..GameConfig::default()
    };
    let (mut session, mut rng) = started(config, 0);
    let mut crash = None;
    for _ in 0..200 {
        for e in session.tick(&mut rng).events {
            if let GameEvent::Collision { kind, .. } = e {
                crash = Some(kind);
            }
        }
    }
    assert_eq!(crash, Some(CollisionKind::Floor));
    assert!((session.player().y - session.config().floor()).abs() < f64::EPSILON);
}

#[test]
fn test_countdown_gates_restart() {
    let (mut session, mut rng) = started(GameConfig::default(), 0);
    while session.phase() == Phase::Playing {
        session.tick(&mut rng);
    }
    assert_eq!(session.countdown_remaining(), 4);

    for expected in [3, 2, 1] {
        assert_eq!(
            session.countdown_tick(),
            vec![GameEvent::CountdownTick {
                remaining: expected
            }]
        );
        assert!(session.apply_input(&mut rng).is_empty());
        assert!(session.restart_session(&mut rng).is_empty());
    }

    let events = session.countdown_tick();
    assert_eq!(
        events,
        vec![
            GameEvent::CountdownTick { remaining: 0 },
            GameEvent::CountdownComplete
        ]
    );
    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.countdown_remaining(), 0);

    // No automatic return to the start screen
    session.tick(&mut rng);
    assert_eq!(session.phase(), Phase::GameOver);

    let events = session.restart_session(&mut rng);
    assert_eq!(events, vec![GameEvent::SessionStarted, GameEvent::Impulse]);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.current_score(), 0);
}

#[test]
fn test_stale_countdown_handle_is_ignored() {
    let (mut session, mut rng) = started(GameConfig::default(), 0);
    while session.phase() == Phase::Playing {
        session.tick(&mut rng);
    }
    let first = session.countdown_handle();
    session.advance_countdown(4000);
    session.restart_session(&mut rng);
    while session.phase() == Phase::Playing {
        session.tick(&mut rng);
    }
    let second = session.countdown_handle();
    assert_ne!(first, second);

    assert!(session.countdown_tick_for(first).is_empty());
    assert_eq!(session.countdown_remaining(), 4);
    assert_eq!(
        session.countdown_tick_for(second),
        vec![GameEvent::CountdownTick { remaining: 3 }]
    );
}

// =============================================================================
// Best score
// =============================================================================

#[test]
fn test_best_score_tracks_maximum_across_games() {
    let mut store = MemoryStore { best: 2 };
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut session = GameSession::new(corridor_config(), store.load_best(None)).unwrap();
    let mut max_seen = store.best;

    for frames in [400u32, 150, 600] {
        session.apply_input(&mut rng);
        for _ in 0..frames {
            autopilot(&mut session, &mut rng);
            let result = session.tick(&mut rng);
            max_seen = max_seen.max(session.current_score());
            if result.best_score_changed {
                store.save_best(None, session.best_score()).unwrap();
            }
            assert_eq!(session.best_score(), max_seen);
        }
        // Stop flapping until the player crashes, then wait out the countdown
        while session.phase() == Phase::Playing {
            if session.tick(&mut rng).best_score_changed {
                store.save_best(None, session.best_score()).unwrap();
            }
            max_seen = max_seen.max(session.current_score());
        }
        session.advance_countdown(10_000);
        assert_eq!(session.phase(), Phase::GameOver);
    }

    assert_eq!(store.best, max_seen);
    assert!(max_seen >= 6);
}

#[test]
fn test_runaway_scroll_speed_refused_at_session_start() {
    // At this speed a whole stream would pass in one frame without ever
    // overlapping the player
    let config = GameConfig {
        scroll_speed: 2000.0,
        ..GameConfig::default()
    };
    assert!(matches!(
        GameSession::new(config, 0),
        Err(ConfigError::ScrollTooFast { .. })
    ));
}

#[test]
fn test_fastest_allowed_scroll_scores_one_per_obstacle() {
    let config = GameConfig {
        scroll_speed: 138.0,
        ..corridor_config()
    };
    let (mut session, mut rng) = started(config, 0);
    for _ in 0..40 {
        autopilot(&mut session, &mut rng);
        let result = session.tick(&mut rng);
        let increments = result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScoreIncrement { .. }))
            .count();
        assert!(increments <= 1);
        assert_eq!(session.stream().len(), 3);
    }
}

#[test]
fn test_persisted_best_seeds_session() {
    let session = GameSession::new(GameConfig::default(), 31).unwrap();
    assert_eq!(session.best_score(), 31);
    assert_eq!(session.snapshot().best_score, 31);
}
