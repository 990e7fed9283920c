use silent_operator::sim::{Ring, RingField};
use silent_operator::{Difficulty, GameEvent, GamePhase, LockGame};
use std::f32::consts::{PI, TAU};

const TICK_MS: f64 = 1000.0 / 60.0;

fn still_field(angles: [f32; 3]) -> RingField {
    RingField::from_rings(
        angles
            .iter()
            .enumerate()
            .map(|(i, &a)| Ring::new(150.0 - i as f32 * 40.0, a, 0.0, PI / 4.0))
            .collect(),
    )
}

/// Tick until the shot in flight is resolved
fn resolve_shot(game: &mut LockGame) {
    for _ in 0..100 {
        if !game.projectile().active {
            return;
        }
        game.tick();
    }
    panic!("projectile never reached a gate");
}

#[test]
fn three_aligned_shots_win_exactly_on_the_third() {
    let mut game = LockGame::new(1);
    game.start_with_field(Difficulty::Easy, still_field([0.0; 3]));

    let mut passes = 0;
    for shot in 0..3 {
        assert!(game.fire(), "shot {shot} should launch");
        resolve_shot(&mut game);
        passes += 1;
        if shot < 2 {
            assert_eq!(game.phase(), GamePhase::Running);
            assert_eq!(game.level_index(), passes);
        }
    }

    assert_eq!(game.phase(), GamePhase::Won);
    let events = game.drain_events();
    assert_eq!(
        events,
        vec![
            GameEvent::Started {
                difficulty: Difficulty::Easy
            },
            GameEvent::Advanced { level_index: 1 },
            GameEvent::Advanced { level_index: 2 },
            GameEvent::Won,
        ]
    );
    assert!(!game.fire());
}

#[test]
fn first_shot_into_solid_ring_fails() {
    let mut game = LockGame::new(2);
    game.start_with_field(Difficulty::Easy, still_field([PI, 0.0, 0.0]));
    game.drain_events();

    game.fire();
    resolve_shot(&mut game);

    assert_eq!(game.phase(), GamePhase::Failed);
    assert_eq!(game.level_index(), 0);
    assert_eq!(
        game.drain_events(),
        vec![GameEvent::Failed {
            level_index: 0,
            reset_in_ms: 1500.0
        }]
    );
}

#[test]
fn failed_run_resets_after_delay() {
    let mut game = LockGame::new(3);
    game.start_with_field(Difficulty::Easy, still_field([PI, 0.0, 0.0]));
    game.fire();
    resolve_shot(&mut game);
    game.drain_events();

    game.update(1499.0);
    assert_eq!(game.phase(), GamePhase::Failed);
    game.update(1.0);
    assert_eq!(game.phase(), GamePhase::Idle);
    assert_eq!(game.drain_events(), vec![GameEvent::Reset]);
    assert!(game.field().is_none());
}

#[test]
fn stop_mid_run_goes_idle_and_restart_draws_fresh_angles() {
    let mut game = LockGame::new(4);
    game.start(Difficulty::Hard);
    game.update(TICK_MS * 3.0);
    let first: Vec<f32> = game
        .field()
        .map(|f| f.rings().iter().map(|r| r.angle).collect())
        .unwrap_or_default();

    game.stop();
    assert_eq!(game.phase(), GamePhase::Idle);
    assert!(!game.driver().is_running());
    assert_eq!(game.pending_timers(), 0);
    assert!(game.field().is_none());

    // Stopping twice changes nothing
    game.drain_events();
    game.stop();
    assert!(game.drain_events().is_empty());

    game.start(Difficulty::Hard);
    let second: Vec<f32> = game
        .field()
        .map(|f| f.rings().iter().map(|r| r.angle).collect())
        .unwrap_or_default();
    assert_eq!(second.len(), 3);
    assert_ne!(first, second);
}

#[test]
fn stop_cancels_pending_fail_reset() {
    let mut game = LockGame::new(5);
    game.start_with_field(Difficulty::Easy, still_field([PI, 0.0, 0.0]));
    game.fire();
    resolve_shot(&mut game);
    assert_eq!(game.pending_timers(), 1);

    game.stop();
    game.start_with_field(Difficulty::Easy, still_field([0.0; 3]));
    game.drain_events();

    // The old reset would have landed here
    game.update(2000.0);
    assert_eq!(game.phase(), GamePhase::Running);
    assert!(!game.drain_events().contains(&GameEvent::Reset));
}

#[test]
fn start_from_failed_replaces_the_run() {
    let mut game = LockGame::new(6);
    game.start_with_field(Difficulty::Easy, still_field([PI, 0.0, 0.0]));
    game.fire();
    resolve_shot(&mut game);

    game.start(Difficulty::Easy);
    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.pending_timers(), 0);
}

#[test]
fn start_while_running_is_ignored() {
    let mut game = LockGame::new(7);
    game.start(Difficulty::Easy);
    let before: Vec<f32> = game
        .field()
        .map(|f| f.rings().iter().map(|r| r.angle).collect())
        .unwrap_or_default();
    game.start(Difficulty::Hard);
    assert_eq!(game.difficulty(), Difficulty::Easy);
    let after: Vec<f32> = game
        .field()
        .map(|f| f.rings().iter().map(|r| r.angle).collect())
        .unwrap_or_default();
    assert_eq!(before, after);
}

#[test]
fn easy_run_pinned_gate_advances_to_level_one() {
    let mut game = LockGame::new(8);
    game.start(Difficulty::Easy);
    if let Some(field) = game.field_mut() {
        field.rings_mut()[0].angle = 0.0;
    }
    game.drain_events();

    assert!(game.fire());
    let mut elapsed = 0.0;
    while game.projectile().active && elapsed < 1000.0 {
        game.update(TICK_MS);
        elapsed += TICK_MS;
    }

    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.drain_events(), vec![GameEvent::Advanced { level_index: 1 }]);
}

#[test]
fn idle_game_ignores_fire_and_ticks() {
    let mut game = LockGame::new(9);
    assert!(!game.fire());
    game.tick();
    assert_eq!(game.update(500.0), 0);
    assert_eq!(game.phase(), GamePhase::Idle);
    assert!(game.drain_events().is_empty());
}

#[test]
fn fast_projectile_cannot_skip_a_gate() {
    use silent_operator::LockConfig;

    // Step larger than the whole band: a point test would jump the ring
    let config = LockConfig {
        projectile_step: 30.0,
        ..LockConfig::default()
    };
    let mut game = LockGame::with_config(config, 10).unwrap();
    game.start_with_field(Difficulty::Easy, still_field([PI, 0.0, 0.0]));
    game.fire();
    resolve_shot(&mut game);
    assert_eq!(game.phase(), GamePhase::Failed);
}

#[test]
fn frame_reports_normalized_angles() {
    let mut game = LockGame::new(11);
    game.start_with_field(
        Difficulty::Hard,
        still_field([-PI / 2.0, 5.0 * TAU + 1.0, 0.0]),
    );
    let frame = game.frame();
    assert_eq!(frame.rings.len(), 3);
    for ring in &frame.rings {
        assert!((0.0..TAU).contains(&ring.angle));
    }
    assert_eq!(frame.accent_color, "#ff0055");
    assert!(frame.projectile.is_none());

    game.fire();
    let frame = game.frame();
    let shot = frame.projectile.expect("shot in flight");
    assert_eq!(shot.radius, 160.0);
}

#[test]
#[should_panic(expected = "can never be passed")]
fn closed_gate_is_rejected() {
    let mut game = LockGame::new(12);
    let mut field = still_field([0.0; 3]);
    field.rings_mut()[1].gap_size = 0.0;
    game.start_with_field(Difficulty::Easy, field);
}

#[test]
fn nan_frame_does_not_stall_the_run() {
    let mut game = LockGame::new(13);
    game.start_with_field(Difficulty::Easy, still_field([0.0; 3]));
    assert_eq!(game.update(f64::NAN), 0);
    assert_eq!(game.update(40.0), 2);
}

fn rotating_field() -> RingField {
    RingField::from_rings(
        (0..3)
            .map(|i| Ring::new(150.0 - i as f32 * 40.0, PI, 0.02, PI / 4.0))
            .collect(),
    )
}

fn game_at(tick_hz: f32) -> LockGame {
    use silent_operator::LockConfig;

    let config = LockConfig {
        tick_hz,
        ..LockConfig::default()
    };
    LockGame::with_config(config, 14).unwrap()
}

#[test]
fn faster_tick_rate_keeps_real_time_rotation() {
    let mut angles = Vec::new();
    for hz in [60.0, 120.0] {
        let mut game = game_at(hz);
        game.start_with_field(Difficulty::Easy, rotating_field());
        for _ in 0..50 {
            game.update(10.0);
        }
        angles.push(game.field().map(|f| f.rings()[0].angle).unwrap_or_default());
    }
    // 500ms at 0.02 rad per reference tick is about 0.6 rad either way
    assert!((angles[0] - PI - 0.6).abs() <= 0.021, "60 Hz angle {}", angles[0]);
    assert!((angles[0] - angles[1]).abs() <= 0.021, "{:?}", angles);
}

#[test]
fn faster_tick_rate_keeps_real_time_shot_travel() {
    let mut finish_ms: Vec<f64> = Vec::new();
    for hz in [60.0, 120.0] {
        let mut game = game_at(hz);
        game.start_with_field(Difficulty::Easy, still_field([0.0; 3]));
        let mut elapsed = 0.0;
        while game.phase() == GamePhase::Running && elapsed < 2000.0 {
            game.fire();
            game.update(1.0);
            elapsed += 1.0;
        }
        assert_eq!(game.phase(), GamePhase::Won, "{hz} Hz run never finished");
        finish_ms.push(elapsed);
    }
    // Within one reference tick of each other
    assert!(
        (finish_ms[0] - finish_ms[1]).abs() <= TICK_MS + 1.0,
        "{:?}",
        finish_ms
    );
}
