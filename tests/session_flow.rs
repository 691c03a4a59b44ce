//! End-to-end session scenarios driven only through `tick`

use city_lite::Tuning;
use city_lite::consts::*;
use city_lite::sim::{GameEvent, SceneKind, Session, TickInput, tick};
use city_lite::ui::HudView;
use glam::Vec2;

fn new_session(seed: u64) -> Session {
    let mut tuning = Tuning::default();
    // Enemies only move when told to
    tuning.behavior_roll_threshold = 1000;
    Session::new(
        seed,
        Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
        tuning,
    )
}

fn tap() -> TickInput {
    TickInput {
        tap: true,
        ..Default::default()
    }
}

/// Park every enemy but the first along the top edge and put the first
/// right in front of a car facing +x.
fn line_up_target(session: &mut Session) {
    let play = session.play_mut().expect("playing");
    play.player.body.pos = Vec2::new(300.0, 400.0);
    play.player.body.vel = Vec2::ZERO;
    play.player.rotation = 0.0;
    for (i, (_, enemy)) in play.enemies.iter_mut().enumerate() {
        enemy.body.vel = Vec2::ZERO;
        enemy.body.pos = if i == 0 {
            Vec2::new(380.0, 400.0)
        } else {
            Vec2::new(100.0 * i as f32, 60.0)
        };
    }
    for (_, fuel) in play.fuels.iter_mut() {
        fuel.body.pos = Vec2::new(900.0, 600.0);
    }
}

#[test]
fn shooting_enemies_completes_a_mission() {
    let mut session = new_session(31337);
    tick(&mut session, &tap(), SIM_DT);
    assert_eq!(session.scene_kind(), SceneKind::Play);
    session.play_mut().expect("playing").stats.ammo = 50;

    let mut events = Vec::new();
    for step in 0..600 {
        line_up_target(&mut session);
        let input = TickInput {
            fire: step % 15 == 0,
            ..Default::default()
        };
        tick(&mut session, &input, SIM_DT);
        events.extend(session.drain_events());
        if events.contains(&GameEvent::MissionCompleted) {
            break;
        }
    }

    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .count();
    assert_eq!(kills, 3);
    assert!(events.contains(&GameEvent::MissionCompleted));

    let play = session.play().expect("playing");
    assert_eq!(play.enemies.len(), 5);
    assert_eq!(play.stats.score, 3 * 100 + 500);
    assert!(play.mission.is_none());

    let hud = HudView::from_session(&session);
    assert_eq!(hud.score, "Score: 800");
    assert_eq!(hud.completion_banner, Some("Mission Complete!"));

    // The next mission is announced 2.5 s later
    for _ in 0..151 {
        tick(&mut session, &TickInput::default(), SIM_DT);
    }
    assert!(
        session
            .drain_events()
            .contains(&GameEvent::MissionStarted { target: 3 })
    );
    let hud = HudView::from_session(&session);
    assert_eq!(hud.mission_banner.as_deref(), Some("Mission: Kill 3 Enemies"));
}

#[test]
fn running_dry_warns_but_keeps_playing() {
    let mut session = new_session(9);
    tick(&mut session, &tap(), SIM_DT);
    session.play_mut().expect("playing").stats.fuel = 0.5;

    let mut warned = false;
    for _ in 0..240 {
        tick(&mut session, &TickInput::default(), SIM_DT);
        warned |= session.drain_events().contains(&GameEvent::LowFuel);
        if session.scene_kind() != SceneKind::Play {
            break;
        }
    }
    assert!(warned);
    assert_eq!(session.scene_kind(), SceneKind::Play);
    assert_eq!(session.current_stats().fuel, 0.0);
}

#[test]
fn death_returns_to_menu_with_fresh_stats() {
    let mut session = new_session(77);
    tick(&mut session, &tap(), SIM_DT);

    let play = session.play_mut().expect("playing");
    play.stats.health = 1;
    play.stats.score = 400;
    let pos = play.player.body.pos;
    let first = play.enemies.ids()[0];
    if let Some(enemy) = play.enemies.get_mut(first) {
        enemy.body.pos = pos;
    }

    tick(&mut session, &TickInput::default(), SIM_DT);
    assert_eq!(session.scene_kind(), SceneKind::Menu);
    let hud = HudView::from_session(&session);
    assert_eq!(hud.health, "Health: 100");
    assert_eq!(hud.score, "Score: 0");
    assert_eq!(hud.inventory, "Ammo: 10 Fuel: 100");
}
