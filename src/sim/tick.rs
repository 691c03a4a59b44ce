//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::autopilot;
use super::input::TickInput;
use super::play::StepOutcome;
use super::session::{Scene, Session};
use super::state::SceneKind;

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.pause {
        session.toggle_pause();
    }
    if session.paused {
        return;
    }

    session.time_ticks += 1;

    match session.scene_kind() {
        SceneKind::Menu => {
            if input.tap {
                session.start_play();
            } else if input.open_missions {
                session.open_mission_board();
            }
        }

        SceneKind::MissionBoard => {
            if input.tap {
                session.return_to_menu();
            }
        }

        SceneKind::Play => {
            let Scene::Play(play) = &mut session.scene else {
                return;
            };
            let input = if input.autopilot {
                autopilot::drive(play)
            } else {
                input.clone()
            };
            let outcome = play.step(&input, dt, &mut session.events);
            if outcome == StepOutcome::Died {
                session.player_died();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::physics::Body;
    use crate::sim::state::{Enemy, GameEvent, PlayerStats};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn session(seed: u64) -> Session {
        Session::new(
            seed,
            Vec2::new(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT),
            Tuning::default(),
        )
    }

    fn tap() -> TickInput {
        TickInput {
            tap: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_to_play() {
        let mut session = session(12345);
        assert_eq!(session.scene_kind(), SceneKind::Menu);

        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.scene_kind(), SceneKind::Menu);

        tick(&mut session, &tap(), SIM_DT);
        assert_eq!(session.scene_kind(), SceneKind::Play);
        let events = session.drain_events();
        assert_eq!(events[0], GameEvent::SceneChanged(SceneKind::Play));
        assert!(events.contains(&GameEvent::MissionStarted { target: 3 }));
    }

    #[test]
    fn test_mission_board_round_trip() {
        let mut session = session(1);
        let open = TickInput {
            open_missions: true,
            ..Default::default()
        };
        tick(&mut session, &open, SIM_DT);
        assert_eq!(session.scene_kind(), SceneKind::MissionBoard);
        tick(&mut session, &tap(), SIM_DT);
        assert_eq!(session.scene_kind(), SceneKind::Menu);
    }

    #[test]
    fn test_death_resets_and_returns_to_menu() {
        let mut session = session(5);
        tick(&mut session, &tap(), SIM_DT);

        let play = session.play_mut().unwrap();
        play.stats = PlayerStats {
            health: 5,
            score: 1200,
            ammo: 2,
            fuel: 40.0,
        };
        let pos = play.player.body.pos;
        let id = play.next_entity_id();
        play.enemies.spawn(
            id,
            Enemy {
                body: Body::new(pos, Vec2::splat(ENEMY_SIZE)),
                health: 50,
            },
        );
        session.drain_events();

        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.scene_kind(), SceneKind::Menu);
        assert_eq!(session.stats, PlayerStats::default());
        assert_eq!(session.current_stats().health, 100);

        let events = session.drain_events();
        assert!(events.contains(&GameEvent::PlayerDied));
        assert!(events.contains(&GameEvent::SceneChanged(SceneKind::Menu)));

        // A new round starts clean
        tick(&mut session, &tap(), SIM_DT);
        let play = session.play().unwrap();
        assert_eq!(play.stats, PlayerStats::default());
        assert_eq!(play.bullets.len(), 0);
        assert_eq!(play.enemies.len(), 5);
    }

    #[test]
    fn test_tick_pause() {
        let mut session = session(12345);
        tick(&mut session, &tap(), SIM_DT);
        let ticks = session.play().unwrap().time_ticks;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut session, &pause, SIM_DT);
        assert!(session.paused);
        tick(&mut session, &TickInput::default(), SIM_DT);
        assert_eq!(session.play().unwrap().time_ticks, ticks);

        // Unpause
        tick(&mut session, &pause, SIM_DT);
        assert!(!session.paused);
        assert_eq!(session.play().unwrap().time_ticks, ticks + 1);
    }

    #[test]
    fn test_menu_ignores_pause() {
        let mut session = session(3);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut session, &pause, SIM_DT);
        assert!(!session.paused);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with same seed should produce identical results
        let mut s1 = session(99999);
        let mut s2 = session(99999);

        let inputs = [
            tap(),
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                down: true,
                fire: true,
                ..Default::default()
            },
            TickInput {
                joystick: Some(Vec2::new(-0.5, 0.5)),
                ..Default::default()
            },
        ];

        for _ in 0..200 {
            for input in &inputs[1..] {
                tick(&mut s1, input, SIM_DT);
                tick(&mut s2, input, SIM_DT);
            }
            if s1.scene_kind() == SceneKind::Menu {
                tick(&mut s1, &inputs[0], SIM_DT);
                tick(&mut s2, &inputs[0], SIM_DT);
            }
        }

        assert_eq!(s1.time_ticks, s2.time_ticks);
        assert_eq!(s1.current_stats(), s2.current_stats());
        let (p1, p2) = (s1.play().unwrap(), s2.play().unwrap());
        assert_eq!(p1.player.body.pos, p2.player.body.pos);
        let e1: Vec<_> = p1.enemies.values().map(|e| e.body.pos).collect();
        let e2: Vec<_> = p2.enemies.values().map(|e| e.body.pos).collect();
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_autopilot_plays_a_round() {
        let mut session = session(2024);
        tick(&mut session, &tap(), SIM_DT);

        let demo = TickInput {
            autopilot: true,
            ..Default::default()
        };
        // 30 simulated seconds
        for _ in 0..1800 {
            tick(&mut session, &demo, SIM_DT);
            if session.scene_kind() == SceneKind::Menu {
                break;
            }
        }
        let shots = session
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Shot { .. }))
            .count();
        assert!(shots > 0);
    }
}
