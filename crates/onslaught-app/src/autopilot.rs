//! Scripted pilot that plays the game from snapshots.
//!
//! Stands in for the input layer: reads the latest snapshot and answers
//! with the player commands a simple kiting strategy would issue.

use glam::DVec2;

use onslaught_core::commands::PlayerCommand;
use onslaught_core::config::WeaponsConfig;
use onslaught_core::enums::{GamePhase, RunMode};
use onslaught_core::state::{EnemyView, GameStateSnapshot, PlayerView};

/// Back away from anything closer than this.
const KITE_DISTANCE: f64 = 4.0;
/// Sprint when an enemy is this close.
const PANIC_DISTANCE: f64 = 2.5;
/// Hold the trigger for targets within this range.
const ENGAGE_DISTANCE: f64 = 15.0;
/// Drift back toward the arena center beyond this radius.
const HOME_RADIUS: f64 = 8.0;

/// Costs the pilot plans around. A missing weapon is never requested.
#[derive(Debug, Clone, Copy)]
struct Costs {
    fireball: Option<u32>,
    missile: Option<(u32, f64)>,
    blast: Option<(u32, f64)>,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    mode: RunMode,
    costs: Costs,
    started: bool,
    trigger: bool,
    sprint: bool,
}

impl Autopilot {
    pub fn new(mode: RunMode, weapons: &WeaponsConfig) -> Self {
        Self {
            mode,
            costs: Costs {
                fireball: weapons.fireball.as_ref().map(|w| w.resource_cost),
                missile: weapons.missile.as_ref().map(|w| (w.resource_cost, w.homing_radius)),
                blast: weapons.blast.as_ref().map(|w| (w.resource_cost, w.radius)),
            },
            started: false,
            trigger: false,
            sprint: false,
        }
    }

    /// Commands to send in response to `snapshot`.
    pub fn plan(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        match snapshot.phase {
            GamePhase::PreStart if !self.started => {
                self.started = true;
                commands.push(PlayerCommand::StartGame { mode: self.mode });
                return commands;
            }
            GamePhase::Running => {}
            _ => return commands,
        }
        let Some(player) = &snapshot.player else {
            return commands;
        };

        let me = player.position.to_vec();
        let nearest = nearest_enemy(me, &snapshot.enemies);
        let threat = nearest.map(|(enemy, distance)| (enemy.position.to_vec() - me, distance));

        let movement = match threat {
            Some((offset, distance)) if distance < KITE_DISTANCE => -offset.normalize_or_zero(),
            Some((offset, distance)) if distance > ENGAGE_DISTANCE => offset.normalize_or_zero(),
            // Circle-strafe: move perpendicular to the threat.
            Some((offset, _)) => offset.perp().normalize_or_zero(),
            None if me.length() > HOME_RADIUS => -me.normalize_or_zero(),
            None => DVec2::ZERO,
        };
        commands.push(PlayerCommand::Move {
            x: movement.x,
            y: movement.y,
        });

        let sprint = threat.is_some_and(|(_, distance)| distance < PANIC_DISTANCE);
        if sprint != self.sprint {
            self.sprint = sprint;
            commands.push(PlayerCommand::SetSprint { active: sprint });
        }

        let Some((offset, distance)) = threat else {
            self.release_trigger(&mut commands);
            return commands;
        };
        commands.push(PlayerCommand::Aim {
            x: offset.x,
            y: offset.y,
        });

        let trigger = distance <= ENGAGE_DISTANCE;
        if trigger != self.trigger {
            self.trigger = trigger;
            commands.push(PlayerCommand::SetTrigger { held: trigger });
        }

        self.plan_spells(player, distance, &mut commands);
        commands
    }

    fn plan_spells(&self, player: &PlayerView, distance: f64, commands: &mut Vec<PlayerCommand>) {
        let mut budget = player.resource;
        if let Some((cost, radius)) = self.costs.blast {
            if distance <= radius + 0.5 && budget >= cost {
                commands.push(PlayerCommand::CastBlast);
                budget -= cost;
            }
        }
        if let Some((cost, homing_radius)) = self.costs.missile {
            if distance <= homing_radius && budget >= cost {
                commands.push(PlayerCommand::LaunchMissile);
                budget -= cost;
            }
        }
        // Fireballs only from a comfortable reserve.
        if let Some(cost) = self.costs.fireball {
            if budget >= cost * 3 && distance <= ENGAGE_DISTANCE {
                commands.push(PlayerCommand::CastFireball);
            }
        }
    }

    fn release_trigger(&mut self, commands: &mut Vec<PlayerCommand>) {
        if self.trigger {
            self.trigger = false;
            commands.push(PlayerCommand::SetTrigger { held: false });
        }
    }
}

fn nearest_enemy(from: DVec2, enemies: &[EnemyView]) -> Option<(&EnemyView, f64)> {
    enemies
        .iter()
        .map(|enemy| (enemy, enemy.position.to_vec().distance(from)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use onslaught_core::enums::{EnemyKind, SteeringMode};
    use onslaught_core::types::{ActorId, Position, Velocity};

    fn player(resource: u32) -> PlayerView {
        PlayerView {
            id: ActorId(1),
            position: Position::new(0.0, 0.0),
            velocity: Velocity::zero(),
            health: 10,
            max_health: 10,
            resource,
            max_resource: 10,
            level: 1,
            xp: 0,
            xp_to_next: 25,
        }
    }

    fn enemy(id: u64, x: f64, y: f64) -> EnemyView {
        EnemyView {
            id: ActorId(id),
            kind: EnemyKind::Melee,
            position: Position::new(x, y),
            velocity: Velocity::zero(),
            health: 3,
            max_health: 3,
            mode: SteeringMode::Chase,
        }
    }

    fn running(player: PlayerView, enemies: Vec<EnemyView>) -> GameStateSnapshot {
        GameStateSnapshot {
            phase: GamePhase::Running,
            player: Some(player),
            enemies,
            ..Default::default()
        }
    }

    fn pilot() -> Autopilot {
        Autopilot::new(RunMode::Limited, &WeaponsConfig::default())
    }

    #[test]
    fn test_starts_the_game_once() {
        let mut pilot = pilot();
        let prestart = GameStateSnapshot::default();
        let first = pilot.plan(&prestart);
        assert!(matches!(
            first.as_slice(),
            [PlayerCommand::StartGame {
                mode: RunMode::Limited
            }]
        ));
        assert!(pilot.plan(&prestart).is_empty());
    }

    #[test]
    fn test_aims_at_nearest_enemy_and_fires() {
        let mut pilot = pilot();
        let snap = running(player(0), vec![enemy(1, 10.0, 0.0), enemy(2, 0.0, 6.0)]);
        let commands = pilot.plan(&snap);

        let aim = commands.iter().find_map(|c| match c {
            PlayerCommand::Aim { x, y } => Some((*x, *y)),
            _ => None,
        });
        assert_eq!(aim, Some((0.0, 6.0)));
        assert!(commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::SetTrigger { held: true })));

        // Trigger state is only re-sent on change.
        let again = pilot.plan(&snap);
        assert!(!again.iter().any(|c| matches!(c, PlayerCommand::SetTrigger { .. })));
    }

    #[test]
    fn test_kites_away_from_close_enemy() {
        let mut pilot = pilot();
        let commands = pilot.plan(&running(player(0), vec![enemy(1, 2.0, 0.0)]));
        let movement = commands.iter().find_map(|c| match c {
            PlayerCommand::Move { x, y } => Some((*x, *y)),
            _ => None,
        });
        assert_eq!(movement, Some((-1.0, 0.0)));
        assert!(commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::SetSprint { active: true })));
    }

    #[test]
    fn test_closes_in_on_distant_enemy() {
        let mut pilot = pilot();
        let commands = pilot.plan(&running(player(0), vec![enemy(1, 0.0, 30.0)]));
        let movement = commands.iter().find_map(|c| match c {
            PlayerCommand::Move { x, y } => Some((*x, *y)),
            _ => None,
        });
        assert_eq!(movement, Some((0.0, 1.0)));
        assert!(!commands
            .iter()
            .any(|c| matches!(c, PlayerCommand::SetTrigger { held: true })));
    }

    #[test]
    fn test_blasts_when_crowded_and_affordable() {
        let mut rich = pilot();
        let crowded = running(player(10), vec![enemy(1, 1.0, 0.0)]);
        assert!(rich.plan(&crowded).contains_blast());

        let mut broke = pilot();
        let poor = running(player(1), vec![enemy(1, 1.0, 0.0)]);
        assert!(!broke.plan(&poor).contains_blast());
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut pilot = pilot();
        let mut snap = running(player(10), vec![enemy(1, 1.0, 0.0)]);
        snap.phase = GamePhase::Lost;
        assert!(pilot.plan(&snap).is_empty());
    }

    trait CommandsExt {
        fn contains_blast(&self) -> bool;
    }

    impl CommandsExt for Vec<PlayerCommand> {
        fn contains_blast(&self) -> bool {
            self.iter().any(|c| matches!(c, PlayerCommand::CastBlast))
        }
    }
}
