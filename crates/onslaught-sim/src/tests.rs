//! Tests for the simulation engine, damage pipeline, and wave progression.

use glam::DVec2;

use onslaught_core::commands::PlayerCommand;
use onslaught_core::components::{Enemy, Health, Pickup, Progression, Projectile, ResourcePool, SpawnPoint};
use onslaught_core::config::GameConfig;
use onslaught_core::enums::*;
use onslaught_core::events::CombatEvent;
use onslaught_core::layers::DamageChannel;
use onslaught_core::types::{ActorId, Position};

use crate::context::actor_id;
use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::{damage, progression};
use crate::world_setup::{self, ProjectileSpawn};

fn started_engine(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.queue_command(PlayerCommand::StartGame {
        mode: RunMode::Limited,
    });
    engine.tick();
    engine
}

fn count_events(events: &[CombatEvent], pred: impl Fn(&CombatEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

fn player_health(engine: &SimulationEngine) -> u32 {
    let player = engine.player().unwrap();
    engine.world().get::<&Health>(player).unwrap().current
}

fn player_resource(engine: &SimulationEngine) -> u32 {
    let player = engine.player().unwrap();
    engine.world().get::<&ResourcePool>(player).unwrap().current
}

fn stationary_shot(owner: ActorId, faction: Faction, weapon: WeaponKind, position: Position) -> ProjectileSpawn {
    let cancels = !matches!(weapon, WeaponKind::Missile | WeaponKind::Blast);
    ProjectileSpawn {
        weapon,
        owner,
        faction,
        class: if weapon == WeaponKind::Missile {
            PenetrationClass::Area
        } else {
            PenetrationClass::SingleTarget
        },
        channel: DamageChannel::PROJECTILE,
        position,
        direction: DVec2::X,
        speed: 0.0,
        damage: 1,
        lifetime: 10.0,
        radius: 0.15,
        cancels_hostile_fire: cancels,
        phases_walls: weapon == WeaponKind::Missile,
        explosion_radius: 0.0,
        homing: None,
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = || SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config()).unwrap();
    let mut engine_b = SimulationEngine::new(config()).unwrap();

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_commands([
            PlayerCommand::StartGame { mode: RunMode::Endless },
            PlayerCommand::Aim { x: 1.0, y: 0.5 },
            PlayerCommand::SetTrigger { held: true },
        ]);
    }

    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .unwrap();
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .unwrap();

    engine_a.queue_command(PlayerCommand::StartGame { mode: RunMode::Endless });
    engine_b.queue_command(PlayerCommand::StartGame { mode: RunMode::Endless });

    // Early ticks match (nothing random has happened); the first spawn
    // rolls and wander picks make them diverge.
    let mut diverged = false;
    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut game = GameConfig::default();
    game.waves.max_waves = 0;
    let result = SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    });
    assert!(result.is_err());
}

// ---- Lifecycle ----

#[test]
fn test_inputs_before_start_are_ignored() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::Move { x: 1.0, y: 0.0 });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::PreStart);
    assert!(snap.player.is_none());
    assert_eq!(snap.time.tick, 0);
}

#[test]
fn test_start_spawns_player_and_first_wave() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    engine.queue_command(PlayerCommand::StartGame {
        mode: RunMode::Limited,
    });
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.wave.wave, 1);
    assert_eq!(snap.wave.required, 10);
    assert!(snap
        .events
        .contains(&CombatEvent::WaveStarted { wave: 1, required: 10 }));

    let player = snap.player.unwrap();
    assert_eq!(player.health, 10);
    assert_eq!(player.resource, 10);
    assert_eq!(player.level, 1);
    assert_eq!(player.xp_to_next, 25);
}

#[test]
fn test_start_twice_is_ignored() {
    let mut engine = started_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame {
        mode: RunMode::Endless,
    });
    let snap = engine.tick();
    assert_eq!(snap.mode, RunMode::Limited);
    let players = {
        let mut q = engine.world().query::<&onslaught_core::components::Player>();
        q.iter().count()
    };
    assert_eq!(players, 1);
}

#[test]
fn test_spawn_points_fill_the_wave() {
    let mut engine = started_engine(SimConfig::default());
    let mut snap = engine.tick();
    for _ in 0..50 {
        snap = engine.tick();
    }
    // One spawn per corner after the first interval.
    assert_eq!(snap.wave.spawned, 4);
    assert_eq!(snap.enemies.len(), 4);
    assert!(snap.enemies.iter().all(|e| e.health == e.max_health));
}

#[test]
fn test_spawning_stops_at_quota() {
    let mut game = GameConfig::default();
    game.waves.base_enemies_per_wave = 2;
    let mut engine = started_engine(SimConfig {
        game,
        ..Default::default()
    });
    for _ in 0..200 {
        engine.tick();
    }
    let enemies = {
        let mut q = engine.world().query::<&Enemy>();
        q.iter().count()
    };
    assert_eq!(enemies, 2);
    assert_eq!(engine.orchestrator().spawned(), 2);
}

#[test]
fn test_pause_holds_timers() {
    let mut engine = started_engine(SimConfig::default());
    for _ in 0..10 {
        engine.tick();
    }
    let countdowns = |engine: &SimulationEngine| -> Vec<f64> {
        let mut q = engine.world().query::<&SpawnPoint>();
        q.iter().map(|(_, p)| p.countdown).collect()
    };

    engine.queue_command(PlayerCommand::Pause);
    let paused_at = engine.tick().time;
    let held = countdowns(&engine);
    for _ in 0..100 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Paused);
        assert_eq!(snap.time, paused_at);
    }
    assert_eq!(countdowns(&engine), held);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.time.tick, paused_at.tick + 1);
}

#[test]
fn test_restart_returns_to_prestart() {
    let mut engine = started_engine(SimConfig::default());
    for _ in 0..60 {
        engine.tick();
    }
    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::PreStart);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.player.is_none());
    assert_eq!(engine.world().len(), 0);

    engine.queue_command(PlayerCommand::StartGame {
        mode: RunMode::Limited,
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.wave.wave, 1);
}

// ---- Damage model ----

#[test]
fn test_heal_clamps_at_max_without_event() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let events = engine.with_context(|ctx| {
        damage::heal(ctx, player, 50);
        ctx.events.clone()
    });
    assert!(events.is_empty());
    assert_eq!(player_health(&engine), 10);
}

#[test]
fn test_damage_clamps_at_zero() {
    let mut engine = started_engine(SimConfig::default());
    let enemy = engine.spawn_test_enemy(EnemyKind::Melee, Position::new(20.0, 0.0));
    engine.with_context(|ctx| damage::apply_damage(ctx, enemy, 1000, DamageChannel::PROJECTILE));
    assert_eq!(engine.world().get::<&Health>(enemy).unwrap().current, 0);
}

#[test]
fn test_spend_resource_fails_without_mutation() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let (spent, events) = engine.with_context(|ctx| {
        let spent = damage::spend_resource(ctx, player, 11);
        (spent, ctx.events.clone())
    });
    assert!(!spent);
    assert!(events.is_empty());
    assert_eq!(player_resource(&engine), 10);
}

#[test]
fn test_gate_rejects_unaccepted_channel() {
    let mut engine = started_engine(SimConfig::default());
    let ranged = engine.spawn_test_enemy(EnemyKind::Ranged, Position::new(20.0, 0.0));
    let (explosion, projectile) = engine.with_context(|ctx| {
        (
            damage::apply_damage(ctx, ranged, 1, DamageChannel::EXPLOSION),
            damage::apply_damage(ctx, ranged, 1, DamageChannel::PROJECTILE),
        )
    });
    assert!(!explosion);
    assert!(projectile);
    assert_eq!(engine.world().get::<&Health>(ranged).unwrap().current, 2);
}

// ---- Death and explosions ----

#[test]
fn test_lethal_hits_in_one_tick_explode_once() {
    let mut engine = started_engine(SimConfig::default());
    let explosive = engine.spawn_test_enemy(EnemyKind::Explosive, Position::new(8.0, 0.0));
    let id = actor_id(explosive);

    let events = engine.with_context(|ctx| {
        for _ in 0..5 {
            damage::apply_damage(ctx, explosive, 10, DamageChannel::PROJECTILE);
        }
        ctx.events.clone()
    });

    let explosions = count_events(&events, |e| matches!(e, CombatEvent::Explosion { source, .. } if *source == id));
    let kills = count_events(&events, |e| matches!(e, CombatEvent::Kill { actor, .. } if *actor == id));
    assert_eq!(explosions, 1);
    assert_eq!(kills, 1);
    assert_eq!(engine.orchestrator().killed(), 1);

    let snap = engine.tick();
    assert!(snap.enemies.iter().all(|e| e.id != id));
    assert!(engine.world().get::<&Enemy>(explosive).is_err());
}

#[test]
fn test_explosive_detonates_after_non_lethal_hits() {
    let mut game = GameConfig::default();
    game.explosive.max_health = 10;
    let mut engine = started_engine(SimConfig {
        game,
        ..Default::default()
    });
    let explosive = engine.spawn_test_enemy(EnemyKind::Explosive, Position::new(8.0, 0.0));

    let events = engine.with_context(|ctx| {
        damage::apply_damage(ctx, explosive, 1, DamageChannel::PROJECTILE);
        let after_first = ctx.events.len();
        damage::apply_damage(ctx, explosive, 1, DamageChannel::PROJECTILE);
        (after_first, ctx.events.clone())
    });

    let (after_first, all) = events;
    assert_eq!(
        count_events(&all[..after_first], |e| matches!(e, CombatEvent::Explosion { .. })),
        0
    );
    assert_eq!(count_events(&all, |e| matches!(e, CombatEvent::Explosion { .. })), 1);
}

#[test]
fn test_explosion_damages_player_in_radius() {
    let mut engine = started_engine(SimConfig::default());
    let explosive = engine.spawn_test_enemy(EnemyKind::Explosive, Position::new(1.5, 0.0));
    engine.with_context(|ctx| damage::apply_damage(ctx, explosive, 10, DamageChannel::PROJECTILE));
    assert_eq!(player_health(&engine), 6);
}

#[test]
fn test_chain_explosions_resolve_once_each() {
    let mut engine = started_engine(SimConfig::default());
    let a = engine.spawn_test_enemy(EnemyKind::Explosive, Position::new(10.0, 0.0));
    let b = engine.spawn_test_enemy(EnemyKind::Explosive, Position::new(11.0, 0.0));

    let events = engine.with_context(|ctx| {
        damage::apply_damage(ctx, a, 10, DamageChannel::PROJECTILE);
        ctx.events.clone()
    });

    assert_eq!(count_events(&events, |e| matches!(e, CombatEvent::Explosion { .. })), 2);
    assert_eq!(count_events(&events, |e| matches!(e, CombatEvent::Kill { .. })), 2);
    assert!(events.contains(&CombatEvent::Death {
        actor: actor_id(b),
        kind: EnemyKind::Explosive,
    }));
}

#[test]
fn test_kill_grants_xp() {
    let mut engine = started_engine(SimConfig::default());
    let ranged = engine.spawn_test_enemy(EnemyKind::Ranged, Position::new(20.0, 0.0));
    engine.with_context(|ctx| damage::apply_damage(ctx, ranged, 10, DamageChannel::PROJECTILE));
    let player = engine.player().unwrap();
    assert_eq!(engine.world().get::<&Progression>(player).unwrap().xp, 5);
}

// ---- Progression ----

#[test]
fn test_level_up_rescales_and_restores() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let events = engine.with_context(|ctx| {
        damage::apply_damage(ctx, player, 4, DamageChannel::CONTACT);
        progression::grant_xp(ctx, 26);
        ctx.events.clone()
    });

    let prog = *engine.world().get::<&Progression>(player).unwrap();
    assert_eq!(prog.level, 2);
    assert_eq!(prog.xp, 1);
    assert_eq!(prog.xp_to_next, 35);
    let expected = world_setup::stat_for_level(&engine.config().player, 2);
    assert_eq!(player_health(&engine), expected);
    assert_eq!(player_resource(&engine), expected);
    assert!(events.contains(&CombatEvent::LevelUp { level: 2 }));
}

#[test]
fn test_stat_scaling_caps() {
    let config = GameConfig::default().player;
    assert_eq!(world_setup::stat_for_level(&config, 1), 10);
    assert_eq!(world_setup::stat_for_level(&config, 10), 100);
    assert_eq!(world_setup::stat_for_level(&config, 25), 100);
}

// ---- Waves ----

#[test]
fn test_wave_advances_after_required_kills() {
    let mut engine = started_engine(SimConfig::default());
    let enemies: Vec<_> = (0..10)
        .map(|i| engine.spawn_test_enemy(EnemyKind::Melee, Position::new(20.0, i as f64 - 5.0)))
        .collect();

    let events = engine.with_context(|ctx| {
        for &enemy in &enemies {
            damage::apply_damage(ctx, enemy, 10, DamageChannel::PROJECTILE);
        }
        ctx.events.clone()
    });

    assert!(events.contains(&CombatEvent::WaveCompleted { wave: 1 }));
    assert!(events.contains(&CombatEvent::WaveStarted { wave: 2, required: 20 }));
    assert_eq!(engine.orchestrator().wave(), 2);
    assert_eq!(engine.orchestrator().required(), 20);
    assert_eq!(engine.orchestrator().killed(), 0);
    assert_eq!(engine.orchestrator().total_kills(), 10);
}

#[test]
fn test_stale_wave_kill_is_discarded() {
    let mut engine = started_engine(SimConfig::default());
    let enemies: Vec<_> = (0..11)
        .map(|i| engine.spawn_test_enemy(EnemyKind::Melee, Position::new(20.0, i as f64 - 5.0)))
        .collect();
    engine.with_context(|ctx| {
        for &enemy in &enemies {
            damage::apply_damage(ctx, enemy, 10, DamageChannel::PROJECTILE);
        }
    });
    assert_eq!(engine.orchestrator().wave(), 2);
    assert_eq!(engine.orchestrator().killed(), 0);
    assert_eq!(engine.orchestrator().total_kills(), 11);
}

#[test]
fn test_last_wave_wins_and_freezes() {
    let mut game = GameConfig::default();
    game.waves.max_waves = 1;
    game.waves.base_enemies_per_wave = 2;
    let mut engine = started_engine(SimConfig {
        game,
        ..Default::default()
    });
    let a = engine.spawn_test_enemy(EnemyKind::Melee, Position::new(20.0, 0.0));
    let b = engine.spawn_test_enemy(EnemyKind::Melee, Position::new(20.0, 2.0));
    let events = engine.with_context(|ctx| {
        damage::apply_damage(ctx, a, 10, DamageChannel::PROJECTILE);
        damage::apply_damage(ctx, b, 10, DamageChannel::PROJECTILE);
        ctx.events.clone()
    });

    assert!(events.contains(&CombatEvent::GameWon { total_kills: 2 }));
    let frozen = engine.tick().time;
    for _ in 0..30 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Won);
        assert_eq!(snap.time, frozen);
    }
}

#[test]
fn test_player_death_loses_once_and_freezes() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let events = engine.with_context(|ctx| {
        damage::apply_damage(ctx, player, 100, DamageChannel::CONTACT);
        damage::apply_damage(ctx, player, 100, DamageChannel::CONTACT);
        ctx.events.clone()
    });

    assert_eq!(count_events(&events, |e| matches!(e, CombatEvent::GameLost { .. })), 1);
    assert_eq!(engine.phase(), GamePhase::Lost);

    let frozen = engine.tick().time;
    for _ in 0..30 {
        assert_eq!(engine.tick().time, frozen);
    }
    assert_eq!(player_health(&engine), 0);
}

// ---- Projectiles ----

#[test]
fn test_opposing_projectiles_cancel() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let friendly = stationary_shot(actor_id(player), Faction::Friendly, WeaponKind::Gun, Position::new(5.0, 5.0));
    let hostile = stationary_shot(ActorId(u64::MAX), Faction::Hostile, WeaponKind::EnemyBolt, Position::new(5.1, 5.0));
    world_setup::spawn_projectile(engine.world_mut(), friendly);
    world_setup::spawn_projectile(engine.world_mut(), hostile);

    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
    assert_eq!(player_health(&engine), 10);
}

/// Hostile bolt touching both the player and a friendly bullet.
fn cancel_beside_player(bolt_first: bool) -> (SimulationEngine, usize) {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let start = *engine.world().get::<&Position>(player).unwrap();
    let bolt = stationary_shot(
        ActorId(u64::MAX),
        Faction::Hostile,
        WeaponKind::EnemyBolt,
        Position::new(start.x + 0.3, start.y),
    );
    let bullet = stationary_shot(
        actor_id(player),
        Faction::Friendly,
        WeaponKind::Gun,
        Position::new(start.x + 0.5, start.y),
    );
    if bolt_first {
        world_setup::spawn_projectile(engine.world_mut(), bolt);
        world_setup::spawn_projectile(engine.world_mut(), bullet);
    } else {
        world_setup::spawn_projectile(engine.world_mut(), bullet);
        world_setup::spawn_projectile(engine.world_mut(), bolt);
    }

    let snap = engine.tick();
    (engine, snap.projectiles.len())
}

#[test]
fn test_cancellation_beats_player_hit_in_any_spawn_order() {
    for bolt_first in [true, false] {
        let (engine, remaining) = cancel_beside_player(bolt_first);
        assert_eq!(remaining, 0, "bolt_first={bolt_first}");
        assert_eq!(player_health(&engine), 10, "bolt_first={bolt_first}");
    }
}

#[test]
fn test_missile_does_not_cancel_enemy_fire() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let missile = stationary_shot(actor_id(player), Faction::Friendly, WeaponKind::Missile, Position::new(5.0, 5.0));
    let hostile = stationary_shot(ActorId(u64::MAX), Faction::Hostile, WeaponKind::EnemyBolt, Position::new(5.1, 5.0));
    world_setup::spawn_projectile(engine.world_mut(), missile);
    world_setup::spawn_projectile(engine.world_mut(), hostile);

    let snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 2);
}

#[test]
fn test_bullet_hits_once_and_is_removed() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let enemy = engine.spawn_test_enemy(EnemyKind::Melee, Position::new(20.0, 0.0));
    let mut shot = stationary_shot(actor_id(player), Faction::Friendly, WeaponKind::Gun, Position::new(20.0, 0.0));
    shot.damage = 1;
    world_setup::spawn_projectile(engine.world_mut(), shot);

    engine.tick();
    engine.tick();
    assert_eq!(engine.world().get::<&Health>(enemy).unwrap().current, 2);
    let projectiles = {
        let mut q = engine.world().query::<&Projectile>();
        q.iter().count()
    };
    assert_eq!(projectiles, 0);
}

#[test]
fn test_bullet_stops_at_wall() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    let mut shot = stationary_shot(actor_id(player), Faction::Friendly, WeaponKind::Gun, Position::new(10.0, 12.0));
    shot.speed = 16.0;
    world_setup::spawn_projectile(engine.world_mut(), shot);

    let mut gone = false;
    for _ in 0..10 {
        if engine.tick().projectiles.is_empty() {
            gone = true;
            break;
        }
    }
    assert!(gone, "bullet should be destroyed by the pillar");
}

#[test]
fn test_blast_spares_owner_and_hits_neighbour() {
    let mut engine = started_engine(SimConfig::default());
    let enemy = engine.spawn_test_enemy(EnemyKind::Melee, Position::new(1.0, 0.0));
    engine.queue_command(PlayerCommand::CastBlast);
    let snap = engine.tick();

    assert_eq!(player_health(&engine), 10);
    assert_eq!(player_resource(&engine), 7);
    assert_eq!(engine.world().get::<&Health>(enemy).unwrap().current, 1);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        CombatEvent::WeaponFired {
            weapon: WeaponKind::Blast,
            ..
        }
    )));

    // The pulse is still alive next tick but must not hit the same enemy twice.
    engine.tick();
    assert_eq!(engine.world().get::<&Health>(enemy).unwrap().current, 1);
}

#[test]
fn test_fireball_without_resource_does_not_fire() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    engine.with_context(|ctx| damage::spend_resource(ctx, player, 9));
    engine.queue_command(PlayerCommand::CastFireball);
    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
    assert_eq!(player_resource(&engine), 1);
}

#[test]
fn test_gun_respects_fire_rate() {
    let mut engine = started_engine(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::Aim { x: 1.0, y: 0.0 },
        PlayerCommand::SetTrigger { held: true },
    ]);
    let mut shots = 0;
    for _ in 0..30 {
        let snap = engine.tick();
        shots += count_events(&snap.events, |e| {
            matches!(
                e,
                CombatEvent::WeaponFired {
                    weapon: WeaponKind::Gun,
                    ..
                }
            )
        });
    }
    assert_eq!(shots, 3);
}

#[test]
fn test_missile_homes_and_detonates() {
    let mut engine = started_engine(SimConfig::default());
    let enemy = engine.spawn_test_enemy(EnemyKind::Melee, Position::new(4.0, 3.0));
    let enemy_id = actor_id(enemy);
    engine.queue_commands([PlayerCommand::Aim { x: 1.0, y: 0.0 }, PlayerCommand::LaunchMissile]);

    let mut events = Vec::new();
    for _ in 0..30 {
        events.extend(engine.tick().events);
    }

    assert_eq!(count_events(&events, |e| matches!(e, CombatEvent::Explosion { .. })), 1);
    assert!(events.iter().any(|e| matches!(e, CombatEvent::Kill { actor, .. } if *actor == enemy_id)));
}

#[test]
fn test_ranged_enemy_fires_in_band() {
    let mut engine = started_engine(SimConfig::default());
    engine.spawn_test_enemy(EnemyKind::Ranged, Position::new(6.0, 0.0));
    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        CombatEvent::WeaponFired {
            weapon: WeaponKind::EnemyBolt,
            ..
        }
    )));
    assert!(snap.projectiles.iter().any(|p| p.faction == Faction::Hostile));
}

// ---- Contact and pickups ----

#[test]
fn test_pickup_is_consumed_once() {
    let mut engine = started_engine(SimConfig::default());
    let player = engine.player().unwrap();
    engine.with_context(|ctx| damage::apply_damage(ctx, player, 5, DamageChannel::CONTACT));
    world_setup::spawn_pickup(engine.world_mut(), PickupKind::Health, 3, Position::new(0.0, 0.0));

    let snap = engine.tick();
    assert_eq!(player_health(&engine), 8);
    assert_eq!(
        count_events(&snap.events, |e| matches!(e, CombatEvent::PickupCollected { .. })),
        1
    );

    let snap = engine.tick();
    assert_eq!(player_health(&engine), 8);
    assert!(snap.pickups.is_empty());
    let pickups = {
        let mut q = engine.world().query::<&Pickup>();
        q.iter().count()
    };
    assert_eq!(pickups, 0);
}

#[test]
fn test_melee_contact_respects_cooldown() {
    let mut engine = started_engine(SimConfig::default());
    engine.spawn_test_enemy(EnemyKind::Melee, Position::new(0.5, 0.0));

    // Cooldown 0.5 s = 15 ticks: the first touch lands, then one more per window.
    for _ in 0..15 {
        engine.tick();
    }
    assert_eq!(player_health(&engine), 9);
    for _ in 0..15 {
        engine.tick();
    }
    assert_eq!(player_health(&engine), 8);
}

#[test]
fn test_explosive_detonates_on_player_contact() {
    let mut engine = started_engine(SimConfig::default());
    let explosive = engine.spawn_test_enemy(EnemyKind::Explosive, Position::new(0.5, 0.0));
    let snap = engine.tick();
    assert_eq!(
        count_events(&snap.events, |e| matches!(e, CombatEvent::Explosion { source, .. } if *source == actor_id(explosive))),
        1
    );
    assert_eq!(player_health(&engine), 6);
}
