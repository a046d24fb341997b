#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use onslaught_core::constants::*;
    use onslaught_core::enums::{EnemyKind, SteeringMode};
    use onslaught_core::types::Position;

    use crate::avoidance::{avoid, ObstacleProbe, OpenField};
    use crate::profiles::get_profile;
    use crate::steering::{evaluate, SteeringContext};

    /// Reports a hit with `normal` for any probe whose direction matches a blocked one.
    struct ScriptedProbe {
        blocked: Vec<DVec2>,
        normal: DVec2,
    }

    impl ObstacleProbe for ScriptedProbe {
        fn probe(&self, _origin: DVec2, dir: DVec2, _distance: f64) -> Option<DVec2> {
            self.blocked
                .iter()
                .any(|b| b.distance(dir) < 1e-9)
                .then_some(self.normal)
        }
    }

    fn make_context(position: Position, target: Option<Position>) -> SteeringContext {
        SteeringContext {
            mode: SteeringMode::Idle,
            position,
            spawn_origin: position,
            target,
            wander_target: position,
            wander_timer: 0.0,
            dt: DT,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    // ---- Avoidance ----

    #[test]
    fn test_avoid_clear_path_keeps_direction() {
        let dir = avoid(&OpenField, DVec2::ZERO, DVec2::new(2.0, 0.0), 1.0, 0.75);
        assert_eq!(dir, DVec2::X);
    }

    #[test]
    fn test_avoid_front_and_right_blocked_goes_left() {
        let probe = ScriptedProbe {
            blocked: vec![DVec2::X, DVec2::NEG_Y],
            normal: DVec2::NEG_X,
        };
        let dir = avoid(&probe, DVec2::ZERO, DVec2::X, 1.0, 0.75);
        // left of +x is (-y, x) = +y
        assert_eq!(dir, DVec2::Y);
    }

    #[test]
    fn test_avoid_front_and_left_blocked_goes_right() {
        let probe = ScriptedProbe {
            blocked: vec![DVec2::X, DVec2::Y],
            normal: DVec2::NEG_X,
        };
        let dir = avoid(&probe, DVec2::ZERO, DVec2::X, 1.0, 0.75);
        assert_eq!(dir, DVec2::NEG_Y);
    }

    #[test]
    fn test_avoid_both_sides_clear_slides_along_surface() {
        let desired = DVec2::new(1.0, 0.2).normalize();
        let normal = DVec2::NEG_X;
        let probe = ScriptedProbe {
            blocked: vec![desired],
            normal,
        };
        let dir = avoid(&probe, DVec2::ZERO, desired, 1.0, 0.75);
        assert!(dir.dot(normal).abs() < 1e-9, "slide must be tangent to the wall");
        assert!(dir.dot(desired) >= 0.0, "slide must not oppose the desired direction");
        assert!((dir.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_avoid_all_blocked_reverses() {
        let probe = ScriptedProbe {
            blocked: vec![DVec2::X, DVec2::Y, DVec2::NEG_Y],
            normal: DVec2::NEG_X,
        };
        let dir = avoid(&probe, DVec2::ZERO, DVec2::X, 1.0, 0.75);
        assert_eq!(dir, DVec2::NEG_X);
    }

    // ---- Chase ----

    #[test]
    fn test_melee_chases_target_in_range() {
        let ctx = make_context(Position::new(0.0, 0.0), Some(Position::new(10.0, 0.0)));
        let update = evaluate(&ctx, &get_profile(EnemyKind::Melee), &mut rng(), &OpenField);
        assert_eq!(update.mode, SteeringMode::Chase);
        assert!(update.mode_changed);
        assert!((update.velocity.x - ENEMY_MOVE_SPEED).abs() < 1e-9);
        assert!(update.velocity.y.abs() < 1e-9);
        assert!(update.fire_direction.is_none());
    }

    #[test]
    fn test_melee_chase_steers_around_wall() {
        let probe = ScriptedProbe {
            blocked: vec![DVec2::X, DVec2::NEG_Y],
            normal: DVec2::NEG_X,
        };
        let ctx = make_context(Position::new(0.0, 0.0), Some(Position::new(10.0, 0.0)));
        let update = evaluate(&ctx, &get_profile(EnemyKind::Melee), &mut rng(), &probe);
        assert!(update.velocity.x.abs() < 1e-9);
        assert!((update.velocity.y - ENEMY_MOVE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_explosive_charges_straight_through_probe() {
        let probe = ScriptedProbe {
            blocked: vec![DVec2::X, DVec2::NEG_Y],
            normal: DVec2::NEG_X,
        };
        let ctx = make_context(Position::new(0.0, 0.0), Some(Position::new(10.0, 0.0)));
        let update = evaluate(&ctx, &get_profile(EnemyKind::Explosive), &mut rng(), &probe);
        assert_eq!(update.mode, SteeringMode::Chase);
        assert!((update.velocity.x - ENEMY_MOVE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_target_beyond_chase_radius_wanders() {
        let ctx = make_context(
            Position::new(0.0, 0.0),
            Some(Position::new(ENEMY_CHASE_RADIUS + 1.0, 0.0)),
        );
        let update = evaluate(&ctx, &get_profile(EnemyKind::Melee), &mut rng(), &OpenField);
        assert_eq!(update.mode, SteeringMode::Wander);
    }

    #[test]
    fn test_chase_wander_edge_has_no_hysteresis() {
        let profile = get_profile(EnemyKind::Melee);
        let mut ctx = make_context(Position::new(0.0, 0.0), Some(Position::new(ENEMY_CHASE_RADIUS, 0.0)));
        ctx.mode = SteeringMode::Wander;
        let inside = evaluate(&ctx, &profile, &mut rng(), &OpenField);
        assert_eq!(inside.mode, SteeringMode::Chase);

        ctx.mode = SteeringMode::Chase;
        ctx.target = Some(Position::new(ENEMY_CHASE_RADIUS + 1e-6, 0.0));
        let outside = evaluate(&ctx, &profile, &mut rng(), &OpenField);
        assert_eq!(outside.mode, SteeringMode::Wander);
    }

    // ---- Wander ----

    #[test]
    fn test_wander_picks_target_within_radius() {
        let profile = get_profile(EnemyKind::Melee);
        let origin = Position::new(3.0, -2.0);
        let ctx = make_context(origin, None);
        let mut rng = rng();
        for _ in 0..50 {
            let update = evaluate(&ctx, &profile, &mut rng, &OpenField);
            assert!(update.wander_target.distance_to(&origin) <= WANDER_RADIUS + 1e-9);
            assert!(update.wander_timer >= WANDER_INTERVAL_MIN);
            assert!(update.wander_timer < WANDER_INTERVAL_MAX);
            let speed = update.velocity.speed();
            assert!(speed <= ENEMY_MOVE_SPEED * WANDER_SPEED_MULTIPLIER + 1e-9);
        }
    }

    #[test]
    fn test_wander_keeps_target_until_timer_expires() {
        let profile = get_profile(EnemyKind::Melee);
        let mut ctx = make_context(Position::new(0.0, 0.0), None);
        ctx.wander_target = Position::new(4.0, 0.0);
        ctx.wander_timer = 1.0;
        let update = evaluate(&ctx, &profile, &mut rng(), &OpenField);
        assert_eq!(update.wander_target, Position::new(4.0, 0.0));
        assert!((update.wander_timer - (1.0 - DT)).abs() < 1e-12);
        assert!(update.velocity.x > 0.0);
    }

    #[test]
    fn test_wander_repicks_when_target_reached() {
        let profile = get_profile(EnemyKind::Melee);
        let mut ctx = make_context(Position::new(0.0, 0.0), None);
        ctx.wander_target = Position::new(0.05, 0.0);
        ctx.wander_timer = 10.0;
        let update = evaluate(&ctx, &profile, &mut rng(), &OpenField);
        assert_ne!(update.wander_target, Position::new(0.05, 0.0));
        assert!(update.wander_timer <= WANDER_INTERVAL_MAX);
    }

    #[test]
    fn test_ranged_idles_without_target() {
        let ctx = make_context(Position::new(0.0, 0.0), None);
        let update = evaluate(&ctx, &get_profile(EnemyKind::Ranged), &mut rng(), &OpenField);
        assert_eq!(update.mode, SteeringMode::Idle);
        assert_eq!(update.velocity.speed(), 0.0);
        assert!(!update.mode_changed);
    }

    // ---- Keep-range ----

    #[test]
    fn test_ranged_backs_away_when_too_close() {
        let ctx = make_context(Position::new(0.0, 0.0), Some(Position::new(3.0, 0.0)));
        let update = evaluate(&ctx, &get_profile(EnemyKind::Ranged), &mut rng(), &OpenField);
        assert_eq!(update.mode, SteeringMode::Retreat);
        let expected = ENEMY_MOVE_SPEED * RANGED_BACK_AWAY_BOOST;
        assert!((update.velocity.x + expected).abs() < 1e-9);
        assert!(update.fire_direction.is_none());
    }

    #[test]
    fn test_ranged_closes_in_when_too_far() {
        let ctx = make_context(Position::new(0.0, 0.0), Some(Position::new(0.0, 12.0)));
        let update = evaluate(&ctx, &get_profile(EnemyKind::Ranged), &mut rng(), &OpenField);
        assert_eq!(update.mode, SteeringMode::Approach);
        assert!((update.velocity.y - ENEMY_MOVE_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_ranged_holds_and_fires_in_band() {
        let ctx = make_context(Position::new(0.0, 0.0), Some(Position::new(6.0, 0.0)));
        let update = evaluate(&ctx, &get_profile(EnemyKind::Ranged), &mut rng(), &OpenField);
        assert_eq!(update.mode, SteeringMode::Hold);
        assert_eq!(update.velocity.speed(), 0.0);
        assert_eq!(update.fire_direction, Some(DVec2::X));
    }

    #[test]
    fn test_ranged_repositions_into_band_then_holds() {
        let profile = get_profile(EnemyKind::Ranged);
        let target = Position::new(3.0, 0.0);
        let mut ctx = make_context(Position::new(0.0, 0.0), Some(target));
        let mut rng = rng();

        let mut held = false;
        for _ in 0..(TICK_RATE * 5) {
            let update = evaluate(&ctx, &profile, &mut rng, &OpenField);
            ctx.mode = update.mode;
            ctx.position.x += update.velocity.x * DT;
            ctx.position.y += update.velocity.y * DT;
            if update.mode == SteeringMode::Hold {
                held = true;
                break;
            }
        }

        assert!(held, "ranged enemy never settled into its band");
        let distance = ctx.position.distance_to(&target);
        let inner = RANGED_DESIRED_RANGE - RANGED_RANGE_SLACK;
        let outer = RANGED_DESIRED_RANGE + RANGED_RANGE_SLACK;
        assert!(distance >= inner && distance <= outer, "distance {distance} outside band");
    }
}
