use hyperfruit::{
    config::MAX_CATCH_UP_STEPS, Fruit, Game, GameConfig, GamePhase, Ray, SerialDispatcher,
    SolverConfig, Vec3, Vec4,
};

const DT: f32 = 1.0 / 60.0;

fn game() -> Game {
    Game::with_dispatcher(GameConfig::default(), SerialDispatcher::new()).unwrap()
}

#[test]
fn drops_wait_for_the_next_fixed_update() {
    let mut game = game();
    let fruit = game.next_fruit();
    assert!(Fruit::DROPPABLE.contains(&fruit));

    assert!(game.request_drop(Vec3::new(0.0, -2.9, 0.0), 0.0));
    assert_eq!(game.pending_drops(), 1);
    assert_eq!(game.solver().object_count(), 0);

    game.fixed_update();

    assert_eq!(game.pending_drops(), 0);
    assert_eq!(game.solver().object_count(), 1);
    let object = game.solver().object(0).unwrap();
    assert_eq!(object.fruit, fruit);
    assert!(object.position.y > 0.0);
    assert_eq!(object.position.w, 0.0);
}

#[test]
fn drop_slice_is_clamped_to_the_w_range() {
    let mut game = game();
    game.request_drop(Vec3::ZERO, 42.0);
    game.fixed_update();

    let object = game.solver().object(0).unwrap();
    assert_eq!(object.position.w, game.config().w_max);
}

#[test]
fn step_runs_whole_fixed_updates_only() {
    let mut game = game();
    assert_eq!(game.step(DT * 0.5), 0);
    assert_eq!(game.step(DT * 0.6), 1);
    assert_eq!(game.step(DT * 3.0), 3);
    assert_eq!(game.step(-1.0), 0);
    assert_eq!(game.step(f32::NAN), 0);
}

#[test]
fn long_frames_drop_time_past_the_catch_up_limit() {
    let mut game = game();
    assert_eq!(game.step(DT * 100.0), MAX_CATCH_UP_STEPS);
    assert_eq!(game.step(DT * 0.5), 0);
    assert_eq!(game.step(DT * 0.6), 1);
}

#[test]
fn seeded_sessions_roll_the_same_fruit() {
    let mut a = game();
    let mut b = game();
    for _ in 0..10 {
        assert_eq!(a.next_fruit(), b.next_fruit());
        a.request_drop(Vec3::new(0.0, -2.0, 0.0), 0.0);
        b.request_drop(Vec3::new(0.0, -2.0, 0.0), 0.0);
        a.fixed_update();
        b.fixed_update();
    }
}

#[test]
fn falling_out_of_the_bowl_ends_the_session() {
    let mut game = game();
    // Just outside the rim: the fruit misses the bowl entirely.
    game.request_drop(Vec3::new(3.8, 0.0, 0.0), 0.0);

    let mut ticks = 0;
    while game.phase() == GamePhase::Active && ticks < 600 {
        game.fixed_update();
        ticks += 1;
    }
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(!game.request_drop(Vec3::ZERO, 0.0));

    let count = game.solver().object_count();
    game.fixed_update();
    assert_eq!(game.solver().object_count(), count);
}

#[test]
fn restart_keeps_the_high_score() {
    let config = GameConfig {
        solver: SolverConfig {
            gravity: [0.0; 4],
            ..SolverConfig::default()
        },
        ..GameConfig::default()
    };
    let mut game = Game::with_dispatcher(config, SerialDispatcher::new()).unwrap();

    // Two touching twins placed straight into the solver merge on the next tick.
    let twins = [Vec4::new(-0.1, -2.0, 0.0, 0.0), Vec4::new(0.1, -2.0, 0.0, 0.0)];
    for position in twins {
        let index = game
            .solver_mut()
            .spawn(position, Fruit::Grape, true, false)
            .unwrap();
        game.solver_mut()
            .with_object_mut(index, |object| *object = object.fully_grown());
    }
    game.fixed_update();
    assert_eq!(game.take_just_merged(), 1);
    let score = game.score();
    assert_eq!(score, Fruit::Dekopon.points());

    game.restart();

    assert_eq!(game.phase(), GamePhase::Active);
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), score);
    assert_eq!(game.solver().object_count(), 0);
}

#[test]
fn preview_hits_the_bowl_floor() {
    let game = game();
    let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);

    let hit = game.preview(&ray, 0.0);
    assert!(hit.hit);
    assert!((hit.point.y + 2.9).abs() < 1e-4);
}

#[test]
fn json_config_builds_a_session() {
    let config =
        GameConfig::from_json(r#"{ "seed": 7, "solver": { "max_objects": 12 } }"#).unwrap();
    let game = Game::with_dispatcher(config, SerialDispatcher::new()).unwrap();
    assert_eq!(game.solver().capacity(), 12);
    assert_eq!(game.config().seed, 7);
}
