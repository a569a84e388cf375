use hyperfruit::*;

fn main() -> Result<()> {
    let mut game = Game::new(GameConfig::default())?;
    println!(
        "Solver running on {} with {} slots",
        game.solver().dispatcher_name(),
        game.solver().capacity()
    );

    // Drop a fruit every half second at slightly different spots across w.
    for drop in 0..20 {
        let angle = drop as f32 * 0.7;
        let target = Vec3::new(angle.cos() * 0.8, -2.5, angle.sin() * 0.8);
        game.request_drop(target, (drop % 3) as f32 - 1.0);

        game.step(0.5);
        let merged = game.take_just_merged();
        if merged > 0 {
            println!("drop {drop}: {merged} merge(s), score {}", game.score());
        }
        if game.phase() == GamePhase::GameOver {
            println!("Game over after {drop} drops");
            break;
        }
    }

    for snapshot in game.solver().snapshot() {
        println!(
            "slot {:3}: {:<10} at {:?} (r = {:.2})",
            snapshot.index,
            snapshot.fruit.name(),
            snapshot.position,
            snapshot.radius
        );
    }
    println!(
        "Final score {}, high score {}",
        game.score(),
        game.high_score()
    );
    Ok(())
}
