use hyperfruit::*;

fn main() -> Result<()> {
    let mut solver =
        PhysicsSolver::new(SolverConfig::default(), Box::new(SerialDispatcher::new()))?;
    solver.add_boundary(HemisphereBoundary::default());
    solver.add_object(
        PhysicsObject::new(Vec4::new(0.0, -2.0, 0.0, 0.5), Fruit::Peach, true, false).fully_grown(),
    )?;

    let mut camera = OrbitCamera::default();
    let viewport = Vec2::new(1280.0, 720.0);

    for w in [0.0, 0.5, 1.5] {
        camera.w = w;
        let query = PickQuery::new(
            viewport * 0.5,
            viewport,
            camera.view_matrix(),
            camera.projection(viewport.x / viewport.y),
        );
        let hit = Raycast::pick_screen(&solver, camera.w, &query);
        if hit.hit {
            println!("w = {w:.1}: hit at {:?} ({:.3} away)", hit.point, hit.distance);
        } else {
            println!("w = {w:.1}: no hit");
        }
    }
    Ok(())
}
