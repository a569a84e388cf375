use approx::assert_relative_eq;
use hyperfruit::{Fruit, PhysicsObject, SolverConfig, Vec3, Vec4};

fn grown(position: Vec4, fruit: Fruit) -> PhysicsObject {
    PhysicsObject::new(position, fruit, true, false).fully_grown()
}

#[test]
fn ray_in_own_slice_matches_plain_sphere_test() {
    let object = grown(Vec4::new(0.0, 0.0, 5.0, 1.5), Fruit::Apple);
    let hit = object.test_ray(1.5, Vec3::ZERO, Vec3::Z);

    assert!(hit.hit);
    assert_relative_eq!(hit.distance, 5.0 - Fruit::Apple.radius(), epsilon = 1e-5);
    assert_relative_eq!(hit.point.z, 5.0 - Fruit::Apple.radius(), epsilon = 1e-5);
}

#[test]
fn ray_outside_object_slice_always_misses() {
    let object = grown(Vec4::new(0.0, 0.0, 5.0, 1.5), Fruit::Apple);
    let w = 1.5 + Fruit::Apple.radius() + 1e-3;

    assert!(!object.test_ray(w, Vec3::ZERO, Vec3::Z).hit);
    assert!(!object.test_ray(-w, Vec3::ZERO, Vec3::Z).hit);
}

#[test]
fn off_slice_cross_section_shrinks() {
    let object = grown(Vec4::new(0.0, 0.0, 5.0, 0.0), Fruit::Melon);
    let r = Fruit::Melon.radius();
    let dw = 0.6 * r;
    let slice_r = (r * r - dw * dw).sqrt();

    let hit = object.test_ray(dw, Vec3::ZERO, Vec3::Z);
    assert!(hit.hit);
    assert_relative_eq!(hit.distance, 5.0 - slice_r, epsilon = 1e-4);
}

#[test]
fn ray_pointing_away_misses_and_inside_hits_far_side() {
    let object = grown(Vec4::new(0.0, 0.0, 5.0, 0.0), Fruit::Cherry);
    assert!(!object.test_ray(0.0, Vec3::ZERO, -Vec3::Z).hit);

    let inside = object.test_ray(0.0, Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
    assert!(inside.hit);
    assert_relative_eq!(inside.distance, Fruit::Cherry.radius(), epsilon = 1e-5);
}

#[test]
fn hidden_state_toggles() {
    let mut object = grown(Vec4::ZERO, Fruit::Grape);
    object.disable();
    assert!(object.hidden);
    object.enable();
    assert!(!object.hidden);
}

#[test]
fn implicit_velocity_carries_over_between_steps() {
    let config = SolverConfig {
        velocity_damping: 0.0,
        ..SolverConfig::default()
    };
    let mut object = grown(Vec4::ZERO, Fruit::Cherry);
    object.add_velocity(Vec4::new(0.1, 0.0, 0.0, 0.0));

    object.update(1.0 / 60.0, &config);
    object.update(1.0 / 60.0, &config);

    assert_relative_eq!(object.position.x, 0.2, epsilon = 1e-6);
    assert_relative_eq!(object.velocity().x, 0.1, epsilon = 1e-6);
    assert_eq!(object.acceleration, Vec4::ZERO);
}
