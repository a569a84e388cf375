use approx::assert_relative_eq;
use hyperfruit::{Boundary, Fruit, HemisphereBoundary, HemisphereConfig, PhysicsObject, Vec3, Vec4};

fn bowl() -> HemisphereBoundary {
    HemisphereBoundary::new(Vec4::ZERO, 3.0, 90.0, 0.1)
}

fn grown(position: Vec4, fruit: Fruit) -> PhysicsObject {
    PhysicsObject::new(position, fruit, true, false).fully_grown()
}

#[test]
fn object_at_center_is_never_displaced() {
    let boundary = bowl();
    let mut object = grown(Vec4::ZERO, Fruit::Persimmon);
    let before = object;

    boundary.enforce(&mut object);
    assert_eq!(object, before);
}

#[test]
fn object_well_inside_is_untouched() {
    let boundary = bowl();
    let mut object = grown(Vec4::new(0.5, -1.0, 0.2, 0.3), Fruit::Cherry);
    let before = object;

    boundary.enforce(&mut object);
    assert_eq!(object, before);
}

#[test]
fn inner_wall_penetration_is_pushed_back_to_contact() {
    let boundary = bowl();
    let mut object = grown(Vec4::new(0.0, -2.7, 0.0, 0.0), Fruit::Cherry);

    boundary.enforce(&mut object);

    let expected = 3.0 - 0.1 - Fruit::Cherry.radius();
    assert_relative_eq!(object.position.length(), expected, epsilon = 1e-5);
    assert!(object.position.y < 0.0);
}

#[test]
fn correction_keeps_sliding_but_removes_normal_speed() {
    let boundary = bowl();
    let mut object = grown(Vec4::new(0.0, -2.7, 0.0, 0.0), Fruit::Cherry);
    // Moving down and to the side.
    object.add_velocity(Vec4::new(0.05, -0.05, 0.0, 0.0));

    boundary.enforce(&mut object);

    let normal = object.position.normalize();
    let velocity = object.velocity();
    assert_relative_eq!(velocity.dot(normal), 0.0, epsilon = 1e-5);
    assert!(velocity.x > 0.0);
}

#[test]
fn wall_penetration_from_outside_is_pushed_outward() {
    let boundary = bowl();
    let mut object = grown(Vec4::new(0.0, -3.2, 0.0, 0.0), Fruit::Cherry);

    boundary.enforce(&mut object);

    let expected = 3.0 + 0.1 + Fruit::Cherry.radius();
    assert_relative_eq!(object.position.length(), expected, epsilon = 1e-5);
}

#[test]
fn rim_opening_is_unconstrained() {
    let boundary = bowl();
    let mut object = grown(Vec4::new(0.0, 2.9, 0.0, 0.0), Fruit::Cherry);
    let before = object;

    boundary.enforce(&mut object);
    assert_eq!(object, before);
}

#[test]
fn wall_band_applies_across_w() {
    let boundary = bowl();
    let mut object = grown(Vec4::new(0.0, -2.0, 0.0, 2.0), Fruit::Cherry);

    boundary.enforce(&mut object);

    let expected = 3.0 - 0.1 - Fruit::Cherry.radius();
    assert_relative_eq!(object.position.length(), expected, epsilon = 1e-5);
    assert!(object.position.w > 0.0);
}

#[test]
fn downward_ray_lands_on_inner_floor() {
    let boundary = bowl();
    let hit = boundary.check_ray(0.0, Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);

    assert!(hit.hit);
    assert_relative_eq!(hit.point.y, -2.9, epsilon = 1e-4);
    assert_relative_eq!(hit.distance, 7.9, epsilon = 1e-4);
}

#[test]
fn ray_from_inside_skips_the_opening() {
    let boundary = bowl();
    // Upward ray from the bottom: the only positive root lies above the rim.
    let hit = boundary.check_ray(0.0, Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
    assert!(!hit.hit);
}

#[test]
fn slice_outside_bowl_misses() {
    let boundary = bowl();
    let hit = boundary.check_ray(3.5, Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);
    assert!(!hit.hit);
}

#[test]
fn config_validation_rejects_thick_walls() {
    let config = HemisphereConfig {
        margin: 3.5,
        ..HemisphereConfig::default()
    };
    assert!(HemisphereBoundary::from_config(&config).is_err());
    assert!(HemisphereBoundary::from_config(&HemisphereConfig::default()).is_ok());
}
