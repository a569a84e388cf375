use glam::{Mat4, Vec2};

use crate::{
    core::types::{Ray, RayHit},
    dynamics::solver::PhysicsSolver,
};

/// Screen-space picking request.
#[derive(Debug, Clone, Copy)]
pub struct PickQuery {
    /// Cursor position in window pixels, origin at the top-left corner.
    pub cursor: Vec2,
    /// Window size in pixels.
    pub viewport: Vec2,
    pub view: Mat4,
    pub projection: Mat4,
}

impl PickQuery {
    pub fn new(cursor: Vec2, viewport: Vec2, view: Mat4, projection: Mat4) -> Self {
        Self {
            cursor,
            viewport,
            view,
            projection,
        }
    }

    pub fn world_ray(&self) -> Ray {
        Ray::from_screen(self.cursor, self.viewport, self.view, self.projection)
    }
}

pub struct Raycast;

impl Raycast {
    /// Nearest hit among every boundary and every visible object in slice `w`.
    pub fn pick(solver: &PhysicsSolver, w: f32, ray: &Ray) -> RayHit {
        let boundary_hit = solver
            .boundaries()
            .iter()
            .map(|boundary| boundary.check_ray(w, ray.origin, ray.direction))
            .fold(RayHit::MISS, RayHit::nearest);

        let mut closest = boundary_hit;
        solver.for_each_object(|_, object| {
            if object.hidden {
                return;
            }
            closest = closest.nearest(object.test_ray(w, ray.origin, ray.direction));
        });
        closest
    }

    /// Goes straight from screen coordinates to a hit.
    pub fn pick_screen(solver: &PhysicsSolver, w: f32, query: &PickQuery) -> RayHit {
        Self::pick(solver, w, &query.world_ray())
    }
}
