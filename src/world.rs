//! The simulated world and its capability seam.
//!
//! [`PhysicsWorld`] is the trait the canvas drives; [`World`] is the built-in
//! implementation: a flat, insertion-ordered body list, a single optional
//! pointer spring, and a deliberately small solver (integrate, then resolve
//! circle-circle and circle-boundary contacts). Velocities are in units per
//! tick; the caller decides the tick rate.
//!
//! # Example
//!
//! ```ignore
//! use bobble::world::{PhysicsWorld, World};
//! use bobble::body::Body;
//! use glam::Vec2;
//!
//! let mut world = World::bounded(800.0, 600.0);
//! let id = world.insert(Body::circle(Vec2::new(400.0, 300.0), 50.0));
//! world.step();
//! assert!(world.body(id).is_some());
//! ```

use glam::Vec2;

use crate::body::{Aabb, Body, BodyId, Shape, BOUNDARY_THICKNESS};

/// Spring stiffness of the pointer constraint.
pub const POINTER_STIFFNESS: f32 = 0.2;

/// Velocity retained before the spring force is added each tick. Keeps the
/// grabbed body from oscillating around the pointer.
const SPRING_DAMPING: f32 = 0.9;

/// Capability interface over a 2D physics world.
///
/// The canvas only ever talks to this trait, so the built-in solver can be
/// swapped for a full engine without touching the component.
pub trait PhysicsWorld {
    /// Viewport dimensions the world was built for.
    fn dimensions(&self) -> Vec2;

    /// All bodies in insertion order.
    fn bodies(&self) -> &[Body];

    /// Look up a body by handle.
    fn body(&self, id: BodyId) -> Option<&Body>;

    /// Add a body, returning its handle.
    fn insert(&mut self, body: Body) -> BodyId;

    /// Remove every body and drop the pointer constraint.
    fn clear(&mut self);

    /// Teleport a body. Unknown handles no-op.
    fn set_position(&mut self, id: BodyId, position: Vec2);

    /// Overwrite a body's velocity. Unknown handles no-op.
    fn set_velocity(&mut self, id: BodyId, velocity: Vec2);

    /// Scale a body's shape uniformly. Unknown handles no-op.
    fn scale_body(&mut self, id: BodyId, factor: f32);

    /// Attach the pointer spring to the circle under `pos`, if any.
    ///
    /// Boundaries are never grabbed. Returns the grabbed handle.
    fn attach_pointer(&mut self, pos: Vec2) -> Option<BodyId>;

    /// Move the pointer spring target.
    fn drag_to(&mut self, pos: Vec2);

    /// Detach the pointer spring, returning the body it held.
    fn release_pointer(&mut self) -> Option<BodyId>;

    /// Force-deactivate the pointer spring so it cannot stay latched
    /// (the "pointer left the surface" escape hatch).
    fn deactivate_pointer(&mut self);

    /// Advance the simulation by one tick.
    fn step(&mut self);

    /// Viewport the world simulates in. Does not move existing bodies.
    fn set_dimensions(&mut self, width: f32, height: f32);

    /// Clamp one body into the viewport and under the speed cap.
    ///
    /// `radius` is the inset used for the position clamp; the caller passes
    /// the body's nominal radius (or the scaled-up one while dragging).
    /// Speed is clamped first, then position. Unknown handles no-op.
    fn constrain(&mut self, id: BodyId, radius: f32) {
        let dims = self.dimensions();
        let Some(body) = self.body(id) else {
            return;
        };
        let velocity = body.velocity;
        let position = body.position;

        let speed = velocity.length();
        if speed > crate::body::MAX_SPEED {
            self.set_velocity(id, velocity * (crate::body::MAX_SPEED / speed));
        }

        let clamped = Vec2::new(
            position.x.clamp(radius, dims.x - radius),
            position.y.clamp(radius, dims.y - radius),
        );
        if clamped != position {
            self.set_position(id, clamped);
        }
    }
}

/// Spring link between the pointer and a grabbed body.
#[derive(Debug, Clone, Copy)]
struct PointerSpring {
    body: BodyId,
    target: Vec2,
    stiffness: f32,
}

/// Built-in [`PhysicsWorld`] implementation.
#[derive(Debug)]
pub struct World {
    width: f32,
    height: f32,
    bodies: Vec<Body>,
    next_id: u32,
    spring: Option<PointerSpring>,
}

impl World {
    /// Create an empty world sized to a viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            bodies: Vec::new(),
            next_id: 1,
            spring: None,
        }
    }

    /// Create a world with the four boundary walls already in place.
    ///
    /// Walls sit centered on the viewport edges: ceiling, ground, left,
    /// right, each [`BOUNDARY_THICKNESS`] thick.
    pub fn bounded(width: f32, height: f32) -> Self {
        let mut world = Self::new(width, height);
        world.insert(Body::boundary(
            Vec2::new(width / 2.0, 0.0),
            width,
            BOUNDARY_THICKNESS,
        ));
        world.insert(Body::boundary(
            Vec2::new(width / 2.0, height),
            width,
            BOUNDARY_THICKNESS,
        ));
        world.insert(Body::boundary(
            Vec2::new(0.0, height / 2.0),
            BOUNDARY_THICKNESS,
            height,
        ));
        world.insert(Body::boundary(
            Vec2::new(width, height / 2.0),
            BOUNDARY_THICKNESS,
            height,
        ));
        world
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }

    fn apply_spring(&mut self) {
        let Some(spring) = self.spring else { return };
        let Some(index) = self.index_of(spring.body) else {
            return;
        };
        let body = &mut self.bodies[index];
        if body.is_static {
            return;
        }
        let pull = (spring.target - body.position) * spring.stiffness;
        body.velocity = body.velocity * SPRING_DAMPING + pull;
    }

    fn integrate(&mut self) {
        for body in self.bodies.iter_mut() {
            if body.is_static {
                continue;
            }
            body.position += body.velocity;
            body.velocity *= 1.0 - body.air_friction;
        }
    }

    /// Resolve one circle-circle contact with an impulse plus positional
    /// separation. Equal split of the overlap; restitution is the pair
    /// minimum.
    fn resolve_pair(a: &mut Body, b: &mut Body) {
        let (Some(ra), Some(rb)) = (a.radius(), b.radius()) else {
            return;
        };
        let delta = b.position - a.position;
        let dist = delta.length();
        let overlap = ra + rb - dist;
        if overlap <= 0.0 {
            return;
        }

        // Coincident centers get an arbitrary but fixed normal.
        let normal = if dist > f32::EPSILON {
            delta / dist
        } else {
            Vec2::X
        };

        a.position -= normal * overlap * 0.5;
        b.position += normal * overlap * 0.5;

        let relative = (b.velocity - a.velocity).dot(normal);
        if relative >= 0.0 {
            return;
        }
        let restitution = a.restitution.min(b.restitution);
        let inv_mass = 1.0 / a.mass() + 1.0 / b.mass();
        let impulse = -(1.0 + restitution) * relative / inv_mass;
        a.velocity -= normal * impulse / a.mass();
        b.velocity += normal * impulse / b.mass();
    }

    /// Push a circle out of a static rectangle and reflect its velocity.
    fn resolve_wall(circle: &mut Body, wall_bounds: Aabb, wall_restitution: f32) {
        let Some(radius) = circle.radius() else {
            return;
        };
        let nearest = Vec2::new(
            circle.position.x.clamp(wall_bounds.min.x, wall_bounds.max.x),
            circle.position.y.clamp(wall_bounds.min.y, wall_bounds.max.y),
        );
        let delta = circle.position - nearest;
        let dist = delta.length();
        if dist >= radius {
            return;
        }

        // Center inside the wall: push out along the shallow axis.
        let normal = if dist > f32::EPSILON {
            delta / dist
        } else {
            let center = Vec2::new(
                (wall_bounds.min.x + wall_bounds.max.x) / 2.0,
                (wall_bounds.min.y + wall_bounds.max.y) / 2.0,
            );
            let offset = circle.position - center;
            if offset.x.abs() > offset.y.abs() {
                Vec2::new(offset.x.signum(), 0.0)
            } else {
                Vec2::new(0.0, offset.y.signum())
            }
        };

        circle.position += normal * (radius - dist);
        let along = circle.velocity.dot(normal);
        if along < 0.0 {
            let restitution = circle.restitution.min(wall_restitution).max(0.0);
            circle.velocity -= normal * along * (1.0 + restitution);
        }
    }

    fn resolve_contacts(&mut self) {
        // Walls first so circle pairs see post-wall positions.
        let walls: Vec<(Aabb, f32)> = self
            .bodies
            .iter()
            .filter(|b| b.is_static)
            .map(|b| (b.bounds(), b.restitution))
            .collect();
        for body in self.bodies.iter_mut() {
            if body.is_static {
                continue;
            }
            for &(bounds, restitution) in &walls {
                Self::resolve_wall(body, bounds, restitution);
            }
        }

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (left, right) = self.bodies.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                if a.is_static || b.is_static {
                    continue;
                }
                Self::resolve_pair(a, b);
            }
        }
    }
}

impl PhysicsWorld for World {
    fn dimensions(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    fn insert(&mut self, mut body: Body) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        body.id = id;
        self.bodies.push(body);
        id
    }

    fn clear(&mut self) {
        self.bodies.clear();
        self.spring = None;
    }

    fn set_position(&mut self, id: BodyId, position: Vec2) {
        if let Some(index) = self.index_of(id) {
            self.bodies[index].position = position;
        }
    }

    fn set_velocity(&mut self, id: BodyId, velocity: Vec2) {
        if let Some(index) = self.index_of(id) {
            self.bodies[index].velocity = velocity;
        }
    }

    fn scale_body(&mut self, id: BodyId, factor: f32) {
        if let Some(index) = self.index_of(id) {
            self.bodies[index].scale(factor);
        }
    }

    fn attach_pointer(&mut self, pos: Vec2) -> Option<BodyId> {
        let grabbed = self.bodies.iter().find(|b| {
            if b.is_static {
                return false;
            }
            match b.shape {
                Shape::Circle { radius } => b.position.distance(pos) <= radius,
                Shape::Boundary { .. } => false,
            }
        })?;
        let id = grabbed.id;
        self.spring = Some(PointerSpring {
            body: id,
            target: pos,
            stiffness: POINTER_STIFFNESS,
        });
        Some(id)
    }

    fn drag_to(&mut self, pos: Vec2) {
        if let Some(spring) = &mut self.spring {
            spring.target = pos;
        }
    }

    fn release_pointer(&mut self) -> Option<BodyId> {
        self.spring.take().map(|s| s.body)
    }

    fn deactivate_pointer(&mut self) {
        self.spring = None;
    }

    fn step(&mut self) {
        self.apply_spring();
        self.integrate();
        self.resolve_contacts();
    }

    fn set_dimensions(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{INITIAL_RADIUS, MAX_SPEED};

    #[test]
    fn bounded_world_has_four_walls_on_the_edges() {
        let world = World::bounded(800.0, 600.0);
        let walls: Vec<&Body> = world.bodies().iter().filter(|b| b.is_static).collect();
        assert_eq!(walls.len(), 4);
        let centers: Vec<Vec2> = walls.iter().map(|b| b.position).collect();
        assert!(centers.contains(&Vec2::new(400.0, 0.0)));
        assert!(centers.contains(&Vec2::new(400.0, 600.0)));
        assert!(centers.contains(&Vec2::new(0.0, 300.0)));
        assert!(centers.contains(&Vec2::new(800.0, 300.0)));
    }

    #[test]
    fn constrain_caps_speed_then_position() {
        let mut world = World::new(800.0, 600.0);
        let id = world.insert(Body::circle(Vec2::new(1000.0, -20.0), INITIAL_RADIUS));
        world.set_velocity(id, Vec2::new(30.0, -40.0));

        world.constrain(id, INITIAL_RADIUS);

        let body = world.body(id).unwrap();
        assert!(body.speed() <= MAX_SPEED + 1e-4);
        assert_eq!(body.position, Vec2::new(750.0, 50.0));
    }

    #[test]
    fn constrain_unknown_id_is_a_noop() {
        let mut world = World::new(800.0, 600.0);
        world.constrain(BodyId(99), INITIAL_RADIUS);
        assert!(world.bodies().is_empty());
    }

    #[test]
    fn step_keeps_constrained_circle_in_bounds() {
        let mut world = World::bounded(800.0, 600.0);
        let id = world.insert(Body::circle(Vec2::new(400.0, 300.0), INITIAL_RADIUS));
        world.set_velocity(id, Vec2::new(9.0, -9.0));

        for _ in 0..500 {
            world.constrain(id, INITIAL_RADIUS);
            world.step();
            world.constrain(id, INITIAL_RADIUS);
            let body = world.body(id).unwrap();
            assert!(body.position.x >= INITIAL_RADIUS && body.position.x <= 800.0 - INITIAL_RADIUS);
            assert!(body.position.y >= INITIAL_RADIUS && body.position.y <= 600.0 - INITIAL_RADIUS);
            assert!(body.speed() <= MAX_SPEED + 1e-3);
        }
    }

    #[test]
    fn pointer_grabs_circles_but_never_walls() {
        let mut world = World::bounded(800.0, 600.0);
        let id = world.insert(Body::circle(Vec2::new(400.0, 300.0), INITIAL_RADIUS));

        // On a wall center: nothing grabbed.
        assert_eq!(world.attach_pointer(Vec2::new(400.0, 0.0)), None);
        // On the circle: grabbed.
        assert_eq!(world.attach_pointer(Vec2::new(410.0, 305.0)), Some(id));
        assert_eq!(world.release_pointer(), Some(id));
        assert_eq!(world.release_pointer(), None);
    }

    #[test]
    fn spring_pulls_grabbed_body_toward_target() {
        let mut world = World::bounded(800.0, 600.0);
        let id = world.insert(Body::circle(Vec2::new(200.0, 300.0), INITIAL_RADIUS));
        world.attach_pointer(Vec2::new(200.0, 300.0));
        world.drag_to(Vec2::new(600.0, 300.0));

        let start = world.body(id).unwrap().position;
        for _ in 0..30 {
            world.constrain(id, INITIAL_RADIUS);
            world.step();
        }
        let end = world.body(id).unwrap().position;
        assert!(end.x > start.x + 50.0, "body should move toward the target");
    }

    #[test]
    fn deactivate_pointer_unlatches_the_spring() {
        let mut world = World::bounded(800.0, 600.0);
        let id = world.insert(Body::circle(Vec2::new(400.0, 300.0), INITIAL_RADIUS));
        assert_eq!(world.attach_pointer(Vec2::new(400.0, 300.0)), Some(id));
        world.deactivate_pointer();
        assert_eq!(world.release_pointer(), None);
    }

    #[test]
    fn colliding_circles_separate() {
        let mut world = World::new(800.0, 600.0);
        let a = world.insert(Body::circle(Vec2::new(390.0, 300.0), INITIAL_RADIUS));
        let b = world.insert(Body::circle(Vec2::new(410.0, 300.0), INITIAL_RADIUS));
        world.step();
        let pa = world.body(a).unwrap().position;
        let pb = world.body(b).unwrap().position;
        assert!(
            pa.distance(pb) >= 2.0 * INITIAL_RADIUS - 1e-3,
            "overlap should be resolved, got distance {}",
            pa.distance(pb)
        );
    }

    #[test]
    fn clear_drops_bodies_and_spring() {
        let mut world = World::bounded(800.0, 600.0);
        let id = world.insert(Body::circle(Vec2::new(400.0, 300.0), INITIAL_RADIUS));
        world.attach_pointer(Vec2::new(400.0, 300.0));
        world.clear();
        assert!(world.bodies().is_empty());
        assert_eq!(world.release_pointer(), None);
        assert!(world.body(id).is_none());
    }
}
