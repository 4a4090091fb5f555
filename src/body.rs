//! Bodies simulated by the canvas world.
//!
//! Two kinds of body exist: dynamic labeled circles and the four static,
//! invisible boundary rectangles that close off the viewport. Material
//! constants match the decorative-canvas defaults (bouncy circles with a
//! little air drag, dead walls).

use glam::Vec2;

/// Thickness of the boundary rectangles framing the viewport.
pub const BOUNDARY_THICKNESS: f32 = 50.0;

/// Radius every circle is created with.
pub const INITIAL_RADIUS: f32 = 50.0;

/// Maximum speed (units per tick) a circle is allowed after a step.
pub const MAX_SPEED: f32 = 10.0;

/// Opaque handle to a body in a [`crate::world::World`].
///
/// Handles stay valid until the world is cleared; a rebuilt world hands out
/// fresh ids, so stale handles simply stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub(crate) u32);

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Dynamic circle drawn with a label.
    Circle { radius: f32 },
    /// Static rectangle, stored as half extents.
    Boundary { half_extents: Vec2 },
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Width of the box.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// A simulated 2D body.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    pub shape: Shape,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Bounciness on contact (1.0 = fully elastic).
    pub restitution: f32,
    /// Per-tick velocity damping.
    pub air_friction: f32,
    pub is_static: bool,
}

impl Body {
    /// Create a dynamic circle at `position`.
    ///
    /// Materials mirror the canvas defaults: fully elastic, 1% air drag,
    /// unit density.
    pub fn circle(position: Vec2, radius: f32) -> Self {
        Self {
            id: BodyId(0),
            shape: Shape::Circle { radius },
            position,
            velocity: Vec2::ZERO,
            restitution: 1.0,
            air_friction: 0.01,
            is_static: false,
        }
    }

    /// Create a static boundary rectangle centered at `position`.
    pub fn boundary(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            id: BodyId(0),
            shape: Shape::Boundary {
                half_extents: Vec2::new(width / 2.0, height / 2.0),
            },
            position,
            velocity: Vec2::ZERO,
            restitution: 0.0,
            air_friction: 0.0,
            is_static: true,
        }
    }

    /// Handle of this body within its world.
    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Whether this body is a circle.
    #[inline]
    pub fn is_circle(&self) -> bool {
        matches!(self.shape, Shape::Circle { .. })
    }

    /// Current circle radius, if this body is a circle.
    #[inline]
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Boundary { .. } => None,
        }
    }

    /// Mass derived from the shape at unit density.
    pub fn mass(&self) -> f32 {
        match self.shape {
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
            Shape::Boundary { half_extents } => 4.0 * half_extents.x * half_extents.y,
        }
    }

    /// Current speed (velocity magnitude).
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Scale the shape uniformly in both axes.
    pub fn scale(&mut self, factor: f32) {
        match &mut self.shape {
            Shape::Circle { radius } => *radius *= factor,
            Shape::Boundary { half_extents } => *half_extents *= factor,
        }
    }

    /// Axis-aligned bounding box at the current position.
    pub fn bounds(&self) -> Aabb {
        let half = match self.shape {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Boundary { half_extents } => half_extents,
        };
        Aabb {
            min: self.position - half,
            max: self.position + half,
        }
    }
}
