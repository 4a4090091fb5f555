//! The physics canvas component.
//!
//! [`PhysicsCanvas`] owns a [`PhysicsWorld`], a label set, and the drag
//! state, and drives the simulate-then-render contract: clamp every circle,
//! step the world, then draw labeled circles through a [`FrameRenderer`].
//!
//! The component is frontend-agnostic. Feed it pointer events and ticks from
//! whatever loop hosts it; the `window` feature ships a winit/egui host.
//!
//! # Example
//!
//! ```ignore
//! use bobble::canvas::PhysicsCanvas;
//! use bobble::render::FrameRecorder;
//!
//! let mut canvas = PhysicsCanvas::new(800.0, 600.0).with_seed(7);
//! canvas.mount()?;
//!
//! let mut frame = FrameRecorder::new();
//! for _ in 0..60 {
//!     canvas.step();
//! }
//! canvas.draw(&mut frame);
//! # Ok::<(), bobble::error::CanvasError>(())
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::body::{Body, BodyId, INITIAL_RADIUS};
use crate::error::CanvasError;
use crate::render::{FrameRenderer, BACKGROUND, HIGHLIGHT, INK, LABEL_SIZE, NEUTRAL};
use crate::world::{PhysicsWorld, World};

/// Labels the canvas ships with, one per circle, in creation order.
pub const DEFAULT_LABELS: [&str; 12] = [
    "Layout",
    "React",
    "CSS",
    "JavaScript",
    "Designer",
    "State \n Management",
    "Responsive",
    "\"Very Easy\" \n Task",
    "Project Size",
    "Laggy \n Performance",
    "Legacy Code",
    "TypeScript \n Type",
];

/// How the label index wraps while drawing.
///
/// The original canvas reset the index when it reached `len - 1`, so the
/// last label was never drawn and the final circle reused the first label.
/// That behavior is kept as the default until the intent is confirmed;
/// [`LabelWrap::Full`] is the corrected variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelWrap {
    /// Reset at `len - 1`: the last label is skipped (original behavior).
    #[default]
    SkipLast,
    /// Reset at `len`: every label is used once per cycle.
    Full,
}

/// Where a dragged body goes when the pointer leaves the surface.
///
/// The original canvas repositioned it to `(bbox_width, bbox_height)` of its
/// own bounding box, which looks unintentional but is kept as the default
/// until the intended target is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaveBehavior {
    /// Teleport to `(bounding_width, bounding_height)` (original behavior).
    #[default]
    BoundingExtent,
    /// Leave the body where it is.
    InPlace,
}

/// Interactive canvas of draggable, labeled circle bodies.
pub struct PhysicsCanvas<W: PhysicsWorld = World> {
    world: W,
    labels: Vec<String>,
    initial_radius: f32,
    label_wrap: LabelWrap,
    leave_behavior: LeaveBehavior,
    /// The one body currently under drag, if any. Owned here, never global.
    dragged: Option<BodyId>,
    /// Circle handles in creation order. Rebuilt wholesale on resize.
    circles: Vec<BodyId>,
    rng: SmallRng,
    mounted: bool,
}

impl PhysicsCanvas<World> {
    /// Create a canvas over the built-in world, not yet mounted.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_world(World::new(width, height))
    }
}

impl<W: PhysicsWorld> PhysicsCanvas<W> {
    /// Create a canvas over a caller-provided world implementation.
    pub fn with_world(world: W) -> Self {
        Self {
            world,
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            initial_radius: INITIAL_RADIUS,
            label_wrap: LabelWrap::default(),
            leave_behavior: LeaveBehavior::default(),
            dragged: None,
            circles: Vec::new(),
            rng: SmallRng::from_entropy(),
            mounted: false,
        }
    }

    /// Replace the label set. One circle is created per label.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Override the circle creation radius.
    pub fn with_initial_radius(mut self, radius: f32) -> Self {
        self.initial_radius = radius;
        self
    }

    /// Select the label wrap behavior.
    pub fn with_label_wrap(mut self, wrap: LabelWrap) -> Self {
        self.label_wrap = wrap;
        self
    }

    /// Select the pointer-leave behavior.
    pub fn with_leave_behavior(mut self, behavior: LeaveBehavior) -> Self {
        self.leave_behavior = behavior;
        self
    }

    /// Seed circle placement for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Build the world contents: boundaries plus one circle per label.
    ///
    /// Fails with [`CanvasError::NoLabels`] when the label set is empty.
    pub fn mount(&mut self) -> Result<(), CanvasError> {
        if self.labels.is_empty() {
            return Err(CanvasError::NoLabels);
        }
        self.rebuild();
        self.mounted = true;
        Ok(())
    }

    /// Tear down and rebuild the world at new dimensions.
    ///
    /// The body set is fully replaced, stale handles stop resolving, and any
    /// in-flight drag is dropped. No-op before [`mount`](Self::mount).
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.mounted {
            return;
        }
        self.world.set_dimensions(width, height);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.world.clear();
        self.circles.clear();
        self.dragged = None;

        let dims = self.world.dimensions();
        let r = self.initial_radius;

        self.world
            .insert(Body::boundary(Vec2::new(dims.x / 2.0, 0.0), dims.x, crate::body::BOUNDARY_THICKNESS));
        self.world
            .insert(Body::boundary(Vec2::new(dims.x / 2.0, dims.y), dims.x, crate::body::BOUNDARY_THICKNESS));
        self.world
            .insert(Body::boundary(Vec2::new(0.0, dims.y / 2.0), crate::body::BOUNDARY_THICKNESS, dims.y));
        self.world
            .insert(Body::boundary(Vec2::new(dims.x, dims.y / 2.0), crate::body::BOUNDARY_THICKNESS, dims.y));

        for _ in 0..self.labels.len() {
            let x = self.rng.gen_range(r..=(dims.x - r).max(r));
            let y = self.rng.gen_range(r..=(dims.y - r).max(r));
            let id = self.world.insert(Body::circle(Vec2::new(x, y), r));
            self.circles.push(id);
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Runs the clamp pass first (every circle at its creation radius, the
    /// dragged body again at twice that), then steps the world.
    pub fn step(&mut self) {
        for i in 0..self.circles.len() {
            let id = self.circles[i];
            self.world.constrain(id, self.initial_radius);
        }
        if let Some(id) = self.dragged {
            self.world.constrain(id, self.initial_radius * 2.0);
        }
        self.world.step();
    }

    /// Pointer pressed at `pos`: try to grab a circle and scale it up 2x.
    pub fn pointer_pressed(&mut self, pos: Vec2) {
        let Some(grabbed) = self.world.attach_pointer(pos) else {
            return;
        };
        // Only bodies we created as circles ever become the dragged body.
        if self.circles.contains(&grabbed) {
            self.dragged = Some(grabbed);
            self.world.scale_body(grabbed, 2.0);
        }
    }

    /// Pointer moved: retarget the drag spring.
    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.world.drag_to(pos);
    }

    /// Pointer released: scale the dragged body back down and let it go.
    pub fn pointer_released(&mut self) {
        let released = self.world.release_pointer();
        if let (Some(dragged), Some(released)) = (self.dragged, released) {
            if dragged == released {
                self.world.scale_body(dragged, 0.5);
                self.dragged = None;
            }
        }
    }

    /// Pointer left the surface: cancel the drag entirely.
    ///
    /// Scales the body back down, repositions it per [`LeaveBehavior`], and
    /// force-deactivates the spring so it cannot stay latched.
    pub fn pointer_left(&mut self) {
        if let Some(id) = self.dragged.take() {
            self.world.scale_body(id, 0.5);
            if self.leave_behavior == LeaveBehavior::BoundingExtent {
                if let Some(bounds) = self.world.body(id).map(|b| b.bounds()) {
                    self.world
                        .set_position(id, Vec2::new(bounds.width(), bounds.height()));
                }
            }
            self.world.deactivate_pointer();
        }
    }

    /// Draw the current world state.
    ///
    /// Clears to the dark background, then draws every circle body in world
    /// order with its label centered on top. The dragged body gets the
    /// highlight fill.
    pub fn draw(&self, renderer: &mut dyn FrameRenderer) {
        renderer.clear(BACKGROUND);

        let reset_at = match self.label_wrap {
            LabelWrap::SkipLast => self.labels.len().saturating_sub(1),
            LabelWrap::Full => self.labels.len(),
        };

        let mut index = 0;
        for body in self.world.bodies() {
            if !body.is_circle() || index >= self.labels.len() {
                continue;
            }
            let Some(radius) = body.radius() else {
                continue;
            };

            let fill = if self.dragged == Some(body.id()) {
                HIGHLIGHT
            } else {
                NEUTRAL
            };
            renderer.fill_circle(body.position, radius, fill);
            renderer.draw_text(&self.labels[index], body.position, LABEL_SIZE, INK);

            index += 1;
            if index == reset_at {
                index = 0;
            }
        }
    }

    /// Whether [`mount`](Self::mount) has succeeded.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The body currently under drag, if any.
    #[inline]
    pub fn dragged(&self) -> Option<BodyId> {
        self.dragged
    }

    /// Circle handles in creation order.
    #[inline]
    pub fn circles(&self) -> &[BodyId] {
        &self.circles
    }

    /// The label set.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The underlying world.
    #[inline]
    pub fn world(&self) -> &W {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::MAX_SPEED;
    use crate::render::{DrawCommand, FrameRecorder};

    fn mounted_canvas() -> PhysicsCanvas {
        let mut canvas = PhysicsCanvas::new(800.0, 600.0).with_seed(42);
        canvas.mount().expect("default labels are non-empty");
        canvas
    }

    #[test]
    fn mount_creates_walls_and_one_circle_per_label() {
        let canvas = mounted_canvas();
        let bodies = canvas.world().bodies();
        let walls = bodies.iter().filter(|b| b.is_static).count();
        let circles = bodies.iter().filter(|b| b.is_circle()).count();
        assert_eq!(walls, 4);
        assert_eq!(circles, DEFAULT_LABELS.len());

        for body in bodies.iter().filter(|b| b.is_circle()) {
            assert!(body.position.x >= 50.0 && body.position.x <= 750.0);
            assert!(body.position.y >= 50.0 && body.position.y <= 550.0);
        }
    }

    #[test]
    fn mount_without_labels_fails() {
        let mut canvas = PhysicsCanvas::new(800.0, 600.0).with_labels(Vec::<String>::new());
        assert!(matches!(canvas.mount(), Err(CanvasError::NoLabels)));
    }

    #[test]
    fn step_keeps_every_circle_in_bounds_and_under_the_speed_cap() {
        let mut canvas = mounted_canvas();
        // Kick every circle hard so the clamp has work to do.
        let ids: Vec<_> = canvas.circles().to_vec();
        for id in &ids {
            canvas.world.set_velocity(*id, Vec2::new(25.0, -18.0));
        }

        for _ in 0..240 {
            canvas.step();
        }
        for id in &ids {
            canvas.world.constrain(*id, INITIAL_RADIUS);
            let body = canvas.world().body(*id).unwrap();
            assert!(body.position.x >= 50.0 && body.position.x <= 750.0);
            assert!(body.position.y >= 50.0 && body.position.y <= 550.0);
            assert!(body.speed() <= MAX_SPEED + 1e-3);
        }
    }

    #[test]
    fn drag_round_trip_restores_the_radius() {
        let mut canvas = mounted_canvas();
        let id = canvas.circles()[0];
        let center = canvas.world().body(id).unwrap().position;
        let before = canvas.world().body(id).unwrap().radius().unwrap();

        canvas.pointer_pressed(center);
        assert_eq!(canvas.dragged(), Some(id));
        let scaled = canvas.world().body(id).unwrap().radius().unwrap();
        assert!((scaled - before * 2.0).abs() < 1e-4);

        canvas.pointer_released();
        assert_eq!(canvas.dragged(), None);
        let after = canvas.world().body(id).unwrap().radius().unwrap();
        assert!((after - before).abs() < 1e-4);
    }

    #[test]
    fn pressing_a_wall_does_not_start_a_drag() {
        let mut canvas = mounted_canvas();
        // Top wall center. attach_pointer never grabs statics, and even a
        // world that did would fail the canvas's own circle check.
        canvas.pointer_pressed(Vec2::new(400.0, 0.0));
        assert_eq!(canvas.dragged(), None);
    }

    #[test]
    fn pointer_leave_cancels_and_repositions() {
        let mut canvas = mounted_canvas();
        let id = canvas.circles()[0];
        let center = canvas.world().body(id).unwrap().position;

        canvas.pointer_pressed(center);
        assert_eq!(canvas.dragged(), Some(id));
        canvas.pointer_left();

        assert_eq!(canvas.dragged(), None);
        let body = canvas.world().body(id).unwrap();
        let radius = body.radius().unwrap();
        assert!((radius - INITIAL_RADIUS).abs() < 1e-4);
        // Original quirk: the new position is the bounding box extent.
        assert_eq!(body.position, Vec2::new(radius * 2.0, radius * 2.0));
    }

    #[test]
    fn pointer_leave_in_place_keeps_the_position() {
        let mut canvas = PhysicsCanvas::new(800.0, 600.0)
            .with_seed(42)
            .with_leave_behavior(LeaveBehavior::InPlace);
        canvas.mount().unwrap();
        let id = canvas.circles()[0];
        let center = canvas.world().body(id).unwrap().position;

        canvas.pointer_pressed(center);
        canvas.pointer_left();
        assert_eq!(canvas.world().body(id).unwrap().position, center);
    }

    #[test]
    fn resize_fully_replaces_the_body_set() {
        let mut canvas = mounted_canvas();
        let old_ids: Vec<_> = canvas.circles().to_vec();
        let id = old_ids[0];
        let center = canvas.world().body(id).unwrap().position;
        canvas.pointer_pressed(center);

        canvas.resize(1024.0, 768.0);

        assert_eq!(canvas.dragged(), None);
        assert_eq!(canvas.circles().len(), DEFAULT_LABELS.len());
        for old in &old_ids {
            assert!(canvas.world().body(*old).is_none(), "stale handle survived");
            assert!(!canvas.circles().contains(old));
        }
        let circles = canvas.world().bodies().iter().filter(|b| b.is_circle());
        for body in circles {
            assert!(body.position.x >= 50.0 && body.position.x <= 1024.0 - 50.0);
            assert!(body.position.y >= 50.0 && body.position.y <= 768.0 - 50.0);
        }
    }

    #[test]
    fn first_draw_assigns_distinct_labels_in_creation_order() {
        let mut canvas = PhysicsCanvas::new(800.0, 600.0)
            .with_seed(1)
            .with_label_wrap(LabelWrap::Full);
        canvas.mount().unwrap();

        let mut frame = FrameRecorder::new();
        canvas.draw(&mut frame);

        let texts = frame.texts();
        assert_eq!(texts.len(), DEFAULT_LABELS.len());
        for (drawn, expected) in texts.iter().zip(DEFAULT_LABELS.iter()) {
            assert_eq!(drawn, expected);
        }
        assert_eq!(frame.circles().len(), DEFAULT_LABELS.len());
        assert!(matches!(frame.commands()[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn skip_last_wrap_reuses_the_first_label() {
        let mut canvas = PhysicsCanvas::new(800.0, 600.0)
            .with_seed(1)
            .with_labels(["a", "b", "c"])
            .with_label_wrap(LabelWrap::SkipLast);
        canvas.mount().unwrap();

        let mut frame = FrameRecorder::new();
        canvas.draw(&mut frame);

        // Index resets at len - 1, so "c" is never drawn.
        assert_eq!(frame.texts(), vec!["a", "b", "a"]);
    }

    #[test]
    fn dragged_circle_gets_the_highlight_fill() {
        let mut canvas = mounted_canvas();
        let id = canvas.circles()[0];
        let center = canvas.world().body(id).unwrap().position;
        canvas.pointer_pressed(center);

        let mut frame = FrameRecorder::new();
        canvas.draw(&mut frame);

        let highlighted: Vec<_> = frame
            .circles()
            .into_iter()
            .filter(|(_, _, color)| *color == HIGHLIGHT)
            .collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].1, INITIAL_RADIUS * 2.0);
    }
}
