//! # bobble - interactive physics canvas
//!
//! A decorative canvas of draggable, labeled circle bodies under simple
//! 2D physics (gravity-free, bounded, speed-capped), plus a staggered
//! text-reveal helper.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bobble::prelude::*;
//!
//! fn main() -> Result<(), CanvasError> {
//!     let canvas = PhysicsCanvas::new(1280.0, 720.0)
//!         .with_labels(["Rust", "Physics", "Canvas"])
//!         .with_label_wrap(LabelWrap::Full);
//!     CanvasApp::new(canvas).run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The canvas
//!
//! [`canvas::PhysicsCanvas`] owns a world of bodies: four static boundary
//! walls framing the viewport and one dynamic circle per label. Each tick it
//! clamps every circle into the viewport and under the speed cap, then steps
//! the world. Pointer events drive a spring-based drag: pressing a circle
//! grabs and doubles it, releasing shrinks it back.
//!
//! ### Capability seams
//!
//! The component talks to its collaborators through two traits so either
//! side can be swapped out:
//!
//! - [`world::PhysicsWorld`] - create/query bodies, step, pointer spring.
//!   [`world::World`] is the built-in implementation.
//! - [`render::FrameRenderer`] - clear, circles, text, resize.
//!   [`render::FrameRecorder`] records commands for tests and headless use;
//!   the `window` feature paints through egui onto a wgpu surface.
//!
//! ### Text reveal
//!
//! [`reveal::TextReveal`] splits text into words, characters, or lines and
//! tweens each unit in (fade + rise) with sine-eased staggered delays. It
//! triggers once, the first time the host reports the text visible.
//!
//! ## Windowed frontend
//!
//! Enable the `window` feature for a winit/wgpu/egui host:
//!
//! ```ignore
//! bobble::app::CanvasApp::new(PhysicsCanvas::new(1280.0, 720.0)).run()?;
//! ```

pub mod body;
pub mod canvas;
pub mod error;
pub mod render;
pub mod reveal;
pub mod time;
pub mod world;

#[cfg(feature = "window")]
pub mod app;
#[cfg(feature = "window")]
pub mod gpu;

pub use glam::Vec2;

/// Commonly used types, re-exported.
pub mod prelude {
    pub use crate::body::{Body, BodyId, Shape};
    pub use crate::canvas::{LabelWrap, LeaveBehavior, PhysicsCanvas, DEFAULT_LABELS};
    pub use crate::error::CanvasError;
    pub use crate::render::{FrameRecorder, FrameRenderer};
    pub use crate::reveal::{Granularity, TextReveal};
    pub use crate::time::{StepClock, Time};
    pub use crate::world::{PhysicsWorld, World};
    pub use glam::Vec2;

    #[cfg(feature = "window")]
    pub use crate::app::CanvasApp;
}
