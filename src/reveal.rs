//! Staggered text reveal.
//!
//! [`TextReveal`] models the slide-up effect: a block of text is split into
//! units (words, characters, or lines) and each unit fades in while rising,
//! with start times staggered across units on a sine-eased distribution.
//!
//! The struct is pure timing logic. The host observes viewport visibility
//! and calls [`TextReveal::set_in_view`]; the first sighting arms the
//! animation and later ones are ignored (`once` semantics). Sampling returns
//! per-unit opacity and vertical offset for the frontend to apply.
//!
//! # Example
//!
//! ```ignore
//! use bobble::reveal::{Granularity, TextReveal};
//!
//! let mut reveal = TextReveal::new("hello staggered world", Granularity::Word)
//!     .with_stagger(0.1);
//!
//! reveal.set_in_view(true, 0.0);
//! let poses = reveal.sample(0.25);
//! assert_eq!(poses.len(), 3);
//! ```

/// Default stagger interval (seconds) between consecutive units.
pub const DEFAULT_STAGGER: f32 = 0.1;

/// Tween duration for each unit.
pub const REVEAL_DURATION: f32 = 0.3;

/// Vertical offset a unit rises from.
pub const RISE_OFFSET: f32 = 20.0;

/// How the text is split into animated units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Whitespace-separated words.
    Word,
    /// Individual non-whitespace characters.
    Char,
    /// Newline-separated lines.
    Line,
}

/// Per-unit animation state at a sampled instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPose {
    /// 0.0 (hidden) to 1.0 (fully revealed).
    pub opacity: f32,
    /// Vertical offset; [`RISE_OFFSET`] at rest, 0.0 when revealed.
    pub offset_y: f32,
}

impl UnitPose {
    const HIDDEN: UnitPose = UnitPose {
        opacity: 0.0,
        offset_y: RISE_OFFSET,
    };

    const REVEALED: UnitPose = UnitPose {
        opacity: 1.0,
        offset_y: 0.0,
    };
}

/// Cubic ease-out over normalized progress.
#[inline]
fn ease_out(p: f32) -> f32 {
    let inv = 1.0 - p.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// One-shot staggered reveal over text units.
#[derive(Debug, Clone)]
pub struct TextReveal {
    units: Vec<String>,
    stagger: f32,
    started_at: Option<f32>,
}

impl TextReveal {
    /// Split `text` at the requested granularity.
    pub fn new(text: &str, granularity: Granularity) -> Self {
        let units = match granularity {
            Granularity::Word => text.split_whitespace().map(str::to_string).collect(),
            Granularity::Char => text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(String::from)
                .collect(),
            Granularity::Line => text.lines().map(str::to_string).collect(),
        };
        Self {
            units,
            stagger: DEFAULT_STAGGER,
            started_at: None,
        }
    }

    /// Override the stagger interval between consecutive units.
    pub fn with_stagger(mut self, stagger: f32) -> Self {
        self.stagger = stagger.max(0.0);
        self
    }

    /// The split units, in text order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Report viewport visibility at time `now`.
    ///
    /// The first `true` starts the animation; everything after that is
    /// ignored, so scrolling the text out and back in never replays it.
    pub fn set_in_view(&mut self, in_view: bool, now: f32) {
        if in_view && self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    /// Whether the animation has been triggered.
    #[inline]
    pub fn triggered(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start delay of unit `i`, relative to the trigger time.
    ///
    /// Delays follow a sine-eased distribution over the unit index: with
    /// normalized index `p` in 0..=1 the delay is `stagger * (n-1) * sin(p)`.
    /// `sin` is monotonic on that range, so delays never decrease with `i`.
    pub fn delay(&self, index: usize) -> f32 {
        let n = self.units.len();
        if n < 2 {
            return 0.0;
        }
        let span = self.stagger * (n - 1) as f32;
        let p = index as f32 / (n - 1) as f32;
        span * p.sin()
    }

    /// Sample every unit's pose at time `now`.
    ///
    /// Before the trigger all units are hidden; afterwards each unit tweens
    /// from hidden to revealed over [`REVEAL_DURATION`] with ease-out,
    /// starting at its own delay.
    pub fn sample(&self, now: f32) -> Vec<UnitPose> {
        let Some(start) = self.started_at else {
            return vec![UnitPose::HIDDEN; self.units.len()];
        };
        let elapsed = now - start;
        (0..self.units.len())
            .map(|i| {
                let local = elapsed - self.delay(i);
                if local <= 0.0 {
                    UnitPose::HIDDEN
                } else if local >= REVEAL_DURATION {
                    UnitPose::REVEALED
                } else {
                    let eased = ease_out(local / REVEAL_DURATION);
                    UnitPose {
                        opacity: eased,
                        offset_y: RISE_OFFSET * (1.0 - eased),
                    }
                }
            })
            .collect()
    }

    /// Whether every unit has finished its tween at time `now`.
    pub fn is_complete(&self, now: f32) -> bool {
        match self.started_at {
            None => false,
            Some(start) => {
                let last = self.units.len().saturating_sub(1);
                now - start >= self.delay(last) + REVEAL_DURATION
            }
        }
    }
}
