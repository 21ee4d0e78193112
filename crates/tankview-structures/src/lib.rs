//! Scene objects for tankview.
//!
//! - [`Tank`]: the translucent container volume with its wireframe outline
//! - [`Particle`]: a single translucent sphere
//!
//! Both implement [`tankview_core::Drawable`] and own their nodes.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::new_without_default)]

pub mod particle;
pub mod tank;

pub use particle::Particle;
pub use tank::Tank;
