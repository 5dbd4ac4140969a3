#![allow(clippy::suboptimal_flops)]
//! Core types and traits for the Canopy treemap renderer.
//!
//! This crate provides foundational types used throughout Canopy:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Insets`]
//! - Color representation: [`Color`] and the ordinal [`ColorScale`]
//! - Drawing: [`DrawCommand`], the [`Canvas`] trait and [`RecordingCanvas`]
//! - Interaction: [`PointerEvent`] and time-based [`Fade`] transitions

mod animation;
mod canvas;
mod color;
mod draw;
mod event;
mod geometry;
mod scale;

pub use animation::{Easing, Fade};
pub use canvas::{replay, Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use draw::{Attributes, DrawCommand, TextStyle, Transform2D};
pub use event::PointerEvent;
pub use geometry::{Insets, Point, Rect, Size};
pub use scale::{ColorScale, CATEGORY10};
