#![forbid(unsafe_code)]

//! Core: geometry and host input samples.
//!
//! # Role in paneltree
//! `paneltree-core` is the bottom of the stack. It owns the coordinate types
//! every other crate speaks in and the normalized input samples hosts push
//! into the engine. It knows nothing about layout trees or gestures.

pub mod geometry;
pub mod input;

pub use geometry::{Point, Rect};
pub use input::{InputModality, PointerSample, TouchSample};
