#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![allow(clippy::single_match)]

//! lettermark provides building blocks for synthesizing avatar placeholder drawables:
//! a colored shape (rectangle, oval, rounded rectangle) with a short text string or a
//! small bitmap image centered on it, optionally with a border whose color is derived
//! as a darker shade of the fill color.
//!
//! Drawing happens through [piet::RenderContext], so any piet backend supplies the
//! actual rasterization.

// Modules
/// the drawable configuration builder
pub mod builder;
/// colors
pub mod color;
/// drawable content variants
pub mod content;
/// the drawable compositor
pub mod drawable;
/// error taxonomy
pub mod error;
/// module for extension traits for foreign types
pub mod ext;
/// bitmap images and their materialization
pub mod render;
/// utilities for serializing / deserializing
pub mod serialize;
/// module for shapes
pub mod shape;
/// typeface selection and resolution
pub mod typeface;

// Re-exports
pub use builder::DrawableBuilder;
pub use color::Color;
pub use content::Content;
pub use drawable::Drawable;
pub use drawable::Opacity;
pub use drawable::TextDrawable;
pub use error::Error;
pub use render::Image;
pub use render::ImageSource;
pub use shape::Shape;
pub use typeface::FontSpec;
pub use typeface::FontStyle;

// Renames
extern crate nalgebra as na;
extern crate parry2d_f64 as p2d;
