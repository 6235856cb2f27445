//! Structured markup construction.
//!
//! # Responsibility
//! - Build HTML fragments from typed parts instead of string concatenation.
//! - Describe client-side action invocations with safely quoted arguments.
//!
//! # Invariants
//! - Text and attribute values are escaped unless wrapped in `Markup::raw`.
//! - JS string arguments are quoted for a single-quoted JS literal.

pub mod action;
pub mod element;
pub mod escape;

pub use action::{ClientAction, JsArg};
pub use element::Element;
pub use escape::{escape_html, escape_js, Markup};
