//! Full-page views composed from grid helpers and form controls.

pub mod manage;
pub mod setup;

pub use manage::ManageView;
pub use setup::{SetupForm, SetupView};
