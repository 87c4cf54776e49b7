//! Work-history timeline: record model, track layout, selection and the
//! views that turn a layout into render commands.

pub mod describe;
pub mod layout;
pub mod loader;
pub mod model;
pub mod selection;
pub mod stats;
pub mod svg;
pub mod views;
