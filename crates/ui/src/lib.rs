#![forbid(unsafe_code)]

//! Server-rendered pages of the learner dashboard and the admin console.

mod render;
pub mod vm;
pub mod views;

pub use render::{STYLESHEET, render_page};
