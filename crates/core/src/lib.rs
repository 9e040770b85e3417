#![forbid(unsafe_code)]

pub mod model;
pub mod question;
pub mod score;
pub mod time;

pub use time::{Clock, fixed_clock, fixed_now};
