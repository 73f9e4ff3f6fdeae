//! Foundation utilities shared by every layer of the overlay

pub mod logging;
pub mod math;
