//! API route modules.

pub mod instructors;
pub mod meetings;
pub mod recordings;
