//! Audio decoding and silence analysis.

pub mod silence;
pub mod wav;
