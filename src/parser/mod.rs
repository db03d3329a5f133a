//! Scanning of rendered wiki HTML: marker-bounded regions and the extractors built on them.

pub mod extract;
pub mod region;
