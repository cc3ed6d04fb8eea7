//! Domain model: payload shapes, typed version records, level taxonomy and
//! the composed output record.

pub mod address;
pub mod levels;
pub mod node;
pub mod payload;
