//! Feature pipeline: schema, normalization and the vector type.

pub mod normalize;
pub mod schema;
pub mod vector;
