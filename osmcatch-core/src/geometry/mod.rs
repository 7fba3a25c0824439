//! Geometry helpers: local metric projection and band polygons

mod geometrize;
mod projection;

pub use geometrize::geometrize;
pub use projection::LocalProjection;
