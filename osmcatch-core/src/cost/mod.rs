//! Pedestrian cost model: walking speeds and per-edge walk times

mod profile;
mod speed;

pub use profile::{SpeedProfile, assign_costs};
pub use speed::{SpeedUnit, gradient_adjusted_walk_speed, walk_speed_on_grade};
