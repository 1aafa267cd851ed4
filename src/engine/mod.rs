mod compose;
mod raycast;

pub use compose::{DrawInstruction, order};
pub use raycast::{FanConfig, FanError, Ray, cast, cast_fan};
