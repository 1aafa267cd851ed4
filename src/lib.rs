//! Grid ray-casting scene builder.
//!
//! A first-person view over a 2D tile grid: a DDA ray caster walks grid
//! lines to the first solid tile, a single-pass resolver keeps the player's
//! circle out of walls, and a painter's-algorithm compositor interleaves
//! wall strips with floating billboard markers into a depth-correct draw
//! order — all as plain data, consumed by any [`renderer::Renderer`].

pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
