#![forbid(unsafe_code)]

mod autopilot;
mod rendering;

pub use autopilot::chase_nearest_item;
pub use rendering::{init_tracing, render_placement_to_png, Canvas, RenderConfig};
