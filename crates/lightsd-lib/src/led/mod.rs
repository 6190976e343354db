//! LED control: color reduction, attribute nodes, driver programming.

mod color;
pub mod driver;
pub mod node;

pub use color::{format_color, is_lit, parse_color, rgba_to_brightness};
pub use driver::{Applied, BlinkPolicy, BlinkResult, Delay, ThreadDelay, apply_state};
pub use node::{Attribute, LedNode, NodeError, SysfsNode};
