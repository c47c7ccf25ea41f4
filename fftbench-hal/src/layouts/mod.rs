mod buffer;
mod plan;
mod shape;

pub use buffer::*;
pub use plan::*;
pub use shape::*;
