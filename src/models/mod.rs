pub mod nutrient;
pub mod soil;

pub use nutrient::*;
pub use soil::*;
