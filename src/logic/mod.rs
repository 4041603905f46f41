pub mod reference;
pub mod soil_analysis;

pub use soil_analysis::analyze_soil;
