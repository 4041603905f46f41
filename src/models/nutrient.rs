use serde::{Deserialize, Serialize};

/// Soil properties tracked by the analysis. Declaration order is the order
/// nutrients appear in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
    Sulfur,
    OrganicMatter,
    Ph,
}

impl Nutrient {
    pub const ALL: [Nutrient; 6] = [
        Nutrient::Nitrogen,
        Nutrient::Phosphorus,
        Nutrient::Potassium,
        Nutrient::Sulfur,
        Nutrient::OrganicMatter,
        Nutrient::Ph,
    ];

    /// Wire name, as used for request fields and report keys
    pub fn key(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "nitrogen",
            Nutrient::Phosphorus => "phosphorus",
            Nutrient::Potassium => "potassium",
            Nutrient::Sulfur => "sulfur",
            Nutrient::OrganicMatter => "organic_matter",
            Nutrient::Ph => "ph",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "Nitrogen",
            Nutrient::Phosphorus => "Phosphorus",
            Nutrient::Potassium => "Potassium",
            Nutrient::Sulfur => "Sulfur",
            Nutrient::OrganicMatter => "Organic Matter",
            Nutrient::Ph => "pH",
        }
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
