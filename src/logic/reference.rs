use crate::models::{Nutrient, NutrientStatus};

/// Inclusive band considered optimal for a nutrient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

/// Advice returned for each classification of a nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advisory {
    pub low: &'static str,
    pub high: &'static str,
    pub optimal: &'static str,
}

impl Advisory {
    pub fn text(&self, status: NutrientStatus) -> &'static str {
        match status {
            NutrientStatus::Low => self.low,
            NutrientStatus::High => self.high,
            NutrientStatus::Optimal => self.optimal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientReference {
    pub range: ReferenceRange,
    pub advisory: Advisory,
}

static NITROGEN: NutrientReference = NutrientReference {
    range: ReferenceRange {
        low: 80.0,
        high: 120.0,
    },
    advisory: Advisory {
        low: "Add compost or urea fertilizer.",
        high: "Avoid nitrogen fertilizers for 2–3 weeks.",
        optimal: "Nitrogen level is perfect.",
    },
};

static PHOSPHORUS: NutrientReference = NutrientReference {
    range: ReferenceRange {
        low: 20.0,
        high: 40.0,
    },
    advisory: Advisory {
        low: "Add phosphate fertilizer.",
        high: "Avoid phosphorus fertilizers.",
        optimal: "Phosphorus level is perfect.",
    },
};

static POTASSIUM: NutrientReference = NutrientReference {
    range: ReferenceRange {
        low: 100.0,
        high: 150.0,
    },
    advisory: Advisory {
        low: "Add potash or banana compost.",
        high: "Avoid potash fertilizers.",
        optimal: "Potassium level is perfect.",
    },
};

static SULFUR: NutrientReference = NutrientReference {
    range: ReferenceRange {
        low: 10.0,
        high: 20.0,
    },
    advisory: Advisory {
        low: "Add gypsum or sulfur fertilizer.",
        high: "Reduce sulfur-based fertilizers.",
        optimal: "Sulfur level is perfect.",
    },
};

static ORGANIC_MATTER: NutrientReference = NutrientReference {
    range: ReferenceRange {
        low: 1.5,
        high: 3.0,
    },
    advisory: Advisory {
        low: "Add cow dung, compost, or vermicompost.",
        high: "Organic matter is excellent.",
        optimal: "Organic matter level is good.",
    },
};

static PH: NutrientReference = NutrientReference {
    range: ReferenceRange { low: 6.0, high: 7.5 },
    advisory: Advisory {
        low: "Add lime to reduce acidity.",
        high: "Add sulfur to reduce alkalinity.",
        optimal: "pH is optimal.",
    },
};

impl Nutrient {
    pub fn reference(&self) -> &'static NutrientReference {
        match self {
            Nutrient::Nitrogen => &NITROGEN,
            Nutrient::Phosphorus => &PHOSPHORUS,
            Nutrient::Potassium => &POTASSIUM,
            Nutrient::Sulfur => &SULFUR,
            Nutrient::OrganicMatter => &ORGANIC_MATTER,
            Nutrient::Ph => &PH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_ranges_match_agronomic_table() {
        let expected = [
            (Nutrient::Nitrogen, 80.0, 120.0),
            (Nutrient::Phosphorus, 20.0, 40.0),
            (Nutrient::Potassium, 100.0, 150.0),
            (Nutrient::Sulfur, 10.0, 20.0),
            (Nutrient::OrganicMatter, 1.5, 3.0),
            (Nutrient::Ph, 6.0, 7.5),
        ];

        for (nutrient, low, high) in expected {
            let range = nutrient.reference().range;
            assert_eq!(range.low, low, "low bound for {}", nutrient);
            assert_eq!(range.high, high, "high bound for {}", nutrient);
        }
    }

    #[test]
    fn ranges_are_well_formed() {
        for nutrient in Nutrient::ALL {
            let range = nutrient.reference().range;
            assert!(range.low < range.high, "{} range inverted", nutrient);
        }
    }

    #[test]
    fn advisory_text_selected_by_status() {
        let advisory = Nutrient::Ph.reference().advisory;
        assert_eq!(
            advisory.text(NutrientStatus::Low),
            "Add lime to reduce acidity."
        );
        assert_eq!(
            advisory.text(NutrientStatus::High),
            "Add sulfur to reduce alkalinity."
        );
        assert_eq!(advisory.text(NutrientStatus::Optimal), "pH is optimal.");
    }

    #[test]
    fn every_nutrient_has_distinct_advice() {
        for nutrient in Nutrient::ALL {
            let advisory = nutrient.reference().advisory;
            assert_ne!(advisory.low, advisory.high, "{}", nutrient);
            assert_ne!(advisory.low, advisory.optimal, "{}", nutrient);
            assert_ne!(advisory.high, advisory.optimal, "{}", nutrient);
        }
    }
}
