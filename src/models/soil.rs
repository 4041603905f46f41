use super::nutrient::Nutrient;
use crate::error::{FarmError, Result};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A nutrient reading as submitted by a client. Lab sheets and HTML forms
/// send numbers as text, so both shapes are accepted and parsed later.
/// Any other JSON value is kept as `Invalid` and rejected when read.
#[derive(Debug, Clone, PartialEq)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
    Invalid(String),
}

impl NutrientValue {
    /// Finite numeric value, or None if the reading is not a usable number
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NutrientValue::Number(n) => *n,
            NutrientValue::Text(s) => s.trim().parse::<f64>().ok()?,
            NutrientValue::Invalid(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for NutrientValue {
    fn from(value: f64) -> Self {
        NutrientValue::Number(value)
    }
}

impl From<&str> for NutrientValue {
    fn from(value: &str) -> Self {
        NutrientValue::Text(value.to_string())
    }
}

impl std::fmt::Display for NutrientValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutrientValue::Number(n) => write!(f, "{}", n),
            NutrientValue::Text(s) => write!(f, "{:?}", s),
            NutrientValue::Invalid(found) => write!(f, "{}", found),
        }
    }
}

impl<'de> Deserialize<'de> for NutrientValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NutrientValueVisitor;

        impl<'de> Visitor<'de> for NutrientValueVisitor {
            type Value = NutrientValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                Ok(NutrientValue::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                Ok(NutrientValue::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                Ok(NutrientValue::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                Ok(NutrientValue::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
                Ok(NutrientValue::Text(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Self::Value, E> {
                Ok(NutrientValue::Invalid(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
                Ok(NutrientValue::Invalid("null".to_string()))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(NutrientValue::Invalid("an array".to_string()))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                while map
                    .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                    .is_some()
                {}
                Ok(NutrientValue::Invalid("an object".to_string()))
            }
        }

        deserializer.deserialize_any(NutrientValueVisitor)
    }
}

/// Soil test submitted for analysis
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoilSample {
    #[serde(default)]
    pub crop: Option<String>,
    #[serde(default)]
    pub soil_type: Option<String>,
    #[serde(default)]
    pub nitrogen: Option<NutrientValue>,
    #[serde(default)]
    pub phosphorus: Option<NutrientValue>,
    #[serde(default)]
    pub potassium: Option<NutrientValue>,
    #[serde(default)]
    pub sulfur: Option<NutrientValue>,
    #[serde(default)]
    pub organic_matter: Option<NutrientValue>,
    #[serde(default)]
    pub ph: Option<NutrientValue>,
}

impl SoilSample {
    pub fn new(crop: impl Into<String>, soil_type: impl Into<String>) -> Self {
        Self {
            crop: Some(crop.into()),
            soil_type: Some(soil_type.into()),
            ..Default::default()
        }
    }

    pub fn with(mut self, nutrient: Nutrient, value: impl Into<NutrientValue>) -> Self {
        *self.field_mut(nutrient) = Some(value.into());
        self
    }

    pub fn field(&self, nutrient: Nutrient) -> Option<&NutrientValue> {
        match nutrient {
            Nutrient::Nitrogen => self.nitrogen.as_ref(),
            Nutrient::Phosphorus => self.phosphorus.as_ref(),
            Nutrient::Potassium => self.potassium.as_ref(),
            Nutrient::Sulfur => self.sulfur.as_ref(),
            Nutrient::OrganicMatter => self.organic_matter.as_ref(),
            Nutrient::Ph => self.ph.as_ref(),
        }
    }

    fn field_mut(&mut self, nutrient: Nutrient) -> &mut Option<NutrientValue> {
        match nutrient {
            Nutrient::Nitrogen => &mut self.nitrogen,
            Nutrient::Phosphorus => &mut self.phosphorus,
            Nutrient::Potassium => &mut self.potassium,
            Nutrient::Sulfur => &mut self.sulfur,
            Nutrient::OrganicMatter => &mut self.organic_matter,
            Nutrient::Ph => &mut self.ph,
        }
    }

    /// Numeric reading for a nutrient. Missing and unparseable values are
    /// rejected rather than classified.
    pub fn reading(&self, nutrient: Nutrient) -> Result<f64> {
        let raw = self.field(nutrient).ok_or_else(|| {
            FarmError::MalformedInput(format!("missing nutrient field '{}'", nutrient.key()))
        })?;

        raw.as_f64().ok_or_else(|| {
            FarmError::MalformedInput(format!(
                "nutrient field '{}' is not a finite number: {}",
                nutrient.key(),
                raw
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NutrientStatus {
    Low,
    High,
    Optimal,
}

impl NutrientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientStatus::Low => "LOW",
            NutrientStatus::High => "HIGH",
            NutrientStatus::Optimal => "OPTIMAL",
        }
    }
}

impl std::fmt::Display for NutrientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientVerdict {
    pub status: NutrientStatus,
    #[serde(serialize_with = "serialize_reading")]
    pub value: f64,
    pub suggestion: &'static str,
}

/// Whole-number readings go out as JSON integers (`8`, not `8.0`) so existing
/// clients see the same payload they always have.
fn serialize_reading<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53

    if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    pub analysis: BTreeMap<Nutrient, NutrientVerdict>,
}

impl SoilReport {
    pub fn verdict(&self, nutrient: Nutrient) -> Option<&NutrientVerdict> {
        self.analysis.get(&nutrient)
    }

    pub fn all_optimal(&self) -> bool {
        self.analysis
            .values()
            .all(|v| v.status == NutrientStatus::Optimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrient_value_parses_numbers_and_text() {
        assert_eq!(NutrientValue::Number(42.0).as_f64(), Some(42.0));
        assert_eq!(NutrientValue::from("6.8").as_f64(), Some(6.8));
        assert_eq!(NutrientValue::from("  120 ").as_f64(), Some(120.0));
        assert_eq!(NutrientValue::from("-3").as_f64(), Some(-3.0));
    }

    #[test]
    fn nutrient_value_rejects_non_numbers() {
        assert_eq!(NutrientValue::from("").as_f64(), None);
        assert_eq!(NutrientValue::from("   ").as_f64(), None);
        assert_eq!(NutrientValue::from("high").as_f64(), None);
        assert_eq!(NutrientValue::from("NaN").as_f64(), None);
        assert_eq!(NutrientValue::from("inf").as_f64(), None);
        assert_eq!(NutrientValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn sample_deserializes_mixed_field_types() {
        let sample: SoilSample = serde_json::from_value(serde_json::json!({
            "crop": "Rice",
            "soil_type": "Clay",
            "nitrogen": 100,
            "phosphorus": "30",
            "potassium": 125.5,
            "sulfur": "15",
            "organic_matter": "2.0",
            "ph": 6.8,
            "notes": "ignored"
        }))
        .unwrap();

        assert_eq!(sample.crop.as_deref(), Some("Rice"));
        assert_eq!(sample.reading(Nutrient::Nitrogen).unwrap(), 100.0);
        assert_eq!(sample.reading(Nutrient::Phosphorus).unwrap(), 30.0);
        assert_eq!(sample.reading(Nutrient::Potassium).unwrap(), 125.5);
        assert_eq!(sample.reading(Nutrient::OrganicMatter).unwrap(), 2.0);
    }

    #[test]
    fn sample_null_field_is_missing() {
        let sample: SoilSample =
            serde_json::from_value(serde_json::json!({ "nitrogen": null })).unwrap();
        assert!(sample.field(Nutrient::Nitrogen).is_none());
    }

    #[test]
    fn non_numeric_json_values_fail_on_read() {
        let sample: SoilSample = serde_json::from_value(serde_json::json!({
            "nitrogen": true,
            "ph": [6.5],
            "sulfur": { "value": 15 }
        }))
        .unwrap();

        for (nutrient, found) in [
            (Nutrient::Nitrogen, "true"),
            (Nutrient::Ph, "an array"),
            (Nutrient::Sulfur, "an object"),
        ] {
            let err = sample.reading(nutrient).unwrap_err();
            assert!(matches!(err, FarmError::MalformedInput(_)));
            assert!(err.to_string().contains(&format!("'{}'", nutrient.key())));
            assert!(err.to_string().contains(found));
        }
    }

    #[test]
    fn reading_reports_missing_field() {
        let sample = SoilSample::new("Wheat", "Loam");
        let err = sample.reading(Nutrient::Sulfur).unwrap_err();
        assert!(matches!(err, FarmError::MalformedInput(_)));
        assert!(err.to_string().contains("'sulfur'"));
    }

    #[test]
    fn reading_reports_unparseable_field() {
        let sample = SoilSample::new("Wheat", "Loam").with(Nutrient::Ph, "acidic");
        let err = sample.reading(Nutrient::Ph).unwrap_err();
        assert!(err.to_string().contains("'ph'"));
        assert!(err.to_string().contains("\"acidic\""));
    }

    #[test]
    fn verdict_value_serializes_whole_numbers_as_integers() {
        let verdict = NutrientVerdict {
            status: NutrientStatus::High,
            value: 8.0,
            suggestion: "Add sulfur to reduce alkalinity.",
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "HIGH",
                "value": 8,
                "suggestion": "Add sulfur to reduce alkalinity."
            })
        );

        let fractional = NutrientVerdict {
            value: 6.8,
            ..verdict
        };
        assert_eq!(serde_json::to_value(&fractional).unwrap()["value"], 6.8);
    }
}
