use crate::error::Result;
use crate::models::{Nutrient, NutrientStatus, NutrientVerdict, SoilReport, SoilSample};
use std::collections::BTreeMap;

/// Classify a single reading against the nutrient's reference band.
///
/// Both bounds count as optimal: only values strictly below `low` are LOW
/// and only values strictly above `high` are HIGH.
pub fn classify(nutrient: Nutrient, value: f64) -> NutrientVerdict {
    let reference = nutrient.reference();
    let range = reference.range;

    let status = if value < range.low {
        NutrientStatus::Low
    } else if value > range.high {
        NutrientStatus::High
    } else {
        NutrientStatus::Optimal
    };

    NutrientVerdict {
        status,
        value,
        suggestion: reference.advisory.text(status),
    }
}

/// Evaluate every tracked nutrient in a soil sample.
///
/// All six readings are parsed before anything is classified, so a sample
/// with one bad field yields an error and never a partial report.
pub fn analyze_soil(sample: &SoilSample) -> Result<SoilReport> {
    let readings = Nutrient::ALL
        .iter()
        .map(|&nutrient| Ok((nutrient, sample.reading(nutrient)?)))
        .collect::<Result<Vec<(Nutrient, f64)>>>()?;

    let analysis: BTreeMap<Nutrient, NutrientVerdict> = readings
        .into_iter()
        .map(|(nutrient, value)| (nutrient, classify(nutrient, value)))
        .collect();

    tracing::debug!(
        crop = sample.crop.as_deref().unwrap_or_default(),
        flagged = analysis
            .values()
            .filter(|v| v.status != NutrientStatus::Optimal)
            .count(),
        "Soil sample analyzed"
    );

    Ok(SoilReport {
        crop: sample.crop.clone(),
        soil_type: sample.soil_type.clone(),
        analysis,
    })
}
