//! Attribution Ranking
//!
//! Runs the explainer once per request, slices out the predicted class's
//! contribution row and derives the two orderings the dashboard needs: the
//! full list by signed contribution and the top slice by magnitude.
//! Attribution is explanatory garnish, so any failure here degrades to an
//! empty ranking instead of failing the prediction.

use tracing::warn;

use crate::logic::features::schema::FeatureSchema;
use crate::logic::features::vector::FeatureVector;
use crate::logic::model::{Attribution, AttributionError, RiskExplainer};
use crate::logic::round3;

/// How many features the magnitude ordering keeps.
pub const TOP_IMPACT_COUNT: usize = 7;

/// One feature's pull on the predicted class.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImpact {
    pub name: String,
    /// Signed contribution; positive pushed toward the predicted class.
    pub impact: f64,
    /// The normalized input value behind it.
    pub value: i64,
}

/// Ranked attribution for one prediction.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Every feature, by signed contribution descending. Ties keep schema
    /// order.
    pub by_contribution: Vec<FeatureImpact>,
    /// Top features by absolute contribution, at most [`TOP_IMPACT_COUNT`].
    pub top_by_magnitude: Vec<FeatureImpact>,
    /// Class baseline, rounded to three decimals.
    pub baseline: f64,
}

/// Rank per-feature attribution for the predicted class. Never fails: an
/// explainer error or a class row the output does not cover yields the empty
/// ranking.
pub fn rank(
    explainer: &dyn RiskExplainer,
    schema: &FeatureSchema,
    vector: &FeatureVector,
    class_index: usize,
) -> Ranking {
    match try_rank(explainer, schema, vector, class_index) {
        Ok(ranking) => ranking,
        Err(e) => {
            warn!(class_index, error = %e, "attribution degraded to empty ranking");
            Ranking::default()
        }
    }
}

fn try_rank(
    explainer: &dyn RiskExplainer,
    schema: &FeatureSchema,
    vector: &FeatureVector,
    class_index: usize,
) -> Result<Ranking, AttributionError> {
    let attribution: Attribution = explainer.explain(vector)?;
    let row = attribution.class_row(class_index).ok_or_else(|| {
        AttributionError::Failed(format!(
            "no attribution row for class {class_index} ({} rows)",
            attribution.class_count()
        ))
    })?;

    let mut impacts = Vec::with_capacity(schema.len());
    for (i, name) in schema.names().iter().enumerate() {
        impacts.push(FeatureImpact {
            name: name.clone(),
            impact: row.get(i).copied().unwrap_or(0.0),
            value: vector.get(i).unwrap_or(0),
        });
    }

    // Stable sorts; equal impacts keep their schema positions.
    let mut by_contribution = impacts.clone();
    by_contribution.sort_by(|a, b| b.impact.total_cmp(&a.impact));

    let mut top_by_magnitude = impacts;
    top_by_magnitude.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
    top_by_magnitude.truncate(TOP_IMPACT_COUNT);

    let baseline = round3(attribution.expected_value(class_index).unwrap_or(0.0));

    Ok(Ranking { by_contribution, top_by_magnitude, baseline })
}
