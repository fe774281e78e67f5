//! Recommendation Rules
//!
//! A fixed battery of threshold rules over the normalized vector, evaluated
//! in a fixed order so the output list is stable for identical inputs. The
//! smoking pair is the one coupled rule: a long smoking history outranks and
//! replaces the plain cessation nudge. When nothing fires the list still
//! carries the all-clear message.

use crate::logic::features::schema::FeatureSchema;
use crate::logic::features::vector::FeatureVector;

// Rule thresholds, in clinical levels (years/age where named).
const HEMOPTYSIS_LEVEL: i64 = 2;
const DYSPHAGIA_LEVEL: i64 = 5;
const CLUBBING_LEVEL: i64 = 5;
const SMOKING_YEARS: i64 = 10;
const SMOKING_INTENSITY: i64 = 3;
const ALCOHOL_LEVEL: i64 = 5;
const OBESITY_LEVEL: i64 = 6;
const POLLUTION_LEVEL: i64 = 6;
const DUST_LEVEL: i64 = 5;
const SCREENING_AGE: i64 = 50;
const SCREENING_YEARS: i64 = 20;

pub const NO_RISK_FACTORS: &str = "✅ EXCELLENT: No specific risk factors identified.";

/// Evaluate every rule against one vector. Never returns an empty list.
pub fn recommendations(schema: &FeatureSchema, vector: &FeatureVector) -> Vec<String> {
    let level = |name: &str| vector.value(schema, name).unwrap_or(1);
    let mut recs = Vec::new();

    if level("Coughing of Blood") > HEMOPTYSIS_LEVEL {
        recs.push("🚨 URGENT: Hemoptysis (Coughing Blood) detected. See a doctor immediately.".to_string());
    }
    if level("Swallowing Difficulty") > DYSPHAGIA_LEVEL {
        recs.push("💊 CHECKUP: Dysphagia (Swallowing difficulty) can indicate esophageal issues.".to_string());
    }
    if level("Clubbing of Finger Nails") > CLUBBING_LEVEL {
        recs.push("💅 OXYGEN: Nail Clubbing is a sign of chronic low oxygen.".to_string());
    }

    let years_smoked = vector.value(schema, "Years of Smoking").unwrap_or(0);
    if years_smoked > SMOKING_YEARS {
        recs.push(format!(
            "🚬 HISTORY: {years_smoked} years of smoking significantly increases risk. Annual CT screening recommended."
        ));
    } else if level("Smoking") > SMOKING_INTENSITY {
        recs.push("🚬 ACTION: Stop Smoking. Join a cessation program.".to_string());
    }

    if level("Alcohol use") > ALCOHOL_LEVEL {
        recs.push("🍷 LIVER: Limit alcohol to 1-2 drinks/week.".to_string());
    }
    if level("Obesity") > OBESITY_LEVEL {
        recs.push("⚖️ WEIGHT: Reducing BMI by 5% can lower inflammation.".to_string());
    }
    if level("Air Pollution") > POLLUTION_LEVEL {
        recs.push("😷 PROTECTION: Wear N95 masks during commute.".to_string());
    }
    if level("Dust Allergy") > DUST_LEVEL {
        recs.push("🧹 HOME: Use HEPA Air Purifiers in your bedroom.".to_string());
    }

    let age = vector.value(schema, "Age").unwrap_or(30);
    if age > SCREENING_AGE && years_smoked > SCREENING_YEARS {
        recs.push("📅 SCREENING: Age 50+ with 20+ pack-years qualifies for immediate screening.".to_string());
    }

    if recs.is_empty() {
        recs.push(NO_RISK_FACTORS.to_string());
    }
    recs
}
