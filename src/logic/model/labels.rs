//! Risk Tiers
//!
//! The classifier is fitted on three severity tiers. The fitted class order
//! in the artifact decides code-to-label decoding; the ordinal here is the
//! presentation order and the documented fallback when a class code cannot
//! be used directly.

use serde::{Deserialize, Serialize};

/// Categorical risk tier produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// All tiers in ordinal (presentation) order.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Decode a fitted class label. Exact match; the artifact is expected to
    /// carry these three labels verbatim.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(RiskLevel::Low),
            "Medium" => Some(RiskLevel::Medium),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }

    /// Ordinal position, Low first. Used as the attribution row fallback
    /// when a classifier's raw class code is unusable as an index.
    pub fn ordinal(&self) -> usize {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    /// Specialist fields a patient at this tier is steered to.
    pub fn specialist_targets(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::High => &["Oncologist", "Thoracic Surgeon"],
            RiskLevel::Medium => &["Pulmonologist", "Internal Medicine"],
            RiskLevel::Low => &["General Physician", "Internal Medicine"],
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exact_labels_only() {
        assert_eq!(RiskLevel::from_label("High"), Some(RiskLevel::High));
        assert_eq!(RiskLevel::from_label("high"), None);
        assert_eq!(RiskLevel::from_label("Severe"), None);
    }

    #[test]
    fn ordinal_matches_presentation_order() {
        for (i, level) in RiskLevel::ALL.iter().enumerate() {
            assert_eq!(level.ordinal(), i);
        }
    }

    #[test]
    fn serializes_as_bare_label() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }

    #[test]
    fn every_tier_has_specialists() {
        for level in RiskLevel::ALL {
            assert!(!level.specialist_targets().is_empty());
        }
    }
}
