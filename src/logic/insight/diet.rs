//! Diet Protocols - static guidance cards keyed by risk tier
//!
//! Pure lookup. `content` is dashboard HTML, `plain_text` goes into the PDF
//! report; colors are the card accents the front-end renders with.

use serde::Serialize;

use crate::logic::model::labels::RiskLevel;

#[derive(Debug, Clone, Serialize)]
pub struct DietProtocol {
    pub color: &'static str,
    pub bg: &'static str,
    pub title: &'static str,
    pub content: &'static str,
    pub plain_text: &'static str,
}

static HIGH_RISK: DietProtocol = DietProtocol {
    color: "#dc3545",
    bg: "#fff5f5",
    title: "HIGH RISK PROTOCOL",
    content: "🚫 AVOID: Processed Meats, Sugar.<br>✅ EAT: Berries, Green Tea.<br>🍵 HABITS: Turmeric Milk at night.",
    plain_text: "DIET: Avoid processed meats & sugar. Eat berries & green tea. Drink Turmeric milk.",
};

static MEDIUM_RISK: DietProtocol = DietProtocol {
    color: "#ffc107",
    bg: "#fff9e6",
    title: "MEDIUM RISK PROTOCOL",
    content: "⚠️ LIMIT: Red Meat, Soda.<br>✅ EAT: Carrots, Walnuts.<br>💧 DETOX: Warm lemon water.",
    plain_text: "DIET: Limit red meat & soda. Eat carrots & walnuts. Drink warm lemon water.",
};

static LOW_RISK: DietProtocol = DietProtocol {
    color: "#198754",
    bg: "#e8f5e9",
    title: "LOW RISK PROTOCOL",
    content: "✅ MAINTAIN: 5 Veggies/Day.<br>🍎 SNACKS: Yogurt, Almonds.<br>🏃 GOAL: 3L Water Daily.",
    plain_text: "DIET: Maintain 5 veggies/day. Snack on yogurt & almonds. Drink 3L water.",
};

/// Protocol card for a risk tier.
pub fn protocol_for(level: RiskLevel) -> &'static DietProtocol {
    match level {
        RiskLevel::High => &HIGH_RISK,
        RiskLevel::Medium => &MEDIUM_RISK,
        RiskLevel::Low => &LOW_RISK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_tier_has_its_own_card() {
        assert_eq!(protocol_for(RiskLevel::High).title, "HIGH RISK PROTOCOL");
        assert_eq!(protocol_for(RiskLevel::Medium).title, "MEDIUM RISK PROTOCOL");
        assert_eq!(protocol_for(RiskLevel::Low).title, "LOW RISK PROTOCOL");
        assert_eq!(protocol_for(RiskLevel::High).color, "#dc3545");
        assert_eq!(protocol_for(RiskLevel::Low).bg, "#e8f5e9");
    }

    #[test]
    fn serializes_with_dashboard_field_names() {
        let json = serde_json::to_value(protocol_for(RiskLevel::Medium)).unwrap();
        for key in ["color", "bg", "title", "content", "plain_text"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["content"].as_str().unwrap().contains("<br>"));
    }
}
