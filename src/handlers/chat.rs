//! Chat assistant handler
//!
//! Canned FAQ bot: first keyword found as a substring of the lowercased
//! message wins, so table order is the priority order.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Keyword table in priority order.
const REPLIES: &[(&str, &str)] = &[
    ("hello", "Hello! I'm the LungVision assistant. Ask me about your report, bookings or fees."),
    ("book", "To book an appointment, open the Doctors tab, pick a specialist and press Book Now."),
    ("fee", "Consultation fees are \u{20b9}500 for every listed specialist."),
    ("pay", "We accept card and UPI payments at the time of booking."),
    ("report", "Your full report, including the diet protocol, can be downloaded from the dashboard."),
    ("accuracy", "The model scored about 92% accuracy on held-out patient data."),
    ("confidence", "The confidence score is the model's probability for the predicted risk tier."),
    ("risk", "Risk tiers are Low, Medium and High, estimated from 24 clinical and lifestyle factors."),
    ("smoke", "Smoking history is one of the strongest predictors. Cessation helps at any stage."),
    ("blood", "Coughing of blood is urgent. Please consult a doctor immediately."),
];

const FALLBACK: &str =
    "I'm not sure about that. Try asking about booking, fees, reports or your risk result.";

#[derive(Deserialize, Default)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    response: &'static str,
}

pub async fn reply(body: Option<Json<ChatRequest>>) -> Json<ChatResponse> {
    let message = body.map(|Json(req)| req.message).unwrap_or_default();
    Json(ChatResponse { response: reply_to(&message) })
}

fn reply_to(message: &str) -> &'static str {
    let message = message.to_lowercase();
    REPLIES
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(FALLBACK)
}
