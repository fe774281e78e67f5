//! History Records
//!
//! The two audit trails the dashboard reads back: one patient registry row
//! per prediction and one hospital record per paid booking. Field names are
//! the registry's historical column headers, so exports stay compatible with
//! records written before this service.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::logic::features::schema::{FeatureSchema, REGISTRY_FEATURES};
use crate::logic::features::vector::FeatureVector;
use crate::logic::model::labels::RiskLevel;

use super::JsonlStore;

/// Timestamp format shared by both record types.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type RegistryStore = JsonlStore<RegistryRecord>;
pub type BookingStore = JsonlStore<BookingRecord>;

// ============================================================================
// PATIENT REGISTRY
// ============================================================================

/// One prediction, as persisted. The feature block keeps registry column
/// order; smoking years are deliberately not part of the projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Patient Name")]
    pub patient_name: String,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Confidence Score")]
    pub confidence_score: String,
    #[serde(flatten)]
    pub features: Map<String, Value>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "GenderStr")]
    pub gender_str: String,
}

impl RegistryRecord {
    /// Compose a registry row from one classified request.
    pub fn compose(
        patient_name: &str,
        label: RiskLevel,
        confidence: f64,
        schema: &FeatureSchema,
        vector: &FeatureVector,
    ) -> Self {
        let mut features = Map::new();
        for feature in REGISTRY_FEATURES {
            let value = vector
                .value(schema, feature)
                .map(Value::from)
                .unwrap_or(Value::Null);
            features.insert((*feature).to_string(), value);
        }

        let gender_str = match vector.value(schema, "Gender") {
            Some(1) => "Male",
            _ => "Female",
        };

        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            patient_name: patient_name.to_string(),
            diagnosis: label.as_str().to_string(),
            confidence_score: format!("{confidence}%"),
            features,
            name: patient_name.to_string(),
            gender_str: gender_str.to_string(),
        }
    }
}

// ============================================================================
// HOSPITAL RECORDS
// ============================================================================

/// One confirmed booking. Client-supplied fields pass through untyped; a
/// missing field lands as null rather than failing the booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Transaction ID")]
    pub transaction_id: String,
    #[serde(rename = "Payment Status")]
    pub payment_status: String,
    #[serde(rename = "Patient Name")]
    pub patient_name: Value,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: Value,
    #[serde(rename = "Confidence")]
    pub confidence: String,
    #[serde(rename = "Doctor Name")]
    pub doctor_name: Value,
    #[serde(rename = "Specialty")]
    pub specialty: Value,
    #[serde(rename = "Appt Date")]
    pub appt_date: Value,
    #[serde(rename = "Appt Time")]
    pub appt_time: Value,
    #[serde(rename = "Fee Paid")]
    pub fee_paid: Value,
    #[serde(rename = "Payment Method")]
    pub payment_method: Value,
}

impl BookingRecord {
    /// Compose a hospital record from the booking payload and the issued
    /// transaction id.
    pub fn compose(payload: &Map<String, Value>, transaction_id: &str) -> Self {
        let take = |field: &str| payload.get(field).cloned().unwrap_or(Value::Null);
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            transaction_id: transaction_id.to_string(),
            payment_status: "Payment Successful".to_string(),
            patient_name: take("patientName"),
            diagnosis: take("diagnosis"),
            confidence: format!("{}%", plain_text(payload.get("confidence"))),
            doctor_name: take("doctorName"),
            specialty: take("specialty"),
            appt_date: take("date"),
            appt_time: take("time"),
            fee_paid: take("amount"),
            payment_method: take("paymentMethod"),
        }
    }
}

/// Render a payload value without JSON quoting for display fields.
fn plain_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn vector() -> (FeatureSchema, FeatureVector) {
        let schema = FeatureSchema::default_layout();
        let mut values = vec![1i64; schema.len()];
        values[schema.index_of("Age").unwrap()] = 52;
        values[schema.index_of("Gender").unwrap()] = 1;
        values[schema.index_of("Years of Smoking").unwrap()] = 12;
        values[schema.index_of("Smoking").unwrap()] = 6;
        let vector = FeatureVector::from_values(&schema, values).unwrap();
        (schema, vector)
    }

    #[test]
    fn registry_record_projects_the_vector() {
        let (schema, vector) = vector();
        let record = RegistryRecord::compose("Ravi", RiskLevel::High, 91.45, &schema, &vector);

        assert_eq!(record.diagnosis, "High");
        assert_eq!(record.confidence_score, "91.45%");
        assert_eq!(record.gender_str, "Male");
        assert_eq!(record.features.len(), REGISTRY_FEATURES.len());
        assert_eq!(record.features["Age"], json!(52));
        assert_eq!(record.features["Smoking"], json!(6));
        assert!(!record.features.contains_key("Years of Smoking"));
    }

    #[test]
    fn registry_record_serializes_with_historical_headers() {
        let (schema, vector) = vector();
        let record = RegistryRecord::compose("Ravi", RiskLevel::Low, 70.0, &schema, &vector);
        let value = serde_json::to_value(&record).unwrap();

        for key in ["Timestamp", "Patient Name", "Diagnosis", "Confidence Score", "Name", "GenderStr", "Age", "Snoring"] {
            assert!(value.get(key).is_some(), "missing column {key}");
        }
        assert_eq!(value["GenderStr"], json!("Male"));
    }

    #[test]
    fn registry_round_trips_through_the_store() {
        let dir = TempDir::new().unwrap();
        let store: RegistryStore = JsonlStore::new(dir.path().join("patient_registry.jsonl"));
        let (schema, vector) = vector();

        store
            .append(&RegistryRecord::compose("Ravi", RiskLevel::Medium, 64.2, &schema, &vector))
            .unwrap();

        let records = store.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].diagnosis, "Medium");
        assert_eq!(records[0].features["Age"], json!(52));
    }

    #[test]
    fn booking_record_carries_payload_fields() {
        let payload = json!({
            "patientName": "Meera",
            "diagnosis": "High",
            "confidence": 88.12,
            "doctorName": "Dr. Arun Kumar",
            "specialty": "Oncologist",
            "date": "2026-09-01",
            "time": "10:30",
            "amount": 500,
            "paymentMethod": "card"
        });
        let record = BookingRecord::compose(payload.as_object().unwrap(), "TXN-12345");

        assert_eq!(record.transaction_id, "TXN-12345");
        assert_eq!(record.payment_status, "Payment Successful");
        assert_eq!(record.confidence, "88.12%");
        assert_eq!(record.patient_name, json!("Meera"));
        assert_eq!(record.fee_paid, json!(500));
    }

    #[test]
    fn booking_record_tolerates_missing_fields() {
        let payload = json!({"patientName": "Meera"});
        let record = BookingRecord::compose(payload.as_object().unwrap(), "TXN-54321");

        assert_eq!(record.doctor_name, Value::Null);
        assert_eq!(record.confidence, "%");
    }
}
