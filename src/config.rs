//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the record stores and the doctor database
    pub data_dir: PathBuf,

    /// Path to the trained model artifact
    pub model_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./model/lung_model.json")),

            data_dir,
        }
    }

    /// Patient registry store file.
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join("patient_registry.jsonl")
    }

    /// Hospital booking records store file.
    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir.join("hospital_records.jsonl")
    }

    /// Doctor database file.
    pub fn doctors_path(&self) -> PathBuf {
        self.data_dir.join("doctors.json")
    }
}
