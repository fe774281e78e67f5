//! Doctor Directory
//!
//! Small lookup table of specialists, loaded once at startup. A missing
//! database file is reseeded with the bundled mock roster; a broken one
//! degrades to an empty directory so the service still comes up.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// One practitioner row, serialized with the dashboard's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "ID")]
    pub id: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Specialty")]
    pub specialty: String,
    #[serde(rename = "Hospital")]
    pub hospital: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "ImageURL")]
    pub image_url: String,
}

/// In-memory directory backed by a JSON file.
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    /// Load the directory, seeding the file with the mock roster when it
    /// does not exist. Never fails; unreadable data yields an empty
    /// directory.
    pub fn load_or_seed(path: &Path) -> Self {
        if !path.exists() {
            warn!(path = %path.display(), "doctor database missing, regenerating");
            if let Err(e) = Self::write_seed(path) {
                error!(error = %e, "could not regenerate doctor database");
                return Self { doctors: Vec::new() };
            }
        }

        match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|text| {
            serde_json::from_str::<Vec<Doctor>>(&text).map_err(|e| e.to_string())
        }) {
            Ok(doctors) => {
                info!(count = doctors.len(), "doctor database loaded");
                Self { doctors }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "doctor database unreadable, starting empty");
                Self { doctors: Vec::new() }
            }
        }
    }

    fn write_seed(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let seed = serde_json::to_string_pretty(&Self::seed_roster())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, seed)
    }

    /// The bundled mock roster.
    fn seed_roster() -> Vec<Doctor> {
        let rows: [(u32, &str, &str, &str, &str, f64); 4] = [
            (1, "Dr. Arun Kumar", "Oncologist", "Apollo Cancer Center", "Chennai", 4.9),
            (2, "Dr. Priya Sharma", "Pulmonologist", "AIIMS", "Delhi", 4.8),
            (3, "Dr. Raj Menon", "Thoracic Surgeon", "Amrita Hospital", "Kochi", 4.7),
            (4, "Dr. Sarah Joseph", "Internal Medicine", "Lisie Hospital", "Kochi", 4.6),
        ];
        rows.into_iter()
            .map(|(id, name, specialty, hospital, location, rating)| Doctor {
                id,
                name: name.to_string(),
                specialty: specialty.to_string(),
                hospital: hospital.to_string(),
                location: location.to_string(),
                rating,
                image_url: "https://via.placeholder.com/150".to_string(),
            })
            .collect()
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }

    /// Doctors in any of the given specialty fields. An empty target set
    /// means no filter.
    pub fn with_specialties(&self, targets: &[&str]) -> Vec<Doctor> {
        if targets.is_empty() {
            return self.doctors.clone();
        }
        self.doctors
            .iter()
            .filter(|d| targets.contains(&d.specialty.as_str()))
            .cloned()
            .collect()
    }
}
