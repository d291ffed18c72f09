use sha2::{Digest, Sha256};

use fitclub_core::errors::{ClubError, ClubResult};
use fitclub_core::models::recommendation::Measurements;

/// The two mutually exclusive request modes.
#[derive(Debug, Clone)]
pub enum RecommendationInput {
    Measurements(Measurements),
    Photo { bytes: Vec<u8>, content_type: String },
}

impl RecommendationInput {
    /// Builds an input from the optional request parts, enforcing that
    /// exactly one mode is present. This is the only validation in the
    /// pipeline that surfaces an error to the caller; everything past this
    /// point degrades to a fallback plan instead of failing.
    pub fn from_parts(
        measurements: Option<Measurements>,
        photo: Option<(Vec<u8>, String)>,
    ) -> ClubResult<Self> {
        match (measurements, photo) {
            (Some(_), Some(_)) => Err(ClubError::Validation(
                "Provide either measurements or a photo, not both".to_string(),
            )),
            (None, None) => Err(ClubError::Validation(
                "Either measurements or a photo is required".to_string(),
            )),
            (Some(measurements), None) => Ok(Self::Measurements(measurements)),
            (None, Some((bytes, content_type))) => {
                if bytes.is_empty() {
                    return Err(ClubError::Validation("Photo must not be empty".to_string()));
                }
                Ok(Self::Photo {
                    bytes,
                    content_type,
                })
            }
        }
    }

    pub fn measurements(&self) -> Option<&Measurements> {
        match self {
            Self::Measurements(measurements) => Some(measurements),
            Self::Photo { .. } => None,
        }
    }

    /// Deterministic cache key: the normalized fields joined with `|`,
    /// photo content digested first so identical bytes hash identically,
    /// then the whole string hashed to a hex SHA-256.
    pub fn cache_key(&self) -> String {
        let normalized = match self {
            Self::Measurements(m) => format!(
                "measurements|{:.1}|{:.1}|{}|{}|{}|{}|{}",
                m.height_cm,
                m.weight_kg,
                m.age,
                m.gender.as_str(),
                m.goal.as_str(),
                m.equipment.as_str(),
                m.training_days,
            ),
            Self::Photo {
                bytes,
                content_type,
            } => {
                format!("photo|{}|{}", content_type, hex_digest(bytes))
            }
        };

        hex_digest(normalized.as_bytes())
    }
}

fn hex_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
