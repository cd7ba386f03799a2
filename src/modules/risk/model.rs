use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::input::PatientInput;
use crate::modules::utils::logging::log_external_call;
use crate::EXTERNAL_CALL_TIMEOUT_SECS;

/// What the classifier returns: a binary class label and the probability of
/// the positive (disease) class.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub label: u8,
    pub probability: f64,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("scoring service unreachable: {0}")]
    Unavailable(String),
    #[error("scoring service returned malformed data: {0}")]
    Malformed(String),
}

/// The prediction-model boundary. The model itself is an externally trained
/// artifact; this crate only passes the ordered feature vector across and
/// renders what comes back.
pub trait RiskModel {
    fn assess(&self, input: &PatientInput) -> Result<RiskAssessment, ModelError>;
}

#[derive(Serialize)]
struct ScoreRequest {
    features: Vec<f64>,
}

/// Scores against a remote model service: POST the feature vector as JSON,
/// receive `{ "label": 0|1, "probability": p }`. Blocking round-trip with
/// an explicit timeout.
pub struct RemoteModel {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl RemoteModel {
    pub fn new(endpoint: &str) -> Result<Self, ModelError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(EXTERNAL_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| ModelError::Unavailable(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl RiskModel for RemoteModel {
    fn assess(&self, input: &PatientInput) -> Result<RiskAssessment, ModelError> {
        let request = ScoreRequest {
            features: input.feature_vector().to_vec(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                log_external_call("risk-model", "assess", false, Some(&e.to_string()));
                ModelError::Unavailable(e.to_string())
            })?;

        let assessment: RiskAssessment = response
            .json()
            .map_err(|e| ModelError::Malformed(e.to_string()))?;

        if assessment.label > 1 || !(0.0..=1.0).contains(&assessment.probability) {
            return Err(ModelError::Malformed(format!(
                "label {} probability {}",
                assessment.label, assessment.probability
            )));
        }

        log_external_call("risk-model", "assess", true, None);
        Ok(assessment)
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// Model double that answers with a canned assessment.
    pub struct CannedModel {
        pub assessment: RiskAssessment,
    }

    impl RiskModel for CannedModel {
        fn assess(&self, _input: &PatientInput) -> Result<RiskAssessment, ModelError> {
            Ok(self.assessment.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::CannedModel;
    use super::*;
    use crate::modules::risk::input::test_support::typical_patient;

    #[test]
    fn test_score_request_shape() {
        let request = ScoreRequest {
            features: typical_patient().feature_vector().to_vec(),
        };
        let json = serde_json::to_value(&request).unwrap();
        let features = json["features"].as_array().unwrap();
        assert_eq!(features.len(), 11);
        assert_eq!(features[0], 50.0);
    }

    #[test]
    fn test_response_parsing() {
        let assessment: RiskAssessment =
            serde_json::from_str(r#"{"label": 1, "probability": 0.82}"#).unwrap();
        assert_eq!(assessment.label, 1);
        assert!((assessment.probability - 0.82).abs() < f64::EPSILON);
    }

    #[test]
    fn test_canned_model() {
        let model = CannedModel {
            assessment: RiskAssessment {
                label: 0,
                probability: 0.1,
            },
        };
        let result = model.assess(&typical_patient()).unwrap();
        assert_eq!(result.label, 0);
    }
}
