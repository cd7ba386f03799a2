pub mod input;
pub mod model;
pub mod verdict;

// Re-export the main types and functions
pub use input::{FieldRange, PatientInput, ValidationError, FIELD_RANGES};
pub use model::{ModelError, RemoteModel, RiskAssessment, RiskModel};
pub use verdict::{render_summary, render_verdict};
