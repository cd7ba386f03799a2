use thiserror::Error;

/// Legal range for one clinical input field.
pub struct FieldRange {
    pub field: &'static str,
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
}

/// The eleven fields the classifier expects, with the bounds the entry form
/// enforces. Order here is also the feature-vector order.
pub const FIELD_RANGES: [FieldRange; 11] = [
    FieldRange { field: "age", label: "Age (years)", min: 30, max: 100 },
    FieldRange { field: "gender", label: "Gender (1=female, 2=male)", min: 1, max: 2 },
    FieldRange { field: "height", label: "Height (cm)", min: 100, max: 250 },
    FieldRange { field: "weight", label: "Weight (kg)", min: 30, max: 200 },
    FieldRange { field: "ap_hi", label: "Systolic BP", min: 90, max: 200 },
    FieldRange { field: "ap_lo", label: "Diastolic BP", min: 60, max: 150 },
    FieldRange { field: "cholesterol", label: "Cholesterol (1=normal, 2=above, 3=well above)", min: 1, max: 3 },
    FieldRange { field: "gluc", label: "Glucose (1=normal, 2=above, 3=well above)", min: 1, max: 3 },
    FieldRange { field: "smoke", label: "Smoker (0=no, 1=yes)", min: 0, max: 1 },
    FieldRange { field: "alco", label: "Alcohol intake (0=no, 1=yes)", min: 0, max: 1 },
    FieldRange { field: "active", label: "Physically active (0=no, 1=yes)", min: 0, max: 1 },
];

#[derive(Debug, Error, PartialEq)]
#[error("{field} must be between {min} and {max}")]
pub struct ValidationError {
    pub field: &'static str,
    pub min: u32,
    pub max: u32,
}

/// One patient's vitals as entered on the dashboard form. Not owned by the
/// auth core; it exists only between form entry and the model call.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientInput {
    pub age: u32,
    pub gender: u32,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub ap_hi: u32,
    pub ap_lo: u32,
    pub cholesterol: u32,
    pub glucose: u32,
    pub smoker: u32,
    pub alcohol: u32,
    pub active: u32,
}

impl PatientInput {
    fn values(&self) -> [u32; 11] {
        [
            self.age,
            self.gender,
            self.height_cm,
            self.weight_kg,
            self.ap_hi,
            self.ap_lo,
            self.cholesterol,
            self.glucose,
            self.smoker,
            self.alcohol,
            self.active,
        ]
    }

    /// Check every field against its form bound, reporting the first
    /// violation in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (value, range) in self.values().iter().zip(FIELD_RANGES.iter()) {
            if *value < range.min || *value > range.max {
                return Err(ValidationError {
                    field: range.field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// The ordered 11-element vector the model boundary expects:
    /// age, gender, height, weight, ap_hi, ap_lo, cholesterol, gluc,
    /// smoke, alco, active.
    pub fn feature_vector(&self) -> [f64; 11] {
        self.values().map(f64::from)
    }

    /// Approximate body-mass index shown on the patient summary.
    pub fn bmi(&self) -> f64 {
        let height_m = f64::from(self.height_cm) / 100.0;
        f64::from(self.weight_kg) / (height_m * height_m)
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// The form's default values: a 50-year-old with unremarkable vitals.
    pub fn typical_patient() -> PatientInput {
        PatientInput {
            age: 50,
            gender: 1,
            height_cm: 165,
            weight_kg: 65,
            ap_hi: 120,
            ap_lo: 80,
            cholesterol: 1,
            glucose: 1,
            smoker: 0,
            alcohol: 0,
            active: 1,
        }
    }
}
