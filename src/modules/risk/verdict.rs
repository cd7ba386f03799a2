use super::input::PatientInput;
use super::model::RiskAssessment;

const GAUGE_WIDTH: usize = 20;

const DISCLAIMER: &str =
    "Disclaimer: This tool is for educational purposes only and is not a \
     substitute for professional medical diagnosis.";

/// The pre-scoring patient summary: age, approximate BMI, blood pressure
/// and activity at a glance.
pub fn render_summary(input: &PatientInput) -> String {
    format!(
        "Patient Summary\n\
         ---------------\n\
         Age:     {} yrs\n\
         BMI:     {:.1} (approx)\n\
         BP:      {}/{}\n\
         Active:  {}",
        input.age,
        input.bmi(),
        input.ap_hi,
        input.ap_lo,
        if input.active == 1 { "Yes" } else { "No" },
    )
}

fn gauge(probability: f64) -> String {
    let filled = (probability * GAUGE_WIDTH as f64).round() as usize;
    let filled = filled.min(GAUGE_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled))
}

/// The risk verdict as shown on the dashboard after scoring.
pub fn render_verdict(assessment: &RiskAssessment) -> String {
    let percent = assessment.probability * 100.0;
    let (headline, body, recommendation) = if assessment.label == 1 {
        (
            "High Risk Detected",
            "The model predicts a high likelihood of cardiovascular disease \
             presence based on the provided vitals.",
            "Recommendation: Immediate clinical consultation is advised.",
        )
    } else {
        (
            "Low Risk / Healthy",
            "The model predicts a low likelihood of cardiovascular disease.",
            "Recommendation: Maintain a healthy lifestyle and regular checkups.",
        )
    };

    format!(
        "=== {} ===\n\
         {}\n\
         {}\n\n\
         Risk Probability: {:.1}%\n\
         Risk Gauge:       {}\n\n\
         {}",
        headline,
        body,
        recommendation,
        percent,
        gauge(assessment.probability),
        DISCLAIMER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::risk::input::test_support::typical_patient;

    #[test]
    fn test_summary_contents() {
        let summary = render_summary(&typical_patient());
        assert!(summary.contains("50 yrs"));
        assert!(summary.contains("23.9"));
        assert!(summary.contains("120/80"));
        assert!(summary.contains("Active:  Yes"));
    }

    #[test]
    fn test_high_risk_verdict() {
        let verdict = render_verdict(&RiskAssessment {
            label: 1,
            probability: 0.825,
        });
        assert!(verdict.contains("High Risk Detected"));
        assert!(verdict.contains("82.5%"));
        assert!(verdict.contains("Immediate clinical consultation"));
        assert!(verdict.contains("Disclaimer"));
    }

    #[test]
    fn test_low_risk_verdict() {
        let verdict = render_verdict(&RiskAssessment {
            label: 0,
            probability: 0.12,
        });
        assert!(verdict.contains("Low Risk / Healthy"));
        assert!(verdict.contains("12.0%"));
        assert!(verdict.contains("healthy lifestyle"));
    }

    #[test]
    fn test_gauge_bounds() {
        assert_eq!(gauge(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(gauge(1.0), format!("[{}]", "#".repeat(20)));
        assert_eq!(gauge(0.5), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
    }
}
