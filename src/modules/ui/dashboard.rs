use std::io;

use crate::modules::auth::controller::AuthController;
use crate::modules::auth::session::{Event, Session};
use crate::modules::risk::input::{PatientInput, FIELD_RANGES};
use crate::modules::risk::model::RiskModel;
use crate::modules::risk::verdict::{render_summary, render_verdict};
use crate::modules::utils::io::{prompt_number_in_range, read_line};

/// The authenticated dashboard: patient data entry and the risk verdict.
pub fn dashboard_screen(
    session: Session,
    auth: &AuthController,
    model: &dyn RiskModel,
    user: &str,
) -> io::Result<Session> {
    println!("\n=== CardioRisk Dashboard ({}) ===", user);
    println!("1. Run diagnosis      (or type 'diagnose')");
    println!("2. Log out            (or type 'logout')");
    println!("\nEnter your choice:");

    match read_line()?.to_lowercase().as_str() {
        "1" | "diagnose" => {
            run_diagnosis(model)?;
            Ok(session)
        }
        "2" | "logout" => {
            let (session, _) = session.apply(auth, Event::Logout);
            println!("Logged out.");
            Ok(session)
        }
        _ => {
            println!("Invalid choice. Please enter 1 or 2.");
            Ok(session)
        }
    }
}

/// Prompt for the eleven clinical fields. Each prompt enforces its form
/// bound, so the assembled input always validates.
fn collect_patient_input() -> io::Result<PatientInput> {
    println!("\n--- Patient Data Entry ---");

    let mut values = [0u32; 11];
    for (slot, range) in values.iter_mut().zip(FIELD_RANGES.iter()) {
        *slot = prompt_number_in_range(range.label, range.min, range.max)?;
    }

    let [age, gender, height_cm, weight_kg, ap_hi, ap_lo, cholesterol, glucose, smoker, alcohol, active] =
        values;
    Ok(PatientInput {
        age,
        gender,
        height_cm,
        weight_kg,
        ap_hi,
        ap_lo,
        cholesterol,
        glucose,
        smoker,
        alcohol,
        active,
    })
}

fn run_diagnosis(model: &dyn RiskModel) -> io::Result<()> {
    let input = collect_patient_input()?;

    if let Err(e) = input.validate() {
        // Prompts enforce the bounds already; this is the backstop.
        println!("\nInvalid input: {}", e);
        return Ok(());
    }

    println!("\n{}", render_summary(&input));

    // Busy indicator around the model call only; store calls stay silent.
    println!("\nAnalyzing clinical data...");
    match model.assess(&input) {
        Ok(assessment) => println!("\n{}", render_verdict(&assessment)),
        Err(e) => println!("\nCould not score this patient: {}", e),
    }
    Ok(())
}
