mod dashboard;

use std::io;

use crate::modules::auth::controller::AuthController;
use crate::modules::auth::session::{Event, Screen, Session, Transition};
use crate::modules::risk::model::RiskModel;
use crate::modules::utils::io::{is_valid_email, read_line};

/// Drive the interactive surface until the user exits.
///
/// One session per run of the loop; all its transitions happen here,
/// sequentially, in response to what the user picks. Every error lands as a
/// message on the current screen and the loop keeps going.
pub fn run(auth: &AuthController, model: &dyn RiskModel) -> io::Result<()> {
    let mut session = Session::new();
    loop {
        session = match session.screen().clone() {
            Screen::Login => match login_screen(session, auth)? {
                Some(next) => next,
                None => return Ok(()),
            },
            Screen::ResetRequest => reset_request_screen(session, auth)?,
            Screen::ResetVerify { email, .. } => reset_verify_screen(session, auth, &email)?,
            Screen::Dashboard { user } => dashboard::dashboard_screen(session, auth, model, &user)?,
        };
    }
}

fn show_transition_error(transition: &Transition) {
    if let Transition::Rejected(e) = transition {
        println!("\n{}", e);
    }
}

/// Sign-in screen. Returns `None` when the user chooses to exit.
fn login_screen(session: Session, auth: &AuthController) -> io::Result<Option<Session>> {
    println!("\n=== CardioRisk - Sign In ===");
    println!("1. Sign in            (or type 'login')");
    println!("2. Forgot password    (or type 'forgot')");
    println!("3. Exit               (or type 'exit')");
    println!("\nEnter your choice:");

    match read_line()?.to_lowercase().as_str() {
        "1" | "login" => {
            println!("\nEmail address:");
            let email = read_line()?;
            println!("Password:");
            let password = rpassword::read_password()?;

            let (session, transition) =
                session.apply(auth, Event::SubmitLogin { email, password });
            show_transition_error(&transition);
            Ok(Some(session))
        }
        "2" | "forgot" => {
            let (session, _) = session.apply(auth, Event::BeginReset);
            Ok(Some(session))
        }
        "3" | "exit" | "quit" => {
            println!("Goodbye!");
            Ok(None)
        }
        _ => {
            println!("Invalid choice. Please enter 1, 2 or 3.");
            Ok(Some(session))
        }
    }
}

/// Reset-request screen: collect the account email and issue a code.
fn reset_request_screen(session: Session, auth: &AuthController) -> io::Result<Session> {
    println!("\n=== Password Reset ===");
    println!("Enter your account email (or 'back' to return to sign-in):");

    let input = read_line()?;
    if input.to_lowercase() == "back" {
        let (session, _) = session.apply(auth, Event::CancelReset);
        return Ok(session);
    }

    if !is_valid_email(&input) {
        println!("Invalid email format. Please enter a valid email address.");
        return Ok(session);
    }

    let (session, transition) = session.apply(auth, Event::SubmitResetRequest { email: input });
    match &transition {
        Transition::Moved => {
            println!("\nA reset code has been sent to your email.");
            println!("Please check your inbox and enter the code below.");
        }
        Transition::MovedWithCode(code) => {
            println!("\nDemo mode: your reset code is {}", code);
        }
        _ => show_transition_error(&transition),
    }
    Ok(session)
}

/// Reset-verify screen: code plus new password pair. The code survives
/// failed attempts; 'cancel' throws it away.
fn reset_verify_screen(
    session: Session,
    auth: &AuthController,
    email: &str,
) -> io::Result<Session> {
    println!("\n=== Enter Reset Code ({}) ===", email);
    println!("Enter the 6-digit code (or 'cancel' to abort):");

    let submitted_otp = read_line()?;
    if submitted_otp.to_lowercase() == "cancel" {
        let (session, _) = session.apply(auth, Event::CancelReset);
        println!("Password reset cancelled.");
        return Ok(session);
    }

    println!("New password:");
    let new_password = rpassword::read_password()?;
    println!("Confirm new password:");
    let confirm_password = rpassword::read_password()?;

    let (session, transition) = session.apply(
        auth,
        Event::SubmitResetConfirmation {
            submitted_otp,
            new_password,
            confirm_password,
        },
    );
    if let Transition::Moved = transition {
        println!("\nPassword reset successful! Please sign in with your new password.");
    } else {
        show_transition_error(&transition);
    }
    Ok(session)
}
