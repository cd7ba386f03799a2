use std::path::Path;
use std::process;

use cardiorisk::auth::controller::AuthController;
use cardiorisk::auth::otp::RandomOtp;
use cardiorisk::auth::store::SheetStore;
use cardiorisk::config::{AppConfig, SenderMode};
use cardiorisk::email::{
    setup_email_credentials, test_email_configuration, CodeSender, DemoSender, SecureEmailManager,
    SmtpSender,
};
use cardiorisk::risk::model::RemoteModel;
use cardiorisk::{ui, utils, CONFIG_FILE};

fn main() {
    if let Err(e) = utils::logging::initialize_logging() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let config = match AppConfig::load(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("no usable config ({}); falling back to demo defaults", e);
            println!("No configuration found; running in demo mode.");
            AppConfig::demo_defaults()
        }
    };

    let sender: Box<dyn CodeSender> = match config.sender {
        SenderMode::Demo => Box::new(DemoSender),
        SenderMode::Smtp => {
            // Real delivery needs relay credentials in the keyring; offer
            // one-time setup on a fresh machine.
            let configured = SecureEmailManager::new()
                .map(|m| m.is_configured())
                .unwrap_or(false);
            if !configured {
                println!("Mail relay credentials are not configured yet.");
                if let Err(e) = setup_email_credentials() {
                    eprintln!("Mail setup failed: {}", e);
                    process::exit(1);
                }
                if let Err(e) = test_email_configuration() {
                    // Keep going; a bad relay will surface again on the
                    // first real reset request.
                    eprintln!("Warning: test email failed: {}", e);
                }
            }
            Box::new(SmtpSender)
        }
    };

    let store = match SheetStore::new(&config.store_url) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Could not set up the credential store client: {}", e);
            process::exit(1);
        }
    };

    let model = match RemoteModel::new(&config.model_url) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Could not set up the scoring client: {}", e);
            process::exit(1);
        }
    };

    let auth = AuthController::new(Box::new(store), sender, Box::new(RandomOtp));

    if let Err(e) = ui::run(&auth, &model) {
        eprintln!("Input error: {}", e);
        process::exit(1);
    }
}
