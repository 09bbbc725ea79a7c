use clap::Parser;
use clinic_client::adapters::{CliNavigator, ConsoleNotifier, FileSessionStore, TextScanner};
use clinic_client::config::cli::{CliArgs, Command};
use clinic_client::core::api::{ApiClient, ApiResponse};
use clinic_client::core::bind::DoctorBinder;
use clinic_client::core::trust::TrustValidator;
use clinic_client::domain::model::RegisterRequest;
use clinic_client::domain::ports::{CodeScanner, Navigator, Route, SessionStore};
use clinic_client::utils::logger;
use clinic_client::utils::validation::{validate_mobile, Validate};
use std::collections::HashMap;
use std::io::IsTerminal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("Starting clinic-client");

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    if args.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let api = ApiClient::new(config.api_base.clone());
    let session = FileSessionStore::new(args.session_file.clone());

    let exit_code = match &args.command {
        Command::Register {
            username,
            password,
            first_name,
            last_name,
            mobile,
            address,
            symptoms,
            assigned_doctor_id,
        } => {
            if let Some(mobile) = mobile {
                if let Err(e) = validate_mobile("mobile", mobile) {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
            let request = RegisterRequest {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                username: username.clone(),
                password: password.clone(),
                confirm_password: password.clone(),
                mobile: mobile.clone(),
                address: address.clone(),
                symptoms: symptoms.clone(),
                assigned_doctor_id: *assigned_doctor_id,
            };
            let response = api.register(&request).await?;
            if response.body.success {
                println!(
                    "✅ {}",
                    response.body.message.as_deref().unwrap_or("Registered")
                );
                0
            } else {
                eprintln!(
                    "❌ {}",
                    response
                        .body
                        .message
                        .as_deref()
                        .unwrap_or("Registration failed")
                );
                1
            }
        }

        Command::Login { username, password } => {
            let response = api.login(username, password).await?;
            match (response.body.success, response.body.data) {
                (true, Some(data)) => {
                    session.store(&data.token)?;
                    let name = data
                        .user_info
                        .full_name
                        .unwrap_or_else(|| data.user_info.username.clone());
                    println!("✅ Logged in as {}", name);
                    0
                }
                _ => {
                    eprintln!(
                        "❌ {}",
                        response.body.message.as_deref().unwrap_or("Login failed")
                    );
                    1
                }
            }
        }

        Command::Info => {
            let token = require_token(&session);
            let response = api.patient_info(&token).await?;
            if expire_session_if_needed(&response, &session)? {
                1
            } else if let (true, Some(info)) = (response.body.success, &response.body.data) {
                let user = info.user_info.as_ref();
                println!(
                    "Patient: {}",
                    user.and_then(|u| u.full_name.as_deref()).unwrap_or("unknown")
                );
                println!(
                    "Doctor:  {}",
                    info.assigned_doctor_name.as_deref().unwrap_or("not assigned")
                );
                println!("Mobile:  {}", info.mobile.as_deref().unwrap_or("not set"));
                println!("Address: {}", info.address.as_deref().unwrap_or("not set"));
                println!("Symptoms: {}", info.symptoms.as_deref().unwrap_or("not set"));
                println!("Admitted: {}", info.admit_date.as_deref().unwrap_or("not set"));
                0
            } else {
                eprintln!(
                    "❌ {}",
                    response
                        .body
                        .message
                        .as_deref()
                        .unwrap_or("Failed to fetch patient info")
                );
                1
            }
        }

        Command::Update {
            mobile,
            address,
            symptoms,
        } => {
            let mut fields = HashMap::new();
            if let Some(mobile) = mobile {
                if let Err(e) = validate_mobile("mobile", mobile) {
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
                fields.insert("mobile".to_string(), mobile.clone());
            }
            if let Some(address) = address {
                fields.insert("address".to_string(), address.clone());
            }
            if let Some(symptoms) = symptoms {
                fields.insert("symptoms".to_string(), symptoms.clone());
            }
            if fields.is_empty() {
                eprintln!("❌ Nothing to update: pass --mobile, --address or --symptoms");
                std::process::exit(1);
            }

            let token = require_token(&session);
            let response = api.update_patient(&token, &fields).await?;
            if expire_session_if_needed(&response, &session)? {
                1
            } else if response.body.success {
                println!(
                    "✅ {}",
                    response.body.message.as_deref().unwrap_or("Updated")
                );
                0
            } else {
                eprintln!(
                    "❌ {}",
                    response.body.message.as_deref().unwrap_or("Update failed")
                );
                1
            }
        }

        Command::Doctors => {
            let response = api.doctors().await?;
            match (response.body.success, response.body.data) {
                (true, Some(doctors)) => {
                    for doctor in doctors {
                        println!(
                            "#{} {} ({})",
                            doctor.id,
                            doctor.doctor_name,
                            doctor.department.as_deref().unwrap_or("general")
                        );
                    }
                    0
                }
                _ => {
                    eprintln!(
                        "❌ {}",
                        response
                            .body
                            .message
                            .as_deref()
                            .unwrap_or("Failed to list doctors")
                    );
                    1
                }
            }
        }

        Command::Logout => {
            // 不論後端結果，本地 token 一定清掉
            if let Some(token) = session.token() {
                if let Err(e) = api.logout(&token).await {
                    tracing::warn!("logout request failed: {}", e);
                }
            }
            session.clear()?;
            println!("✅ Logged out");
            0
        }

        Command::Bind { scan } => {
            let scanner = TextScanner::new(scan.clone());
            let raw = match scanner.scan() {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::error!("scan failed: {}", e);
                    eprintln!("❌ Scan failed, please retry");
                    std::process::exit(1);
                }
            };

            let validator = TrustValidator::new(config.allow_list())?;
            let notifier = ConsoleNotifier::new(std::io::stdin().is_terminal());
            let binder = DoctorBinder::new(
                validator,
                config.bind_endpoint.clone(),
                session,
                CliNavigator,
                notifier,
            )?;

            let outcome = binder.bind_from_scan(&raw).await;
            if outcome.is_bound() {
                0
            } else {
                1
            }
        }
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn require_token(session: &FileSessionStore) -> String {
    match session.token() {
        Some(token) => token,
        None => {
            println!("» Please log in first");
            CliNavigator.redirect_to(Route::Login);
            std::process::exit(1);
        }
    }
}

/// Expired token: drop it and send the user back to login.
fn expire_session_if_needed<T>(
    response: &ApiResponse<T>,
    session: &FileSessionStore,
) -> clinic_client::Result<bool> {
    if response.auth_expired() {
        eprintln!("❌ Session expired, please log in again");
        session.clear()?;
        CliNavigator.redirect_to(Route::Login);
        return Ok(true);
    }
    Ok(false)
}
