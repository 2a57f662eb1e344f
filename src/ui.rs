// UI layer: an interactive menu using `dialoguer`. The access token is
// kept in memory for the session and handed explicitly to each call.

use crate::api::{AccessToken, RecommendationRequest, SizerClient, UploadRequest};
use crate::error::SizerError;
use anyhow::{Context, Result};
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Per-run state: the token from the last successful exchange and the
/// result of the last successful spreadsheet upload.
#[derive(Default)]
struct Session {
    token: Option<AccessToken>,
    last_sizing: Option<Value>,
}

/// Main interactive menu. Runs until the user chooses "Exit".
pub fn main_menu(api: SizerClient) -> Result<()> {
    let mut session = Session::default();
    loop {
        let items = vec![
            "Get access token",
            "Upload spreadsheet",
            "Request recommendation",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                if let Some(token) = handle_authenticate(&api)? {
                    session.token = Some(token);
                }
            }
            1 => {
                let Some(token) = session.token.clone() else {
                    println!("You should get an access token first.");
                    continue;
                };
                if let Some(result) = handle_upload(&api, token)? {
                    session.last_sizing = Some(result);
                }
            }
            2 => {
                let Some(token) = session.token.clone() else {
                    println!("You should get an access token first.");
                    continue;
                };
                handle_recommendation(&api, token, session.last_sizing.as_ref())?;
            }
            3 => break,
            _ => {}
        }
    }
    Ok(())
}

fn handle_authenticate(api: &SizerClient) -> Result<Option<AccessToken>> {
    // `Password` hides the refresh token while it is typed.
    let refresh_token: String = Password::new().with_prompt("Refresh token").interact()?;

    let spinner = spinner("Authorizing...");
    let result = api.get_access_token(refresh_token.trim());
    spinner.finish_and_clear();

    match result {
        Ok(token) => {
            println!("Access token acquired.");
            Ok(Some(token))
        }
        Err(e) => {
            explain_failure(e);
            Ok(None)
        }
    }
}

fn handle_upload(api: &SizerClient, access_token: AccessToken) -> Result<Option<Value>> {
    let path: String = Input::new().with_prompt("Spreadsheet path").interact_text()?;
    let file_type: String = Input::new().with_prompt("Adapter type").interact_text()?;
    let req = UploadRequest {
        access_token,
        file_name: PathBuf::from(path),
        file_type,
    };

    let spinner = spinner("Uploading...");
    let result = api.parse_excel(&req);
    spinner.finish_and_clear();

    match result {
        Ok(json) => {
            print_json(&json)?;
            Ok(Some(json))
        }
        Err(e) => {
            explain_failure(e);
            Ok(None)
        }
    }
}

fn handle_recommendation(
    api: &SizerClient,
    access_token: AccessToken,
    last_sizing: Option<&Value>,
) -> Result<()> {
    let json_data = match last_sizing {
        Some(sizing) if use_last_sizing()? => serde_json::to_string(sizing)?,
        _ => {
            let path: String = Input::new().with_prompt("JSON payload path").interact_text()?;
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?
        }
    };
    let req = RecommendationRequest {
        access_token,
        json_data,
    };

    let spinner = spinner("Requesting recommendation...");
    let result = api.get_recommendation(&req);
    spinner.finish_and_clear();

    match result {
        Ok(json) => print_json(&json)?,
        Err(e) => explain_failure(e),
    }
    Ok(())
}

fn use_last_sizing() -> Result<bool> {
    let sources = vec!["Last uploaded spreadsheet", "JSON file"];
    let choice = Select::new()
        .with_prompt("Payload")
        .items(&sources)
        .default(0)
        .interact()?;
    Ok(choice == 0)
}

/// Status failures were already explained by the reporter; anything else
/// (network, file, decode) is printed here with its cause chain.
fn explain_failure(e: SizerError) {
    if e.status().is_none() {
        println!("Request failed: {:#}", anyhow::Error::from(e));
    }
}

fn print_json(json: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(json)?);
    Ok(())
}

fn spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
