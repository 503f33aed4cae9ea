//! Interactive terminal prompts.

use dialoguer::Input;

use crate::auth::AuthCodePrompt;
use crate::error::Result;
use crate::transfer::TransferRequest;
use crate::validate::validate_email;

/// Ask for the file name and the new owner's address.
pub fn prompt_request() -> Result<TransferRequest> {
    let file_name: String = Input::new()
        .with_prompt("Enter the file name")
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("File name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let new_owner: String = Input::new()
        .with_prompt("Enter the Gmail address of the new owner")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            validate_email(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    TransferRequest::new(file_name, &new_owner)
}

/// Reads the authorization code from the terminal.
pub struct TerminalPrompt;

impl AuthCodePrompt for TerminalPrompt {
    fn request_code(&self, auth_url: &str) -> Result<String> {
        println!("Authorize this app by visiting this URL: {}", auth_url);
        let code: String = Input::new()
            .with_prompt("Enter the code from that page here")
            .interact_text()?;
        Ok(code)
    }
}
