use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::error::ClientError;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(fields)) = data {
                if let Some(obj) = response.as_object_mut() {
                    obj.extend(fields);
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Error code of the client error behind `err`, if there is one
pub fn error_code_of(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())
        .map(ClientError::error_code)
}

/// Output an arbitrary API payload; text mode pretty-prints the JSON as well
pub fn output_value(output_format: &OutputFormat, value: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Read a secret from stdin when it was not passed on the command line
pub fn resolve_password(provided: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match provided {
        Some(password) => Ok(password),
        None => {
            eprint!("{}: ", prompt);
            io::stderr().flush()?;

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            let password = line.trim_end_matches(['\r', '\n']).to_string();
            if password.is_empty() {
                anyhow::bail!("{} is required", prompt);
            }
            Ok(password)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_found_through_context() {
        let err = anyhow::Error::new(ClientError::SessionExpired).context("Run `crm auth login`.");
        assert_eq!(error_code_of(&err), Some("SESSION_EXPIRED"));
        assert_eq!(
            format!("{:#}", err),
            "Run `crm auth login`.: Session expired. Please log in again."
        );
    }

    #[test]
    fn plain_errors_have_no_code() {
        assert_eq!(error_code_of(&anyhow::anyhow!("Header must look like 'Name: value'")), None);
        let err: anyhow::Error = ClientError::validation("Passwords do not match").into();
        assert_eq!(error_code_of(&err), Some("VALIDATION_ERROR"));
    }
}
