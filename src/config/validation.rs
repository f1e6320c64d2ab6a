use crate::error::AppError;
use std::path::Path;

fn validate_url(name: &str, url: &str) -> Result<(), AppError> {
    if url.is_empty() {
        return Err(AppError::config_error(format!("{name} cannot be empty")));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "{name} must start with http:// or https://"
        )));
    }

    Ok(())
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - API base URL cannot be empty and must be an http(s) URL
/// - Remote store URL, if provided, must be an http(s) URL
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
/// - HTTP timeout must be at least one second
pub fn validate_config(
    api_base_url: &str,
    remote_store_url: &Option<String>,
    log_file_path: &Option<String>,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    validate_url("API base URL", api_base_url)?;

    if let Some(remote_url) = remote_store_url {
        validate_url("Remote store URL", remote_url)?;
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        // Check if parent directory exists or can be created
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
