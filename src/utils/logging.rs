use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, user_id: u64, chat_id: i64, error: &str) {
    error!(
        "CMD_ERROR: {} by {}({}) in chat {} - {}",
        command, user, user_id, chat_id, error
    );
}

/// Logs rejected callers of admin-only commands
pub fn log_access_denied(command: &str, user: &str, user_id: u64, chat_id: i64) {
    warn!(
        "ACCESS_DENIED: {} by {}({}) in chat {}",
        command, user, user_id, chat_id
    );
}

/// Logs validation errors with consistent format
pub fn log_validation_error(command: &str, field: &str, value: &str, error: &str, user: &str, user_id: u64, chat_id: i64) {
    warn!(
        "VALIDATION_ERROR: {} - {} field '{}' invalid: {} - user {}({}) in chat {}",
        command, field, value, error, user, user_id, chat_id
    );
}

/// Logs custom list storage operations
pub fn log_store_operation(operation: &str, user_id: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("STORE_OP: {} for user {} - {}", operation, user_id, d),
        None => debug!("STORE_OP: {} for user {}", operation, user_id),
    }
}

/// Logs custom list storage failures
pub fn log_store_error(operation: &str, user_id: &str, error: &str) {
    error!("STORE_ERROR: {} for user {} failed: {}", operation, user_id, error);
}

/// Logs upstream schedule requests
pub fn log_fetch(url: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("FETCH: {} - {}", url, d),
        None => debug!("FETCH: {}", url),
    }
}

/// Logs timeout events with consistent format
pub fn log_timeout(operation: &str, duration_secs: u64, details: Option<&str>) {
    match details {
        Some(d) => warn!("TIMEOUT: {} after {}s - {}", operation, duration_secs, d),
        None => warn!("TIMEOUT: {} after {}s", operation, duration_secs),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
