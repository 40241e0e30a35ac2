//! Input validation for the simulator endpoint settings

/// Validates the simulator base URL.
pub fn validate_endpoint_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("Endpoint URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("Endpoint URL must start with http:// or https://".to_string());
    }

    if url.contains(char::is_whitespace) {
        return Err("Endpoint URL cannot contain whitespace".to_string());
    }

    // Reject a bare scheme with no host
    let after_scheme = url.split("://").nth(1).unwrap_or("");
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return Err("Endpoint URL is missing a host".to_string());
    }

    Ok(())
}

/// Validates the simulated phone identity used for the poll endpoint.
pub fn validate_phone_id(phone: &str) -> Result<(), String> {
    if phone.is_empty() {
        return Err("Phone id cannot be empty".to_string());
    }

    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err("Phone id must be digits only".to_string());
    }

    if phone.len() < 6 || phone.len() > 15 {
        return Err("Phone id must be 6 to 15 digits".to_string());
    }

    Ok(())
}

/// Validates a composed text message before sending.
pub fn validate_message(msg: &str) -> Result<(), String> {
    if msg.trim().is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    if msg.len() > 4096 {
        return Err("Message too long (max 4096 characters)".to_string());
    }

    Ok(())
}

/// Sanitizes a message: carriage returns and NULs are dropped, length is
/// capped. Newlines are kept; the renderer turns them into line breaks.
pub fn sanitize_message(msg: &str) -> String {
    msg.chars()
        .filter(|&c| c != '\r' && c != '\0')
        .take(4096)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_endpoint_url() {
        assert!(validate_endpoint_url("http://127.0.0.1:5000").is_ok());
        assert!(validate_endpoint_url("https://sim.example.com").is_ok());

        assert!(validate_endpoint_url("").is_err());
        assert!(validate_endpoint_url("ftp://x").is_err());
        assert!(validate_endpoint_url("http://").is_err());
        assert!(validate_endpoint_url("http:// spaced.com").is_err());
        assert!(validate_endpoint_url("127.0.0.1:5000").is_err()); // missing scheme
    }

    #[test]
    fn test_validate_phone_id() {
        assert!(validate_phone_id("919328552413").is_ok());
        assert!(validate_phone_id("123456").is_ok());

        assert!(validate_phone_id("").is_err());
        assert!(validate_phone_id("12345").is_err()); // too short
        assert!(validate_phone_id(&"9".repeat(16)).is_err()); // too long
        assert!(validate_phone_id("+4912345678").is_err()); // non-digit
    }

    #[test]
    fn test_validate_message() {
        assert!(validate_message("Hello, world!").is_ok());
        assert!(validate_message("multi\nline").is_ok());

        assert!(validate_message("").is_err());
        assert!(validate_message("   ").is_err());
        assert!(validate_message(&"x".repeat(4097)).is_err());
    }

    #[test]
    fn test_sanitize_message() {
        assert_eq!(sanitize_message("Hello"), "Hello");
        assert_eq!(sanitize_message("a\r\nb"), "a\nb");
        assert_eq!(sanitize_message("nul\0byte"), "nulbyte");
        assert_eq!(sanitize_message(&"x".repeat(5000)).len(), 4096);
    }
}
