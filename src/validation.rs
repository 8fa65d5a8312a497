use bs58;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid Solana address format: {0}")]
    InvalidSolanaAddress(String),
}

/// Required, non-blank text parameter
pub fn require_param<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingParameter(name.to_string())),
    }
}

pub fn validate_solana_address(address: &str) -> Result<(), ValidationError> {
    // Check if address is empty
    if address.trim().is_empty() {
        return Err(ValidationError::MissingParameter("address".to_string()));
    }

    // Decode base58 string
    let decoded = match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes,
        Err(_) => return Err(ValidationError::InvalidSolanaAddress(address.to_string())),
    };

    // Validate length (Solana addresses are 32 bytes)
    if decoded.len() != 32 {
        return Err(ValidationError::InvalidSolanaAddress(address.to_string()));
    }

    Ok(())
}

/// Base58 transaction signatures are 87 or 88 characters and decode to 64 bytes
pub fn is_transaction_signature(value: &str) -> bool {
    matches!(value.len(), 87 | 88)
        && bs58::decode(value)
            .into_vec()
            .map(|bytes| bytes.len() == 64)
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ADDRESS: &str = "9ii1FEiWSgDzXAbwj2oTmJXzkfCw78mnHwPQv9WQ5iTn";

    #[test]
    fn test_validate_solana_address() {
        assert!(validate_solana_address(VALID_ADDRESS).is_ok());
        assert!(matches!(
            validate_solana_address("  "),
            Err(ValidationError::MissingParameter(_))
        ));
        assert!(matches!(
            validate_solana_address("0OIl"),
            Err(ValidationError::InvalidSolanaAddress(_))
        ));
        assert!(matches!(
            validate_solana_address("abc"),
            Err(ValidationError::InvalidSolanaAddress(_))
        ));
    }

    #[test]
    fn test_require_param() {
        assert_eq!(require_param("q", Some(" bonk ")).unwrap(), "bonk");
        assert!(require_param("q", Some("   ")).is_err());
        assert!(require_param("q", None).is_err());
    }

    #[test]
    fn test_is_transaction_signature() {
        let signature = bs58::encode([7u8; 64]).into_string();
        assert!(is_transaction_signature(&signature));
        assert!(!is_transaction_signature(VALID_ADDRESS));
        assert!(!is_transaction_signature(&"1".repeat(88)));
    }
}
