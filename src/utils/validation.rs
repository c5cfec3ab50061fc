use crate::utils::error::{RecError, Result};

/// 可驗證的配置
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 驗證數值下限
pub fn validate_positive_number(field: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(RecError::ConfigValidationError {
            field: field.to_string(),
            message: format!("must be at least {}, got {}", min, value),
        });
    }
    Ok(())
}

/// 驗證路徑非空
pub fn validate_path(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecError::ConfigValidationError {
            field: field.to_string(),
            message: "path must not be empty".to_string(),
        });
    }
    Ok(())
}

/// 驗證值屬於允許集合
pub fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(RecError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_number_below_min() {
        assert!(validate_positive_number("recommend.top_n", 0, 1).is_err());
        assert!(validate_positive_number("recommend.top_n", 5, 1).is_ok());
    }

    #[test]
    fn test_empty_path_rejected() {
        assert!(validate_path("data.orders_path", "  ").is_err());
        assert!(validate_path("data.orders_path", "./orders.csv").is_ok());
    }

    #[test]
    fn test_one_of() {
        assert!(validate_one_of("data.format", "json", &["json", "csv"]).is_ok());
        assert!(validate_one_of("data.format", "xml", &["json", "csv"]).is_err());
    }
}
