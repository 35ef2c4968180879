//! Request types for the Salary Engine API.
//!
//! Amounts may be sent as JSON strings (`"3000.00"`) or numbers (`3000`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for the `/net` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetRequest {
    /// The gross pay to compute net pay for.
    pub gross: Decimal,
}

/// Request body for the `/gross` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossRequest {
    /// The desired net pay.
    pub net: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_net_request_accepts_string_amount() {
        let request: NetRequest = serde_json::from_str(r#"{"gross": "5000.00"}"#).unwrap();
        assert_eq!(request.gross, Decimal::from_str("5000.00").unwrap());
    }

    #[test]
    fn test_gross_request_accepts_numeric_amount() {
        let request: GrossRequest = serde_json::from_str(r#"{"net": 3000}"#).unwrap();
        assert_eq!(request.net, Decimal::from(3000));
    }

    #[test]
    fn test_missing_amount_is_rejected() {
        let result: Result<GrossRequest, _> = serde_json::from_str("{}");
        let error = result.unwrap_err().to_string();
        assert!(error.contains("missing field `net`"));
    }

    #[test]
    fn test_non_numeric_string_is_rejected() {
        let result: Result<NetRequest, _> = serde_json::from_str(r#"{"gross": "lots"}"#);
        assert!(result.is_err());
    }
}
