//! Macro for implementing Display and FromStr for status enums
//!
//! Status enums travel both as JSON fields and as query-string values
//! (`?status=pending`), so each one needs a stable lowercase spelling and a
//! forgiving parser.
//!
//! # Example
//!
//! ```rust
//! use chainverdict_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum TicketStatus {
//!     Open,
//!     Closed,
//! }
//!
//! impl_status_conversions!(TicketStatus {
//!     Open => "open",
//!     Closed => "closed",
//! });
//!
//! assert_eq!(TicketStatus::Open.to_string(), "open");
//! assert_eq!("CLOSED".parse::<TicketStatus>().unwrap(), TicketStatus::Closed);
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their wire strings
/// - FromStr trait: parses case-insensitive strings to enum variants
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::types::{CaseStatus, ConnectionStatus, UserRole};

    #[test]
    fn test_display_conversion() {
        assert_eq!(CaseStatus::InProgress.to_string(), "in_progress");
        assert_eq!(ConnectionStatus::Accepted.to_string(), "accepted");
        assert_eq!(UserRole::Lawyer.to_string(), "lawyer");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(UserRole::from_str("Citizen").unwrap(), UserRole::Citizen);
        assert_eq!(UserRole::from_str("ADMIN").unwrap(), UserRole::Admin);
        assert_eq!(CaseStatus::from_str("In_Progress").unwrap(), CaseStatus::InProgress);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = ConnectionStatus::from_str("maybe");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid ConnectionStatus: maybe"));
    }

    #[test]
    fn test_fromstr_empty() {
        assert!(CaseStatus::from_str("").is_err());
    }

    #[test]
    fn test_display_matches_serde_spelling() {
        for status in [
            CaseStatus::Open,
            CaseStatus::InProgress,
            CaseStatus::Resolved,
            CaseStatus::Closed,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.to_string()));
        }
    }
}
