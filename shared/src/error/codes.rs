//! Unified error codes for the Loom workspace
//!
//! This module defines all error codes used by the engine, the HTTP client and
//! the surrounding form layer. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 6xxx: Product errors (categories, composition, variants)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category group already assigned to another row
    CategoryGroupInUse = 6102,
    /// No more category groups left to add
    CategoryRowLimit = 6103,
    /// Category row cannot be removed
    CategoryRowProtected = 6104,
    /// Category selection is incomplete
    CategorySelectionRequired = 6105,
    /// Node is not one of the row's current options
    CategoryOptionInvalid = 6106,
    /// Fabric composition does not add up
    FabricCompositionInvalid = 6201,
    /// Material already used by another composition row
    FabricMaterialInUse = 6202,
    /// Named fabric combination not found
    FabricCombinationNotFound = 6203,
    /// Variant attribute not found
    AttributeNotFound = 6301,
    /// Attribute already governed by another row
    AttributeInUse = 6302,
    /// No more attributes left to add
    AttributeRowLimit = 6303,
    /// Attribute row comes from persisted variants
    AttributeRowLocked = 6304,
    /// Attribute accepts a single value only
    AttributeSingleSelect = 6305,
    /// Variant not found in the working set
    VariantNotFound = 6401,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::TokenExpired => "Authentication token has expired",

            ErrorCode::PermissionDenied => "Permission denied",

            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryGroupInUse => "Category is already selected in another row",
            ErrorCode::CategoryRowLimit => "All categories are already selected",
            ErrorCode::CategoryRowProtected => "Category row cannot be removed",
            ErrorCode::CategorySelectionRequired => "Category level is required",
            ErrorCode::CategoryOptionInvalid => "Category is not selectable at this level",
            ErrorCode::FabricCompositionInvalid => {
                "Total composition percentage must be 100% when fabric content is provided"
            }
            ErrorCode::FabricMaterialInUse => "Fabric is already used in another row",
            ErrorCode::FabricCombinationNotFound => "Fabric combination not found",
            ErrorCode::AttributeNotFound => "Variant attribute not found",
            ErrorCode::AttributeInUse => "Variant attribute is already selected in another row",
            ErrorCode::AttributeRowLimit => "All variant attributes are already selected",
            ErrorCode::AttributeRowLocked => "Variant attribute is part of saved variants",
            ErrorCode::AttributeSingleSelect => "Variant attribute accepts a single value",
            ErrorCode::VariantNotFound => "Variant not found",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryGroupInUse),
            6103 => Ok(ErrorCode::CategoryRowLimit),
            6104 => Ok(ErrorCode::CategoryRowProtected),
            6105 => Ok(ErrorCode::CategorySelectionRequired),
            6106 => Ok(ErrorCode::CategoryOptionInvalid),
            6201 => Ok(ErrorCode::FabricCompositionInvalid),
            6202 => Ok(ErrorCode::FabricMaterialInUse),
            6203 => Ok(ErrorCode::FabricCombinationNotFound),
            6301 => Ok(ErrorCode::AttributeNotFound),
            6302 => Ok(ErrorCode::AttributeInUse),
            6303 => Ok(ErrorCode::AttributeRowLimit),
            6304 => Ok(ErrorCode::AttributeRowLocked),
            6305 => Ok(ErrorCode::AttributeSingleSelect),
            6401 => Ok(ErrorCode::VariantNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::CategoryNotFound.code(), 6101);
        assert_eq!(ErrorCode::FabricCompositionInvalid.code(), 6201);
        assert_eq!(ErrorCode::AttributeRowLocked.code(), 6304);
        assert_eq!(ErrorCode::NetworkError.code(), 9003);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::RequiredField,
            ErrorCode::TokenExpired,
            ErrorCode::CategoryGroupInUse,
            ErrorCode::CategoryOptionInvalid,
            ErrorCode::FabricCombinationNotFound,
            ErrorCode::AttributeSingleSelect,
            ErrorCode::VariantNotFound,
            ErrorCode::ConfigError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_invalid_code() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
        assert_eq!(
            InvalidErrorCode(4242).to_string(),
            "invalid error code: 4242"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::CategoryNotFound).unwrap();
        assert_eq!(json, "6101");
        let code: ErrorCode = serde_json::from_str("6203").unwrap();
        assert_eq!(code, ErrorCode::FabricCombinationNotFound);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::ValidationFailed.is_success());
    }
}
