//! Known application error codes
//!
//! The remote service reports errors as numeric codes inside the response
//! envelope. This module names every code the client reacts to:
//! - 10xx: user / forum / permission errors
//! - 11xx: listing, competition and follow errors
//! - `-1`: synthetic transport-failure code, reserved for the client and
//!   distinct from every server-assigned value

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known application error code
///
/// Codes are carried as `i32` values for direct comparison with the wire
/// envelope. Unknown codes are not representable here on purpose; callers
/// keep the raw value and fall back to the server-supplied message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum ErrorCode {
    /// Operation completed successfully
    Success = 0,
    /// Transport failure (no usable response); client-synthesized
    Network = -1,

    // ==================== 10xx: users / forum ====================
    /// Target user does not exist
    UserNotFound = 1021,
    /// Post title exceeds the allowed length
    TitleTooLong = 1022,
    /// Requested post page is past the last page
    PostPageOutOfRange = 1023,
    /// Reporting user does not exist
    ReporterNotFound = 1025,
    /// Requested report page is past the last page
    ReportPageOutOfRange = 1028,
    /// Post does not exist
    PostNotFound = 1029,
    /// Operation requires a permission the user does not hold
    PermissionDenied = 1030,
    /// Report target type is not reportable
    BadReportTarget = 1031,
    /// Reported object no longer exists
    ReportedObjectNotFound = 1032,
    /// Comment does not exist
    CommentNotFound = 1035,

    // ==================== 11xx: competitions ====================
    /// Cursor is past the last item (no more results)
    NoMoreResults = 1100,
    /// Competition does not exist
    CompetitionNotFound = 1101,
    /// Competition is already in the user's followed set
    AlreadyFollowing = 1106,
    /// Competition is not in the user's followed set
    NotFollowing = 1108,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> i32 {
        *self as i32
    }

    /// Check if this is the success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Whether this code is an explicit "past the end of the list" signal
    /// for a paginated endpoint
    #[inline]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ErrorCode::NoMoreResults
                | ErrorCode::PostPageOutOfRange
                | ErrorCode::ReportPageOutOfRange
        )
    }

    /// Get the user-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Network => "Network error, please try again",

            ErrorCode::UserNotFound => "User does not exist",
            ErrorCode::TitleTooLong => "Title is too long",
            ErrorCode::PostPageOutOfRange => "Page number is out of range",
            ErrorCode::ReporterNotFound => "Reporting user does not exist",
            ErrorCode::ReportPageOutOfRange => "Report page is out of range",
            ErrorCode::PostNotFound => "Post does not exist",
            ErrorCode::PermissionDenied => "No permission for this operation",
            ErrorCode::BadReportTarget => "This content cannot be reported",
            ErrorCode::ReportedObjectNotFound => "Reported content no longer exists",
            ErrorCode::CommentNotFound => "Comment does not exist",

            ErrorCode::NoMoreResults => "No more results",
            ErrorCode::CompetitionNotFound => "Competition does not exist",
            ErrorCode::AlreadyFollowing => "Already following this competition",
            ErrorCode::NotFollowing => "Not following this competition",
        }
    }
}

impl From<ErrorCode> for i32 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting an unrecognized i32 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownErrorCode(pub i32);

impl fmt::Display for UnknownErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code: {}", self.0)
    }
}

impl std::error::Error for UnknownErrorCode {}

impl TryFrom<i32> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            -1 => Ok(ErrorCode::Network),

            1021 => Ok(ErrorCode::UserNotFound),
            1022 => Ok(ErrorCode::TitleTooLong),
            1023 => Ok(ErrorCode::PostPageOutOfRange),
            1025 => Ok(ErrorCode::ReporterNotFound),
            1028 => Ok(ErrorCode::ReportPageOutOfRange),
            1029 => Ok(ErrorCode::PostNotFound),
            1030 => Ok(ErrorCode::PermissionDenied),
            1031 => Ok(ErrorCode::BadReportTarget),
            1032 => Ok(ErrorCode::ReportedObjectNotFound),
            1035 => Ok(ErrorCode::CommentNotFound),

            1100 => Ok(ErrorCode::NoMoreResults),
            1101 => Ok(ErrorCode::CompetitionNotFound),
            1106 => Ok(ErrorCode::AlreadyFollowing),
            1108 => Ok(ErrorCode::NotFollowing),

            _ => Err(UnknownErrorCode(value)),
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
        assert_eq!(ErrorCode::Network.code(), -1);
        assert_eq!(ErrorCode::UserNotFound.code(), 1021);
        assert_eq!(ErrorCode::TitleTooLong.code(), 1022);
        assert_eq!(ErrorCode::PostPageOutOfRange.code(), 1023);
        assert_eq!(ErrorCode::ReporterNotFound.code(), 1025);
        assert_eq!(ErrorCode::ReportPageOutOfRange.code(), 1028);
        assert_eq!(ErrorCode::PostNotFound.code(), 1029);
        assert_eq!(ErrorCode::PermissionDenied.code(), 1030);
        assert_eq!(ErrorCode::BadReportTarget.code(), 1031);
        assert_eq!(ErrorCode::ReportedObjectNotFound.code(), 1032);
        assert_eq!(ErrorCode::CommentNotFound.code(), 1035);
        assert_eq!(ErrorCode::NoMoreResults.code(), 1100);
        assert_eq!(ErrorCode::CompetitionNotFound.code(), 1101);
        assert_eq!(ErrorCode::AlreadyFollowing.code(), 1106);
        assert_eq!(ErrorCode::NotFollowing.code(), 1108);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Network.is_success());
        assert!(!ErrorCode::PermissionDenied.is_success());
    }

    #[test]
    fn test_is_out_of_range() {
        assert!(ErrorCode::NoMoreResults.is_out_of_range());
        assert!(ErrorCode::PostPageOutOfRange.is_out_of_range());
        assert!(ErrorCode::ReportPageOutOfRange.is_out_of_range());
        assert!(!ErrorCode::CompetitionNotFound.is_out_of_range());
        assert!(!ErrorCode::Success.is_out_of_range());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(-1), Ok(ErrorCode::Network));
        assert_eq!(ErrorCode::try_from(1030), Ok(ErrorCode::PermissionDenied));
        assert_eq!(ErrorCode::try_from(1100), Ok(ErrorCode::NoMoreResults));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(UnknownErrorCode(999)));
        assert_eq!(ErrorCode::try_from(1024), Err(UnknownErrorCode(1024)));
        assert_eq!(ErrorCode::try_from(-2), Err(UnknownErrorCode(-2)));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(serde_json::to_string(&ErrorCode::Network).unwrap(), "-1");
        assert_eq!(
            serde_json::to_string(&ErrorCode::NoMoreResults).unwrap(),
            "1100"
        );
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("1101").unwrap();
        assert_eq!(code, ErrorCode::CompetitionNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("4242");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::NotFollowing), "1108");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::UserNotFound.message(), "User does not exist");
        assert_eq!(ErrorCode::NoMoreResults.message(), "No more results");
    }
}
