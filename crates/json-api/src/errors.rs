//! Service error classes as HTTP errors.

use std::fmt::Display;

use salvo::http::StatusError;
use tracing::error;

use platter_app::errors::ErrorClass;

/// The response for a failure of `class`. Client-facing classes carry the service
/// message so callers can tell a blocked account from a stock problem; internal
/// failures are logged and answered without detail.
pub(crate) fn status_for(class: ErrorClass, error: &impl Display) -> StatusError {
    match class {
        ErrorClass::ValidationFailed => StatusError::bad_request().brief(error.to_string()),
        ErrorClass::NotFound => StatusError::not_found().brief(error.to_string()),
        ErrorClass::Forbidden => StatusError::forbidden().brief(error.to_string()),
        ErrorClass::Conflict => StatusError::conflict().brief(error.to_string()),
        ErrorClass::BlockedAccount => StatusError::locked().brief(error.to_string()),
        ErrorClass::Internal => {
            error!("request failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn every_class_has_its_own_status() {
        let cases = [
            (ErrorClass::ValidationFailed, StatusCode::BAD_REQUEST),
            (ErrorClass::NotFound, StatusCode::NOT_FOUND),
            (ErrorClass::Forbidden, StatusCode::FORBIDDEN),
            (ErrorClass::Conflict, StatusCode::CONFLICT),
            (ErrorClass::BlockedAccount, StatusCode::LOCKED),
            (ErrorClass::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (class, expected) in cases {
            assert_eq!(status_for(class, &"boom").code, expected, "class {class}");
        }
    }

    #[test]
    fn client_errors_keep_the_message() {
        let error = status_for(ErrorClass::BlockedAccount, &"your account is blocked");

        assert_eq!(error.brief, "your account is blocked");
    }

    #[test]
    fn internal_errors_hide_the_message() {
        let error = status_for(ErrorClass::Internal, &"connection reset");

        assert!(!error.brief.contains("connection reset"), "leaked: {}", error.brief);
    }
}
