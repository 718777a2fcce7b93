//! Mapping of HTTP outcomes onto the storefront error taxonomy.

use http::StatusCode;
use shelf_commerce::CommerceError;
use shelf_data::{FetchError, Response};

/// Which call a failure came from; some statuses mean different things
/// on different endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Login,
    Checkout,
    Other,
}

/// Turn a non-2xx response into a `CommerceError`.
///
/// `what` names the resource for `NotFound`, e.g. `"Book 12"`.
pub(crate) fn error_for_response(
    response: &Response,
    endpoint: Endpoint,
    what: &str,
) -> CommerceError {
    let message = response
        .error_message()
        .unwrap_or_else(|| response.status_code().to_string());
    error_for_status(response.status_code(), endpoint, what, message)
}

pub(crate) fn error_for_status(
    status: StatusCode,
    endpoint: Endpoint,
    what: &str,
    message: String,
) -> CommerceError {
    match (endpoint, status) {
        (Endpoint::Login, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) => {
            CommerceError::ValidationFailed("Invalid email or password".to_string())
        }
        (_, StatusCode::UNAUTHORIZED) => CommerceError::Unauthorized,
        (Endpoint::Checkout, StatusCode::BAD_REQUEST | StatusCode::CONFLICT) => {
            CommerceError::InsufficientStock(message)
        }
        (
            _,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY,
        ) => CommerceError::ValidationFailed(message),
        (_, StatusCode::NOT_FOUND) => CommerceError::NotFound(what.to_string()),
        (_, status) => CommerceError::NetworkOrServer(format!("{}: {}", status, message)),
    }
}

/// Map a transport-level failure.
pub(crate) fn error_for_fetch(error: FetchError, endpoint: Endpoint, what: &str) -> CommerceError {
    match error {
        FetchError::HttpError { status, message } => error_for_status(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            endpoint,
            what,
            message,
        ),
        FetchError::ParseError(e) | FetchError::JsonError(e) => CommerceError::Serialization(e),
        other => CommerceError::NetworkOrServer(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, endpoint: Endpoint) -> CommerceError {
        error_for_status(
            StatusCode::from_u16(code).unwrap(),
            endpoint,
            "Book 1",
            "msg".to_string(),
        )
    }

    #[test]
    fn test_checkout_conflicts_are_stock_errors() {
        assert_eq!(
            status(409, Endpoint::Checkout),
            CommerceError::InsufficientStock("msg".into())
        );
        assert_eq!(
            status(400, Endpoint::Checkout),
            CommerceError::InsufficientStock("msg".into())
        );
        assert_eq!(
            status(422, Endpoint::Checkout),
            CommerceError::ValidationFailed("msg".into())
        );
    }

    #[test]
    fn test_other_client_errors() {
        assert_eq!(status(409, Endpoint::Other), CommerceError::ValidationFailed("msg".into()));
        assert_eq!(status(401, Endpoint::Other), CommerceError::Unauthorized);
        assert_eq!(status(401, Endpoint::Checkout), CommerceError::Unauthorized);
        assert_eq!(status(404, Endpoint::Other), CommerceError::NotFound("Book 1".into()));
    }

    #[test]
    fn test_login_rejection_is_not_session_expiry() {
        assert!(matches!(
            status(401, Endpoint::Login),
            CommerceError::ValidationFailed(_)
        ));
    }

    #[test]
    fn test_server_errors() {
        assert!(matches!(
            status(500, Endpoint::Checkout),
            CommerceError::NetworkOrServer(_)
        ));
        assert!(matches!(
            status(403, Endpoint::Other),
            CommerceError::NetworkOrServer(_)
        ));
    }

    #[test]
    fn test_fetch_errors() {
        assert!(matches!(
            error_for_fetch(FetchError::Timeout, Endpoint::Other, "x"),
            CommerceError::NetworkOrServer(_)
        ));
        assert!(matches!(
            error_for_fetch(FetchError::ParseError("eof".into()), Endpoint::Other, "x"),
            CommerceError::Serialization(_)
        ));
        assert_eq!(
            error_for_fetch(
                FetchError::HttpError {
                    status: 409,
                    message: "sold out".into()
                },
                Endpoint::Checkout,
                "x"
            ),
            CommerceError::InsufficientStock("sold out".into())
        );
    }

    #[test]
    fn test_response_message_used() {
        let response = Response::json_body(409, &serde_json::json!({"message": "Stok habis"}));
        assert_eq!(
            error_for_response(&response, Endpoint::Checkout, "Transaction"),
            CommerceError::InsufficientStock("Stok habis".into())
        );
    }
}
