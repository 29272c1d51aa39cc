//! Shared response types for API handlers.
//!
//! JSON responses use a `{ "data": ... }` envelope. Form submissions answer
//! with redirects, mirroring a classic post/redirect/get flow.

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A `302 Found` redirect.
///
/// `axum::response::Redirect` only offers 303/307/308; the terms gate keeps
/// the classic 302.
pub fn found(location: &str) -> Response {
    redirect(StatusCode::FOUND, location)
}

/// A `303 See Other` redirect.
///
/// Unlike `Redirect::to`, this never panics on a location that is not a
/// valid header value.
pub fn see_other(location: &str) -> Response {
    redirect(StatusCode::SEE_OTHER, location)
}

/// Targets that are not valid header values fall back to `/`.
fn redirect(status: StatusCode, location: &str) -> Response {
    let location = HeaderValue::from_str(location).unwrap_or(HeaderValue::from_static("/"));
    (status, [(LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_of(response: &Response) -> &str {
        response.headers()[LOCATION].to_str().unwrap()
    }

    #[test]
    fn redirects_carry_status_and_location() {
        let response = found("/job/1");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location_of(&response), "/job/1");

        let response = see_other("/user/foo");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/user/foo");
    }

    #[test]
    fn invalid_header_value_falls_back_to_root() {
        let response = see_other("/user/a\u{1}b");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/");
    }
}
