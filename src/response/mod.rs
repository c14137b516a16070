use axum::{body::Body, http::StatusCode, response::Response};

/// Creates fresh outbound responses for the problem details middleware.
///
/// Every call must return a new response. The middleware overwrites the body,
/// restates the status and sets the content type afterwards.
pub trait ResponseFactory: Send + Sync + 'static {
    fn create_response(&self, status: StatusCode) -> Response;
}

/// Empty-bodied axum responses
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResponseFactory;

impl ResponseFactory for DefaultResponseFactory {
    fn create_response(&self, status: StatusCode) -> Response {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = status;
        response
    }
}
