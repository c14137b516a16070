//! # Problemstra
//!
//! RFC 7807 problem details for axum and tower services.
//!
//! Problemstra sits around a downstream handler and turns the faults it raises
//! into uniform `application/problem+json` responses, instead of letting every
//! handler format its own errors.
//!
//! ## Features
//!
//! - **Problem Details**: Immutable RFC 7807 value with a fixed, key-ordered JSON form
//! - **Allow-listed Interception**: Only configured fault classes are translated, the rest pass through untouched
//! - **Accept Negotiation**: Optionally intercept only requests that send `Accept: application/json`
//! - **Pluggable Translators**: Swap the fault to problem mapping with a trait object or a closure
//! - **Tower Integration**: Use the middleware as an `Interceptor` or as a `tower::Layer`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use problemstra::prelude::*;
//! use axum::{body::Body, http::Request};
//! use tower::{Layer, ServiceExt};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("Handled Exception")]
//! struct Handled;
//!
//! #[tokio::main]
//! async fn main() {
//!     let layer = ProblemDetailsMiddleware::builder()
//!         .intercept(FaultClass::of::<Handled>())
//!         .build()
//!         .into_layer();
//!
//!     let service = layer.layer(tower::service_fn(|_req: Request<Body>| async {
//!         Err::<Response, _>(Handled)
//!     }));
//!
//!     let request = Request::builder()
//!         .header("accept", "application/json")
//!         .body(Body::empty())
//!         .unwrap();
//!
//!     let response = service.oneshot(request).await.unwrap();
//!     assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
//! }
//! ```

pub mod config;
pub mod error;
pub mod fault;
pub mod interceptor;
pub mod middleware;
pub mod problem;
pub mod response;

// Re-export core types
pub use config::ProblemDetailsConfig;
pub use error::{Fault, ProblemError, ProcessError, Result};
pub use fault::{FaultClass, FaultTranslator, InternalServerErrorTranslator};
pub use middleware::{ProblemDetailsMiddleware, ProblemDetailsMiddlewareBuilder};
pub use problem::{APPLICATION_PROBLEM_JSON, ProblemDetails};
pub use response::{DefaultResponseFactory, ResponseFactory};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use problemstra::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ProblemDetailsConfig;
    pub use crate::error::{Fault, ProblemError, ProcessError};
    pub use crate::fault::{FaultClass, FaultRef, FaultTranslator, InternalServerErrorTranslator};
    pub use crate::interceptor::{Interceptor, InterceptorLayer, InterceptorResult, Next};
    pub use crate::middleware::{ProblemDetailsMiddleware, ProblemDetailsMiddlewareBuilder};
    pub use crate::problem::{ABOUT_BLANK, APPLICATION_PROBLEM_JSON, ProblemDetails};
    pub use crate::response::{DefaultResponseFactory, ResponseFactory};
    pub use async_trait::async_trait;
    pub use axum::{http::StatusCode, response::Response};
}
