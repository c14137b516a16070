//! Problem details interception middleware.
//!
//! For each request the middleware decides whether downstream faults are
//! caught at all (the `Accept` negotiation gate), runs the downstream handler,
//! and for a caught fault either translates it into an
//! `application/problem+json` response or hands the original fault back.
//!
//! ```rust,no_run
//! use problemstra::prelude::*;
//! use axum::{body::Body, http::Request};
//! use tower::Layer;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("user not found")]
//! struct UserNotFound;
//!
//! let layer = ProblemDetailsMiddleware::builder()
//!     .intercept(FaultClass::of::<UserNotFound>())
//!     .build()
//!     .into_layer();
//!
//! let service = layer.layer(tower::service_fn(|_req: Request<Body>| async {
//!     Err::<Response, _>(UserNotFound)
//! }));
//! ```

use crate::config::ProblemDetailsConfig;
use crate::error::ProcessError;
use crate::fault::{FaultClass, FaultRef, FaultTranslator, InternalServerErrorTranslator};
use crate::interceptor::{Interceptor, InterceptorLayer, InterceptorResult, Next};
use crate::problem::{APPLICATION_PROBLEM_JSON, ProblemDetails};
use crate::response::{DefaultResponseFactory, ResponseFactory};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, header},
    response::Response,
};
use std::sync::Arc;

mod builder;

pub use builder::ProblemDetailsMiddlewareBuilder;

/// The only `Accept` value that counts as a JSON request.
pub const APPLICATION_JSON: &str = "application/json";

/// Converts allow-listed downstream faults into RFC 7807 responses.
///
/// All state is fixed at construction, so one instance can serve any number
/// of concurrent requests.
#[derive(Clone)]
pub struct ProblemDetailsMiddleware {
    response_factory: Arc<dyn ResponseFactory>,
    translator: Arc<dyn FaultTranslator>,
    fault_classes: Arc<[FaultClass]>,
    only_on_json_requests: bool,
}

impl Default for ProblemDetailsMiddleware {
    fn default() -> Self {
        Self::new(
            DefaultResponseFactory,
            InternalServerErrorTranslator,
            vec![FaultClass::any()],
            ProblemDetailsConfig::default().only_on_json_requests,
        )
    }
}

impl ProblemDetailsMiddleware {
    pub fn new(
        response_factory: impl ResponseFactory,
        translator: impl FaultTranslator,
        fault_classes: Vec<FaultClass>,
        only_on_json_requests: bool,
    ) -> Self {
        Self {
            response_factory: Arc::new(response_factory),
            translator: Arc::new(translator),
            fault_classes: fault_classes.into(),
            only_on_json_requests,
        }
    }

    pub fn builder() -> ProblemDetailsMiddlewareBuilder {
        ProblemDetailsMiddlewareBuilder::new()
    }

    pub fn fault_classes(&self) -> &[FaultClass] {
        &self.fault_classes
    }

    pub fn only_on_json_requests(&self) -> bool {
        self.only_on_json_requests
    }

    /// Run `next` and translate its fault if this request and fault qualify.
    ///
    /// A successful downstream response is always returned unchanged.
    /// A fault that is not intercepted comes back as
    /// [`ProcessError::Unhandled`] holding the original fault.
    pub async fn process(
        &self,
        request: Request<Body>,
        next: Next,
    ) -> Result<Response, ProcessError> {
        if !self.catches_faults_for(&request) {
            tracing::trace!("request does not accept {APPLICATION_JSON}, faults pass through");
            return next.run(request).await.map_err(ProcessError::Unhandled);
        }

        let fault = match next.run(request).await {
            Ok(response) => return Ok(response),
            Err(fault) => fault,
        };

        if !self.is_interceptable(&*fault) {
            tracing::debug!(error = %fault, "fault not in allow-list, passing through");
            return Err(ProcessError::Unhandled(fault));
        }

        let problem = self.translator.translate(&*fault);
        tracing::debug!(
            status = problem.status().as_u16(),
            title = problem.title(),
            "intercepted fault as problem details"
        );
        Ok(self.create_response(problem)?)
    }

    /// Negotiation gate: whether faults are caught for this request.
    pub fn catches_faults_for(&self, request: &Request<Body>) -> bool {
        !self.only_on_json_requests || accepts_json(request.headers())
    }

    /// Allow-list membership, first match wins.
    pub fn is_interceptable(&self, fault: FaultRef<'_>) -> bool {
        match self.fault_classes.iter().find(|class| class.matches(fault)) {
            Some(class) => {
                tracing::trace!(class = class.name(), "fault matched allow-list entry");
                true
            }
            None => false,
        }
    }

    /// Serialize `problem` into a fresh `application/problem+json` response.
    pub fn create_response(&self, problem: ProblemDetails) -> Result<Response, serde_json::Error> {
        let status = problem.status();
        let mut response = self.response_factory.create_response(status);

        let body = problem.to_json()?;
        *response.body_mut() = Body::from(body);
        *response.status_mut() = status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );

        Ok(response)
    }

    /// Wrap this middleware in a tower layer.
    pub fn into_layer(self) -> InterceptorLayer {
        InterceptorLayer::single(self)
    }
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .any(|value| value.as_bytes() == APPLICATION_JSON.as_bytes())
}

#[async_trait]
impl Interceptor for ProblemDetailsMiddleware {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        self.process(request, next)
            .await
            .map_err(ProcessError::into_fault)
    }
}
