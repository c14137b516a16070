use crate::error::Fault;
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;
use tower::{Service, ServiceExt};

pub mod layer;

pub use layer::{InterceptorLayer, InterceptorMiddleware};

/// standard return type for Interceptors
pub type InterceptorResult = Result<Response, InterceptorError>;

/// A type-erased error for interceptors
pub type InterceptorError = Fault;

type BoxFuture = Pin<Box<dyn Future<Output = InterceptorResult> + Send>>;

/// Represents the next handler in the chain
pub struct Next {
    run: Box<dyn FnOnce(Request<Body>) -> BoxFuture + Send>,
}

impl Next {
    /// Create a new Next handler
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Request<Body>) -> BoxFuture + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Wrap a tower service as the end of the chain
    pub fn from_service<S>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = Response> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<Fault>,
    {
        Self::new(move |request| {
            Box::pin(async move { service.oneshot(request).await.map_err(Into::<Fault>::into) })
        })
    }

    /// Execute the next handler
    pub async fn run(self, request: Request<Body>) -> InterceptorResult {
        (self.run)(request).await
    }
}

/// The Interceptor trait
///
/// Interceptors sit around the downstream handler and decide what happens to
/// its response or fault.
///
/// # Example
/// ```
/// use problemstra::interceptor::{Interceptor, InterceptorResult, Next};
/// use problemstra::async_trait;
/// use axum::{body::Body, http::Request};
///
/// struct PassThrough;
///
/// #[async_trait]
/// impl Interceptor for PassThrough {
///     async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
///         next.run(request).await
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult;
}
