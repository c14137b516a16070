use super::ProblemDetailsMiddleware;
use crate::config::ProblemDetailsConfig;
use crate::fault::{FaultClass, FaultTranslator, InternalServerErrorTranslator};
use crate::response::{DefaultResponseFactory, ResponseFactory};
use std::sync::Arc;

/// Builder for [`ProblemDetailsMiddleware`]
///
/// Without any [`intercept`](Self::intercept) call the allow-list is
/// `[FaultClass::any()]`, so every fault is translated.
///
/// # Example
/// ```
/// use problemstra::prelude::*;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("payment declined")]
/// struct PaymentDeclined;
///
/// let middleware = ProblemDetailsMiddleware::builder()
///     .intercept(FaultClass::of::<PaymentDeclined>())
///     .only_on_json_requests(false)
///     .build();
///
/// assert_eq!(middleware.fault_classes().len(), 1);
/// ```
pub struct ProblemDetailsMiddlewareBuilder {
    response_factory: Arc<dyn ResponseFactory>,
    translator: Arc<dyn FaultTranslator>,
    fault_classes: Vec<FaultClass>,
    config: ProblemDetailsConfig,
}

impl ProblemDetailsMiddlewareBuilder {
    pub fn new() -> Self {
        Self {
            response_factory: Arc::new(DefaultResponseFactory),
            translator: Arc::new(InternalServerErrorTranslator),
            fault_classes: Vec::new(),
            config: ProblemDetailsConfig::default(),
        }
    }

    pub fn response_factory(mut self, factory: impl ResponseFactory) -> Self {
        self.response_factory = Arc::new(factory);
        self
    }

    pub fn translator(mut self, translator: impl FaultTranslator) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Append a class to the allow-list. Order is kept.
    pub fn intercept(mut self, class: FaultClass) -> Self {
        self.fault_classes.push(class);
        self
    }

    pub fn only_on_json_requests(mut self, enabled: bool) -> Self {
        self.config.only_on_json_requests = enabled;
        self
    }

    pub fn config(mut self, config: ProblemDetailsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ProblemDetailsMiddleware {
        let fault_classes = if self.fault_classes.is_empty() {
            vec![FaultClass::any()]
        } else {
            self.fault_classes
        };

        ProblemDetailsMiddleware {
            response_factory: self.response_factory,
            translator: self.translator,
            fault_classes: fault_classes.into(),
            only_on_json_requests: self.config.only_on_json_requests,
        }
    }
}

impl Default for ProblemDetailsMiddlewareBuilder {
    fn default() -> Self {
        Self::new()
    }
}
