use super::FaultRef;
use crate::problem::ProblemDetails;
use axum::http::StatusCode;

/// The FaultTranslator trait
///
/// Translators turn an intercepted fault into the problem details sent back
/// to the client. They must be total: every fault yields a value.
pub trait FaultTranslator: Send + Sync + 'static {
    fn translate(&self, fault: FaultRef<'_>) -> ProblemDetails;
}

impl<F> FaultTranslator for F
where
    F: Fn(FaultRef<'_>) -> ProblemDetails + Send + Sync + 'static,
{
    fn translate(&self, fault: FaultRef<'_>) -> ProblemDetails {
        self(fault)
    }
}

/// Default translator: every fault is a 500 titled with the fault's message.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalServerErrorTranslator;

impl FaultTranslator for InternalServerErrorTranslator {
    fn translate(&self, fault: FaultRef<'_>) -> ProblemDetails {
        ProblemDetails::new(StatusCode::INTERNAL_SERVER_ERROR, fault.to_string())
    }
}
