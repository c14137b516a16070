//! Drives the problem details middleware through its tower layer, the way a
//! host server would.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use problemstra::prelude::*;
use std::convert::Infallible;
use tower::{Layer, ServiceExt};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Exception(String);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct CustomException(String);

#[derive(Debug, thiserror::Error)]
enum OrderError {
    #[error("order {0} not found")]
    NotFound(u32),
    #[error("order {0} already shipped")]
    Shipped(u32),
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn json_request() -> Request<Body> {
    Request::builder()
        .uri("/orders/1")
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn allow_listed_fault_becomes_problem_json() {
    init_tracing();

    let service = ProblemDetailsMiddleware::builder()
        .intercept(FaultClass::of::<Exception>())
        .build()
        .into_layer()
        .layer(tower::service_fn(|_req: Request<Body>| async {
            Err::<Response, _>(Exception("Handled Exception".into()))
        }));

    let response = service.oneshot(json_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    let body = body_string(response).await;
    assert!(body.contains("Handled Exception"));
    assert_eq!(
        body,
        r#"{"type":"about:blank","status":500,"title":"Handled Exception","detail":null,"instance":null}"#
    );
}

#[tokio::test]
async fn unlisted_fault_escapes_the_layer() {
    init_tracing();

    let service = ProblemDetailsMiddleware::builder()
        .intercept(FaultClass::of::<CustomException>())
        .build()
        .into_layer()
        .layer(tower::service_fn(|_req: Request<Body>| async {
            Err::<Response, _>(Exception("Unhandled Exception".into()))
        }));

    let err = service.oneshot(json_request()).await.unwrap_err();
    let exception = err.downcast_ref::<Exception>().expect("original fault type");
    assert_eq!(exception.0, "Unhandled Exception");
}

#[tokio::test]
async fn non_json_request_is_never_intercepted() {
    init_tracing();

    let service = ProblemDetailsMiddleware::default()
        .into_layer()
        .layer(tower::service_fn(|_req: Request<Body>| async {
            Err::<Response, _>(Exception("html client".into()))
        }));

    let request = Request::builder()
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let err = service.oneshot(request).await.unwrap_err();
    assert!(err.is::<Exception>());
    assert_eq!(err.to_string(), "html client");
}

#[tokio::test]
async fn successful_responses_are_untouched() {
    init_tracing();

    let service = ProblemDetailsMiddleware::default()
        .into_layer()
        .layer(tower::service_fn(|_req: Request<Body>| async {
            let mut response = Response::new(Body::from(r#"{"id":1}"#));
            *response.status_mut() = StatusCode::OK;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
            Ok::<_, Infallible>(response)
        }));

    let response = service.oneshot(json_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_string(response).await, r#"{"id":1}"#);
}

#[tokio::test]
async fn family_class_and_domain_translator() {
    init_tracing();

    let middleware = ProblemDetailsMiddleware::builder()
        .intercept(FaultClass::matching("order errors", |fault| {
            fault.is::<OrderError>()
        }))
        .translator(|fault: FaultRef<'_>| {
            let status = match fault.downcast_ref::<OrderError>() {
                Some(OrderError::NotFound(_)) => StatusCode::NOT_FOUND,
                Some(OrderError::Shipped(_)) => StatusCode::CONFLICT,
                None => StatusCode::INTERNAL_SERVER_ERROR,
            };
            ProblemDetails::new(status, fault.to_string())
                .with_type("https://example.com/probs/orders")
        })
        .build();

    let layer = middleware.into_layer();

    let not_found = layer.layer(tower::service_fn(|_req: Request<Body>| async {
        Err::<Response, _>(OrderError::NotFound(1))
    }));
    let response = not_found.oneshot(json_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_string(response).await,
        r#"{"type":"https://example.com/probs/orders","status":404,"title":"order 1 not found","detail":null,"instance":null}"#
    );

    let shipped = layer.layer(tower::service_fn(|_req: Request<Body>| async {
        Err::<Response, _>(OrderError::Shipped(2))
    }));
    let response = shipped.oneshot(json_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let other = layer.layer(tower::service_fn(|_req: Request<Body>| async {
        Err::<Response, _>(Exception("not an order error".into()))
    }));
    let err = other.oneshot(json_request()).await.unwrap_err();
    assert!(err.is::<Exception>());
}

#[tokio::test]
async fn shared_layer_serves_concurrent_requests() {
    init_tracing();

    let service = ProblemDetailsMiddleware::default()
        .into_layer()
        .layer(tower::service_fn(|req: Request<Body>| async move {
            let id = req.uri().path().trim_start_matches('/').to_owned();
            Err::<Response, _>(Exception(format!("failed {id}")))
        }));

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let request = Request::builder()
                .uri(format!("/{i}"))
                .header(header::ACCEPT, "application/json")
                .body(Body::empty())
                .unwrap();
            let response = service.oneshot(request).await.unwrap();
            (i, body_string(response).await)
        }));
    }

    for handle in handles {
        let (i, body) = handle.await.unwrap();
        let problem: ProblemDetails = serde_json::from_str(&body).unwrap();
        assert_eq!(problem.title(), format!("failed {i}"));
        assert_eq!(problem.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn config_from_lookup_disables_negotiation() {
    init_tracing();

    let config = ProblemDetailsConfig::from_lookup(|_| Some("false".to_owned())).unwrap();
    let service = ProblemDetailsMiddleware::builder()
        .config(config)
        .build()
        .into_layer()
        .layer(tower::service_fn(|_req: Request<Body>| async {
            Err::<Response, _>(Exception("no accept header".into()))
        }));

    let response = service.oneshot(Request::new(Body::empty())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_string(response).await,
        r#"{"type":"about:blank","status":500,"title":"no accept header","detail":null,"instance":null}"#
    );
}
