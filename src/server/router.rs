//! Request Router
//!
//! Maps requests onto the health service and normalizes every failure into
//! an HTTP response. Handler errors keep their endpoint-specific bodies;
//! panics and serialization failures fall through to the generic envelope.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bytes::Bytes;
use futures::FutureExt;
use http_body_util::Full;
use hyper::header::{self, HeaderName, HeaderValue};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use super::{cors, docs};
use crate::error::{ApiError, Error};
use crate::health::{HealthService, DOCS_PATH};

/// Response type produced by the router
pub type HttpResponse = Response<Full<Bytes>>;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Known routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Banner,
    DetailedHealth,
    SimpleHealth,
    OpenApi,
    SwaggerUi,
    Redoc,
}

impl Route {
    fn resolve(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Banner),
            "/health" => Some(Route::DetailedHealth),
            "/health/simple" => Some(Route::SimpleHealth),
            docs::OPENAPI_PATH => Some(Route::OpenApi),
            DOCS_PATH => Some(Route::SwaggerUi),
            docs::REDOC_PATH => Some(Route::Redoc),
            _ => None,
        }
    }
}

/// HTTP front of the health service.
#[derive(Debug, Clone)]
pub struct Router {
    service: Arc<HealthService>,
}

impl Router {
    /// Create a router over a shared service instance.
    pub fn new(service: Arc<HealthService>) -> Self {
        Self { service }
    }

    /// Get the underlying service
    pub fn service(&self) -> &HealthService {
        &self.service
    }

    /// Handle one request. Never fails; every outcome is a response.
    pub async fn handle<B>(&self, req: Request<B>) -> HttpResponse {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let origin = req.headers().get(header::ORIGIN).cloned();
        let echo_origin = cors::echo_origin(&req);
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let span = info_span!("request", %method, %path, %request_id);

        let mut response = if cors::is_preflight(&req) {
            cors::preflight_response(&req)
        } else {
            AssertUnwindSafe(self.dispatch(&method, &path))
                .catch_unwind()
                .instrument(span.clone())
                .await
                .unwrap_or_else(|panic| {
                    span.in_scope(|| error!("Unhandled exception: {}", panic_message(&*panic)));
                    ApiError::Unhandled.into_response()
                })
        };

        cors::apply(response.headers_mut(), origin.as_ref(), echo_origin);
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        response
    }

    async fn dispatch(&self, method: &Method, path: &str) -> HttpResponse {
        let Some(route) = Route::resolve(path) else {
            return ApiError::NotFound.into_response();
        };
        if method != Method::GET {
            return ApiError::MethodNotAllowed.into_response();
        }

        match route {
            Route::Banner => json_response(&self.service.banner()),
            Route::DetailedHealth => match self.service.detailed_health().await {
                Ok(health) => json_response(&health),
                Err(e) => {
                    error!("Health check failed: {}", e);
                    ApiError::detailed_health(&e).into_response()
                }
            },
            Route::SimpleHealth => match self.service.simple_health() {
                Ok(health) => json_response(&health),
                Err(e) => {
                    error!("Simple health check failed: {}", e);
                    ApiError::simple_health().into_response()
                }
            },
            Route::OpenApi => json_response(docs::openapi_document()),
            Route::SwaggerUi => html_response(docs::swagger_ui_html()),
            Route::Redoc => html_response(docs::redoc_html()),
        }
    }
}

/// Serialize a value as a 200 JSON response.
fn json_response<T: Serialize>(value: &T) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut response = Response::new(Full::new(Bytes::from(body)));
            *response.status_mut() = StatusCode::OK;
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            response
        }
        Err(e) => {
            error!("Unhandled exception: {}", Error::from(e));
            ApiError::Unhandled.into_response()
        }
    }
}

fn html_response(page: String) -> HttpResponse {
    let mut response = Response::new(Full::new(Bytes::from(page)));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

// =============================================================================
// Tests
// =============================================================================
