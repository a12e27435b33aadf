//! HTTP endpoint accepting delimited-text payloads.
//!
//! `POST /` and `POST /append` take the payload from the body, or from a
//! `csvData` form/query field, and answer with a JSON object that is either
//! `{"success": true, "message": ...}` or `{"success": false, "error": ...}`.
//! Each payload runs on a blocking worker; requests are not serialized
//! against each other.

use crate::constants::{CSV_DATA_FIELD, DELIMITER_FIELD};
use crate::error::{AppendError, Result};
use crate::processor::AppendProcessor;
use crate::request::{InboundRequest, extract_payload};
use crate::store::TabularStore;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Query, Request, State};
use axum::http::{HeaderValue, Method};
use axum::http::header::CONTENT_TYPE;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// JSON body returned for every append request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AppendResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Router serving the append endpoint
pub fn router<S: TabularStore + 'static>(processor: Arc<AppendProcessor<S>>) -> Router {
    Router::new()
        .route("/", post(handle_append::<S>))
        .route("/append", post(handle_append::<S>))
        .with_state(processor)
}

/// Bind to `bind_address` and serve until Ctrl+C
pub async fn serve<S: TabularStore + 'static>(
    processor: AppendProcessor<S>,
    bind_address: &str,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(processor)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn handle_append<S: TabularStore + 'static>(
    State(processor): State<Arc<AppendProcessor<S>>>,
    request: Request,
) -> Json<AppendResponse> {
    let response = match run_append(processor, request).await {
        Ok(message) => AppendResponse::ok(message),
        Err(e) => {
            error!("Append request failed: {}", e);
            AppendResponse::failure(e.to_string())
        }
    };
    Json(response)
}

async fn run_append<S: TabularStore + 'static>(
    processor: Arc<AppendProcessor<S>>,
    request: Request,
) -> Result<String> {
    let inbound = read_inbound(request).await?;
    let payload = extract_payload(&inbound)?;
    debug!("Received payload of {} bytes", payload.len());
    let delimiter = match inbound.parameters.get(DELIMITER_FIELD) {
        Some(value) => parse_delimiter(value)?,
        None => processor.config().delimiter,
    };

    let outcome = tokio::task::spawn_blocking(move || {
        processor.append_with_delimiter(&payload, delimiter)
    })
    .await
    .map_err(|e| AppendError::storage_write(format!("Append task failed: {}", e)))??;

    Ok(outcome.message())
}

/// Collect query parameters, form fields and the raw body
///
/// A form-typed body that carries a `csvData` field is used only for its
/// fields. Any other form-typed body is kept as the raw payload, since
/// `curl -d` labels plain text that way.
async fn read_inbound(request: Request) -> Result<InboundRequest> {
    let query = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .map(|Query(query)| query)
        .unwrap_or_default();

    let is_form = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| AppendError::invalid_request(e.body_text()))?;

    if is_form {
        let fields = read_form_fields(body.clone()).await;
        if fields
            .get(CSV_DATA_FIELD)
            .is_some_and(|value| !value.is_empty())
        {
            return Ok(InboundRequest::default()
                .with_parameters(query)
                .with_parameters(fields));
        }
        debug!("Form body has no {} field, using it as raw payload", CSV_DATA_FIELD);
    }

    Ok(InboundRequest::from_body(&body).with_parameters(query))
}

/// Decode a form-encoded body; an undecodable body yields no fields
async fn read_form_fields(body: Bytes) -> HashMap<String, String> {
    let mut request: Request = Request::new(Body::from(body));
    *request.method_mut() = Method::POST;
    request
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

    match Form::<HashMap<String, String>>::from_request(request, &()).await {
        Ok(Form(fields)) => fields,
        Err(e) => {
            debug!("Could not decode form body: {}", e.body_text());
            HashMap::new()
        }
    }
}

fn parse_delimiter(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(AppendError::invalid_request(
            "Delimiter must be a single character",
        )),
    }
}
