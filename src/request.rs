//! Inbound request normalization.
//!
//! Reduces the shapes a payload can arrive in to one raw text string for
//! the pipeline. Sources are tried in order: the request body as UTF-8, the
//! `csvData` form or query field, then the body decoded lossily.

use crate::constants::CSV_DATA_FIELD;
use crate::error::{AppendError, Result};
use crate::parser::trim_text;
use std::collections::HashMap;
use tracing::debug;

/// Transport-independent view of an inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest {
    /// Raw body, present only when it is valid UTF-8
    pub contents: Option<String>,
    /// Query string and form fields
    pub parameters: HashMap<String, String>,
    /// Raw body with invalid UTF-8 sequences replaced
    pub body_lossy: Option<String>,
}

impl InboundRequest {
    /// Build a request from raw body bytes; an empty body counts as absent
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        Self {
            contents: std::str::from_utf8(body).ok().map(str::to_string),
            parameters: HashMap::new(),
            body_lossy: Some(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Add query or form parameters; later values replace earlier ones
    pub fn with_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.parameters.extend(parameters);
        self
    }
}

/// Pick the payload out of a request
///
/// Fails with [`AppendError::NoPayload`] when no source has content and with
/// [`AppendError::EmptyInput`] when the chosen payload is blank.
pub fn extract_payload(request: &InboundRequest) -> Result<String> {
    let payload = if let Some(contents) = request.contents.as_ref().filter(|c| !c.is_empty()) {
        debug!("Using request body as payload");
        contents.clone()
    } else if let Some(field) = request
        .parameters
        .get(CSV_DATA_FIELD)
        .filter(|f| !f.is_empty())
    {
        debug!("Using {} field as payload", CSV_DATA_FIELD);
        field.clone()
    } else if let Some(body) = &request.body_lossy {
        debug!("Using lossily decoded body as payload");
        body.clone()
    } else {
        debug!("Received request without payload: {:?}", request);
        return Err(AppendError::NoPayload);
    };

    if trim_text(&payload).is_empty() {
        return Err(AppendError::EmptyInput);
    }

    Ok(payload)
}
