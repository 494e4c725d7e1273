use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::cep::mapper::{NotFoundReason, Outcome};

/// Which route produced an outcome; selects the caller-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    PostalCode,
    Address,
}

impl Lookup {
    fn not_found_message(self, reason: NotFoundReason) -> &'static str {
        match (self, reason) {
            (Lookup::PostalCode, NotFoundReason::ErrorFlag) => "Postal code not found.",
            (Lookup::PostalCode, _) => "CEP not found.",
            (Lookup::Address, _) => "Address not found.",
        }
    }

    fn upstream_message(self) -> &'static str {
        match self {
            Lookup::PostalCode => "Error when searching the postal code.",
            Lookup::Address => "Error when searching the address.",
        }
    }

    fn transport_message(self) -> &'static str {
        match self {
            Lookup::PostalCode => "Error connecting to the CEP service.",
            Lookup::Address => "Error connecting to the address service.",
        }
    }
}

/// Body of every non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new<M: Into<String>>(message: M) -> Self {
        ErrorBody { message: message.into(), details: None }
    }

    pub fn with_details<M: Into<String>>(message: M, details: String) -> Self {
        ErrorBody { message: message.into(), details: Some(details) }
    }
}

pub fn respond(lookup: Lookup, outcome: Outcome) -> HttpResponse {
    match outcome {
        Outcome::Success(record) => HttpResponse::Ok().json(record),
        Outcome::SuccessList(records) => HttpResponse::Ok().json(records),
        Outcome::NotFound(reason) => {
            debug!("{:?} lookup not found: {:?}", lookup, reason);
            HttpResponse::NotFound().json(ErrorBody::new(lookup.not_found_message(reason)))
        },
        Outcome::ValidationFailed(err) => {
            debug!("{:?} lookup rejected: {}", lookup, err);
            HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()))
        },
        Outcome::UpstreamFailed(status) => {
            warn!("{:?} lookup failed upstream with status {}", lookup, status);
            // Statuses outside what an HTTP response can carry become 502.
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(status).json(ErrorBody::new(lookup.upstream_message()))
        },
        Outcome::TransportFailed(details) => {
            error!("{:?} lookup could not reach upstream: {}", lookup, details);
            HttpResponse::InternalServerError()
                .json(ErrorBody::with_details(lookup.transport_message(), details))
        },
    }
}
