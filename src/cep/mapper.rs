//! Turns raw upstream exchanges into an [`Outcome`].
//!
//! ViaCEP reports a missing postal code in several shapes (an `erro` flag
//! object, a record with a blank `cep`, an empty list), so each mapping is an
//! ordered chain of probes. The first probe that recognises the response
//! decides the outcome.

use crate::cep::client::{RawResponse, TransportError};
use crate::cep::models::{parse_upstream, parse_upstream_object, PostalRecord, UpstreamErrorFlag};
use crate::cep::validation::ValidationError;
use crate::utils::BlankExtension;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The upstream answered with its `{"erro": true}` sentinel.
    ErrorFlag,
    /// A record came back but its postal code is blank.
    BlankPostalCode,
    /// The body is not the expected record or list.
    UnreadablePayload,
    /// The address search matched nothing.
    EmptyList,
}

/// Everything a lookup can end in. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(PostalRecord),
    SuccessList(Vec<PostalRecord>),
    NotFound(NotFoundReason),
    ValidationFailed(ValidationError),
    UpstreamFailed(u16),
    TransportFailed(String),
}

impl From<ValidationError> for Outcome {
    fn from(error: ValidationError) -> Self {
        Outcome::ValidationFailed(error)
    }
}

impl From<TransportError> for Outcome {
    fn from(error: TransportError) -> Self {
        Outcome::TransportFailed(error.details())
    }
}

pub fn map_single(raw: &RawResponse) -> Outcome {
    upstream_status(raw)
        .or_else(|| error_flag(&raw.body))
        .unwrap_or_else(|| single_record(&raw.body))
}

pub fn map_list(raw: &RawResponse) -> Outcome {
    upstream_status(raw)
        .unwrap_or_else(|| record_list(&raw.body))
}

fn upstream_status(raw: &RawResponse) -> Option<Outcome> {
    if raw.is_success() {
        None
    } else {
        Some(Outcome::UpstreamFailed(raw.status))
    }
}

fn error_flag(body: &str) -> Option<Outcome> {
    parse_upstream_object::<UpstreamErrorFlag>(body)
        .ok()
        .filter(|flag| flag.erro)
        .map(|_| Outcome::NotFound(NotFoundReason::ErrorFlag))
}

fn single_record(body: &str) -> Outcome {
    match parse_upstream_object::<PostalRecord>(body) {
        Err(_) => Outcome::NotFound(NotFoundReason::UnreadablePayload),
        Ok(record) if record.postal_code.is_blank() => {
            Outcome::NotFound(NotFoundReason::BlankPostalCode)
        }
        Ok(record) => Outcome::Success(record),
    }
}

fn record_list(body: &str) -> Outcome {
    match parse_upstream::<Vec<PostalRecord>>(body) {
        Err(_) => Outcome::NotFound(NotFoundReason::UnreadablePayload),
        Ok(records) if records.is_empty() => Outcome::NotFound(NotFoundReason::EmptyList),
        Ok(records) => Outcome::SuccessList(records),
    }
}
