use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::utils::BlankExtension;

lazy_static! {
    static ref POSTAL_CODE_PATTERN: Regex =
        Regex::new(r"^[0-9]{5}-[0-9]{3}$").expect("Could not create postal code regex");
    static ref STATE_PATTERN: Regex =
        Regex::new(r"^[A-Z]{2}$").expect("Could not create state regex");
}

/// Reasons a query is rejected before the upstream is contacted. The
/// display text is the message returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CEP is required.")]
    PostalCodeRequired,
    #[error("CEP must be in the format 00000-000.")]
    PostalCodeFormat,
    #[error("State, city, and street are required.")]
    AddressRequired,
    #[error("The state must be a valid two-letter abbreviation.")]
    StateFormat,
    #[error("City and street cannot be '.' or '..'.")]
    DotSegment,
}

/// Syntax checks for path parameters. Holds its patterns so they can be
/// swapped per instance; `Validator::default()` uses the CEP/UF formats.
#[derive(Debug, Clone)]
pub struct Validator {
    postal_code: Regex,
    state: Regex,
}

impl Validator {
    pub fn new(postal_code: Regex, state: Regex) -> Self {
        Validator { postal_code, state }
    }

    pub fn validate_postal_code(&self, input: &str) -> Result<(), ValidationError> {
        if input.is_blank() {
            return Err(ValidationError::PostalCodeRequired);
        }
        if !self.postal_code.is_match(input) {
            return Err(ValidationError::PostalCodeFormat);
        }
        Ok(())
    }

    pub fn validate_address_query(
        &self,
        state: &str,
        city: &str,
        street: &str
    ) -> Result<(), ValidationError> {
        if state.is_blank() || city.is_blank() || street.is_blank() {
            return Err(ValidationError::AddressRequired);
        }
        if !self.state.is_match(state) {
            return Err(ValidationError::StateFormat);
        }
        // URL parsers collapse these (even as %2E) so the upstream path would
        // lose a segment.
        if is_dot_segment(city) || is_dot_segment(street) {
            return Err(ValidationError::DotSegment);
        }
        Ok(())
    }
}

pub fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(POSTAL_CODE_PATTERN.clone(), STATE_PATTERN.clone())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("01001-000")]
    #[case("00000-000")]
    #[case("99999-999")]
    fn accepts_well_formed_postal_codes(#[case] input: &str) {
        assert_eq!(Validator::default().validate_postal_code(input), Ok(()));
    }

    #[rstest]
    #[case("abc")]
    #[case("01001000")]
    #[case("01001-00")]
    #[case("1001-000")]
    #[case("01001-0000")]
    #[case(" 01001-000")]
    #[case("01001-000\n")]
    #[case("0100a-000")]
    #[case("01001_000")]
    #[case("٠١٠٠١-٠٠٠")]
    fn rejects_malformed_postal_codes(#[case] input: &str) {
        assert_eq!(
            Validator::default().validate_postal_code(input),
            Err(ValidationError::PostalCodeFormat)
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_postal_code_is_required_error(#[case] input: &str) {
        assert_eq!(
            Validator::default().validate_postal_code(input),
            Err(ValidationError::PostalCodeRequired)
        );
    }

    #[rstest]
    #[case("SP")]
    #[case("RJ")]
    #[case("DF")]
    fn accepts_two_letter_states(#[case] state: &str) {
        assert_eq!(
            Validator::default().validate_address_query(state, "Sao Paulo", "Praça"),
            Ok(())
        );
    }

    #[rstest]
    #[case("sp")]
    #[case("S")]
    #[case("SPX")]
    #[case("S1")]
    #[case("ÉS")]
    fn rejects_other_states(#[case] state: &str) {
        assert_eq!(
            Validator::default().validate_address_query(state, "Sao Paulo", "Praça"),
            Err(ValidationError::StateFormat)
        );
    }

    #[rstest]
    #[case("", "Sao Paulo", "Praça")]
    #[case("SP", " ", "Praça")]
    #[case("SP", "Sao Paulo", "")]
    #[case("  ", "", "")]
    fn blank_address_parts_fail_before_state_check(
        #[case] state: &str,
        #[case] city: &str,
        #[case] street: &str
    ) {
        assert_eq!(
            Validator::default().validate_address_query(state, city, street),
            Err(ValidationError::AddressRequired)
        );
    }

    #[rstest]
    #[case("SP", ".", "Praça")]
    #[case("SP", "..", "Praça")]
    #[case("SP", "Sao Paulo", ".")]
    #[case("SP", "Sao Paulo", "..")]
    fn dot_only_city_or_street_is_rejected(
        #[case] state: &str,
        #[case] city: &str,
        #[case] street: &str
    ) {
        assert_eq!(
            Validator::default().validate_address_query(state, city, street),
            Err(ValidationError::DotSegment)
        );
    }

    #[rstest]
    #[case("SP", "Sao Paulo", "R. Augusta")]
    #[case("SP", "...", "Praça")]
    #[case("SP", "Sao Paulo", ".a")]
    fn dots_inside_names_are_accepted(
        #[case] state: &str,
        #[case] city: &str,
        #[case] street: &str
    ) {
        assert_eq!(Validator::default().validate_address_query(state, city, street), Ok(()));
    }

    #[test]
    fn error_messages_match_response_contract() {
        assert_eq!(ValidationError::PostalCodeRequired.to_string(), "CEP is required.");
        assert_eq!(
            ValidationError::PostalCodeFormat.to_string(),
            "CEP must be in the format 00000-000."
        );
        assert_eq!(
            ValidationError::AddressRequired.to_string(),
            "State, city, and street are required."
        );
        assert_eq!(
            ValidationError::StateFormat.to_string(),
            "The state must be a valid two-letter abbreviation."
        );
        assert_eq!(
            ValidationError::DotSegment.to_string(),
            "City and street cannot be '.' or '..'."
        );
    }

    #[test]
    fn custom_patterns_are_honoured() {
        let validator = Validator::new(
            Regex::new(r"^[0-9]{8}$").unwrap(),
            Regex::new(r"^[A-Z]{2}$").unwrap(),
        );

        assert_eq!(validator.validate_postal_code("01001000"), Ok(()));
        assert_eq!(
            validator.validate_postal_code("01001-000"),
            Err(ValidationError::PostalCodeFormat)
        );
    }
}
