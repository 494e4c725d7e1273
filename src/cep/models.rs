use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An address as returned by ViaCEP. Field names on the wire are the
/// upstream's Portuguese ones, both when reading and when answering callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalRecord {
    #[serde(rename = "cep", default, deserialize_with = "null_as_empty")]
    pub postal_code: String,
    #[serde(rename = "logradouro", default, deserialize_with = "null_as_empty")]
    pub street: String,
    #[serde(rename = "complemento", default, deserialize_with = "null_as_empty")]
    pub complement: String,
    #[serde(rename = "bairro", default, deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    #[serde(rename = "localidade", default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(rename = "uf", default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(rename = "ibge", default, deserialize_with = "null_as_empty")]
    pub ibge_code: String,
    #[serde(rename = "gia", default, deserialize_with = "null_as_empty")]
    pub gia_code: String,
    #[serde(rename = "ddd", default, deserialize_with = "null_as_empty")]
    pub ddd_code: String,
    #[serde(rename = "siafi", default, deserialize_with = "null_as_empty")]
    pub siafi_code: String,
}

/// The `{"erro": true}` object ViaCEP answers with for unknown postal codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct UpstreamErrorFlag {
    #[serde(default, deserialize_with = "flag_from_bool_or_text")]
    pub erro: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostalCodeQuery {
    pub cep: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressQuery {
    pub uf: String,
    pub cidade: String,
    pub logradouro: String,
}

/// Deserializes an upstream body, matching object keys case-insensitively.
pub fn parse_upstream<T: DeserializeOwned>(body: &str) -> serde_json::Result<T> {
    let value: Value = serde_json::from_str(body)?;
    serde_json::from_value(lowercase_keys(value))
}

/// Like [`parse_upstream`], but only accepts a top-level JSON object. Serde
/// would otherwise read a struct out of an array positionally.
pub fn parse_upstream_object<T: DeserializeOwned>(body: &str) -> serde_json::Result<T> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(lowercase_keys(value))
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key.to_lowercase(), lowercase_keys(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// Older ViaCEP deployments send a boolean, newer ones the string "true".
// Reading the text form as set means such bodies answer "Postal code not
// found." where a strict boolean reader would fall through to "CEP not found.".
fn flag_from_bool_or_text<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    };
    Ok(flag)
}
