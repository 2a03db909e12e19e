use reqwest::{Client, StatusCode, Url};
use serde_json::{json, Value};
use tracing::debug;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Fields;

// the search cluster refuses from + size beyond this window
pub(crate) const MAX_RESULT_WINDOW: usize = 10_000;

pub(crate) fn build_es_client() -> LibraryResult<Client> {
    Client::builder()
        .build()
        .map_err(|err| LibraryError::runtime(format!("failed to build http client {:?}", err).as_str(), None))
}

pub(crate) fn parse_base_url(url: &str) -> LibraryResult<Url> {
    let parsed = Url::parse(url).map_err(|err| LibraryError::validation(
        format!("invalid search cluster url {} due to {}", url, err).as_str(), None))?;
    if parsed.cannot_be_a_base() {
        return Err(LibraryError::validation(format!("search cluster url {} cannot be a base", url).as_str(), None));
    }
    Ok(parsed)
}

// appends path segments to the cluster url, percent-encoding each of them
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> LibraryResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| LibraryError::validation(format!("search cluster url {} cannot be a base", base).as_str(), None))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) async fn create_index(client: &Client, base: &Url, index_name: &str) -> LibraryResult<()> {
    let mapping = json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "isbn": { "type": "keyword" },
                "title": { "type": "text" },
                "author": { "type": "text" },
                "price": { "type": "float" }
            }
        }
    });
    let res = client.put(endpoint(base, &[index_name])?).json(&mapping).send().await?;
    let status = res.status();
    let body: Value = res.json().await?;
    if status.is_success() {
        debug!("created index {}", index_name);
        return Ok(());
    }
    if error_type(&body).as_deref() == Some("resource_already_exists_exception") {
        debug!("index {} already exists", index_name);
        return Ok(());
    }
    Err(error_from_response(format!("failed to create {} index", index_name).as_str(), status, &body))
}

#[cfg(test)]
pub(crate) async fn delete_index(client: &Client, base: &Url, index_name: &str) -> LibraryResult<()> {
    let res = client.delete(endpoint(base, &[index_name])?).send().await?;
    let status = res.status();
    if status.is_success() {
        return Ok(());
    }
    let body: Value = res.json().await?;
    Err(error_from_response(format!("failed to delete {} index", index_name).as_str(), status, &body))
}

pub(crate) fn error_type(body: &Value) -> Option<String> {
    body.get("error").and_then(|e| e.get("type")).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn error_from_response(message: &str, status: StatusCode, body: &Value) -> LibraryError {
    let reason = body.get("error").and_then(|e| e.get("reason")).and_then(Value::as_str).unwrap_or_default();
    LibraryError::database_or_unavailable(
        format!("{} {}", message, reason).trim(), status.as_u16(), error_type(body))
}

pub(crate) fn parse_item(value: Value) -> Result<Fields, String> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!("failed to parse {:?}", other)),
    }
}

pub(crate) fn parse_string_attribute(name: &str, map: &Fields) -> Option<String> {
    match map.get(name) {
        Some(Value::String(str)) => Some(str.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn parse_number_attribute(name: &str, map: &Fields) -> f64 {
    match map.get(name) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(str)) => str.parse::<f64>().unwrap_or_default(),
        _ => 0.0,
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return LibraryError::serialization(format!("search cluster response {:?}", err).as_str());
        }
        if err.is_connect() || err.is_timeout() {
            return LibraryError::unavailable(format!("search cluster unreachable {:?}", err).as_str(),
                                             Some("ConnectError".to_string()), true);
        }
        if let Some(status) = err.status() {
            return LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), status.as_u16(), None);
        }
        LibraryError::database(format!("search cluster request {:?}", err).as_str(), None, false)
    }
}
