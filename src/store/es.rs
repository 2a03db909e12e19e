use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::{json, Map, Value};
use tracing::debug;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::{Document, DocumentStore, Fields, SearchQuery, WriteOutcome};
use crate::utils::es::{endpoint, error_from_response, MAX_RESULT_WINDOW};

// ElasticsearchStore talks to the REST api of an Elasticsearch compatible cluster. The
// reqwest client pools connections, so one store is shared by all requests.
#[derive(Debug, Clone)]
pub struct ElasticsearchStore {
    client: Client,
    base_url: Url,
    refresh: bool,
}

impl ElasticsearchStore {
    pub fn new(client: Client, base_url: Url, refresh: bool) -> Self {
        Self {
            client,
            base_url,
            refresh,
        }
    }

    fn with_refresh(&self, req: RequestBuilder) -> RequestBuilder {
        if self.refresh {
            req.query(&[("refresh", "wait_for")])
        } else {
            req
        }
    }

    async fn send(&self, req: RequestBuilder) -> LibraryResult<(StatusCode, Value)> {
        let res = req.send().await?;
        let status = res.status();
        let body: Value = res.json().await?;
        Ok((status, body))
    }

    // index, create, update and delete answer with a result field, even for a missing document
    async fn write(&self, req: RequestBuilder, action: &str) -> LibraryResult<WriteOutcome> {
        let (status, body) = self.send(self.with_refresh(req)).await?;
        match body.get("result").and_then(Value::as_str) {
            Some(result) if status.is_success() || status == StatusCode::NOT_FOUND => {
                debug!("{} answered {} {}", action, status, result);
                Ok(WriteOutcome::from(result))
            }
            _ => Err(error_from_response(action, status, &body)),
        }
    }
}

#[async_trait]
impl DocumentStore for ElasticsearchStore {
    async fn index(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome> {
        let url = endpoint(&self.base_url, &[collection, "_doc", key])?;
        self.write(self.client.put(url).json(fields), format!("index {}/{}", collection, key).as_str()).await
    }

    // a taken key answers 409 without a result field, which maps to DuplicateKey
    async fn create(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome> {
        let url = endpoint(&self.base_url, &[collection, "_create", key])?;
        self.write(self.client.put(url).json(fields), format!("create {}/{}", collection, key).as_str()).await
    }

    async fn get(&self, collection: &str, key: &str) -> LibraryResult<Option<Document>> {
        let url = endpoint(&self.base_url, &[collection, "_doc", key])?;
        let (status, body) = self.send(self.client.get(url)).await?;
        match body.get("found").and_then(Value::as_bool) {
            Some(true) => {
                let fields = body.get("_source").and_then(Value::as_object).cloned().unwrap_or_default();
                Ok(Some(Document::new(key, fields)))
            }
            Some(false) => Ok(None),
            None => Err(error_from_response(format!("get {}/{}", collection, key).as_str(), status, &body)),
        }
    }

    async fn search(&self, collection: &str, query: Option<&SearchQuery>,
                    page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Document>> {
        let from = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
        let size = page_size.min(MAX_RESULT_WINDOW.saturating_sub(from));
        if size == 0 {
            return Ok(PaginatedResult::new(page, page_size, None, vec![]));
        }
        let mut request = json!({
            "from": from,
            "size": size,
        });
        if let Some(query) = query {
            request["query"] = query_dsl(query);
        }
        let url = endpoint(&self.base_url, &[collection, "_search"])?;
        let (status, body) = self.send(self.client.post(url).json(&request)).await?;
        if !status.is_success() {
            return Err(error_from_response(format!("search {}", collection).as_str(), status, &body));
        }
        let records = parse_hits(&body);
        let next_page = if records.len() == size && from + size < MAX_RESULT_WINDOW {
            Some((from + size).to_string())
        } else {
            None
        };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }

    async fn update(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome> {
        let url = endpoint(&self.base_url, &[collection, "_update", key])?;
        let request = json!({ "doc": fields });
        self.write(self.client.post(url).json(&request), format!("update {}/{}", collection, key).as_str()).await
    }

    async fn delete(&self, collection: &str, key: &str) -> LibraryResult<WriteOutcome> {
        let url = endpoint(&self.base_url, &[collection, "_doc", key])?;
        self.write(self.client.delete(url), format!("delete {}/{}", collection, key).as_str()).await
    }
}

pub(crate) fn query_dsl(query: &SearchQuery) -> Value {
    match query {
        SearchQuery::Term { field, value } => {
            let mut term = Map::new();
            term.insert(field.to_string(), Value::String(value.to_string()));
            json!({ "term": term })
        }
        SearchQuery::Match { field, text } => {
            let mut matcher = Map::new();
            matcher.insert(field.to_string(), Value::String(text.to_string()));
            json!({ "match": matcher })
        }
        SearchQuery::Bool { should, minimum_should_match } => {
            let should: Vec<Value> = should.iter().map(query_dsl).collect();
            json!({
                "bool": {
                    "should": should,
                    "minimum_should_match": minimum_should_match,
                }
            })
        }
    }
}

fn parse_hits(body: &Value) -> Vec<Document> {
    body.pointer("/hits/hits")
        .and_then(Value::as_array)
        .map(|hits| hits.iter().filter_map(|hit| {
            let key = hit.get("_id").and_then(Value::as_str)?;
            let fields = hit.get("_source").and_then(Value::as_object).cloned().unwrap_or_default();
            Some(Document::new(key, fields))
        }).collect())
        .unwrap_or_default()
}
