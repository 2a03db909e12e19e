use std::collections::{BTreeMap, HashMap, HashSet};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{Document, DocumentStore, Fields, SearchQuery, WriteOutcome};
use crate::utils::es::parse_string_attribute;

// MemoryStore keeps documents in process. It answers with the same outcomes as the search
// cluster but without any refresh delay, and orders search results by key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn index(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.insert(key.to_string(), fields.clone()) {
            Some(_) => Ok(WriteOutcome::Updated),
            None => Ok(WriteOutcome::Created),
        }
    }

    async fn create(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(key) {
            return Err(LibraryError::duplicate_key(format!("document {}/{} already exists", collection, key).as_str()));
        }
        docs.insert(key.to_string(), fields.clone());
        Ok(WriteOutcome::Created)
    }

    async fn get(&self, collection: &str, key: &str) -> LibraryResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection)
            .and_then(|docs| docs.get(key))
            .map(|fields| Document::new(key, fields.clone())))
    }

    async fn search(&self, collection: &str, query: Option<&SearchQuery>,
                    page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Document>> {
        let from = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
        let collections = self.collections.read().await;
        let matching: Vec<Document> = collections.get(collection)
            .map(|docs| docs.iter()
                .filter(|(_, fields)| query.map(|q| matches(q, fields)).unwrap_or(true))
                .map(|(key, fields)| Document::new(key, fields.clone()))
                .collect())
            .unwrap_or_default();
        let total = matching.len();
        let records: Vec<Document> = matching.into_iter().skip(from).take(page_size).collect();
        let next_page = if page_size > 0 && from + page_size < total {
            Some((from + page_size).to_string())
        } else {
            None
        };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }

    async fn update(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome> {
        let mut collections = self.collections.write().await;
        let existing = collections.get_mut(collection)
            .and_then(|docs| docs.get_mut(key))
            .ok_or_else(|| LibraryError::not_found(format!("document {}/{} not found", collection, key).as_str()))?;
        let before = existing.clone();
        for (name, value) in fields {
            existing.insert(name.to_string(), value.clone());
        }
        if *existing == before {
            Ok(WriteOutcome::Noop)
        } else {
            Ok(WriteOutcome::Updated)
        }
    }

    async fn delete(&self, collection: &str, key: &str) -> LibraryResult<WriteOutcome> {
        let mut collections = self.collections.write().await;
        match collections.get_mut(collection).and_then(|docs| docs.remove(key)) {
            Some(_) => Ok(WriteOutcome::Deleted),
            None => Ok(WriteOutcome::NotFound),
        }
    }
}

fn matches(query: &SearchQuery, fields: &Fields) -> bool {
    match query {
        SearchQuery::Term { field, value } => {
            parse_string_attribute(field, fields).map(|v| v == *value).unwrap_or(false)
        }
        SearchQuery::Match { field, text } => {
            let wanted = tokens(text);
            match fields.get(field) {
                Some(Value::String(val)) => !tokens(val).is_disjoint(&wanted),
                _ => false,
            }
        }
        SearchQuery::Bool { should, minimum_should_match } => {
            should.iter().filter(|q| matches(q, fields)).count() >= *minimum_should_match
        }
    }
}

// lowercased alphanumeric runs, roughly what the standard analyzer produces
fn tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::core::library::LibraryError;
    use crate::core::repository::{DocumentStore, Fields, SearchQuery, WriteOutcome};
    use crate::store::memory::{MemoryStore, tokens};
    use crate::utils::es::parse_item;

    fn fields(isbn: &str, title: &str) -> Fields {
        parse_item(json!({"isbn": isbn, "title": title, "author": "author", "price": 1.0})).expect("should parse")
    }

    #[tokio::test]
    async fn test_should_index_and_get() {
        let store = MemoryStore::new();
        assert_eq!(WriteOutcome::Created, store.index("books", "k1", &fields("1", "One")).await.expect("should index"));
        assert_eq!(WriteOutcome::Updated, store.index("books", "k1", &fields("1", "Uno")).await.expect("should index"));
        let doc = store.get("books", "k1").await.expect("should get").expect("should exist");
        assert_eq!(Some(&json!("Uno")), doc.fields.get("title"));
        assert!(store.get("books", "k2").await.expect("should get").is_none());
        assert!(store.get("other", "k1").await.expect("should get").is_none());
    }

    #[tokio::test]
    async fn test_should_create_without_replacing() {
        let store = MemoryStore::new();
        assert_eq!(WriteOutcome::Created, store.create("books", "k1", &fields("1", "One")).await.expect("should create"));
        let err = store.create("books", "k1", &fields("2", "Two")).await.expect_err("should reject taken key");
        assert!(matches!(err, LibraryError::DuplicateKey { .. }));
        let doc = store.get("books", "k1").await.expect("should get").expect("should exist");
        assert_eq!(Some(&json!("One")), doc.fields.get("title"));
    }

    #[tokio::test]
    async fn test_should_update_existing_only() {
        let store = MemoryStore::new();
        store.index("books", "k1", &fields("1", "One")).await.expect("should index");
        let partial = parse_item(json!({"title": "Two"})).expect("should parse");
        assert_eq!(WriteOutcome::Updated, store.update("books", "k1", &partial).await.expect("should update"));
        assert_eq!(WriteOutcome::Noop, store.update("books", "k1", &partial).await.expect("should update"));
        let doc = store.get("books", "k1").await.expect("should get").expect("should exist");
        assert_eq!(Some(&json!("1")), doc.fields.get("isbn"));
        assert_eq!(Some(&json!("Two")), doc.fields.get("title"));

        let err = store.update("books", "missing", &partial).await.expect_err("should fail");
        assert!(matches!(err, LibraryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_should_delete() {
        let store = MemoryStore::new();
        store.index("books", "k1", &fields("1", "One")).await.expect("should index");
        assert_eq!(WriteOutcome::Deleted, store.delete("books", "k1").await.expect("should delete"));
        assert_eq!(WriteOutcome::NotFound, store.delete("books", "k1").await.expect("should delete"));
        assert_eq!(WriteOutcome::NotFound, store.delete("nothing", "k1").await.expect("should delete"));
    }

    #[tokio::test]
    async fn test_should_search_with_queries() {
        let store = MemoryStore::new();
        store.index("books", "k1", &fields("111", "The Whistler")).await.expect("should index");
        store.index("books", "k2", &fields("222", "Camino Island")).await.expect("should index");
        store.index("books", "k3", &fields("333", "Into the Water")).await.expect("should index");

        let all = store.search("books", None, None, 10).await.expect("should search");
        assert_eq!(3, all.records.len());
        assert_eq!(None, all.next_page);

        let by_isbn = store.search("books", Some(&SearchQuery::term("isbn", "222")), None, 10).await.expect("should search");
        assert_eq!(vec!["k2"], by_isbn.records.iter().map(|d| d.key.as_str()).collect::<Vec<_>>());

        // "the" is shared by two titles
        let by_title = store.search("books", Some(&SearchQuery::text("title", "the")), None, 10).await.expect("should search");
        assert_eq!(2, by_title.records.len());

        let either = SearchQuery::any_of(vec![SearchQuery::term("isbn", "111"), SearchQuery::text("title", "island")]);
        let res = store.search("books", Some(&either), None, 10).await.expect("should search");
        assert_eq!(2, res.records.len());

        let none = SearchQuery::any_of(vec![SearchQuery::term("isbn", "11"), SearchQuery::text("title", "ocean")]);
        assert!(store.search("books", Some(&none), None, 10).await.expect("should search").records.is_empty());
    }

    #[tokio::test]
    async fn test_should_page_search_results() {
        let store = MemoryStore::new();
        for i in 0..25 {
            store.index("books", format!("k{:02}", i).as_str(), &fields(format!("{}", i).as_str(), "t")).await.expect("should index");
        }
        let mut next_page: Option<String> = None;
        let mut total = 0;
        loop {
            let res = store.search("books", None, next_page.as_deref(), 10).await.expect("should search");
            total += res.records.len();
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        assert_eq!(25, total);
    }

    #[tokio::test]
    async fn test_should_tokenize_text() {
        let t = tokens("The Handmaid's Tale");
        assert!(t.contains("the"));
        assert!(t.contains("handmaid"));
        assert!(t.contains("s"));
        assert!(t.contains("tale"));
        assert!(tokens(" -- ").is_empty());
    }
}
