use async_trait::async_trait;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};

// Fields is the structured field map a document round-trips as
pub type Fields = Map<String, Value>;

// Document is a stored field map together with the key it is addressed by
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(key: &str, fields: Fields) -> Self {
        Document {
            key: key.to_string(),
            fields,
        }
    }
}

// WriteOutcome is what the store reports for index, create, update and delete requests
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum WriteOutcome {
    Created,
    Updated,
    Deleted,
    NotFound,
    Noop,
}

impl From<&str> for WriteOutcome {
    fn from(s: &str) -> Self {
        match s {
            "created" => WriteOutcome::Created,
            "updated" => WriteOutcome::Updated,
            "deleted" => WriteOutcome::Deleted,
            "not_found" => WriteOutcome::NotFound,
            _ => WriteOutcome::Noop,
        }
    }
}

impl Display for WriteOutcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WriteOutcome::Created => write!(f, "created"),
            WriteOutcome::Updated => write!(f, "updated"),
            WriteOutcome::Deleted => write!(f, "deleted"),
            WriteOutcome::NotFound => write!(f, "not_found"),
            WriteOutcome::Noop => write!(f, "noop"),
        }
    }
}

// SearchQuery is the subset of the search DSL the catalog needs
#[derive(Debug, PartialEq, Clone)]
pub enum SearchQuery {
    // exact match on an unanalyzed field
    Term { field: String, value: String },
    // full-text match on an analyzed field, any shared token matches
    Match { field: String, text: String },
    Bool { should: Vec<SearchQuery>, minimum_should_match: usize },
}

impl SearchQuery {
    pub fn term(field: &str, value: &str) -> Self {
        SearchQuery::Term { field: field.to_string(), value: value.to_string() }
    }

    pub fn text(field: &str, text: &str) -> Self {
        SearchQuery::Match { field: field.to_string(), text: text.to_string() }
    }

    pub fn any_of(should: Vec<SearchQuery>) -> Self {
        SearchQuery::Bool { should, minimum_should_match: 1 }
    }
}

#[async_trait]
pub trait DocumentStore: Sync + Send {
    // index a document under key, replacing any document already stored there
    async fn index(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome>;

    // create a document, fails with DuplicateKey and leaves the stored one alone if key is taken
    async fn create(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome>;

    // get a document, None if the key is unknown
    async fn get(&self, collection: &str, key: &str) -> LibraryResult<Option<Document>>;

    // search a collection, None query matches every document
    async fn search(&self, collection: &str, query: Option<&SearchQuery>,
                    page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Document>>;

    // merges partial fields into an existing document
    async fn update(&self, collection: &str, key: &str, fields: &Fields) -> LibraryResult<WriteOutcome>;

    // delete a document
    async fn delete(&self, collection: &str, key: &str) -> LibraryResult<WriteOutcome>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    Elasticsearch,
    Memory,
}

impl FromStr for RepositoryStore {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elasticsearch" => Ok(RepositoryStore::Elasticsearch),
            "memory" => Ok(RepositoryStore::Memory),
            other => Err(LibraryError::validation(
                format!("unknown repository store {}", other).as_str(), None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::{RepositoryStore, SearchQuery, WriteOutcome};

    #[tokio::test]
    async fn test_should_format_write_outcome() {
        let outcomes = vec![
            WriteOutcome::Created,
            WriteOutcome::Updated,
            WriteOutcome::Deleted,
            WriteOutcome::NotFound,
            WriteOutcome::Noop,
        ];
        for outcome in outcomes {
            let str = outcome.to_string();
            assert_eq!(outcome, WriteOutcome::from(str.as_str()));
        }
        assert_eq!(WriteOutcome::Noop, WriteOutcome::from("something_else"));
    }

    #[tokio::test]
    async fn test_should_build_any_of_query() {
        let query = SearchQuery::any_of(vec![SearchQuery::term("isbn", "1"), SearchQuery::text("title", "t")]);
        if let SearchQuery::Bool { should, minimum_should_match } = query {
            assert_eq!(2, should.len());
            assert_eq!(1, minimum_should_match);
        } else {
            panic!("expected bool query");
        }
    }

    #[tokio::test]
    async fn test_should_parse_repository_store() {
        assert_eq!(RepositoryStore::Memory, "memory".parse::<RepositoryStore>().expect("memory"));
        assert_eq!(RepositoryStore::Memory, "MEMORY".parse::<RepositoryStore>().expect("memory"));
        assert_eq!(RepositoryStore::Elasticsearch, "elasticsearch".parse::<RepositoryStore>().expect("es"));
        assert!("dynamodb".parse::<RepositoryStore>().is_err());
    }
}
