use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

// name of the collection holding book records
pub const BOOK_INDEX: &str = "bookdata";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub store: RepositoryStore,
    pub es_scheme: String,
    pub es_host: String,
    pub es_port: u16,
    pub index_name: String,
    pub bind_addr: String,
    pub page_size: usize,
    pub refresh_on_write: bool,
    pub load_sample_data: bool,
    pub log_json: bool,
}

impl Configuration {
    pub fn new(store: RepositoryStore) -> Self {
        Configuration {
            store,
            es_scheme: "http".to_string(),
            es_host: "localhost".to_string(),
            es_port: 9200,
            index_name: BOOK_INDEX.to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
            page_size: 100,
            refresh_on_write: false,
            load_sample_data: true,
            log_json: false,
        }
    }

    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // builds configuration from BOOKDATA_* variables, falling back to defaults for unset ones
    pub fn from_lookup<F>(lookup: F) -> LibraryResult<Self> where F: Fn(&str) -> Option<String> {
        let store = match lookup("BOOKDATA_STORE") {
            Some(val) => RepositoryStore::from_str(val.as_str())?,
            None => RepositoryStore::Elasticsearch,
        };
        let mut config = Configuration::new(store);
        if let Some(scheme) = lookup("BOOKDATA_ES_SCHEME") {
            config.es_scheme = scheme;
        }
        if let Some(host) = lookup("BOOKDATA_ES_HOST") {
            config.es_host = host;
        }
        if let Some(port) = lookup("BOOKDATA_ES_PORT") {
            config.es_port = parse_value("BOOKDATA_ES_PORT", port.as_str())?;
        }
        if let Some(bind) = lookup("BOOKDATA_BIND") {
            config.bind_addr = bind;
        }
        if let Some(size) = lookup("BOOKDATA_PAGE_SIZE") {
            config.page_size = parse_value("BOOKDATA_PAGE_SIZE", size.as_str())?;
            if config.page_size == 0 {
                return Err(LibraryError::validation("BOOKDATA_PAGE_SIZE must be positive", None));
            }
        }
        if let Some(refresh) = lookup("BOOKDATA_REFRESH") {
            config.refresh_on_write = parse_flag("BOOKDATA_REFRESH", refresh.as_str())?;
        }
        if let Some(seed) = lookup("BOOKDATA_SEED") {
            config.load_sample_data = parse_flag("BOOKDATA_SEED", seed.as_str())?;
        }
        if let Some(json) = lookup("BOOKDATA_LOG_JSON") {
            config.log_json = parse_flag("BOOKDATA_LOG_JSON", json.as_str())?;
        }
        Ok(config)
    }

    pub fn es_url(&self) -> String {
        format!("{}://{}:{}", self.es_scheme, self.es_host, self.es_port)
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> LibraryResult<T> {
    value.trim().parse::<T>().map_err(|_| LibraryError::validation(
        format!("invalid value {:?} for {}", value, name).as_str(), None))
}

fn parse_flag(name: &str, value: &str) -> LibraryResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(LibraryError::validation(
            format!("invalid flag {:?} for {}", value, name).as_str(), None)),
    }
}
