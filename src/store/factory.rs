use std::sync::Arc;
use tracing::{info, warn};
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::{DocumentStore, RepositoryStore};
use crate::store::es::ElasticsearchStore;
use crate::store::memory::MemoryStore;
use crate::utils::es::{build_es_client, create_index, parse_base_url};

pub async fn create_document_store(config: &Configuration) -> LibraryResult<Arc<dyn DocumentStore>> {
    match config.store {
        RepositoryStore::Elasticsearch => {
            let client = build_es_client()?;
            let base_url = parse_base_url(config.es_url().as_str())?;
            // the cluster may still be starting, requests will fail until it answers
            if let Err(err) = create_index(&client, &base_url, config.index_name.as_str()).await {
                warn!("could not create index {} at {}: {}", config.index_name, base_url, err);
            }
            info!("using search cluster at {}", base_url);
            Ok(Arc::new(ElasticsearchStore::new(client, base_url, config.refresh_on_write)))
        }
        RepositoryStore::Memory => {
            info!("using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
