use std::sync::Arc;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::DocumentStore;

pub fn create_catalog_service(config: &Configuration, store: Arc<dyn DocumentStore>) -> Arc<dyn CatalogService> {
    Arc::new(CatalogServiceImpl::new(config, store))
}
