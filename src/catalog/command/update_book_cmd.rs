use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::command::book_from_form;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::ResultData;

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    pub book: BookDto,
}

impl UpdateBookCommandRequest {
    #[cfg(test)]
    pub fn new(id: &str, isbn: &str, title: &str, author: &str, price: f64) -> Self {
        Self {
            book: BookDto {
                id: Some(id.to_string()),
                isbn: isbn.to_string(),
                title: title.to_string(),
                author: author.to_string(),
                price,
            },
        }
    }

    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, CommandError> {
        Ok(Self {
            book: book_from_form(form)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    #[serde(flatten)]
    pub result: ResultData,
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let result = self.catalog_service.update_record(&req.book).await;
        Ok(UpdateBookCommandResponse { result })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::{Configuration, Identifiable};
    use crate::core::repository::RepositoryStore;
    use crate::store::memory::MemoryStore;

    lazy_static! {
        static ref SUT_SVC : AsyncOnce<Arc<dyn CatalogService>> = AsyncOnce::new(async {
                factory::create_catalog_service(&Configuration::new(RepositoryStore::Memory), Arc::new(MemoryStore::new()))
            });
    }

    #[tokio::test]
    async fn test_should_run_update_book() {
        let svc = SUT_SVC.get().await.clone();
        let add_cmd = AddBookCommand::new(svc.clone());
        let update_cmd = UpdateBookCommand::new(svc.clone());

        let added = add_cmd.execute(AddBookCommandRequest::new("isbn-upd-1", "UpdCmdTitle1", "author", 10.0))
            .await.expect("should add book");
        let id = added.book.id();
        let req = UpdateBookCommandRequest::new(id.as_str(), "isbn-upd-1", "UpdCmdTitle1 revised", "author", 12.0);
        let res = update_cmd.execute(req).await.expect("should update book");
        assert!(!res.result.has_error());

        let loaded = svc.get_record(id.as_str()).await.expect("should find book");
        assert_eq!("UpdCmdTitle1 revised", loaded.title.as_str());
        assert_eq!(12.0, loaded.price);
    }

    #[tokio::test]
    async fn test_should_report_failed_update() {
        let update_cmd = UpdateBookCommand::new(SUT_SVC.get().await.clone());
        let req = UpdateBookCommandRequest::new("unknown", "isbn-upd-2", "UpdCmdTitle2", "author", 1.0);
        let res = update_cmd.execute(req).await.expect("should run command");
        assert!(res.result.has_error());
        assert_eq!("Error updating book record with ID: unknown", res.result.message());
    }
}
