use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::command::book_from_form;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::ResultData;

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) book: BookDto,
}

impl AddBookCommandRequest {
    #[cfg(test)]
    pub fn new(isbn: &str, title: &str, author: &str, price: f64) -> Self {
        let mut book = BookDto::new(isbn, title, author, price);
        book.id = None;
        Self {
            book,
        }
    }

    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, CommandError> {
        Ok(Self {
            book: book_from_form(form)?,
        })
    }
}

// the result fields sit next to the book, which carries the id the record got
#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    #[serde(flatten)]
    pub result: ResultData,
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(result: ResultData, book: BookDto) -> Self {
        Self {
            result,
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let mut book = req.book;
        let result = self.catalog_service.add_record(&mut book).await;
        Ok(AddBookCommandResponse::new(result, book))
    }
}
