use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, error, warn};
use crate::books::domain::Book;
use crate::books::domain::model::{BookEntity, map_to_book};
use crate::books::dto::BookDto;
use crate::books::generate_id;
use crate::catalog::domain::CatalogService;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::library::{LibraryResult, RecordStatus, ResultData};
use crate::core::repository::{Document, DocumentStore, SearchQuery, WriteOutcome};

pub(crate) struct CatalogServiceImpl {
    store: Arc<dyn DocumentStore>,
    index_name: String,
    page_size: usize,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            index_name: config.index_name.to_string(),
            page_size: config.page_size,
        }
    }

    // a book is a duplicate when any stored book has the same isbn or shares a title word
    async fn record_exists(&self, book: &BookDto) -> bool {
        let query = SearchQuery::any_of(vec![
            SearchQuery::term("isbn", book.isbn.as_str()),
            SearchQuery::text("title", book.title.as_str()),
        ]);
        match self.store.search(self.index_name.as_str(), Some(&query), None, 1).await {
            Ok(res) => !res.records.is_empty(),
            Err(err) => {
                error!("duplicate check for isbn {} failed: {}", book.isbn, err);
                false
            }
        }
    }

    async fn all_documents(&self) -> LibraryResult<Vec<Document>> {
        let mut docs = vec![];
        let mut next_page: Option<String> = None;
        loop {
            let res = self.store.search(
                self.index_name.as_str(), None, next_page.as_deref(), self.page_size).await?;
            docs.extend(res.records);
            match res.next_page {
                Some(page) => next_page = Some(page),
                None => break,
            }
        }
        Ok(docs)
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_record(&self, book: &mut BookDto) -> ResultData {
        if let Some(field) = book.empty_field() {
            return RecordStatus::Empty(field.to_string()).into();
        }
        if self.record_exists(book).await {
            return RecordStatus::Exists.into();
        }
        if !book.has_id() {
            book.id = Some(generate_id());
        }
        let entity = BookEntity::from(&*book);
        let outcome = match entity.to_fields() {
            Ok(fields) => self.store.create(self.index_name.as_str(), entity.id.as_str(), &fields).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(WriteOutcome::Created) => RecordStatus::AddSuccess.into(),
            Ok(other) => {
                warn!("adding book {} answered {}", entity.id, other);
                RecordStatus::AddError.into()
            }
            Err(err) => {
                error!("failed to add book {}: {}", entity.id, err);
                RecordStatus::AddError.into()
            }
        }
    }

    async fn get_record(&self, id: &str) -> Option<BookDto> {
        match self.store.get(self.index_name.as_str(), id).await {
            Ok(doc) => doc.map(|doc| BookDto::from(&map_to_book(&doc))),
            Err(err) => {
                error!("failed to get book {}: {}", id, err);
                None
            }
        }
    }

    async fn get_all_records(&self) -> Vec<BookDto> {
        match self.all_documents().await {
            Ok(docs) => docs.iter().map(|doc| BookDto::from(&map_to_book(doc))).collect(),
            Err(err) => {
                error!("failed to read books: {}", err);
                vec![]
            }
        }
    }

    async fn update_record(&self, book: &BookDto) -> ResultData {
        if let Some(field) = book.empty_field() {
            return RecordStatus::Empty(field.to_string()).into();
        }
        if !book.has_id() {
            return RecordStatus::Empty("ID".to_string()).into();
        }
        let id = book.id();
        let entity = BookEntity::from(book);
        let outcome = match entity.to_fields() {
            Ok(fields) => self.store.update(self.index_name.as_str(), id.as_str(), &fields).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(WriteOutcome::Updated) => RecordStatus::UpdateSuccess(id).into(),
            Ok(other) => {
                warn!("updating book {} answered {}", id, other);
                RecordStatus::UpdateError(id).into()
            }
            Err(err) => {
                error!("failed to update book {}: {}", id, err);
                RecordStatus::UpdateError(id).into()
            }
        }
    }

    async fn delete_record(&self, id: &str) -> ResultData {
        if id.is_empty() {
            return RecordStatus::DeleteError(id.to_string()).into();
        }
        match self.store.delete(self.index_name.as_str(), id).await {
            Ok(WriteOutcome::Deleted) => RecordStatus::DeleteSuccess(id.to_string()).into(),
            Ok(other) => {
                warn!("deleting book {} answered {}", id, other);
                RecordStatus::DeleteError(id.to_string()).into()
            }
            Err(err) => {
                error!("failed to delete book {}: {}", id, err);
                RecordStatus::DeleteError(id.to_string()).into()
            }
        }
    }

    async fn delete_all(&self) -> usize {
        let mut deleted = 0;
        for book in self.get_all_records().await {
            if !self.delete_record(book.id().as_str()).await.has_error() {
                deleted += 1;
            }
        }
        debug!("deleted {} books", deleted);
        deleted
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            id: Some(other.id.to_string()),
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            price: other.price,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            id: other.id(),
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            price: other.price,
        }
    }
}
