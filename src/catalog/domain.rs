pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::ResultData;

// CatalogService owns the book records. Store failures never escape it, they are logged and
// turned into error results, None or an empty list.
#[async_trait]
pub trait CatalogService: Sync + Send {
    // validates and adds a book, an id is generated and written back when the book has none
    async fn add_record(&self, book: &mut BookDto) -> ResultData;
    async fn get_record(&self, id: &str) -> Option<BookDto>;
    async fn get_all_records(&self) -> Vec<BookDto>;
    async fn update_record(&self, book: &BookDto) -> ResultData;
    async fn delete_record(&self, id: &str) -> ResultData;
    // deletes every record one by one and returns how many the store reported deleted
    async fn delete_all(&self) -> usize;
}
