use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::generate_id;
use crate::core::domain::Identifiable;
use crate::core::library::LibraryResult;
use crate::core::repository::{Document, Fields};
use crate::utils::es::{parse_item, parse_number_attribute, parse_string_attribute};

// BookEntity is a book record as it is stored in the search index, the id doubles as the
// document key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str, price: f64) -> Self {
        Self {
            id: generate_id(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }

    pub fn to_fields(&self) -> LibraryResult<Fields> {
        let val = serde_json::to_value(self)?;
        Ok(parse_item(val)?)
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

impl Book for BookEntity {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn price(&self) -> f64 {
        self.price
    }
}

// Documents written by other clients may omit fields, so missing strings decode as empty
// and a document without an id field takes its key.
pub fn map_to_book(doc: &Document) -> BookEntity {
    let map = &doc.fields;
    BookEntity {
        id: parse_string_attribute("id", map).filter(|id| !id.is_empty()).unwrap_or_else(|| doc.key.to_string()),
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        price: parse_number_attribute("price", map),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::domain::Book;
    use crate::books::domain::model::{BookEntity, map_to_book};
    use crate::core::domain::Identifiable;
    use crate::core::repository::Document;
    use crate::utils::es::parse_item;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("isbn", "title", "author", 12.5);
        assert_eq!("isbn", book.isbn());
        assert_eq!("title", book.title());
        assert_eq!("author", book.author());
        assert_eq!(8, book.id().len());
        assert_eq!(None, book.empty_field());
    }

    #[tokio::test]
    async fn test_should_convert_to_fields() {
        let book = BookEntity::new("9780385514231", "Origin", "Dan Brown", 35.0);
        let fields = book.to_fields().expect("should convert book");
        assert_eq!(Some(&json!("9780385514231")), fields.get("isbn"));
        assert_eq!(Some(&json!(book.id)), fields.get("id"));
        assert_eq!(Some(&json!(35.0)), fields.get("price"));
        assert_eq!(book, map_to_book(&Document::new(book.id.as_str(), fields)));
    }

    #[tokio::test]
    async fn test_should_map_sparse_document() {
        let fields = parse_item(json!({"title": "Origin", "price": "35"})).expect("should parse");
        let book = map_to_book(&Document::new("doc-key", fields));
        assert_eq!("doc-key", book.id.as_str());
        assert_eq!("", book.isbn.as_str());
        assert_eq!("Origin", book.title.as_str());
        assert_eq!(35.0, book.price);
        assert_eq!(Some("ISBN"), book.empty_field());
    }
}
