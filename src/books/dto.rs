use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::generate_id;
use crate::core::domain::Identifiable;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub price: f64,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str, price: f64) -> BookDto {
        BookDto {
            id: Some(generate_id()),
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            price,
        }
    }

    // an empty id counts as no id, html forms post one for new books
    pub fn has_id(&self) -> bool {
        self.id.as_deref().map(|id| !id.is_empty()).unwrap_or(false)
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.id.clone().unwrap_or_default()
    }
}

impl Book for BookDto {
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
