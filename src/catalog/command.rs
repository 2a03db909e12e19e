use std::collections::HashMap;
use crate::books::dto::BookDto;
use crate::core::command::CommandError;

pub mod add_book_cmd;
pub mod get_book_cmd;
pub mod list_books_cmd;
pub mod remove_book_cmd;
pub mod update_book_cmd;

// Builds a book from url-encoded form fields, values are taken as posted. Missing fields are
// empty, an empty price is zero and an empty id counts as no id.
pub(crate) fn book_from_form(form: &HashMap<String, String>) -> Result<BookDto, CommandError> {
    let field = |name: &str| form.get(name).cloned().unwrap_or_default();
    let price = match field("price") {
        p if p.is_empty() => 0.0,
        p => p.parse::<f64>().map_err(|_| CommandError::validation(
            format!("price {:?} is not a number", p).as_str(), Some("price".to_string())))?,
    };
    let id = field("id");
    Ok(BookDto {
        id: if id.is_empty() { None } else { Some(id) },
        isbn: field("isbn"),
        title: field("title"),
        author: field("author"),
        price,
    })
}
