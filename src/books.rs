use uuid::Uuid;

pub mod domain;
pub mod dto;

// generate_id returns a short random token used as the document key of a new book
pub fn generate_id() -> String {
    let id = Uuid::new_v4().to_string();
    id[..8].to_string()
}
