use crate::core::domain::Identifiable;

pub mod model;

pub trait Book: Identifiable {
    fn isbn(&self) -> &str;
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn price(&self) -> f64;

    // first required field left empty, checked in isbn, title, author order
    fn empty_field(&self) -> Option<&'static str> {
        if self.isbn().is_empty() {
            Some("ISBN")
        } else if self.title().is_empty() {
            Some("Title")
        } else if self.author().is_empty() {
            Some("Author")
        } else {
            None
        }
    }
}
