pub mod books;
pub mod catalog;
pub mod core;
pub mod store;
pub mod utils;
