use tracing::info;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;

// isbn, title, author, price
pub const SAMPLE_BOOKS: [(&str, &str, &str, f64); 9] = [
    ("9781501151774", "The Woman in Cabin 10", "Ruth Ware", 41.0),
    ("9780385514231", "Origin", "Dan Brown", 35.0),
    ("9780735253308", "The Handmaid's Tale", "Margaret Atwood", 36.0),
    ("9781101967683", "The Whistler", "John Grisham", 55.0),
    ("9780062654199", "The Alice Network", "Kate Quinn", 60.0),
    ("9780385689632", "Into the Water", "Paula Hawkins", 47.0),
    ("9780385543026", "Camino Island", "John Grisham", 35.0),
    ("9780525954972", "A Column of Fire", "Ken Follett", 43.0),
    ("9781250080400", "The Nightingale", "Kristin Hannah", 39.0),
];

// Adds the sample books through the regular add path, so books already present (or
// rejected by the duplicate check) are skipped. Returns how many were added.
pub async fn load_sample_books(catalog: &dyn CatalogService) -> usize {
    let mut loaded = 0;
    for (isbn, title, author, price) in SAMPLE_BOOKS {
        let mut book = BookDto::new(isbn, title, author, price);
        let res = catalog.add_record(&mut book).await;
        if res.has_error() {
            info!("skipped sample book {:?}: {}", title, res.message());
        } else {
            loaded += 1;
        }
    }
    info!("loaded {} of {} sample books", loaded, SAMPLE_BOOKS.len());
    loaded
}
