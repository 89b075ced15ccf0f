pub mod service;

use crate::books::domain::model::Book;
use crate::books::factory::BookBuilder;
use crate::core::library::LibraryResult;

// CatalogService keeps the one record per ISBN that branches stock and patrons borrow
pub trait CatalogService: Sync + Send {
    fn add_book(&mut self, builder: BookBuilder) -> LibraryResult<Book>;
    fn update_genre(&mut self, isbn: u64, genre: &str) -> LibraryResult<Book>;
    fn find_book_by_isbn(&self, isbn: u64) -> LibraryResult<Book>;
    fn books(&self) -> Vec<Book>;
}
