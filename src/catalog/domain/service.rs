use std::collections::HashMap;
use tracing::{info, warn};
use crate::books::domain::model::Book;
use crate::books::dto::BookDto;
use crate::books::factory::BookBuilder;
use crate::catalog::domain::CatalogService;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;

pub struct CatalogServiceImpl {
    books: HashMap<u64, Book>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub fn new(events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            books: HashMap::new(),
            events_publisher,
        }
    }

    fn publish(&self, event: serde_json::Result<DomainEvent>) {
        if let Err(err) = event.map_err(LibraryError::from).and_then(|e| self.events_publisher.publish(&e)) {
            warn!("failed to publish catalog event: {}", err);
        }
    }
}

impl CatalogService for CatalogServiceImpl {
    fn add_book(&mut self, builder: BookBuilder) -> LibraryResult<Book> {
        let book = builder.build()?;
        if self.books.contains_key(&book.isbn()) {
            return Err(LibraryError::duplicate_key(
                format!("book with isbn {} already exists", book.isbn()).as_str()));
        }
        self.books.insert(book.isbn(), book.clone());
        info!("Catalog: added {} by {}", book.title(), book.author());
        self.publish(DomainEvent::added(
            "books", "books", book.isbn().to_string().as_str(), &HashMap::new(), &BookDto::from(&book)));
        Ok(book)
    }

    fn update_genre(&mut self, isbn: u64, genre: &str) -> LibraryResult<Book> {
        let book = self.find_book_by_isbn(isbn)?;
        book.update_genre(genre);
        self.publish(DomainEvent::updated(
            "books", "books", isbn.to_string().as_str(), &HashMap::new(), &BookDto::from(&book)));
        Ok(book)
    }

    fn find_book_by_isbn(&self, isbn: u64) -> LibraryResult<Book> {
        self.books.get(&isbn).cloned().ok_or_else(|| LibraryError::not_found(
            format!("book with isbn {} not found", isbn).as_str()))
    }

    fn books(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.books.values().cloned().collect();
        books.sort_by_key(Book::isbn);
        books
    }
}
