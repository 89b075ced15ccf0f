use tracing::warn;
use crate::books::domain::model::Book;
use crate::core::library::{LibraryError, LibraryResult};

// BookBuilder assembles a catalog record, isbn, title, author and publication year are required
#[derive(Debug, Default, Clone)]
pub struct BookBuilder {
    isbn: u64,
    title: Option<String>,
    author: Option<String>,
    publication_year: i32,
    genre: Option<String>,
}

impl BookBuilder {
    pub fn new() -> Self {
        BookBuilder::default()
    }

    pub fn isbn(mut self, isbn: u64) -> Self {
        self.isbn = isbn;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn publication_year(mut self, publication_year: i32) -> Self {
        self.publication_year = publication_year;
        self
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.genre = Some(genre.to_string());
        self
    }

    pub fn build(self) -> LibraryResult<Book> {
        let mut missing = vec![];
        if self.isbn == 0 {
            missing.push("isbn");
        }
        if self.title.is_none() {
            missing.push("title");
        }
        if self.author.is_none() {
            missing.push("author");
        }
        if self.publication_year == 0 {
            missing.push("publication_year");
        }
        match (self.title, self.author) {
            (Some(title), Some(author)) if missing.is_empty() => {
                Ok(Book::new(self.isbn, title.as_str(), author.as_str(), self.publication_year, self.genre.as_deref()))
            }
            _ => {
                let message = format!("required field(s) are missing: {}", missing.join(", "));
                warn!("{}", message);
                Err(LibraryError::validation(message.as_str(), Some("400".to_string())))
            }
        }
    }
}
