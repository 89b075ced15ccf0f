use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock};
use crate::core::domain::Identifiable;

// Book abstracts a catalog record that any number of branches may stock at the same
// time. Clones share one record, so a genre update is visible through every clone.
#[derive(Clone)]
pub struct Book {
    record: Arc<BookRecord>,
}

struct BookRecord {
    isbn: u64,
    title: String,
    author: String,
    publication_year: i32,
    genre: RwLock<Option<String>>,
}

impl Book {
    pub(crate) fn new(isbn: u64, title: &str, author: &str, publication_year: i32, genre: Option<&str>) -> Self {
        Self {
            record: Arc::new(BookRecord {
                isbn,
                title: title.to_string(),
                author: author.to_string(),
                publication_year,
                genre: RwLock::new(genre.map(str::to_string)),
            }),
        }
    }

    pub fn isbn(&self) -> u64 {
        self.record.isbn
    }

    pub fn title(&self) -> &str {
        self.record.title.as_str()
    }

    pub fn author(&self) -> &str {
        self.record.author.as_str()
    }

    pub fn publication_year(&self) -> i32 {
        self.record.publication_year
    }

    pub fn genre(&self) -> Option<String> {
        self.record.genre.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn update_genre(&self, genre: &str) {
        *self.record.genre.write().unwrap_or_else(PoisonError::into_inner) = Some(genre.to_string());
    }
}

impl Identifiable for Book {
    fn id(&self) -> String {
        self.record.isbn.to_string()
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn() == other.isbn()
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn().hash(state);
    }
}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("isbn", &self.isbn())
            .field("title", &self.title())
            .field("author", &self.author())
            .field("publication_year", &self.publication_year())
            .field("genre", &self.genre())
            .finish()
    }
}
