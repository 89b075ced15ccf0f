pub mod author;
pub mod genre;
pub mod title;

use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::books::domain::model::Book;
use crate::books::dto::BookDto;
use crate::inventory::domain::model::Inventory;
use crate::patrons::domain::model::Patron;

// RecommendationKind names the history feature a strategy matches on
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum RecommendationKind {
    Author,
    Genre,
    Title,
}

impl From<String> for RecommendationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Genre" => RecommendationKind::Genre,
            "Title" => RecommendationKind::Title,
            _ => RecommendationKind::Author,
        }
    }
}

impl Display for RecommendationKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RecommendationKind::Author => write!(f, "Author"),
            RecommendationKind::Genre => write!(f, "Genre"),
            RecommendationKind::Title => write!(f, "Title"),
        }
    }
}

// RecommendationStrategy suggests available books of a branch based on a patron's reading history
pub trait RecommendationStrategy: Sync + Send {
    fn kind(&self) -> RecommendationKind;
    fn recommend(&self, patron: &Patron, inventory: &Inventory) -> Vec<BookDto>;
}

// Available books the patron neither holds nor has returned before, in ISBN order.
pub(crate) fn candidates(patron: &Patron, inventory: &Inventory) -> Vec<Book> {
    inventory.available_books()
        .into_iter()
        .filter(|book| !patron.is_borrowing(book) && !patron.has_read(book))
        .collect()
}

pub(crate) fn report(books: Vec<Book>, missing: &str) -> Vec<BookDto> {
    if books.is_empty() {
        info!("{}", missing);
        return vec![];
    }
    books.iter().map(|book| {
        let dto = BookDto::from(book);
        info!("Book Title: {} Author: {} Genre: {}", dto.title, dto.author, dto.genre.as_deref().unwrap_or("-"));
        dto
    }).collect()
}
