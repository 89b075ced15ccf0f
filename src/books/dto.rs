use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;

// BookDto is a serializable snapshot of a book used for reports, events and recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: u64,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: Option<String>,
}

impl From<&Book> for BookDto {
    fn from(other: &Book) -> Self {
        BookDto {
            isbn: other.isbn(),
            title: other.title().to_string(),
            author: other.author().to_string(),
            publication_year: other.publication_year(),
            genre: other.genre(),
        }
    }
}
