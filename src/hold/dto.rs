use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::patrons::domain::model::Patron;

// HoldDto reports a patron waiting on a book at a branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldDto {
    pub branch_id: i64,
    pub isbn: u64,
    pub title: String,
    pub patron_id: i64,
    pub patron_name: String,
}

impl HoldDto {
    pub fn from_patron_book(branch_id: i64, patron: &Patron, book: &Book) -> Self {
        HoldDto {
            branch_id,
            isbn: book.isbn(),
            title: book.title().to_string(),
            patron_id: patron.patron_id(),
            patron_name: patron.name(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.isbn, self.patron_id)
    }
}
