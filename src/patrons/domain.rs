pub mod model;

use crate::books::domain::model::Book;
use crate::branch::dto::BranchDto;
use crate::core::domain::Identifiable;

// Notifiable is implemented by anyone who can wait on a book; the reservation
// registry calls update when the book's availability at a branch changes.
pub trait Notifiable: Identifiable {
    fn update(&self, book: &Book, available: bool, branch: &BranchDto);
}
