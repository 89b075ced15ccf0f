use crate::books::dto::BookDto;
use crate::inventory::domain::model::Inventory;
use crate::patrons::domain::model::Patron;
use crate::recommend::domain::{candidates, report, RecommendationKind, RecommendationStrategy};

#[derive(Debug, Default, Clone)]
pub struct AuthorRecommendation {}

impl AuthorRecommendation {
    pub fn new() -> Self {
        Self {}
    }
}

impl RecommendationStrategy for AuthorRecommendation {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::Author
    }

    fn recommend(&self, patron: &Patron, inventory: &Inventory) -> Vec<BookDto> {
        let authors = patron.preferred_authors();
        let books = candidates(patron, inventory)
            .into_iter()
            .filter(|book| authors.contains(book.author()))
            .collect();
        report(books, "No books found by preferred authors")
    }
}
