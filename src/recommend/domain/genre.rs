use crate::books::dto::BookDto;
use crate::inventory::domain::model::Inventory;
use crate::patrons::domain::model::Patron;
use crate::recommend::domain::{candidates, report, RecommendationKind, RecommendationStrategy};

#[derive(Debug, Default, Clone)]
pub struct GenreRecommendation {}

impl GenreRecommendation {
    pub fn new() -> Self {
        Self {}
    }
}

impl RecommendationStrategy for GenreRecommendation {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::Genre
    }

    fn recommend(&self, patron: &Patron, inventory: &Inventory) -> Vec<BookDto> {
        let genres = patron.preferred_genres();
        let books = candidates(patron, inventory)
            .into_iter()
            .filter(|book| genres.contains(&book.genre()))
            .collect();
        report(books, "No books found by preferred genres")
    }
}
