use std::collections::HashSet;
use lazy_static::lazy_static;
use crate::books::dto::BookDto;
use crate::inventory::domain::model::Inventory;
use crate::patrons::domain::model::Patron;
use crate::recommend::domain::{candidates, report, RecommendationKind, RecommendationStrategy};

lazy_static! {
    static ref STOP_WORDS: HashSet<&'static str> = HashSet::from([
        "the", "a", "an", "of", "and", "in", "on", "at", "to", "for", "with", "by",
        "from", "as", "is", "are", "was", "were", "has", "have", "had", "will", "would",
    ]);
}

fn keywords(title: &str) -> impl Iterator<Item = String> + '_ {
    title.split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !STOP_WORDS.contains(word.as_str()))
}

#[derive(Debug, Default, Clone)]
pub struct TitleRecommendation {}

impl TitleRecommendation {
    pub fn new() -> Self {
        Self {}
    }
}

impl RecommendationStrategy for TitleRecommendation {
    fn kind(&self) -> RecommendationKind {
        RecommendationKind::Title
    }

    fn recommend(&self, patron: &Patron, inventory: &Inventory) -> Vec<BookDto> {
        let preferred: HashSet<String> = patron.preferred_titles()
            .iter()
            .flat_map(|title| keywords(title).collect::<Vec<String>>())
            .collect();
        let books = candidates(patron, inventory)
            .into_iter()
            .filter(|book| keywords(book.title()).any(|word| preferred.contains(&word)))
            .collect();
        report(books, "No books found by preferred title keywords")
    }
}
