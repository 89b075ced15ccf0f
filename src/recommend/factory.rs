use crate::recommend::domain::author::AuthorRecommendation;
use crate::recommend::domain::genre::GenreRecommendation;
use crate::recommend::domain::title::TitleRecommendation;
use crate::recommend::domain::{RecommendationKind, RecommendationStrategy};

pub fn create_recommendation_strategy(kind: RecommendationKind) -> Box<dyn RecommendationStrategy> {
    match kind {
        RecommendationKind::Author => {
            Box::new(AuthorRecommendation::new())
        }
        RecommendationKind::Genre => {
            Box::new(GenreRecommendation::new())
        }
        RecommendationKind::Title => {
            Box::new(TitleRecommendation::new())
        }
    }
}
