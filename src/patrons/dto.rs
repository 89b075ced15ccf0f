use serde::{Deserialize, Serialize};
use crate::patrons::domain::model::Patron;


// PatronDto is a serializable snapshot of a library member
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronDto {
    pub patron_id: i64,
    pub name: String,
    pub address: String,
    pub mobile: String,
    pub borrowed: Vec<u64>,
    pub history: Vec<u64>,
}

impl From<&Patron> for PatronDto {
    fn from(other: &Patron) -> Self {
        PatronDto {
            patron_id: other.patron_id(),
            name: other.name(),
            address: other.address(),
            mobile: other.mobile(),
            borrowed: other.borrowed_isbns(),
            history: other.history().iter().map(|b| b.isbn()).collect(),
        }
    }
}
