use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::core::library::SearchField;

// StockEntry reports a tracked book together with its available quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub book: BookDto,
    pub quantity: u32,
}

// SearchHit reports one match of a search term and the field it matched on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub field: SearchField,
    pub entry: StockEntry,
}
