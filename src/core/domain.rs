use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// Identifiable defines common traits that can be shared by library participants
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}


// Configuration abstracts lending policy options for a branch
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub max_loans: usize,
    pub book_loan_days: i64,
}

impl Configuration {
    pub fn new() -> Self {
        Configuration {
            max_loans: 5,
            book_loan_days: 15,
        }
    }

    // from_json accepts partial documents, missing keys keep their defaults
    pub fn from_json(data: &str) -> LibraryResult<Self> {
        let overrides: serde_json::Value = serde_json::from_str(data)?;
        let mut merged = serde_json::to_value(Configuration::new())?;
        if let (Some(target), Some(source)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in source {
                target.insert(key.to_string(), value.clone());
            }
        }
        Ok(serde_json::from_value(merged)?)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
