use serde::{Deserialize, Serialize};

// BranchDto identifies a lending branch in notifications, events and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchDto {
    pub branch_id: i64,
    pub name: String,
    pub address: String,
}

impl BranchDto {
    pub fn new(branch_id: i64, name: &str, address: &str) -> Self {
        Self {
            branch_id,
            name: name.to_string(),
            address: address.to_string(),
        }
    }
}
