use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::LoanToken;
use crate::core::library::CheckoutStatus;
use crate::utils::date::serializer;


// LoanDto is the serializable receipt of a loan, as reported and published by a branch
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanDto {
    pub token_id: String,
    pub branch_id: i64,
    pub isbn: u64,
    pub title: String,
    pub patron_id: i64,
    pub patron_name: String,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub issued_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
}

impl LoanDto {
    pub fn from_token(branch_id: i64, token: &LoanToken, checkout_status: CheckoutStatus) -> Self {
        LoanDto {
            token_id: token.token_id().to_string(),
            branch_id,
            isbn: token.book().isbn(),
            title: token.book().title().to_string(),
            patron_id: token.patron().patron_id(),
            patron_name: token.patron().name(),
            checkout_status,
            issued_at: token.issued_at(),
            due_at: token.due_at(),
        }
    }
}
