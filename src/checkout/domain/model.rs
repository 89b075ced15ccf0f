use chrono::{Duration, NaiveDateTime, Utc};
use uuid::Uuid;
use crate::books::domain::model::Book;
use crate::core::domain::{Configuration, Identifiable};
use crate::patrons::domain::model::Patron;

// LoanToken is the receipt for one open loan of one book by one patron. Only the
// inventory issues tokens and each one is accepted back exactly once.
#[derive(Debug, Clone)]
pub struct LoanToken {
    token_id: Uuid,
    patron: Patron,
    book: Book,
    issued_at: NaiveDateTime,
    due_at: NaiveDateTime,
}

impl LoanToken {
    pub(crate) fn new(patron: &Patron, book: &Book, config: &Configuration) -> Self {
        let issued_at = Utc::now().naive_utc();
        Self {
            token_id: Uuid::new_v4(),
            patron: patron.clone(),
            book: book.clone(),
            issued_at,
            due_at: issued_at + Duration::days(config.book_loan_days),
        }
    }

    pub fn token_id(&self) -> Uuid {
        self.token_id
    }

    pub fn patron(&self) -> &Patron {
        &self.patron
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn issued_at(&self) -> NaiveDateTime {
        self.issued_at
    }

    pub fn due_at(&self) -> NaiveDateTime {
        self.due_at
    }
}

impl Identifiable for LoanToken {
    fn id(&self) -> String {
        self.token_id.to_string()
    }
}

impl PartialEq for LoanToken {
    fn eq(&self, other: &Self) -> bool {
        self.token_id == other.token_id
    }
}

impl Eq for LoanToken {}
