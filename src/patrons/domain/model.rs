use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use crate::books::domain::model::Book;
use crate::branch::domain::BranchService;
use crate::branch::dto::BranchDto;
use crate::checkout::domain::model::LoanToken;
use crate::core::domain::Identifiable;
use crate::patrons::domain::Notifiable;
use crate::utils::date::serializer;

// Notification records one availability message delivered to a patron
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub isbn: u64,
    pub title: String,
    pub available: bool,
    pub branch_id: i64,
    pub branch_name: String,
    #[serde(with = "serializer")]
    pub received_at: NaiveDateTime,
}

// Patron abstracts a library member together with their borrowing state. It is a
// handle: clones held by loan tokens and reservation registries see the same state.
#[derive(Clone)]
pub struct Patron {
    patron_id: i64,
    state: Arc<RwLock<PatronState>>,
}

struct PatronState {
    name: String,
    address: String,
    mobile: String,
    // isbn -> token id of the open loan
    loans: HashMap<u64, Uuid>,
    // books returned at least once, keyed by isbn
    history: HashMap<u64, Book>,
    notifications: Vec<Notification>,
}

impl Patron {
    pub fn new(patron_id: i64, name: &str, address: &str, mobile: &str) -> Self {
        Self {
            patron_id,
            state: Arc::new(RwLock::new(PatronState {
                name: name.to_string(),
                address: address.to_string(),
                mobile: mobile.to_string(),
                loans: HashMap::new(),
                history: HashMap::new(),
                notifications: vec![],
            })),
        }
    }

    fn state(&self) -> RwLockReadGuard<'_, PatronState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, PatronState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn patron_id(&self) -> i64 {
        self.patron_id
    }

    pub fn name(&self) -> String {
        self.state().name.to_string()
    }

    pub fn address(&self) -> String {
        self.state().address.to_string()
    }

    pub fn mobile(&self) -> String {
        self.state().mobile.to_string()
    }

    pub fn update_name(&self, name: &str) {
        self.state_mut().name = name.to_string();
    }

    pub fn update_address(&self, address: &str) {
        self.state_mut().address = address.to_string();
    }

    pub fn update_mobile(&self, mobile: &str) {
        self.state_mut().mobile = mobile.to_string();
    }

    pub fn is_borrowing(&self, book: &Book) -> bool {
        self.state().loans.contains_key(&book.isbn())
    }

    pub fn has_read(&self, book: &Book) -> bool {
        self.state().history.contains_key(&book.isbn())
    }

    pub fn borrowed_count(&self) -> usize {
        self.state().loans.len()
    }

    pub fn open_loan(&self, book: &Book) -> Option<Uuid> {
        self.state().loans.get(&book.isbn()).copied()
    }

    pub(crate) fn borrow_book(&self, token: &LoanToken) {
        self.state_mut().loans.insert(token.book().isbn(), token.token_id());
    }

    pub(crate) fn return_book(&self, book: &Book) {
        let mut state = self.state_mut();
        state.loans.remove(&book.isbn());
        state.history.insert(book.isbn(), book.clone());
    }

    pub fn borrowed_isbns(&self) -> Vec<u64> {
        let mut isbns: Vec<u64> = self.state().loans.keys().copied().collect();
        isbns.sort_unstable();
        isbns
    }

    pub fn history(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.state().history.values().cloned().collect();
        books.sort_by_key(Book::isbn);
        books
    }

    pub fn preferred_authors(&self) -> HashSet<String> {
        self.state().history.values().map(|b| b.author().to_string()).collect()
    }

    // a book catalogued without a genre contributes None as its preference
    pub fn preferred_genres(&self) -> HashSet<Option<String>> {
        self.state().history.values().map(Book::genre).collect()
    }

    pub fn preferred_titles(&self) -> HashSet<String> {
        self.state().history.values().map(|b| b.title().to_string()).collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state().notifications.clone()
    }

    pub fn unsubscribe(&self, book: &Book, branch: &mut dyn BranchService) -> bool {
        branch.unsubscribe(book, self)
    }
}

impl Identifiable for Patron {
    fn id(&self) -> String {
        self.patron_id.to_string()
    }
}

impl Notifiable for Patron {
    fn update(&self, book: &Book, available: bool, branch: &BranchDto) {
        let name = self.name();
        if available {
            info!("Notification to {}: Book {} is available at Branch: {}", name, book.title(), branch.name);
        } else {
            info!("Notification to {}: Book {} is not available at Branch: {}", name, book.title(), branch.name);
        }
        self.state_mut().notifications.push(Notification {
            isbn: book.isbn(),
            title: book.title().to_string(),
            available,
            branch_id: branch.branch_id,
            branch_name: branch.name.to_string(),
            received_at: Utc::now().naive_utc(),
        });
    }
}

impl PartialEq for Patron {
    fn eq(&self, other: &Self) -> bool {
        self.patron_id == other.patron_id
    }
}

impl Eq for Patron {}

impl Hash for Patron {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.patron_id.hash(state);
    }
}

impl fmt::Debug for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patron")
            .field("patron_id", &self.patron_id)
            .field("name", &self.name())
            .field("borrowed", &self.borrowed_isbns())
            .finish()
    }
}
