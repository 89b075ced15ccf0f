use std::collections::HashMap;
use uuid::Uuid;
use crate::books::domain::model::Book;
use crate::books::dto::BookDto;
use crate::branch::dto::BranchDto;
use crate::checkout::domain::model::LoanToken;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::hold::domain::registry::ReservationRegistry;
use crate::inventory::dto::StockEntry;
use crate::patrons::domain::Notifiable;
use crate::patrons::domain::model::Patron;

#[derive(Debug)]
struct StockItem {
    book: Book,
    quantity: u32,
}

impl From<&StockItem> for StockEntry {
    fn from(other: &StockItem) -> Self {
        StockEntry {
            book: BookDto::from(&other.book),
            quantity: other.quantity,
        }
    }
}

// Inventory is the stock ledger of a single branch: available quantity per book,
// the loan tokens currently out, and the patrons waiting on exhausted books.
// A quantity of 0 means the book is known but exhausted; a missing entry means
// the branch does not stock it.
#[derive(Debug, Default)]
pub struct Inventory {
    stock: HashMap<u64, StockItem>,
    outstanding: HashMap<Uuid, LoanToken>,
    reservations: ReservationRegistry,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    // Merges into the existing quantity when the book is already tracked. Like
    // set_quantity it never fails: a merge past u32::MAX saturates at u32::MAX.
    pub fn stock(&mut self, book: &Book, quantity: u32) {
        let item = self.stock
            .entry(book.isbn())
            .or_insert_with(|| StockItem { book: book.clone(), quantity: 0 });
        item.quantity = item.quantity.saturating_add(quantity);
    }

    pub fn withdraw(&mut self, book: &Book) -> bool {
        self.stock.remove(&book.isbn()).is_some()
    }

    // Overwrites the tracked quantity. Outstanding tokens are not consulted, so a
    // correction may leave fewer copies on the shelf than were ever lent out.
    pub fn set_quantity(&mut self, book: &Book, quantity: u32) {
        self.stock
            .entry(book.isbn())
            .or_insert_with(|| StockItem { book: book.clone(), quantity: 0 })
            .quantity = quantity;
    }

    pub fn is_tracked(&self, book: &Book) -> bool {
        self.stock.contains_key(&book.isbn())
    }

    pub fn quantity(&self, book: &Book) -> Option<u32> {
        self.stock.get(&book.isbn()).map(|item| item.quantity)
    }

    pub fn is_available(&self, book: &Book) -> LibraryResult<bool> {
        self.quantity(book)
            .map(|quantity| quantity > 0)
            .ok_or_else(|| LibraryError::not_tracked(
                format!("book {} is not tracked", book.isbn()).as_str()))
    }

    // Takes one copy off the shelf. Callers check availability first; an exhausted
    // entry is refused rather than driven below zero.
    pub fn checkout(&mut self, book: &Book) -> LibraryResult<()> {
        let item = self.stock
            .get_mut(&book.isbn())
            .ok_or_else(|| LibraryError::not_tracked(
                format!("book {} is not tracked", book.isbn()).as_str()))?;
        item.quantity = item.quantity
            .checked_sub(1)
            .ok_or_else(|| LibraryError::not_available(
                format!("book {} has no copies left", book.isbn()).as_str()))?;
        Ok(())
    }

    pub fn issue_token(&mut self, book: &Book, patron: &Patron, config: &Configuration) -> LoanToken {
        let token = LoanToken::new(patron, book, config);
        self.outstanding.insert(token.token_id(), token.clone());
        token
    }

    // Retires the token and puts its copy back on the shelf, re-creating the entry
    // when the book was withdrawn while the loan was open.
    pub fn return_token(&mut self, token: &LoanToken) -> LibraryResult<()> {
        if self.outstanding.remove(&token.token_id()).is_none() {
            return Err(LibraryError::invalid_token(
                format!("token {} is not outstanding", token.token_id()).as_str()));
        }
        self.stock(token.book(), 1);
        Ok(())
    }

    pub fn has_token(&self, token: &LoanToken) -> bool {
        self.outstanding.contains_key(&token.token_id())
    }

    pub fn outstanding_tokens(&self) -> Vec<LoanToken> {
        let mut tokens: Vec<LoanToken> = self.outstanding.values().cloned().collect();
        tokens.sort_by_key(|t| (t.issued_at(), t.book().isbn()));
        tokens
    }

    pub fn search_by_title(&self, title: &str) -> Vec<StockEntry> {
        let title = title.to_lowercase();
        self.matching(|book| book.title().to_lowercase() == title)
    }

    pub fn search_by_author(&self, author: &str) -> Vec<StockEntry> {
        let author = author.to_lowercase();
        self.matching(|book| book.author().to_lowercase() == author)
    }

    pub fn search_by_isbn(&self, isbn: &str) -> Vec<StockEntry> {
        self.matching(|book| book.isbn().to_string() == isbn)
    }

    pub fn entries(&self) -> Vec<StockEntry> {
        self.matching(|_| true)
    }

    pub fn available_books(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.stock
            .values()
            .filter(|item| item.quantity > 0)
            .map(|item| item.book.clone())
            .collect();
        books.sort_by_key(Book::isbn);
        books
    }

    pub fn add_waiter(&mut self, book: &Book, subscriber: Box<dyn Notifiable>) -> bool {
        self.reservations.add_observer(book, subscriber)
    }

    pub fn remove_waiter(&mut self, book: &Book, subscriber_id: &str) -> bool {
        self.reservations.remove_observer(book, subscriber_id)
    }

    pub fn notify_waiters(&mut self, book: &Book, available: bool, branch: &BranchDto) -> usize {
        self.reservations.notify_observers(book, available, branch)
    }

    pub fn waiters(&self, book: &Book) -> Vec<String> {
        self.reservations.observers(book)
    }

    fn matching<P: Fn(&Book) -> bool>(&self, predicate: P) -> Vec<StockEntry> {
        let mut entries: Vec<StockEntry> = self.stock
            .values()
            .filter(|item| predicate(&item.book))
            .map(StockEntry::from)
            .collect();
        entries.sort_by_key(|e| e.book.isbn);
        entries
    }
}
