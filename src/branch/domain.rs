pub mod service;

use crate::books::domain::model::Book;
use crate::books::dto::BookDto;
use crate::branch::dto::BranchDto;
use crate::checkout::domain::model::LoanToken;
use crate::checkout::dto::LoanDto;
use crate::core::library::LibraryResult;
use crate::inventory::domain::model::Inventory;
use crate::inventory::dto::{SearchHit, StockEntry};
use crate::patrons::domain::model::Patron;
use crate::recommend::domain::RecommendationStrategy;

// BranchService drives the lending lifecycle of one branch against the inventory it owns.
// Failed operations leave the branch unchanged apart from the documented side effects,
// e.g. a refused checkout on an exhausted book subscribes the patron as a waiter.
pub trait BranchService: Sync + Send {
    fn branch(&self) -> BranchDto;
    fn update_name(&mut self, name: &str);
    fn update_address(&mut self, address: &str);
    fn inventory(&self) -> &Inventory;

    fn add_book(&mut self, book: &Book, quantity: u32);
    fn remove_book(&mut self, book: &Book) -> bool;
    fn update_quantity(&mut self, book: &Book, quantity: u32);
    fn quantity(&self, book: &Book) -> Option<u32>;

    fn checkout_book(&mut self, book: &Book, patron: &Patron) -> LibraryResult<LoanToken>;
    fn return_book(&mut self, token: &LoanToken) -> LibraryResult<()>;
    fn transfer_book(&mut self, book: &Book, target: &mut dyn BranchService, quantity: u32) -> LibraryResult<()>;

    fn search_book(&self, term: &str) -> Vec<SearchHit>;
    fn search_in_branch(&self, book: &Book, other: &dyn BranchService) -> Vec<SearchHit>;
    fn recommend_books(&self, patron: &Patron, strategy: &dyn RecommendationStrategy) -> Vec<BookDto>;
    fn unsubscribe(&mut self, book: &Book, patron: &Patron) -> bool;

    fn inventory_report(&self) -> Vec<StockEntry>;
    fn borrowed_report(&self) -> Vec<LoanDto>;
}
