use std::collections::HashMap;
use tracing::{info, warn};
use crate::books::domain::model::Book;
use crate::books::dto::BookDto;
use crate::branch::domain::BranchService;
use crate::branch::dto::BranchDto;
use crate::checkout::domain::model::LoanToken;
use crate::checkout::dto::LoanDto;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::events::DomainEvent;
use crate::core::library::{CheckoutStatus, LibraryError, LibraryResult, SearchField,
                           DUPLICATE_LOAN_REASON, LOAN_LIMIT_REASON};
use crate::gateway::events::EventPublisher;
use crate::hold::dto::HoldDto;
use crate::inventory::domain::model::Inventory;
use crate::inventory::dto::{SearchHit, StockEntry};
use crate::patrons::domain::model::Patron;
use crate::recommend::domain::RecommendationStrategy;

pub struct BranchServiceImpl {
    config: Configuration,
    branch: BranchDto,
    inventory: Inventory,
    events_publisher: Box<dyn EventPublisher>,
}

impl BranchServiceImpl {
    pub fn new(config: &Configuration, branch: BranchDto, events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            branch,
            inventory: Inventory::new(),
            events_publisher,
        }
    }

    fn publish(&self, event: serde_json::Result<DomainEvent>) {
        if let Err(err) = event.map_err(LibraryError::from).and_then(|e| self.events_publisher.publish(&e)) {
            warn!("failed to publish event for branch {}: {}", self.branch.branch_id, err);
        }
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch.branch_id.to_string())])
    }

    fn stock_entry(&self, book: &Book) -> StockEntry {
        StockEntry {
            book: BookDto::from(book),
            quantity: self.inventory.quantity(book).unwrap_or(0),
        }
    }

    fn subscribe(&mut self, book: &Book, patron: &Patron) {
        if !self.inventory.add_waiter(book, Box::new(patron.clone())) {
            return;
        }
        info!("Notification: Patron {} is subscribed for book: {}", patron.name(), book.title());
        let hold = HoldDto::from_patron_book(self.branch.branch_id, patron, book);
        self.publish(DomainEvent::added(
            "book_hold", "holds", hold.key().as_str(), &self.metadata(), &hold));
    }
}

impl BranchService for BranchServiceImpl {
    fn branch(&self) -> BranchDto {
        self.branch.clone()
    }

    fn update_name(&mut self, name: &str) {
        self.branch.name = name.to_string();
    }

    fn update_address(&mut self, address: &str) {
        self.branch.address = address.to_string();
    }

    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn add_book(&mut self, book: &Book, quantity: u32) {
        self.inventory.stock(book, quantity);
        info!("Stocked {} copies of {} at Branch: {}", quantity, book.title(), self.branch.name);
        self.publish(DomainEvent::added(
            "book_stocked", "inventory", book.id().as_str(), &self.metadata(), &self.stock_entry(book)));
    }

    fn remove_book(&mut self, book: &Book) -> bool {
        if !self.inventory.withdraw(book) {
            return false;
        }
        info!("Withdrew {} from Branch: {}", book.title(), self.branch.name);
        self.publish(DomainEvent::deleted(
            "book_withdrawn", "inventory", book.id().as_str(), &self.metadata(), &BookDto::from(book)));
        true
    }

    fn update_quantity(&mut self, book: &Book, quantity: u32) {
        self.inventory.set_quantity(book, quantity);
        self.publish(DomainEvent::updated(
            "book_quantity", "inventory", book.id().as_str(), &self.metadata(), &self.stock_entry(book)));
    }

    fn quantity(&self, book: &Book) -> Option<u32> {
        self.inventory.quantity(book)
    }

    fn checkout_book(&mut self, book: &Book, patron: &Patron) -> LibraryResult<LoanToken> {
        if !self.inventory.is_available(book).unwrap_or(false) {
            warn!("Failed Transaction: Book {} not available at Branch: {}", book.title(), self.branch.name);
            self.subscribe(book, patron);
            return Err(LibraryError::not_available(
                format!("book {} is not available, {} has been subscribed for notification",
                        book.title(), patron.name()).as_str()));
        }
        if patron.borrowed_count() >= self.config.max_loans {
            warn!("Invalid Transaction: {} cannot borrow the book {}, loan limit reached", patron.name(), book.title());
            return Err(LibraryError::ineligible_patron(
                format!("patron {} already has {} open loans", patron.patron_id(), patron.borrowed_count()).as_str(),
                Some(LOAN_LIMIT_REASON.to_string())));
        }
        if patron.is_borrowing(book) {
            warn!("Invalid Transaction: {} cannot borrow the book {}, already borrowed", patron.name(), book.title());
            return Err(LibraryError::ineligible_patron(
                format!("patron {} already holds book {}", patron.patron_id(), book.isbn()).as_str(),
                Some(DUPLICATE_LOAN_REASON.to_string())));
        }

        self.inventory.checkout(book)?;
        let token = self.inventory.issue_token(book, patron, &self.config);
        patron.borrow_book(&token);
        info!("{} Book is checked out by {} at Branch: {}", book.title(), patron.name(), self.branch.name);
        self.inventory.notify_waiters(book, false, &self.branch);
        let loan = LoanDto::from_token(self.branch.branch_id, &token, CheckoutStatus::CheckedOut);
        self.publish(DomainEvent::added(
            "book_checkout", "checkout", loan.token_id.as_str(), &self.metadata(), &loan));
        Ok(token)
    }

    fn return_book(&mut self, token: &LoanToken) -> LibraryResult<()> {
        if let Err(err) = self.inventory.return_token(token) {
            warn!("Token is invalid: {}", err);
            return Err(err);
        }
        let (book, patron) = (token.book(), token.patron());
        patron.return_book(book);
        info!("{} Book is returned successfully by {}", book.title(), patron.name());
        self.inventory.remove_waiter(book, patron.id().as_str());
        self.inventory.notify_waiters(book, true, &self.branch);
        let loan = LoanDto::from_token(self.branch.branch_id, token, CheckoutStatus::Returned);
        self.publish(DomainEvent::deleted(
            "book_returned", "checkout", loan.token_id.as_str(), &self.metadata(), &loan));
        Ok(())
    }

    fn transfer_book(&mut self, book: &Book, target: &mut dyn BranchService, quantity: u32) -> LibraryResult<()> {
        let Some(available) = self.inventory.quantity(book).filter(|q| *q > 0 && *q >= quantity) else {
            warn!("Invalid Transaction: Book {} not available or quantity requested is more than available", book.title());
            return Err(LibraryError::transfer_infeasible(
                format!("cannot transfer {} copies of book {} from branch {}",
                        quantity, book.isbn(), self.branch.branch_id).as_str()));
        };
        self.inventory.set_quantity(book, available - quantity);
        target.add_book(book, quantity);
        let to = target.branch();
        info!("Transferred {} copies of {} from {} to {}", quantity, book.title(), self.branch.name, to.name);
        let metadata = HashMap::from([
            ("branch_id".to_string(), self.branch.branch_id.to_string()),
            ("target_branch_id".to_string(), to.branch_id.to_string()),
            ("quantity".to_string(), quantity.to_string()),
        ]);
        self.publish(DomainEvent::updated(
            "book_transfer", "inventory", book.id().as_str(), &metadata, &self.stock_entry(book)));
        Ok(())
    }

    // every field is searched, so a term matching both title and author reports twice
    fn search_book(&self, term: &str) -> Vec<SearchHit> {
        info!("Search Book - Branch: {} Branch ID: {}", self.branch.name, self.branch.branch_id);
        let searches = [
            (SearchField::Title, self.inventory.search_by_title(term)),
            (SearchField::Author, self.inventory.search_by_author(term)),
            (SearchField::Isbn, self.inventory.search_by_isbn(term)),
        ];
        let mut hits = vec![];
        for (field, entries) in searches {
            for entry in entries {
                info!("Title: {} Author: {} Quantity: {}", entry.book.title, entry.book.author, entry.quantity);
                hits.push(SearchHit { field, entry });
            }
        }
        if hits.is_empty() {
            info!("Book not found with property : {}", term);
        }
        hits
    }

    fn search_in_branch(&self, book: &Book, other: &dyn BranchService) -> Vec<SearchHit> {
        info!("Search Book Availability in Other Branches - Branch: {} Branch ID: {}", self.branch.name, self.branch.branch_id);
        other.search_book(book.title())
    }

    fn recommend_books(&self, patron: &Patron, strategy: &dyn RecommendationStrategy) -> Vec<BookDto> {
        info!("Recommend Books - Branch: {} Branch ID: {} Strategy: {}", self.branch.name, self.branch.branch_id, strategy.kind());
        strategy.recommend(patron, &self.inventory)
    }

    fn unsubscribe(&mut self, book: &Book, patron: &Patron) -> bool {
        if !self.inventory.remove_waiter(book, patron.id().as_str()) {
            return false;
        }
        let hold = HoldDto::from_patron_book(self.branch.branch_id, patron, book);
        self.publish(DomainEvent::deleted(
            "book_hold_cancel", "holds", hold.key().as_str(), &self.metadata(), &hold));
        true
    }

    fn inventory_report(&self) -> Vec<StockEntry> {
        info!("Display Inventory - Branch: {} Branch ID: {}", self.branch.name, self.branch.branch_id);
        let entries = self.inventory.entries();
        for entry in &entries {
            info!("Title: {} Author: {} Quantity: {}", entry.book.title, entry.book.author, entry.quantity);
        }
        entries
    }

    fn borrowed_report(&self) -> Vec<LoanDto> {
        info!("Display Borrowed Details - Branch: {} Branch ID: {}", self.branch.name, self.branch.branch_id);
        self.inventory.outstanding_tokens().iter().map(|token| {
            let loan = LoanDto::from_token(self.branch.branch_id, token, CheckoutStatus::CheckedOut);
            info!("Book: {} Patron: {} Issue Date: {}", loan.title, loan.patron_name, loan.issued_at);
            loan
        }).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::Book;
    use crate::branch::domain::BranchService;
    use crate::branch::domain::service::BranchServiceImpl;
    use crate::branch::dto::BranchDto;
    use crate::checkout::domain::model::LoanToken;
    use crate::checkout::dto::LoanDto;
    use crate::core::domain::Configuration;
    use crate::core::events::DomainEventType;
    use crate::core::library::{CheckoutStatus, LibraryError, SearchField, DUPLICATE_LOAN_REASON, LOAN_LIMIT_REASON};
    use crate::gateway::memory::publisher::MemoryPublisher;
    use crate::patrons::domain::model::Patron;
    use crate::recommend::domain::RecommendationKind;
    use crate::recommend::factory::create_recommendation_strategy;

    fn central(publisher: &MemoryPublisher) -> BranchServiceImpl {
        BranchServiceImpl::new(&Configuration::new(),
                               BranchDto::new(54321, "Central Branch", "Vijayawada"),
                               Box::new(publisher.clone()))
    }

    fn overseas(publisher: &MemoryPublisher) -> BranchServiceImpl {
        BranchServiceImpl::new(&Configuration::new(),
                               BranchDto::new(54322, "Overseas Branch", "Houston"),
                               Box::new(publisher.clone()))
    }

    fn book(isbn: u64, title: &str, author: &str) -> Book {
        Book::new(isbn, title, author, 2005, Some("Education"))
    }

    fn assert_quantity_invariant(svc: &BranchServiceImpl, book: &Book) {
        if let Some(quantity) = svc.quantity(book) {
            assert_eq!(Ok(quantity > 0), svc.inventory().is_available(book));
        }
    }

    fn outstanding_for(svc: &BranchServiceImpl, book: &Book) -> u32 {
        svc.inventory().outstanding_tokens().iter().filter(|t| t.book() == book).count() as u32
    }

    // seeded linear congruential generator, keeps operation sequences reproducible
    struct Lcg(u64);

    impl Lcg {
        fn below(&mut self, bound: u64) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 33) % bound
        }
    }

    #[test]
    fn test_should_merge_when_adding_stocked_book() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        svc.add_book(&clean_code, 2);
        svc.add_book(&clean_code, 3);
        assert_eq!(Some(5), svc.quantity(&clean_code));
        assert_eq!(2, publisher.events_named("book_stocked").len());
    }

    #[test]
    fn test_should_remove_and_update_books() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        assert!(!svc.remove_book(&clean_code));
        svc.add_book(&clean_code, 2);
        svc.update_quantity(&clean_code, 7);
        assert_eq!(Some(7), svc.quantity(&clean_code));
        assert!(svc.remove_book(&clean_code));
        assert_eq!(None, svc.quantity(&clean_code));
        assert_eq!(1, publisher.events_named("book_withdrawn").len());
        assert_eq!(DomainEventType::Updated, publisher.events_named("book_quantity")[0].kind);
    }

    #[test]
    fn test_should_update_branch_details() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        svc.update_name("Main Branch");
        svc.update_address("Guntur");
        assert_eq!(BranchDto::new(54321, "Main Branch", "Guntur"), svc.branch());
    }

    #[test]
    fn test_should_checkout_and_return_book() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        let patron = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        svc.add_book(&clean_code, 2);

        let token = svc.checkout_book(&clean_code, &patron).expect("should checkout");
        assert_eq!(Some(1), svc.quantity(&clean_code));
        assert!(patron.is_borrowing(&clean_code));
        assert_eq!(Some(token.token_id()), patron.open_loan(&clean_code));
        assert!(svc.inventory().has_token(&token));
        assert_quantity_invariant(&svc, &clean_code);

        let loans = svc.borrowed_report();
        assert_eq!(1, loans.len());
        assert_eq!("Akhil", loans[0].patron_name.as_str());

        assert!(svc.return_book(&token).is_ok());
        assert_eq!(Some(2), svc.quantity(&clean_code));
        assert!(!patron.is_borrowing(&clean_code));
        assert!(patron.has_read(&clean_code));
        assert!(svc.borrowed_report().is_empty());

        let checkout: LoanDto = publisher.events_named("book_checkout")[0].data().expect("loan data");
        assert_eq!(CheckoutStatus::CheckedOut, checkout.checkout_status);
        let returned: LoanDto = publisher.events_named("book_returned")[0].data().expect("loan data");
        assert_eq!(CheckoutStatus::Returned, returned.checkout_status);
        assert_eq!(checkout.token_id, returned.token_id);
    }

    #[test]
    fn test_should_accept_token_at_most_once() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        let patron = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        svc.add_book(&clean_code, 1);
        let token = svc.checkout_book(&clean_code, &patron).expect("should checkout");
        svc.return_book(&token).expect("should return");

        assert!(matches!(svc.return_book(&token), Err(LibraryError::InvalidToken { .. })));
        assert_eq!(Some(1), svc.quantity(&clean_code));
        assert_eq!(1, publisher.events_named("book_returned").len());
    }

    #[test]
    fn test_should_reject_token_from_other_branch() {
        let publisher = MemoryPublisher::new();
        let mut source = central(&publisher);
        let mut other = overseas(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        let patron = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        source.add_book(&clean_code, 1);
        other.add_book(&clean_code, 1);
        let token = source.checkout_book(&clean_code, &patron).expect("should checkout");

        assert!(matches!(other.return_book(&token), Err(LibraryError::InvalidToken { .. })));
        assert_eq!(Some(1), other.quantity(&clean_code));
        assert!(patron.is_borrowing(&clean_code));
    }

    #[test]
    fn test_should_issue_distinct_tokens() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        svc.add_book(&clean_code, 3);
        let first = svc.checkout_book(&clean_code, &Patron::new(1, "Akhil", "Vijayawada", "1")).expect("checkout");
        let second = svc.checkout_book(&clean_code, &Patron::new(2, "Loki", "Houston", "2")).expect("checkout");
        assert_ne!(first.token_id(), second.token_id());
        assert_eq!(2, svc.inventory().outstanding_tokens().len());
    }

    #[test]
    fn test_should_subscribe_patron_when_not_available() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        let patron = Patron::new(2, "Loki", "Houston", "9999999998");

        let err = svc.checkout_book(&clean_code, &patron).expect_err("untracked book");
        assert!(matches!(err, LibraryError::NotAvailable { .. }));
        assert!(err.retryable());
        assert_eq!(vec!["2".to_string()], svc.inventory().waiters(&clean_code));
        assert_eq!(None, svc.quantity(&clean_code));

        svc.add_book(&clean_code, 0);
        assert!(svc.checkout_book(&clean_code, &patron).is_err());
        assert_eq!(1, svc.inventory().waiters(&clean_code).len());
        assert_eq!(1, publisher.events_named("book_hold").len());
        assert_eq!(0, patron.borrowed_count());
    }

    #[test]
    fn test_should_refuse_sixth_loan() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let patron = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        let books: Vec<Book> = (0..6).map(|i| book(100 + i, format!("Book {}", i).as_str(), "Rahul")).collect();
        for b in &books {
            svc.add_book(b, 1);
        }
        for b in &books[..5] {
            assert!(svc.checkout_book(b, &patron).is_ok());
        }
        let err = svc.checkout_book(&books[5], &patron).expect_err("loan limit");
        assert!(matches!(err, LibraryError::IneligiblePatron { .. }));
        assert_eq!(Some(LOAN_LIMIT_REASON), err.reason_code());
        assert_eq!(5, patron.borrowed_count());
        assert_eq!(Some(1), svc.quantity(&books[5]));
        assert!(svc.inventory().waiters(&books[5]).is_empty());
    }

    #[test]
    fn test_should_read_loan_limit_from_config() {
        let publisher = MemoryPublisher::new();
        let config = Configuration::from_json(r#"{"max_loans": 1}"#).expect("config");
        let mut svc = BranchServiceImpl::new(&config, BranchDto::new(1, "Regional Branch", "Ranchi"),
                                             Box::new(publisher.clone()));
        let patron = Patron::new(3, "Dhoni", "Ranchi", "9999999997");
        let first = book(1, "Clean Code", "Akhilesh");
        let second = book(2, "Design Patterns", "Rahul");
        svc.add_book(&first, 1);
        svc.add_book(&second, 1);
        assert!(svc.checkout_book(&first, &patron).is_ok());
        assert!(matches!(svc.checkout_book(&second, &patron), Err(LibraryError::IneligiblePatron { .. })));
    }

    // Mirrors the original's inverted `hasBorrowedTheBook` guard: checkout is allowed only
    // while the patron does NOT hold the book, whatever the predicate name suggested.
    #[test]
    fn test_should_refuse_duplicate_loan() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        let patron = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        svc.add_book(&clean_code, 2);
        assert!(svc.checkout_book(&clean_code, &patron).is_ok());

        let err = svc.checkout_book(&clean_code, &patron).expect_err("duplicate loan");
        assert_eq!(Some(DUPLICATE_LOAN_REASON), err.reason_code());
        assert_eq!(Some(1), svc.quantity(&clean_code));
        assert_eq!(1, patron.borrowed_count());
        assert_eq!(1, svc.inventory().outstanding_tokens().len());
    }

    #[test]
    fn test_should_allow_borrowing_again_after_return() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        let patron = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        svc.add_book(&clean_code, 1);
        let token = svc.checkout_book(&clean_code, &patron).expect("checkout");
        svc.return_book(&token).expect("return");
        assert!(svc.checkout_book(&clean_code, &patron).is_ok());
    }

    #[test]
    fn test_should_wake_waiter_exactly_once() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let book_x = book(1234567890, "Clean Code", "Akhilesh");
        let first = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        let second = Patron::new(2, "Loki", "Houston", "9999999998");
        svc.add_book(&book_x, 1);

        let token = svc.checkout_book(&book_x, &first).expect("first checkout");
        assert_eq!(Some(0), svc.quantity(&book_x));
        assert_quantity_invariant(&svc, &book_x);

        assert!(matches!(svc.checkout_book(&book_x, &second), Err(LibraryError::NotAvailable { .. })));
        assert_eq!(vec!["2".to_string()], svc.inventory().waiters(&book_x));

        svc.return_book(&token).expect("return");
        assert_eq!(Some(1), svc.quantity(&book_x));
        let notifications = second.notifications();
        assert_eq!(1, notifications.len());
        assert!(notifications[0].available);
        assert_eq!(54321, notifications[0].branch_id);
        assert!(svc.inventory().waiters(&book_x).is_empty());
        assert!(first.notifications().is_empty());

        assert!(svc.checkout_book(&book_x, &second).is_ok());
        assert_eq!(1, second.notifications().len());
    }

    #[test]
    fn test_should_notify_waiters_of_unavailability() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let book_x = book(1234567890, "Clean Code", "Akhilesh");
        let waiter = Patron::new(3, "Dhoni", "Ranchi", "9999999997");
        assert!(svc.checkout_book(&book_x, &waiter).is_err());
        svc.add_book(&book_x, 2);

        svc.checkout_book(&book_x, &Patron::new(1, "Akhil", "Vijayawada", "1")).expect("checkout");
        let notifications = waiter.notifications();
        assert_eq!(1, notifications.len());
        assert!(!notifications[0].available);
        assert_eq!(vec!["3".to_string()], svc.inventory().waiters(&book_x));
    }

    #[test]
    fn test_should_unsubscribe_waiter() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let book_x = book(1234567890, "Clean Code", "Akhilesh");
        let patron = Patron::new(2, "Loki", "Houston", "9999999998");
        assert!(svc.checkout_book(&book_x, &patron).is_err());
        assert!(patron.unsubscribe(&book_x, &mut svc));
        assert!(!svc.unsubscribe(&book_x, &patron));
        assert!(svc.inventory().waiters(&book_x).is_empty());
        assert_eq!(DomainEventType::Deleted, publisher.events_named("book_hold_cancel")[0].kind);
    }

    #[test]
    fn test_should_transfer_and_merge_at_target() {
        let publisher = MemoryPublisher::new();
        let mut source = central(&publisher);
        let mut target = overseas(&publisher);
        let book_y = book(1234567894, "System Design", "Akhilesh");
        source.add_book(&book_y, 5);

        assert!(source.transfer_book(&book_y, &mut target, 3).is_ok());
        assert_eq!(Some(2), source.quantity(&book_y));
        assert_eq!(Some(3), target.quantity(&book_y));

        assert!(source.transfer_book(&book_y, &mut target, 2).is_ok());
        assert_eq!(Some(0), source.quantity(&book_y));
        assert_eq!(Some(5), target.quantity(&book_y));
        let transfers = publisher.events_named("book_transfer");
        assert_eq!(2, transfers.len());
        assert_eq!(Some(&"54322".to_string()), transfers[0].metadata.get("target_branch_id"));
    }

    #[test]
    fn test_should_not_partially_transfer() {
        let publisher = MemoryPublisher::new();
        let mut source = central(&publisher);
        let mut target = overseas(&publisher);
        let book_y = book(1234567894, "System Design", "Akhilesh");
        let untracked = book(1, "Design Patterns", "Rahul");
        source.add_book(&book_y, 2);
        target.add_book(&book_y, 1);

        let err = source.transfer_book(&book_y, &mut target, 3).expect_err("too many");
        assert!(matches!(err, LibraryError::TransferInfeasible { .. }));
        assert_eq!(Some(2), source.quantity(&book_y));
        assert_eq!(Some(1), target.quantity(&book_y));

        assert!(source.transfer_book(&untracked, &mut target, 1).is_err());
        assert_eq!(None, target.quantity(&untracked));

        source.update_quantity(&book_y, 0);
        assert!(source.transfer_book(&book_y, &mut target, 0).is_err());
        assert!(publisher.events_named("book_transfer").is_empty());
    }

    #[test]
    fn test_should_conserve_stock_across_mixed_operations() {
        let publisher = MemoryPublisher::new();
        let mut source = central(&publisher);
        let mut target = overseas(&publisher);
        let books: Vec<Book> = (0..3).map(|i| book(200 + i, format!("Volume {}", i).as_str(), "Rahul")).collect();
        let patrons: Vec<Patron> = (1..=4)
            .map(|i| Patron::new(i, format!("Patron {}", i).as_str(), "Vijayawada", "9999999999"))
            .collect();
        let mut stocked = [0u32; 3];
        let mut transferred = [0u32; 3];
        let mut open: Vec<LoanToken> = vec![];
        let mut rng = Lcg(42);

        for _ in 0..2000 {
            let b = rng.below(3) as usize;
            match rng.below(4) {
                0 => {
                    let n = rng.below(3) as u32 + 1;
                    source.add_book(&books[b], n);
                    stocked[b] += n;
                }
                1 => {
                    let patron = &patrons[rng.below(4) as usize];
                    if let Ok(token) = source.checkout_book(&books[b], patron) {
                        open.push(token);
                    }
                }
                2 => {
                    if !open.is_empty() {
                        let token = open.swap_remove(rng.below(open.len() as u64) as usize);
                        assert!(source.return_book(&token).is_ok());
                    }
                }
                _ => {
                    let n = rng.below(3) as u32;
                    if source.transfer_book(&books[b], &mut target, n).is_ok() {
                        transferred[b] += n;
                    }
                }
            }

            for (i, bk) in books.iter().enumerate() {
                let quantity = source.quantity(bk).unwrap_or(0);
                assert_eq!(stocked[i] - transferred[i], quantity + outstanding_for(&source, bk));
                assert_eq!(transferred[i], target.quantity(bk).unwrap_or(0));
                assert_quantity_invariant(&source, bk);
            }
            assert_eq!(open.len(), source.inventory().outstanding_tokens().len());
        }
    }

    #[test]
    fn test_should_search_every_field() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        svc.add_book(&book(1234567890, "Clean Code", "Akhilesh"), 2);
        svc.add_book(&book(1234567891, "Akhilesh", "Akhilesh"), 1);
        svc.add_book(&book(1234567892, "Design Patterns", "Rahul"), 4);

        let hits = svc.search_book("akhilesh");
        assert_eq!(3, hits.len());
        assert_eq!(SearchField::Title, hits[0].field);
        assert_eq!(1234567891, hits[0].entry.book.isbn);
        assert!(hits[1..].iter().all(|h| h.field == SearchField::Author));

        let by_isbn = svc.search_book("1234567892");
        assert_eq!(1, by_isbn.len());
        assert_eq!(SearchField::Isbn, by_isbn[0].field);
        assert_eq!(4, by_isbn[0].entry.quantity);

        assert!(svc.search_book("Refactoring").is_empty());
    }

    #[test]
    fn test_should_search_in_other_branch() {
        let publisher = MemoryPublisher::new();
        let svc = central(&publisher);
        let mut other = overseas(&publisher);
        let clean_code = book(1234567890, "Clean Code", "Akhilesh");
        other.add_book(&clean_code, 4);
        let hits = svc.search_in_branch(&clean_code, &other);
        assert_eq!(1, hits.len());
        assert_eq!(4, hits[0].entry.quantity);
    }

    #[test]
    fn test_should_report_inventory() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        svc.add_book(&book(2, "Design Patterns", "Rahul"), 4);
        svc.add_book(&book(1, "Clean Code", "Akhilesh"), 0);
        let report = svc.inventory_report();
        assert_eq!(vec![1, 2], report.iter().map(|e| e.book.isbn).collect::<Vec<u64>>());
        assert_eq!(0, report[0].quantity);
    }

    #[test]
    fn test_should_recommend_from_branch_inventory() {
        let publisher = MemoryPublisher::new();
        let mut svc = central(&publisher);
        let read = book(1, "Clean Code", "Akhilesh");
        let candidate = book(2, "System Design", "Akhilesh");
        let patron = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
        svc.add_book(&read, 1);
        svc.add_book(&candidate, 1);
        let token = svc.checkout_book(&read, &patron).expect("checkout");
        svc.return_book(&token).expect("return");

        let strategy = create_recommendation_strategy(RecommendationKind::Author);
        let recommended = svc.recommend_books(&patron, strategy.as_ref());
        assert_eq!(vec![2], recommended.iter().map(|b| b.isbn).collect::<Vec<u64>>());
    }
}
