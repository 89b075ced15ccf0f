use std::collections::HashMap;
use std::fmt;
use crate::books::domain::model::Book;
use crate::branch::dto::BranchDto;
use crate::patrons::domain::Notifiable;

// ReservationRegistry keeps, per book, the subscribers waiting for it to come back.
// Subscribers are keyed by their id, so a patron waits at most once per book.
#[derive(Default)]
pub struct ReservationRegistry {
    waiters: HashMap<u64, HashMap<String, Box<dyn Notifiable>>>,
}

impl ReservationRegistry {
    pub fn new() -> Self {
        Self {
            waiters: HashMap::new(),
        }
    }

    // returns false when the subscriber was already waiting on the book
    pub fn add_observer(&mut self, book: &Book, subscriber: Box<dyn Notifiable>) -> bool {
        self.waiters
            .entry(book.isbn())
            .or_default()
            .insert(subscriber.id(), subscriber)
            .is_none()
    }

    pub fn remove_observer(&mut self, book: &Book, subscriber_id: &str) -> bool {
        let Some(subscribers) = self.waiters.get_mut(&book.isbn()) else {
            return false;
        };
        let removed = subscribers.remove(subscriber_id).is_some();
        if subscribers.is_empty() {
            self.waiters.remove(&book.isbn());
        }
        removed
    }

    // Dispatches to every subscriber currently waiting on the book and returns how many
    // were reached. An availability notice ends the wait, so those subscribers are
    // cleared afterwards; an unavailability notice keeps them registered.
    pub fn notify_observers(&mut self, book: &Book, available: bool, branch: &BranchDto) -> usize {
        let dispatched = match self.waiters.get(&book.isbn()) {
            Some(subscribers) => {
                for subscriber in subscribers.values() {
                    subscriber.update(book, available, branch);
                }
                subscribers.len()
            }
            None => 0,
        };
        if available {
            self.waiters.remove(&book.isbn());
        }
        dispatched
    }

    pub fn observers(&self, book: &Book) -> Vec<String> {
        let mut ids: Vec<String> = self.waiters
            .get(&book.isbn())
            .map(|subscribers| subscribers.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    pub fn is_observing(&self, book: &Book, subscriber_id: &str) -> bool {
        self.waiters
            .get(&book.isbn())
            .map(|subscribers| subscribers.contains_key(subscriber_id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for ReservationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&u64, usize> = self.waiters.iter().map(|(isbn, s)| (isbn, s.len())).collect();
        f.debug_struct("ReservationRegistry")
            .field("waiters", &counts)
            .finish()
    }
}
