pub mod core;
pub mod books;
pub mod catalog;
pub mod patrons;
pub mod checkout;
pub mod hold;
pub mod inventory;
pub mod branch;
pub mod recommend;
pub mod gateway;
pub mod utils;
