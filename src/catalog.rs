pub mod domain;
pub mod factory;
