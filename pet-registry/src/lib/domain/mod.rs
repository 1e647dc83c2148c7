pub mod authentication;
pub mod pet;
pub mod user;
