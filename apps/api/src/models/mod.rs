pub mod interview;
pub mod people;
pub mod session;
