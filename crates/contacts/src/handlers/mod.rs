pub mod contacts;
pub mod health;
pub mod me;
