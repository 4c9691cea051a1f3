pub mod fallen;
pub mod health;
pub mod statistics;
pub mod users;
