pub mod error;
pub mod hotel;
pub mod price;
pub mod search;
pub mod trend;
