pub mod health;
pub mod recognize;
