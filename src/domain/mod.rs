pub mod prompt;
pub mod pull;
pub mod ticket;
