pub mod callback;
pub mod display;
pub mod session;
pub mod transaction;
