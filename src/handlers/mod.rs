pub mod admin;
pub mod health;
pub mod rooms;
pub mod session;
