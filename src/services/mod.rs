pub mod auth;
pub mod gateway;
pub mod icons;
pub mod lifecycle;
pub mod reporting;
