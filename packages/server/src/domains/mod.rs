// Business domains
pub mod activity_log;
pub mod auth;
pub mod chatrooms;
pub mod dedications;
pub mod ebazaar;
pub mod member;
