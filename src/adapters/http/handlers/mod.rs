pub mod pages;
pub mod web_auth;
