pub mod models;
pub mod pages;
