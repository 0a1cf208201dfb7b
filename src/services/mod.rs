pub mod auth_service;
pub mod diary_service;
