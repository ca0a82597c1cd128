pub mod analytics_service;
pub mod application_service;
