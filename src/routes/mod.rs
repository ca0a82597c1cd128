pub mod analytics_routes;
pub mod application_routes;
pub mod health;
