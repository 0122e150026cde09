pub mod handlers;
pub mod populate;
pub mod routes;

pub use routes::create_http_routes;
