mod frontend;
mod http_server;

pub use frontend::render_page;
pub use http_server::{router, AppState, HealthResponse, HttpServer};
