pub mod forms;
pub mod handlers;
pub mod request_log;
pub mod routes;

pub use forms::*;
pub use handlers::*;
pub use routes::*;
