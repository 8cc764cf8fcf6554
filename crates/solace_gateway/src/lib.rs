pub mod server;
pub mod types;

pub use server::{router, serve, GatewayState};
pub use types::{ChatResponse, SelectAction, SelectRole, SubmitText};
