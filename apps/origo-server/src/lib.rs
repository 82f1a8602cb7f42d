pub mod error;
pub mod routes;
pub mod state;

pub use routes::{router, ChatReply, ChatRequest, SaveUserForm};
pub use state::AppState;
