//! Terminal UI: a Drop Token board the human plays on while the remote
//! opponent answers in the background.

mod app;
mod game_view;

pub use app::App;
pub use game_view::status_text;
