//! Terminal front end: picks a column, hands it to the game session and draws
//! whatever the session reports back.

mod app;
mod game_view;

pub use app::App;
