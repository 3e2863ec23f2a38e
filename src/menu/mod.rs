//! Interactive menu session, modelled as a state machine over screens

mod errors;
mod screen;
mod session;

pub use errors::MenuError;
pub use screen::Screen;
pub use session::Session;
