pub mod event_bus;
pub mod interaction;
pub mod lifecycle;

pub use event_bus::*;
pub use interaction::*;
pub use lifecycle::*;
