mod ground;
mod socket;
mod timers;

pub use ground::*;
pub use socket::*;
pub use timers::*;
