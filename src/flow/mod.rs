pub mod definition;
pub mod session;

pub use definition::*;
pub use session::*;
