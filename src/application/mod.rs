// Application layer - the session that hosts a ledger for one screen.

pub mod error;
pub mod session;

pub use error::*;
pub use session::*;
