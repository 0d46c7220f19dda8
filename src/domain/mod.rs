mod calendar;
mod expense;
mod ledger;
mod money;

pub use calendar::*;
pub use expense::*;
pub use ledger::*;
pub use money::*;
