mod category;
mod entry;
mod ledger;
mod money;

pub use category::*;
pub use entry::*;
pub use ledger::*;
pub use money::*;
