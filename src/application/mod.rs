pub mod error;
pub mod identity;
pub mod ledger;

pub use error::*;
pub use identity::*;
pub use ledger::*;
