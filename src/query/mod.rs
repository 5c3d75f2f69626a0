pub mod conditions;
mod poller;
mod waiter;

pub use conditions::Condition;
pub use poller::{ElementPoller, ElementPollerTicker};
pub use waiter::Waiter;
