pub mod action;
pub mod foldrange;
pub mod payout;
pub mod state;

pub use action::{Action, BetSize};
pub use payout::Rake;
pub use state::GameState;
