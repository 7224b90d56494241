pub mod account;
pub mod donation;
pub mod portfolio;

pub use account::Account;
pub use donation::{DonationCategory, DonationGoal};
pub use portfolio::Portfolio;
