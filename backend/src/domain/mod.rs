//! Domain layer: the pure core (rounding, ledger, conversion, goals,
//! investing) plus the services that drive it through storage under the
//! per-account locks.

pub mod account_service;
pub mod cashback_service;
pub mod clock;
pub mod content;
pub mod conversion;
pub mod donation_goal;
pub mod donation_service;
pub mod errors;
pub mod invest;
pub mod invest_service;
pub mod ledger;
pub mod locks;
pub mod models;
pub mod rounding;

pub use account_service::AccountService;
pub use cashback_service::CashbackService;
pub use donation_service::DonationService;
pub use errors::DomainError;
pub use invest_service::InvestService;
pub use locks::AccountLocks;
