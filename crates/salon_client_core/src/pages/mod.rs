//! Screen controllers. Each owns the state one screen renders and talks to the services.

pub mod fetch;
pub mod notice;
pub mod settings;
pub mod transactions;

pub use fetch::{FetchGeneration, FetchTicket};
pub use notice::{LoadState, Notice, NoticeLevel, ReloadOutcome};
pub use settings::{validate_details, SettingsPage};
pub use transactions::{TransactionRow, TransactionsPage};
