//! One service per backend resource area. Every call returns `Result<T, ApiError>`; wrap with
//! `Envelope::from_result` where a UI binding wants `{success, data | error}`.

pub mod address;
pub mod appointments;
pub mod cashback;
pub mod commissions;
pub mod evaluations;
pub mod financial;
pub mod goals;
pub mod invoices;
pub mod notifications;
pub mod reports;
pub mod settings;

pub use address::{merge_address, AddressService};
pub use appointments::{AppointmentQuery, AppointmentService};
pub use cashback::CashbackService;
pub use commissions::CommissionService;
pub use evaluations::EvaluationService;
pub use financial::FinancialService;
pub use goals::GoalService;
pub use invoices::InvoiceService;
pub use notifications::NotificationService;
pub use reports::ReportService;
pub use settings::SettingsService;
