//! CRUD and reporting services over the keyed store.
//!
//! Each service borrows the backend it operates on; every operation is one
//! complete load-mutate-save round trip against a single storage key.

pub mod account_service;
pub mod card_service;
pub mod category_service;
pub mod goal_service;
pub mod summary_service;
pub mod tag_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use card_service::CardService;
pub use category_service::CategoryService;
pub use goal_service::GoalService;
pub use summary_service::{CategoryTotal, DateWindow, MonthlySummary, SummaryService};
pub use tag_service::TagService;
pub use transaction_service::TransactionService;

use crate::engine::EngineError;
use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}
