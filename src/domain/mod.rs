pub mod account;
pub mod card;
pub mod category;
pub mod common;
pub mod goal;
pub mod tag;
pub mod transaction;

pub use account::Account;
pub use card::{Card, CardKind};
pub use category::{Category, CategoryKind};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use goal::{Contribution, Goal};
pub use tag::Tag;
pub use transaction::{
    InstallmentSlot, PaymentMethod, RecurrenceKind, RecurrenceTag, Transaction, TransactionKind,
    TransactionStatus,
};
