//! Types that represent the core data model, such as `Transaction` and `Category`.
mod account;
mod amount;
mod category;
mod enrollment;
mod institution;
mod mapping;
mod month;
mod transaction;

pub use account::{Account, Balance, InstitutionRef};
pub use amount::{Amount, AmountError};
pub use category::{Category, CategorySet, CategorySpending, CategoryUpdate, DEFAULT_CATEGORY_COLOR};
pub use enrollment::Enrollment;
pub use institution::{Institution, TokenOutcome};
pub use mapping::{MappingRule, MappingSet, Mappings};
pub use month::YearMonth;
pub use transaction::{
    ExportOutcome, Transaction, TransactionBatch, TransactionRecord, UNCATEGORIZED,
};
