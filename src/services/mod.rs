//! Service layer for budget-insights
//!
//! Services sit between the ledger and the engine: they fetch the rows a
//! report needs and hand them to the pure functions in `reports`.

pub mod report;

pub use report::{BudgetPerformance, CategoryBreakdown, ReportService, SummaryReport};
