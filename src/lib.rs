//! # finstat
//!
//! Computation core for statutory Indian financial statements (Schedule III /
//! Ind AS presentation): Balance Sheet, Statement of Profit and Loss, Cash
//! Flow Statement, and the Notes to Accounts.
//!
//! The editing and rendering front-end is out of scope; it exchanges plain
//! JSON `Company` snapshots with this crate and calls four engines, all of
//! them pure functions re-run in full on every relevant edit:
//!
//! - **Aggregation** ([`calculate_bs_totals`], [`calculate_pl_totals`],
//!   [`calculate_cf_totals`]): roll-up subtotals and totals obeying the
//!   accounting identities, computed independently for the current and
//!   previous year columns.
//! - **Cash flow derivation** ([`generate_cash_flow_data`]): rebuilds the
//!   operating section of the Cash Flow Statement from Balance Sheet
//!   period-over-period deltas and Profit and Loss figures (indirect method).
//! - **Note indexing** ([`build_note_index`]): assigns sequential display
//!   numbers to every non-zero line item, recomputed from scratch on every
//!   call so numbering stays dense as values are edited or zeroed.
//! - **Validation** ([`run_all_validations`]): advisory cross-statement
//!   checks (the books balance; cash flow ties to the balance sheet).
//!
//! ## Example
//!
//! ```rust
//! use finstat::*;
//!
//! let mut company = Company::new(CompanyInfo::for_financial_year("Acme Ltd", 2024));
//!
//! // Writes go through the path layer, addressed the way the JSON reads.
//! let bs = &mut company.balance_sheet;
//! set_balance_sheet_value(bs, "currentAssets.inventories", Column::Current, 250_000.0).unwrap();
//! set_balance_sheet_value(bs, "equity.otherEquity", Column::Current, 250_000.0).unwrap();
//!
//! let totals = calculate_bs_totals(&company.balance_sheet);
//! assert_eq!(totals.total_assets, totals.total_equity_and_liabilities);
//!
//! let notes = build_note_index(&company);
//! assert_eq!(notes.display_number("15"), Some("3")); // inventories
//!
//! assert!(run_all_validations(&company).iter().all(|r| !r.is_error()));
//! ```

pub mod breakdowns;
pub mod cash_flow;
pub mod company;
pub mod error;
pub mod notes;
pub mod paths;
pub mod schema;
pub mod store;
pub mod totals;
pub mod validation;

pub use breakdowns::{
    apply_breakdown_totals, leaf_source, resolve_leaf, Breakdown, BorrowingItem, LeafSource,
    PpeItem, ShareCapitalItem, TradePayablesAgeingItem,
};
pub use cash_flow::generate_cash_flow_data;
pub use company::{Company, CompanyInfo};
pub use error::{FinstatError, Result};
pub use notes::{build_note_index, financial_path, NoteIndex, ResolvedNote};
pub use paths::{
    balance_sheet_leaf, balance_sheet_leaf_mut, cash_flow_leaf, cash_flow_leaf_mut, company_leaf,
    company_leaf_mut, profit_loss_leaf, profit_loss_leaf_mut, set_balance_sheet_value,
    set_cash_flow_value, set_profit_loss_value,
};
pub use schema::*;
pub use store::CompanyStore;
pub use totals::{
    calculate_bs_totals, calculate_cf_totals, calculate_pl_totals, sync_profit_loss_mirrors,
    BsTotals, CfTotals, PlTotals,
};
pub use validation::{run_all_validations, Severity, ValidationResult, BALANCE_TOLERANCE};
