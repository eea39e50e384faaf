//! Cross-statement consistency checks. Results are advisory: an `Error` here
//! never blocks editing or export, it renders as a dashboard banner for the
//! user to act on.

use crate::company::Company;
use crate::totals::{calculate_bs_totals, calculate_cf_totals};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rounding tolerance in currency units. Differences of at most 1 are treated
/// as float/rounding noise. Fixed, not configurable.
pub const BALANCE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    /// Reserved for advisory rules; no current rule emits it.
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ValidationResult {
    fn success(id: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            severity: Severity::Success,
            message: message.to_string(),
            details: None,
        }
    }

    fn error(id: &str, message: &str, details: String) -> Self {
        Self {
            id: id.to_string(),
            severity: Severity::Error,
            message: message.to_string(),
            details: Some(details),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Runs every cross-statement rule against a company snapshot, in a fixed
/// order. Current-year column only; all comparisons use [`BALANCE_TOLERANCE`].
pub fn run_all_validations(company: &Company) -> Vec<ValidationResult> {
    vec![
        check_balance_sheet_balances(company),
        check_cash_flow_matches_balance_sheet(company),
        check_cash_flow_internal_consistency(company),
    ]
}

/// `bs-balance`: Assets must equal Equity and Liabilities.
fn check_balance_sheet_balances(company: &Company) -> ValidationResult {
    let totals = calculate_bs_totals(&company.balance_sheet);
    let assets = totals.total_assets.current;
    let equity_and_liabilities = totals.total_equity_and_liabilities.current;
    let diff = assets - equity_and_liabilities;

    if diff.abs() > BALANCE_TOLERANCE {
        ValidationResult::error(
            "bs-balance",
            "Balance Sheet does not balance",
            format!(
                "Total Assets: {assets:.2}, Total Equity and Liabilities: {equity_and_liabilities:.2}, difference: {diff:.2}"
            ),
        )
    } else {
        ValidationResult::success("bs-balance", "Balance Sheet is balanced")
    }
}

/// `cf-bs-match`: the stored closing cash balance must tie to the balance
/// sheet's cash and cash equivalents.
fn check_cash_flow_matches_balance_sheet(company: &Company) -> ValidationResult {
    let stored_closing = company.cash_flow.cash_and_cash_equivalents_at_end.current;
    let balance_sheet_cash = company
        .balance_sheet
        .current_assets
        .financial_assets
        .cash_and_cash_equivalents
        .current;
    let diff = stored_closing - balance_sheet_cash;

    if diff.abs() > BALANCE_TOLERANCE {
        ValidationResult::error(
            "cf-bs-match",
            "Cash Flow closing balance does not match the Balance Sheet",
            format!(
                "Cash Flow closing: {stored_closing:.2}, Balance Sheet cash and cash equivalents: {balance_sheet_cash:.2}, difference: {diff:.2}"
            ),
        )
    } else {
        ValidationResult::success(
            "cf-bs-match",
            "Cash Flow closing balance matches the Balance Sheet",
        )
    }
}

/// `cf-internal`: opening cash plus the net movement must reproduce the
/// stored closing balance.
fn check_cash_flow_internal_consistency(company: &Company) -> ValidationResult {
    let totals = calculate_cf_totals(&company.cash_flow);
    let calculated = totals.calculated_closing.current;
    let stored = company.cash_flow.cash_and_cash_equivalents_at_end.current;
    let diff = calculated - stored;

    if diff.abs() > BALANCE_TOLERANCE {
        ValidationResult::error(
            "cf-internal",
            "Cash Flow Statement does not reconcile to its closing balance",
            format!(
                "Opening balance plus net movement: {calculated:.2}, stored closing: {stored:.2}, difference: {diff:.2}"
            ),
        )
    } else {
        ValidationResult::success(
            "cf-internal",
            "Cash Flow Statement reconciles to its closing balance",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CompanyInfo;
    use crate::schema::{Column, Figures};

    fn company() -> Company {
        Company::new(CompanyInfo::for_financial_year("Validate Ltd", 2024))
    }

    fn result_for<'a>(results: &'a [ValidationResult], id: &str) -> &'a ValidationResult {
        results.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn test_empty_company_passes_everything() {
        let results = run_all_validations(&company());
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.severity == Severity::Success));
    }

    #[test]
    fn test_balanced_books_pass() {
        let mut c = company();
        c.balance_sheet
            .current_assets
            .inventories
            .set(Column::Current, 100_000.0);
        c.balance_sheet.equity.other_equity.set(Column::Current, 100_000.0);

        let results = run_all_validations(&c);
        assert_eq!(result_for(&results, "bs-balance").severity, Severity::Success);
    }

    #[test]
    fn test_tolerance_boundary_is_strictly_greater_than_one() {
        let mut c = company();
        c.balance_sheet.current_assets.inventories.set(Column::Current, 101.0);
        c.balance_sheet.equity.other_equity.set(Column::Current, 100.0);

        // A difference of exactly 1 passes.
        let results = run_all_validations(&c);
        assert_eq!(result_for(&results, "bs-balance").severity, Severity::Success);

        // 1.01 fails.
        c.balance_sheet.current_assets.inventories.set(Column::Current, 101.01);
        let results = run_all_validations(&c);
        let result = result_for(&results, "bs-balance");
        assert!(result.is_error());
        let details = result.details.as_deref().unwrap();
        assert!(details.contains("101.01"));
        assert!(details.contains("100.00"));
        assert!(details.contains("1.01"));
    }

    #[test]
    fn test_cf_bs_match_tolerance_and_details() {
        let mut c = company();
        c.balance_sheet
            .current_assets
            .financial_assets
            .cash_and_cash_equivalents
            .set_figures(Figures::new(6_000_000.0, 5_000_000.0));
        // Keep the rest of the dashboard quiet for this test.
        c.balance_sheet.equity.other_equity.set_figures(Figures::new(6_000_000.0, 5_000_000.0));

        c.cash_flow
            .cash_and_cash_equivalents_at_end
            .set(Column::Current, 6_000_000.0);
        c.cash_flow
            .cash_and_cash_equivalents_at_beginning
            .set(Column::Current, 5_000_000.0);
        c.cash_flow
            .operating_activities
            .profit_before_tax
            .set(Column::Current, 1_000_000.0);

        let results = run_all_validations(&c);
        assert_eq!(result_for(&results, "cf-bs-match").severity, Severity::Success);

        // Off by exactly 1: still within tolerance.
        c.cash_flow
            .cash_and_cash_equivalents_at_end
            .set(Column::Current, 6_000_001.0);
        let results = run_all_validations(&c);
        assert_eq!(result_for(&results, "cf-bs-match").severity, Severity::Success);

        // Off by 2: flagged, with both figures in the details.
        c.cash_flow
            .cash_and_cash_equivalents_at_end
            .set(Column::Current, 6_000_002.0);
        let results = run_all_validations(&c);
        let result = result_for(&results, "cf-bs-match");
        assert!(result.is_error());
        let details = result.details.as_deref().unwrap();
        assert!(details.contains("6000002.00"));
        assert!(details.contains("6000000.00"));
        assert!(details.contains("2.00"));
    }

    #[test]
    fn test_cf_internal_reconciliation() {
        let mut c = company();
        c.cash_flow
            .cash_and_cash_equivalents_at_beginning
            .set(Column::Current, 50_000.0);
        c.cash_flow
            .operating_activities
            .profit_before_tax
            .set(Column::Current, 30_000.0);
        c.cash_flow
            .cash_and_cash_equivalents_at_end
            .set(Column::Current, 80_000.0);
        // Also align the balance sheet so cf-bs-match stays green.
        c.balance_sheet
            .current_assets
            .financial_assets
            .cash_and_cash_equivalents
            .set(Column::Current, 80_000.0);
        c.balance_sheet.equity.other_equity.set(Column::Current, 80_000.0);

        let results = run_all_validations(&c);
        assert!(results.iter().all(|r| r.severity == Severity::Success));

        c.cash_flow
            .cash_and_cash_equivalents_at_end
            .set(Column::Current, 90_000.0);
        let results = run_all_validations(&c);
        assert!(result_for(&results, "cf-internal").is_error());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");
        let json = serde_json::to_string(&Severity::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }
}
