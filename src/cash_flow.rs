//! Indirect-method derivation of the Cash Flow Statement from Balance Sheet
//! period-over-period deltas and Profit and Loss figures.
//!
//! Only the operating-activities section and the two cash balance endpoints
//! are derived, and only for the current-year column (a working-capital delta
//! for the previous year would need the balance sheet of the year before it,
//! which the data model does not carry). Investing and financing lines, and
//! every previous-year figure, pass through from the stored statement.

use crate::company::Company;
use crate::schema::{Amount, CashFlowData, Column};
use crate::totals::calculate_pl_totals;
use log::debug;

/// Derives a replacement Cash Flow Statement for `company`. Pure; the caller
/// decides whether to merge the result back into the record.
pub fn generate_cash_flow_data(company: &Company) -> CashFlowData {
    let bs = &company.balance_sheet;
    let pl = &company.profit_loss;
    let mut cf = company.cash_flow.clone();
    let op = &mut cf.operating_activities;

    // Profit before tax is recomputed top-down; any stored PBT is ignored.
    let profit_before_tax = calculate_pl_totals(pl).profit_before_tax.current;
    op.profit_before_tax.set(Column::Current, profit_before_tax);

    // Non-cash add-backs, straight from the P&L expense lines.
    op.adjustments.depreciation_and_amortisation.set(
        Column::Current,
        pl.expenses.depreciation_and_amortisation_expense.current,
    );
    op.adjustments
        .finance_costs
        .set(Column::Current, pl.expenses.finance_costs.current);
    // The schema has no interest-income line distinct from other income, so
    // this add-back stays at 0. Known gap, kept deliberately.
    op.adjustments.interest_income.set(Column::Current, 0.0);
    op.adjustments.other_non_cash_items.set(Column::Current, 0.0);

    // Working-capital deltas. An increase in an asset consumes cash (negate);
    // an increase in a liability releases cash (keep the sign).
    let wc = &mut op.changes_in_working_capital;
    wc.trade_receivables.set(
        Column::Current,
        -delta(&bs.current_assets.financial_assets.trade_receivables),
    );
    wc.inventories
        .set(Column::Current, -delta(&bs.current_assets.inventories));
    wc.trade_payables.set(
        Column::Current,
        delta(&bs.current_liabilities.trade_payables.micro_small_enterprises_dues)
            + delta(&bs.current_liabilities.trade_payables.other_dues),
    );

    let other_asset_changes = delta(&bs.current_assets.other_current_assets)
        + delta(&bs.current_assets.financial_assets.others)
        + delta(&bs.current_assets.financial_assets.loans);
    let other_liability_changes = delta(&bs.current_liabilities.other_current_liabilities)
        + delta(&bs.current_liabilities.other_financial_liabilities)
        + delta(&bs.current_liabilities.provisions);
    wc.other_working_capital
        .set(Column::Current, -other_asset_changes + other_liability_changes);

    // Taxes paid = opening liability + current-year charge - closing
    // liability, floored at 0 before negating. The floor means a net tax
    // refund is never reported; kept as a documented simplification.
    let opening_tax_liability = bs.current_liabilities.current_tax_liabilities.previous;
    let closing_tax_liability = bs.current_liabilities.current_tax_liabilities.current;
    let taxes_paid =
        (opening_tax_liability + pl.tax_expense.current_tax.current - closing_tax_liability)
            .max(0.0);
    op.income_taxes_paid.set(Column::Current, -taxes_paid);

    // Cash endpoints come from the balance sheet, not from prior statements.
    let cash = &bs.current_assets.financial_assets.cash_and_cash_equivalents;
    cf.cash_and_cash_equivalents_at_beginning
        .set(Column::Current, cash.previous);
    cf.cash_and_cash_equivalents_at_end
        .set(Column::Current, cash.current);

    debug!(
        "derived cash flow for {}: pbt {:.2}, taxes paid {:.2}",
        company.info.name, profit_before_tax, taxes_paid
    );

    cf
}

fn delta(leaf: &Amount) -> f64 {
    leaf.figures().current - leaf.figures().previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CompanyInfo;
    use crate::schema::Figures;

    fn company() -> Company {
        Company::new(CompanyInfo::for_financial_year("Derive Ltd", 2024))
    }

    #[test]
    fn test_receivables_increase_is_a_cash_outflow() {
        let mut c = company();
        c.balance_sheet
            .current_assets
            .financial_assets
            .trade_receivables
            .set_figures(Figures::new(90_000.0, 70_000.0));

        let cf = generate_cash_flow_data(&c);
        let wc = &cf.operating_activities.changes_in_working_capital;
        assert_eq!(wc.trade_receivables.current, -20_000.0);
        assert!(wc.trade_receivables.current < 0.0);
    }

    #[test]
    fn test_payables_increase_is_a_cash_inflow() {
        let mut c = company();
        c.balance_sheet
            .current_liabilities
            .trade_payables
            .other_dues
            .set_figures(Figures::new(55_000.0, 45_000.0));
        c.balance_sheet
            .current_liabilities
            .trade_payables
            .micro_small_enterprises_dues
            .set_figures(Figures::new(5_000.0, 2_000.0));

        let cf = generate_cash_flow_data(&c);
        assert_eq!(
            cf.operating_activities.changes_in_working_capital.trade_payables.current,
            13_000.0
        );
    }

    #[test]
    fn test_other_working_capital_bundles_assets_and_liabilities() {
        let mut c = company();
        c.balance_sheet
            .current_assets
            .other_current_assets
            .set_figures(Figures::new(12_000.0, 10_000.0)); // +2k asset -> -2k
        c.balance_sheet
            .current_liabilities
            .provisions
            .set_figures(Figures::new(9_000.0, 4_000.0)); // +5k liability -> +5k

        let cf = generate_cash_flow_data(&c);
        assert_eq!(
            cf.operating_activities.changes_in_working_capital.other_working_capital.current,
            3_000.0
        );
    }

    #[test]
    fn test_profit_before_tax_ignores_stored_value() {
        let mut c = company();
        c.profit_loss.revenue_from_operations.set(Column::Current, 500_000.0);
        c.profit_loss.expenses.other_expenses.set(Column::Current, 300_000.0);
        c.profit_loss.exceptional_items.set(Column::Current, 50_000.0);
        // A stale stored PBT must not leak through.
        c.cash_flow
            .operating_activities
            .profit_before_tax
            .set(Column::Current, 1.0);

        let cf = generate_cash_flow_data(&c);
        assert_eq!(cf.operating_activities.profit_before_tax.current, 150_000.0);
    }

    #[test]
    fn test_add_backs_copied_from_pl_and_interest_income_stays_zero() {
        let mut c = company();
        c.profit_loss
            .expenses
            .depreciation_and_amortisation_expense
            .set(Column::Current, 48_000.0);
        c.profit_loss.expenses.finance_costs.set(Column::Current, 15_500.0);
        c.profit_loss.other_income.set(Column::Current, 99_000.0);

        let cf = generate_cash_flow_data(&c);
        let adj = &cf.operating_activities.adjustments;
        assert_eq!(adj.depreciation_and_amortisation.current, 48_000.0);
        assert_eq!(adj.finance_costs.current, 15_500.0);
        assert_eq!(adj.interest_income.current, 0.0);
    }

    #[test]
    fn test_taxes_paid_is_negative_and_floored() {
        let mut c = company();
        c.balance_sheet
            .current_liabilities
            .current_tax_liabilities
            .set_figures(Figures::new(30_000.0, 25_000.0));
        c.profit_loss.tax_expense.current_tax.set(Column::Current, 80_000.0);

        let cf = generate_cash_flow_data(&c);
        // 25_000 + 80_000 - 30_000
        assert_eq!(cf.operating_activities.income_taxes_paid.current, -75_000.0);

        // Arithmetic implying a refund reports 0, never a positive inflow.
        let mut c = company();
        c.balance_sheet
            .current_liabilities
            .current_tax_liabilities
            .set_figures(Figures::new(100_000.0, 10_000.0));
        c.profit_loss.tax_expense.current_tax.set(Column::Current, 20_000.0);

        let cf = generate_cash_flow_data(&c);
        assert_eq!(cf.operating_activities.income_taxes_paid.current, 0.0);
    }

    #[test]
    fn test_cash_endpoints_read_from_balance_sheet() {
        let mut c = company();
        c.balance_sheet
            .current_assets
            .financial_assets
            .cash_and_cash_equivalents
            .set_figures(Figures::new(6_000_000.0, 5_000_000.0));

        let cf = generate_cash_flow_data(&c);
        assert_eq!(cf.cash_and_cash_equivalents_at_beginning.current, 5_000_000.0);
        assert_eq!(cf.cash_and_cash_equivalents_at_end.current, 6_000_000.0);
    }

    #[test]
    fn test_investing_and_financing_pass_through() {
        let mut c = company();
        c.cash_flow
            .investing_activities
            .purchase_of_investments
            .set(Column::Current, -250_000.0);
        c.cash_flow
            .financing_activities
            .dividends_paid
            .set(Column::Current, -40_000.0);

        let cf = generate_cash_flow_data(&c);
        assert_eq!(cf.investing_activities.purchase_of_investments.current, -250_000.0);
        assert_eq!(cf.financing_activities.dividends_paid.current, -40_000.0);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let mut c = company();
        c.profit_loss.revenue_from_operations.set(Column::Current, 750_000.0);
        c.balance_sheet
            .current_assets
            .inventories
            .set_figures(Figures::new(40_000.0, 30_000.0));

        let first = generate_cash_flow_data(&c);
        let second = generate_cash_flow_data(&c);
        assert_eq!(first, second);

        // Input company is untouched.
        assert_eq!(c.cash_flow, CashFlowData::keyed());
    }

    #[test]
    fn test_does_not_mutate_input() {
        let c = company();
        let snapshot = c.clone();
        let _ = generate_cash_flow_data(&c);
        assert_eq!(c, snapshot);
    }
}
