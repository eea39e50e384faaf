//! The aggregation engine: pure reducers turning the statement trees into
//! roll-up subtotals and totals. Each figure is computed for the current and
//! previous columns by the same formula, via [`Figures`] arithmetic.

use crate::schema::{BalanceSheetData, CashFlowData, Figures, ProfitLossData};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BsTotals {
    pub non_current_assets: Figures,
    pub current_assets: Figures,
    pub total_assets: Figures,
    pub equity: Figures,
    pub non_current_liabilities: Figures,
    pub current_liabilities: Figures,
    /// The "Equity and Liabilities" side of the balance sheet. Equal to
    /// `total_assets` when the books balance.
    pub total_equity_and_liabilities: Figures,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlTotals {
    pub total_income: Figures,
    pub total_expenses: Figures,
    pub profit_before_exceptional_items_and_tax: Figures,
    pub profit_before_tax: Figures,
    pub total_tax_expense: Figures,
    pub profit_from_continuing_operations: Figures,
    pub profit_from_discontinued_operations_after_tax: Figures,
    pub profit_for_the_period: Figures,
    pub other_comprehensive_income: Figures,
    pub total_comprehensive_income: Figures,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CfTotals {
    pub adjustments: Figures,
    pub working_capital_changes: Figures,
    pub cash_generated_from_operations: Figures,
    pub net_cash_from_operating: Figures,
    pub net_cash_from_investing: Figures,
    pub net_cash_from_financing: Figures,
    pub net_increase_in_cash: Figures,
    /// Opening cash plus the net increase. A check value: the statement's
    /// stored closing balance is kept separate so callers can flag divergence.
    pub calculated_closing: Figures,
}

pub fn calculate_bs_totals(bs: &BalanceSheetData) -> BsTotals {
    let nca = &bs.non_current_assets;
    let non_current_assets = [
        nca.property_plant_and_equipment.figures(),
        nca.capital_work_in_progress.figures(),
        nca.investment_property.figures(),
        nca.goodwill.figures(),
        nca.other_intangible_assets.figures(),
        nca.intangible_assets_under_development.figures(),
        nca.financial_assets.investments.figures(),
        nca.financial_assets.trade_receivables.figures(),
        nca.financial_assets.loans.figures(),
        nca.financial_assets.others.figures(),
        nca.deferred_tax_assets.figures(),
        nca.other_non_current_assets.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let ca = &bs.current_assets;
    let current_assets = [
        ca.inventories.figures(),
        ca.financial_assets.investments.figures(),
        ca.financial_assets.trade_receivables.figures(),
        ca.financial_assets.cash_and_cash_equivalents.figures(),
        ca.financial_assets.other_bank_balances.figures(),
        ca.financial_assets.loans.figures(),
        ca.financial_assets.others.figures(),
        ca.current_tax_assets.figures(),
        ca.other_current_assets.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let equity = bs.equity.equity_share_capital.figures() + bs.equity.other_equity.figures();

    let ncl = &bs.non_current_liabilities;
    let non_current_liabilities = [
        ncl.borrowings.figures(),
        ncl.other_financial_liabilities.figures(),
        ncl.provisions.figures(),
        ncl.deferred_tax_liabilities.figures(),
        ncl.other_non_current_liabilities.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let cl = &bs.current_liabilities;
    let current_liabilities = [
        cl.borrowings.figures(),
        cl.trade_payables.micro_small_enterprises_dues.figures(),
        cl.trade_payables.other_dues.figures(),
        cl.other_financial_liabilities.figures(),
        cl.other_current_liabilities.figures(),
        cl.provisions.figures(),
        cl.current_tax_liabilities.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    BsTotals {
        non_current_assets,
        current_assets,
        total_assets: non_current_assets + current_assets,
        equity,
        non_current_liabilities,
        current_liabilities,
        total_equity_and_liabilities: equity + non_current_liabilities + current_liabilities,
    }
}

pub fn calculate_pl_totals(pl: &ProfitLossData) -> PlTotals {
    let total_income = pl.revenue_from_operations.figures() + pl.other_income.figures();

    let ex = &pl.expenses;
    let total_expenses = [
        ex.cost_of_materials_consumed.figures(),
        ex.purchases_of_stock_in_trade.figures(),
        ex.changes_in_inventories.figures(),
        ex.employee_benefits_expense.figures(),
        ex.finance_costs.figures(),
        ex.depreciation_and_amortisation_expense.figures(),
        ex.other_expenses.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let profit_before_exceptional_items_and_tax = total_income - total_expenses;
    let profit_before_tax =
        profit_before_exceptional_items_and_tax - pl.exceptional_items.figures();

    let total_tax_expense =
        pl.tax_expense.current_tax.figures() + pl.tax_expense.deferred_tax.figures();
    let profit_from_continuing_operations = profit_before_tax - total_tax_expense;

    let profit_from_discontinued_operations_after_tax = pl
        .profit_loss_from_discontinued_operations
        .figures()
        - pl.tax_expense_of_discontinued_operations.figures();

    let profit_for_the_period =
        profit_from_continuing_operations + profit_from_discontinued_operations_after_tax;

    let oci = &pl.other_comprehensive_income;
    let other_comprehensive_income = [
        oci.remeasurements_of_defined_benefit_plans.figures(),
        oci.equity_instruments_through_oci.figures(),
        oci.income_tax_on_items_not_reclassified.figures(),
        oci.exchange_differences_on_translation.figures(),
        oci.debt_instruments_through_oci.figures(),
        oci.income_tax_on_items_reclassified.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    PlTotals {
        total_income,
        total_expenses,
        profit_before_exceptional_items_and_tax,
        profit_before_tax,
        total_tax_expense,
        profit_from_continuing_operations,
        profit_from_discontinued_operations_after_tax,
        profit_for_the_period,
        other_comprehensive_income,
        total_comprehensive_income: profit_for_the_period + other_comprehensive_income,
    }
}

pub fn calculate_cf_totals(cf: &CashFlowData) -> CfTotals {
    let op = &cf.operating_activities;

    let adjustments = [
        op.adjustments.depreciation_and_amortisation.figures(),
        op.adjustments.finance_costs.figures(),
        op.adjustments.interest_income.figures(),
        op.adjustments.other_non_cash_items.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let working_capital_changes = [
        op.changes_in_working_capital.trade_receivables.figures(),
        op.changes_in_working_capital.inventories.figures(),
        op.changes_in_working_capital.trade_payables.figures(),
        op.changes_in_working_capital.other_working_capital.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let cash_generated_from_operations =
        op.profit_before_tax.figures() + adjustments + working_capital_changes;

    // income_taxes_paid is stored as a negative outflow, so this is an add.
    let net_cash_from_operating = cash_generated_from_operations + op.income_taxes_paid.figures();

    let inv = &cf.investing_activities;
    let net_cash_from_investing = [
        inv.purchase_of_property_plant_and_equipment.figures(),
        inv.proceeds_from_sale_of_property_plant_and_equipment.figures(),
        inv.purchase_of_investments.figures(),
        inv.proceeds_from_sale_of_investments.figures(),
        inv.interest_received.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let fin = &cf.financing_activities;
    let net_cash_from_financing = [
        fin.proceeds_from_issue_of_shares.figures(),
        fin.proceeds_from_borrowings.figures(),
        fin.repayment_of_borrowings.figures(),
        fin.interest_paid.figures(),
        fin.dividends_paid.figures(),
        fin.other_financing_activities.figures(),
    ]
    .into_iter()
    .sum::<Figures>();

    let net_increase_in_cash =
        net_cash_from_operating + net_cash_from_investing + net_cash_from_financing;

    CfTotals {
        adjustments,
        working_capital_changes,
        cash_generated_from_operations,
        net_cash_from_operating,
        net_cash_from_investing,
        net_cash_from_financing,
        net_increase_in_cash,
        calculated_closing: cf.cash_and_cash_equivalents_at_beginning.figures()
            + net_increase_in_cash,
    }
}

/// Pushes the computed aggregates into the Profit and Loss statement's
/// display-only mirror leaves. The stored mirrors are never read back by the
/// computation layer; this exists so an exported snapshot shows the same
/// figures the screen does.
pub fn sync_profit_loss_mirrors(pl: &mut ProfitLossData) {
    let totals = calculate_pl_totals(pl);
    pl.profit_loss_from_continuing_operations
        .set_figures(totals.profit_from_continuing_operations);
    pl.profit_loss_for_the_period
        .set_figures(totals.profit_for_the_period);
}
