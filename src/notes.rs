//! Dynamic note numbering for the Notes to Accounts.
//!
//! Display numbers are positional: the statements are walked in a fixed order
//! (balance sheet assets, equity, liabilities; then profit and loss; then the
//! cash flow statement) and every line item with a non-zero value in either
//! column takes the next sequential number. Nothing is persisted; zeroing a
//! leaf renumbers everything after it on the next build. Two static notes
//! ("Corporate Information" and "Significant Accounting Policies") always
//! occupy numbers 1 and 2.

use crate::company::Company;
use crate::schema::Amount;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A note that received a display number on this build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNote {
    /// Internal note key, stable across edits.
    pub key: String,
    /// Display number as shown to the user ("1", "2", ...).
    pub number: String,
    pub title: String,
    /// Company-rooted dot path of the backing leaf, where one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteIndex {
    /// Internal key -> display number; `None` when the line item is zero in
    /// both columns and therefore renders without a note link.
    pub map: BTreeMap<String, Option<String>>,
    /// Numbered notes in display order.
    pub list: Vec<ResolvedNote>,
}

impl NoteIndex {
    pub fn display_number(&self, key: &str) -> Option<&str> {
        self.map.get(key).and_then(|n| n.as_deref())
    }
}

/// Statement-tree path for a balance sheet or profit and loss note key.
/// Cash flow lines carry note keys for numbering but have no note-editable
/// backing leaf, so they are absent here.
pub fn financial_path(key: &str) -> Option<&'static str> {
    let path = match key {
        "3" => "balanceSheet.nonCurrentAssets.propertyPlantAndEquipment",
        "4" => "balanceSheet.nonCurrentAssets.capitalWorkInProgress",
        "5" => "balanceSheet.nonCurrentAssets.investmentProperty",
        "6" => "balanceSheet.nonCurrentAssets.goodwill",
        "7" => "balanceSheet.nonCurrentAssets.otherIntangibleAssets",
        "8" => "balanceSheet.nonCurrentAssets.intangibleAssetsUnderDevelopment",
        "9" => "balanceSheet.nonCurrentAssets.financialAssets.investments",
        "10" => "balanceSheet.nonCurrentAssets.financialAssets.tradeReceivables",
        "11" => "balanceSheet.nonCurrentAssets.financialAssets.loans",
        "12" => "balanceSheet.nonCurrentAssets.financialAssets.others",
        "13" => "balanceSheet.nonCurrentAssets.deferredTaxAssets",
        "14" => "balanceSheet.nonCurrentAssets.otherNonCurrentAssets",
        "15" => "balanceSheet.currentAssets.inventories",
        "16" => "balanceSheet.currentAssets.financialAssets.investments",
        "17" => "balanceSheet.currentAssets.financialAssets.tradeReceivables",
        "18" => "balanceSheet.currentAssets.financialAssets.cashAndCashEquivalents",
        "19" => "balanceSheet.currentAssets.financialAssets.otherBankBalances",
        "20" => "balanceSheet.currentAssets.financialAssets.loans",
        "21" => "balanceSheet.currentAssets.financialAssets.others",
        "22" => "balanceSheet.currentAssets.currentTaxAssets",
        "23" => "balanceSheet.currentAssets.otherCurrentAssets",
        "24" => "balanceSheet.equity.equityShareCapital",
        "25" => "balanceSheet.equity.otherEquity",
        "26" => "balanceSheet.nonCurrentLiabilities.borrowings",
        "27" => "balanceSheet.nonCurrentLiabilities.otherFinancialLiabilities",
        "28" => "balanceSheet.nonCurrentLiabilities.provisions",
        "29" => "balanceSheet.nonCurrentLiabilities.deferredTaxLiabilities",
        "30" => "balanceSheet.nonCurrentLiabilities.otherNonCurrentLiabilities",
        "31" => "balanceSheet.currentLiabilities.borrowings",
        "32" => "balanceSheet.currentLiabilities.tradePayables.microSmallEnterprisesDues",
        "33" => "balanceSheet.currentLiabilities.tradePayables.otherDues",
        "34" => "balanceSheet.currentLiabilities.otherFinancialLiabilities",
        "35" => "balanceSheet.currentLiabilities.otherCurrentLiabilities",
        "36" => "balanceSheet.currentLiabilities.provisions",
        "37" => "balanceSheet.currentLiabilities.currentTaxLiabilities",
        "38" => "profitLoss.revenueFromOperations",
        "39" => "profitLoss.otherIncome",
        "40" => "profitLoss.expenses.costOfMaterialsConsumed",
        "41" => "profitLoss.expenses.purchasesOfStockInTrade",
        "42" => "profitLoss.expenses.changesInInventories",
        "43" => "profitLoss.expenses.employeeBenefitsExpense",
        "44" => "profitLoss.expenses.financeCosts",
        "45" => "profitLoss.expenses.depreciationAndAmortisationExpense",
        "46" => "profitLoss.expenses.otherExpenses",
        "47" => "profitLoss.exceptionalItems",
        "48" => "profitLoss.taxExpense.currentTax",
        "49" => "profitLoss.taxExpense.deferredTax",
        "50" => "profitLoss.profitLossFromDiscontinuedOperations",
        "51" => "profitLoss.taxExpenseOfDiscontinuedOperations",
        "52" => "profitLoss.profitLossFromContinuingOperations",
        "53" => "profitLoss.profitLossForThePeriod",
        "54" => "profitLoss.otherComprehensiveIncome.remeasurementsOfDefinedBenefitPlans",
        "55" => "profitLoss.otherComprehensiveIncome.equityInstrumentsThroughOci",
        "56" => "profitLoss.otherComprehensiveIncome.incomeTaxOnItemsNotReclassified",
        "57" => "profitLoss.otherComprehensiveIncome.exchangeDifferencesOnTranslation",
        "58" => "profitLoss.otherComprehensiveIncome.debtInstrumentsThroughOci",
        "59" => "profitLoss.otherComprehensiveIncome.incomeTaxOnItemsReclassified",
        "60" => "profitLoss.earningsPerShare.basic",
        "61" => "profitLoss.earningsPerShare.diluted",
        _ => return None,
    };
    Some(path)
}

struct WalkEntry<'a> {
    key: &'static str,
    title: &'static str,
    leaf: Option<&'a Amount>,
}

impl<'a> WalkEntry<'a> {
    fn fixed(key: &'static str, title: &'static str) -> Self {
        Self { key, title, leaf: None }
    }

    fn leaf(key: &'static str, title: &'static str, leaf: &'a Amount) -> Self {
        Self { key, title, leaf: Some(leaf) }
    }

    fn has_value(&self) -> bool {
        match self.leaf {
            // Static notes are always present.
            None => true,
            Some(leaf) => !leaf.is_zero(),
        }
    }
}

/// Builds the note index for a company snapshot. Deterministic: the same
/// snapshot always yields the same numbering.
pub fn build_note_index(company: &Company) -> NoteIndex {
    let mut index = NoteIndex::default();
    let mut next_number = 1u32;

    for entry in walk_statements(company) {
        if entry.has_value() {
            let number = next_number.to_string();
            next_number += 1;

            index.map.insert(entry.key.to_string(), Some(number.clone()));
            index.list.push(ResolvedNote {
                key: entry.key.to_string(),
                number,
                title: entry.title.to_string(),
                path: financial_path(entry.key).map(str::to_string),
            });
        } else {
            index.map.insert(entry.key.to_string(), None);
        }
    }

    index
}

fn walk_statements(company: &Company) -> Vec<WalkEntry<'_>> {
    let bs = &company.balance_sheet;
    let nca = &bs.non_current_assets;
    let ca = &bs.current_assets;
    let ncl = &bs.non_current_liabilities;
    let cl = &bs.current_liabilities;
    let pl = &company.profit_loss;
    let oci = &pl.other_comprehensive_income;
    let cf = &company.cash_flow;
    let adj = &cf.operating_activities.adjustments;
    let wc = &cf.operating_activities.changes_in_working_capital;
    let inv = &cf.investing_activities;
    let fin = &cf.financing_activities;

    vec![
        WalkEntry::fixed("1", "Corporate Information"),
        WalkEntry::fixed("2", "Significant Accounting Policies"),
        // Balance sheet: assets before equity before liabilities.
        WalkEntry::leaf("3", "Property, Plant and Equipment", &nca.property_plant_and_equipment),
        WalkEntry::leaf("4", "Capital Work-in-Progress", &nca.capital_work_in_progress),
        WalkEntry::leaf("5", "Investment Property", &nca.investment_property),
        WalkEntry::leaf("6", "Goodwill", &nca.goodwill),
        WalkEntry::leaf("7", "Other Intangible Assets", &nca.other_intangible_assets),
        WalkEntry::leaf(
            "8",
            "Intangible Assets under Development",
            &nca.intangible_assets_under_development,
        ),
        WalkEntry::leaf("9", "Non-current Investments", &nca.financial_assets.investments),
        WalkEntry::leaf(
            "10",
            "Non-current Trade Receivables",
            &nca.financial_assets.trade_receivables,
        ),
        WalkEntry::leaf("11", "Non-current Loans", &nca.financial_assets.loans),
        WalkEntry::leaf(
            "12",
            "Other Non-current Financial Assets",
            &nca.financial_assets.others,
        ),
        WalkEntry::leaf("13", "Deferred Tax Assets (Net)", &nca.deferred_tax_assets),
        WalkEntry::leaf("14", "Other Non-current Assets", &nca.other_non_current_assets),
        WalkEntry::leaf("15", "Inventories", &ca.inventories),
        WalkEntry::leaf("16", "Current Investments", &ca.financial_assets.investments),
        WalkEntry::leaf("17", "Trade Receivables", &ca.financial_assets.trade_receivables),
        WalkEntry::leaf(
            "18",
            "Cash and Cash Equivalents",
            &ca.financial_assets.cash_and_cash_equivalents,
        ),
        WalkEntry::leaf(
            "19",
            "Bank Balances other than Cash and Cash Equivalents",
            &ca.financial_assets.other_bank_balances,
        ),
        WalkEntry::leaf("20", "Current Loans", &ca.financial_assets.loans),
        WalkEntry::leaf("21", "Other Current Financial Assets", &ca.financial_assets.others),
        WalkEntry::leaf("22", "Current Tax Assets (Net)", &ca.current_tax_assets),
        WalkEntry::leaf("23", "Other Current Assets", &ca.other_current_assets),
        WalkEntry::leaf("24", "Equity Share Capital", &bs.equity.equity_share_capital),
        WalkEntry::leaf("25", "Other Equity", &bs.equity.other_equity),
        WalkEntry::leaf("26", "Non-current Borrowings", &ncl.borrowings),
        WalkEntry::leaf(
            "27",
            "Other Non-current Financial Liabilities",
            &ncl.other_financial_liabilities,
        ),
        WalkEntry::leaf("28", "Non-current Provisions", &ncl.provisions),
        WalkEntry::leaf("29", "Deferred Tax Liabilities (Net)", &ncl.deferred_tax_liabilities),
        WalkEntry::leaf(
            "30",
            "Other Non-current Liabilities",
            &ncl.other_non_current_liabilities,
        ),
        WalkEntry::leaf("31", "Current Borrowings", &cl.borrowings),
        WalkEntry::leaf(
            "32",
            "Trade Payables: Dues of Micro and Small Enterprises",
            &cl.trade_payables.micro_small_enterprises_dues,
        ),
        WalkEntry::leaf("33", "Trade Payables: Other Dues", &cl.trade_payables.other_dues),
        WalkEntry::leaf(
            "34",
            "Other Current Financial Liabilities",
            &cl.other_financial_liabilities,
        ),
        WalkEntry::leaf("35", "Other Current Liabilities", &cl.other_current_liabilities),
        WalkEntry::leaf("36", "Current Provisions", &cl.provisions),
        WalkEntry::leaf("37", "Current Tax Liabilities (Net)", &cl.current_tax_liabilities),
        // Profit and loss, revenue through EPS. The computed-total mirror
        // leaves (keys 52 and 53) are not note line items and are skipped.
        WalkEntry::leaf("38", "Revenue from Operations", &pl.revenue_from_operations),
        WalkEntry::leaf("39", "Other Income", &pl.other_income),
        WalkEntry::leaf(
            "40",
            "Cost of Materials Consumed",
            &pl.expenses.cost_of_materials_consumed,
        ),
        WalkEntry::leaf(
            "41",
            "Purchases of Stock-in-Trade",
            &pl.expenses.purchases_of_stock_in_trade,
        ),
        WalkEntry::leaf(
            "42",
            "Changes in Inventories of Finished Goods, Work-in-Progress and Stock-in-Trade",
            &pl.expenses.changes_in_inventories,
        ),
        WalkEntry::leaf(
            "43",
            "Employee Benefits Expense",
            &pl.expenses.employee_benefits_expense,
        ),
        WalkEntry::leaf("44", "Finance Costs", &pl.expenses.finance_costs),
        WalkEntry::leaf(
            "45",
            "Depreciation and Amortisation Expense",
            &pl.expenses.depreciation_and_amortisation_expense,
        ),
        WalkEntry::leaf("46", "Other Expenses", &pl.expenses.other_expenses),
        WalkEntry::leaf("47", "Exceptional Items", &pl.exceptional_items),
        WalkEntry::leaf("48", "Current Tax", &pl.tax_expense.current_tax),
        WalkEntry::leaf("49", "Deferred Tax", &pl.tax_expense.deferred_tax),
        WalkEntry::leaf(
            "50",
            "Profit/(Loss) from Discontinued Operations",
            &pl.profit_loss_from_discontinued_operations,
        ),
        WalkEntry::leaf(
            "51",
            "Tax Expense of Discontinued Operations",
            &pl.tax_expense_of_discontinued_operations,
        ),
        WalkEntry::leaf(
            "54",
            "Remeasurements of Defined Benefit Plans",
            &oci.remeasurements_of_defined_benefit_plans,
        ),
        WalkEntry::leaf(
            "55",
            "Equity Instruments through Other Comprehensive Income",
            &oci.equity_instruments_through_oci,
        ),
        WalkEntry::leaf(
            "56",
            "Income Tax relating to Items not to be Reclassified",
            &oci.income_tax_on_items_not_reclassified,
        ),
        WalkEntry::leaf(
            "57",
            "Exchange Differences on Translation of Foreign Operations",
            &oci.exchange_differences_on_translation,
        ),
        WalkEntry::leaf(
            "58",
            "Debt Instruments through Other Comprehensive Income",
            &oci.debt_instruments_through_oci,
        ),
        WalkEntry::leaf(
            "59",
            "Income Tax relating to Items to be Reclassified",
            &oci.income_tax_on_items_reclassified,
        ),
        WalkEntry::leaf("60", "Earnings per Share: Basic", &pl.earnings_per_share.basic),
        WalkEntry::leaf("61", "Earnings per Share: Diluted", &pl.earnings_per_share.diluted),
        // Cash flow statement: operating, investing, financing.
        WalkEntry::leaf(
            "62",
            "Depreciation and Amortisation",
            &adj.depreciation_and_amortisation,
        ),
        WalkEntry::leaf("63", "Finance Costs Adjustment", &adj.finance_costs),
        WalkEntry::leaf("64", "Interest Income Adjustment", &adj.interest_income),
        WalkEntry::leaf("65", "Other Non-cash Items", &adj.other_non_cash_items),
        WalkEntry::leaf("66", "Changes in Trade Receivables", &wc.trade_receivables),
        WalkEntry::leaf("67", "Changes in Inventories", &wc.inventories),
        WalkEntry::leaf("68", "Changes in Trade Payables", &wc.trade_payables),
        WalkEntry::leaf("69", "Other Working Capital Changes", &wc.other_working_capital),
        WalkEntry::leaf(
            "70",
            "Income Taxes Paid",
            &cf.operating_activities.income_taxes_paid,
        ),
        WalkEntry::leaf(
            "71",
            "Purchase of Property, Plant and Equipment",
            &inv.purchase_of_property_plant_and_equipment,
        ),
        WalkEntry::leaf(
            "72",
            "Proceeds from Sale of Property, Plant and Equipment",
            &inv.proceeds_from_sale_of_property_plant_and_equipment,
        ),
        WalkEntry::leaf("73", "Purchase of Investments", &inv.purchase_of_investments),
        WalkEntry::leaf(
            "74",
            "Proceeds from Sale of Investments",
            &inv.proceeds_from_sale_of_investments,
        ),
        WalkEntry::leaf("75", "Interest Received", &inv.interest_received),
        WalkEntry::leaf(
            "76",
            "Proceeds from Issue of Shares",
            &fin.proceeds_from_issue_of_shares,
        ),
        WalkEntry::leaf("77", "Proceeds from Borrowings", &fin.proceeds_from_borrowings),
        WalkEntry::leaf("78", "Repayment of Borrowings", &fin.repayment_of_borrowings),
        WalkEntry::leaf("79", "Interest Paid", &fin.interest_paid),
        WalkEntry::leaf("80", "Dividends Paid", &fin.dividends_paid),
        WalkEntry::leaf("81", "Other Financing Activities", &fin.other_financing_activities),
    ]
}
