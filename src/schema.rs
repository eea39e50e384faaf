//! The financial data model: fixed statement trees of two-column monetary
//! line items, serialized as camelCase JSON for the editing front-end.
//!
//! The tree shapes follow Schedule III / Ind AS presentation and are fixed at
//! compile time. Every leaf that can carry a note to accounts is constructed
//! with its internal note key already assigned (see [`crate::notes`]); display
//! note numbers are never stored here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Coerces NaN and infinities to 0 so user text-entry artifacts never
/// propagate into totals.
pub(crate) fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Which reporting column of a line item to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Current,
    Previous,
}

/// A current/previous pair with column-wise arithmetic. All roll-up totals
/// are computed on this type, so a formula can never mix columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Figures {
    pub current: f64,
    pub previous: f64,
}

impl Figures {
    pub fn new(current: f64, previous: f64) -> Self {
        Self {
            current: finite(current),
            previous: finite(previous),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.current == 0.0 && self.previous == 0.0
    }

    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Current => self.current,
            Column::Previous => self.previous,
        }
    }
}

impl Add for Figures {
    type Output = Figures;

    fn add(self, rhs: Figures) -> Figures {
        Figures {
            current: self.current + rhs.current,
            previous: self.previous + rhs.previous,
        }
    }
}

impl AddAssign for Figures {
    fn add_assign(&mut self, rhs: Figures) {
        *self = *self + rhs;
    }
}

impl Sub for Figures {
    type Output = Figures;

    fn sub(self, rhs: Figures) -> Figures {
        Figures {
            current: self.current - rhs.current,
            previous: self.previous - rhs.previous,
        }
    }
}

impl Neg for Figures {
    type Output = Figures;

    fn neg(self) -> Figures {
        Figures {
            current: -self.current,
            previous: -self.previous,
        }
    }
}

impl Sum for Figures {
    fn sum<I: Iterator<Item = Figures>>(iter: I) -> Figures {
        iter.fold(Figures::default(), |acc, f| acc + f)
    }
}

impl From<&Amount> for Figures {
    fn from(amount: &Amount) -> Figures {
        Figures::new(amount.current, amount.previous)
    }
}

/// A single monetary line item: current year, previous year, and the leaf's
/// internal note key where one exists.
///
/// `note` is a stable identifier (e.g. `"24"`), never the displayed note
/// number. Display numbers are recomputed on every note-index build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub current: f64,
    pub previous: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Internal note key, stable across edits. Not the display number.")]
    pub note: Option<String>,
}

impl Amount {
    pub fn new(current: f64, previous: f64) -> Self {
        Self {
            current: finite(current),
            previous: finite(previous),
            note: None,
        }
    }

    /// A zero leaf carrying its hardcoded internal note key.
    pub fn keyed(note_key: &str) -> Self {
        Self {
            current: 0.0,
            previous: 0.0,
            note: Some(note_key.to_string()),
        }
    }

    pub fn figures(&self) -> Figures {
        Figures::from(self)
    }

    pub fn is_zero(&self) -> bool {
        self.figures().is_zero()
    }

    pub fn set(&mut self, column: Column, value: f64) {
        let value = finite(value);
        match column {
            Column::Current => self.current = value,
            Column::Previous => self.previous = value,
        }
    }

    /// Overwrites both columns, keeping the note key.
    pub fn set_figures(&mut self, figures: Figures) {
        self.current = finite(figures.current);
        self.previous = finite(figures.previous);
    }
}

// ---------------------------------------------------------------------------
// Balance Sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Balance Sheet as at the reporting date, two columns (current and previous year).")]
pub struct BalanceSheetData {
    pub non_current_assets: NonCurrentAssets,
    pub current_assets: CurrentAssets,
    pub equity: Equity,
    pub non_current_liabilities: NonCurrentLiabilities,
    pub current_liabilities: CurrentLiabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonCurrentAssets {
    pub property_plant_and_equipment: Amount,
    pub capital_work_in_progress: Amount,
    pub investment_property: Amount,
    pub goodwill: Amount,
    pub other_intangible_assets: Amount,
    pub intangible_assets_under_development: Amount,
    pub financial_assets: NonCurrentFinancialAssets,
    pub deferred_tax_assets: Amount,
    pub other_non_current_assets: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonCurrentFinancialAssets {
    pub investments: Amount,
    pub trade_receivables: Amount,
    pub loans: Amount,
    pub others: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAssets {
    pub inventories: Amount,
    pub financial_assets: CurrentFinancialAssets,
    pub current_tax_assets: Amount,
    pub other_current_assets: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentFinancialAssets {
    pub investments: Amount,
    pub trade_receivables: Amount,
    pub cash_and_cash_equivalents: Amount,
    pub other_bank_balances: Amount,
    pub loans: Amount,
    pub others: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equity {
    pub equity_share_capital: Amount,
    pub other_equity: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonCurrentLiabilities {
    pub borrowings: Amount,
    pub other_financial_liabilities: Amount,
    pub provisions: Amount,
    pub deferred_tax_liabilities: Amount,
    pub other_non_current_liabilities: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLiabilities {
    pub borrowings: Amount,
    pub trade_payables: TradePayables,
    pub other_financial_liabilities: Amount,
    pub other_current_liabilities: Amount,
    pub provisions: Amount,
    pub current_tax_liabilities: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradePayables {
    pub micro_small_enterprises_dues: Amount,
    pub other_dues: Amount,
}

impl Default for NonCurrentAssets {
    fn default() -> Self {
        Self {
            property_plant_and_equipment: Amount::keyed("3"),
            capital_work_in_progress: Amount::keyed("4"),
            investment_property: Amount::keyed("5"),
            goodwill: Amount::keyed("6"),
            other_intangible_assets: Amount::keyed("7"),
            intangible_assets_under_development: Amount::keyed("8"),
            financial_assets: NonCurrentFinancialAssets::default(),
            deferred_tax_assets: Amount::keyed("13"),
            other_non_current_assets: Amount::keyed("14"),
        }
    }
}

impl Default for NonCurrentFinancialAssets {
    fn default() -> Self {
        Self {
            investments: Amount::keyed("9"),
            trade_receivables: Amount::keyed("10"),
            loans: Amount::keyed("11"),
            others: Amount::keyed("12"),
        }
    }
}

impl Default for CurrentAssets {
    fn default() -> Self {
        Self {
            inventories: Amount::keyed("15"),
            financial_assets: CurrentFinancialAssets::default(),
            current_tax_assets: Amount::keyed("22"),
            other_current_assets: Amount::keyed("23"),
        }
    }
}

impl Default for CurrentFinancialAssets {
    fn default() -> Self {
        Self {
            investments: Amount::keyed("16"),
            trade_receivables: Amount::keyed("17"),
            cash_and_cash_equivalents: Amount::keyed("18"),
            other_bank_balances: Amount::keyed("19"),
            loans: Amount::keyed("20"),
            others: Amount::keyed("21"),
        }
    }
}

impl Default for Equity {
    fn default() -> Self {
        Self {
            equity_share_capital: Amount::keyed("24"),
            other_equity: Amount::keyed("25"),
        }
    }
}

impl Default for NonCurrentLiabilities {
    fn default() -> Self {
        Self {
            borrowings: Amount::keyed("26"),
            other_financial_liabilities: Amount::keyed("27"),
            provisions: Amount::keyed("28"),
            deferred_tax_liabilities: Amount::keyed("29"),
            other_non_current_liabilities: Amount::keyed("30"),
        }
    }
}

impl Default for CurrentLiabilities {
    fn default() -> Self {
        Self {
            borrowings: Amount::keyed("31"),
            trade_payables: TradePayables::default(),
            other_financial_liabilities: Amount::keyed("34"),
            other_current_liabilities: Amount::keyed("35"),
            provisions: Amount::keyed("36"),
            current_tax_liabilities: Amount::keyed("37"),
        }
    }
}

impl Default for TradePayables {
    fn default() -> Self {
        Self {
            micro_small_enterprises_dues: Amount::keyed("32"),
            other_dues: Amount::keyed("33"),
        }
    }
}

// ---------------------------------------------------------------------------
// Statement of Profit and Loss
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Statement of Profit and Loss for the year, two columns (current and previous year).")]
pub struct ProfitLossData {
    pub revenue_from_operations: Amount,
    pub other_income: Amount,
    pub expenses: Expenses,
    pub exceptional_items: Amount,
    pub tax_expense: TaxExpense,
    pub profit_loss_from_discontinued_operations: Amount,
    pub tax_expense_of_discontinued_operations: Amount,
    /// Display-only mirror of the computed continuing-operations profit.
    /// The aggregation engine's figure is authoritative.
    pub profit_loss_from_continuing_operations: Amount,
    /// Display-only mirror of the computed profit for the period.
    pub profit_loss_for_the_period: Amount,
    pub other_comprehensive_income: OtherComprehensiveIncome,
    pub earnings_per_share: EarningsPerShare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expenses {
    pub cost_of_materials_consumed: Amount,
    pub purchases_of_stock_in_trade: Amount,
    pub changes_in_inventories: Amount,
    pub employee_benefits_expense: Amount,
    pub finance_costs: Amount,
    pub depreciation_and_amortisation_expense: Amount,
    pub other_expenses: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxExpense {
    pub current_tax: Amount,
    pub deferred_tax: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherComprehensiveIncome {
    pub remeasurements_of_defined_benefit_plans: Amount,
    pub equity_instruments_through_oci: Amount,
    pub income_tax_on_items_not_reclassified: Amount,
    pub exchange_differences_on_translation: Amount,
    pub debt_instruments_through_oci: Amount,
    pub income_tax_on_items_reclassified: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EarningsPerShare {
    pub basic: Amount,
    pub diluted: Amount,
}

impl Default for Expenses {
    fn default() -> Self {
        Self {
            cost_of_materials_consumed: Amount::keyed("40"),
            purchases_of_stock_in_trade: Amount::keyed("41"),
            changes_in_inventories: Amount::keyed("42"),
            employee_benefits_expense: Amount::keyed("43"),
            finance_costs: Amount::keyed("44"),
            depreciation_and_amortisation_expense: Amount::keyed("45"),
            other_expenses: Amount::keyed("46"),
        }
    }
}

impl Default for TaxExpense {
    fn default() -> Self {
        Self {
            current_tax: Amount::keyed("48"),
            deferred_tax: Amount::keyed("49"),
        }
    }
}

impl Default for OtherComprehensiveIncome {
    fn default() -> Self {
        Self {
            remeasurements_of_defined_benefit_plans: Amount::keyed("54"),
            equity_instruments_through_oci: Amount::keyed("55"),
            income_tax_on_items_not_reclassified: Amount::keyed("56"),
            exchange_differences_on_translation: Amount::keyed("57"),
            debt_instruments_through_oci: Amount::keyed("58"),
            income_tax_on_items_reclassified: Amount::keyed("59"),
        }
    }
}

impl Default for EarningsPerShare {
    fn default() -> Self {
        Self {
            basic: Amount::keyed("60"),
            diluted: Amount::keyed("61"),
        }
    }
}

// The top-level ProfitLossData derives Default, but four of its direct leaves
// carry note keys, so give them a keyed construction too.
impl ProfitLossData {
    pub fn keyed() -> Self {
        Self {
            revenue_from_operations: Amount::keyed("38"),
            other_income: Amount::keyed("39"),
            exceptional_items: Amount::keyed("47"),
            profit_loss_from_discontinued_operations: Amount::keyed("50"),
            tax_expense_of_discontinued_operations: Amount::keyed("51"),
            profit_loss_from_continuing_operations: Amount::keyed("52"),
            profit_loss_for_the_period: Amount::keyed("53"),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Cash Flow Statement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Cash Flow Statement, indirect method.")]
pub struct CashFlowData {
    pub operating_activities: OperatingActivities,
    pub investing_activities: InvestingActivities,
    pub financing_activities: FinancingActivities,
    pub cash_and_cash_equivalents_at_beginning: Amount,
    pub cash_and_cash_equivalents_at_end: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingActivities {
    pub profit_before_tax: Amount,
    pub adjustments: OperatingAdjustments,
    pub changes_in_working_capital: WorkingCapitalChanges,
    /// Stored as a negative number (cash outflow).
    pub income_taxes_paid: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingAdjustments {
    pub depreciation_and_amortisation: Amount,
    pub finance_costs: Amount,
    pub interest_income: Amount,
    pub other_non_cash_items: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCapitalChanges {
    pub trade_receivables: Amount,
    pub inventories: Amount,
    pub trade_payables: Amount,
    pub other_working_capital: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestingActivities {
    pub purchase_of_property_plant_and_equipment: Amount,
    pub proceeds_from_sale_of_property_plant_and_equipment: Amount,
    pub purchase_of_investments: Amount,
    pub proceeds_from_sale_of_investments: Amount,
    pub interest_received: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancingActivities {
    pub proceeds_from_issue_of_shares: Amount,
    pub proceeds_from_borrowings: Amount,
    pub repayment_of_borrowings: Amount,
    pub interest_paid: Amount,
    pub dividends_paid: Amount,
    pub other_financing_activities: Amount,
}

impl Default for OperatingAdjustments {
    fn default() -> Self {
        Self {
            depreciation_and_amortisation: Amount::keyed("62"),
            finance_costs: Amount::keyed("63"),
            interest_income: Amount::keyed("64"),
            other_non_cash_items: Amount::keyed("65"),
        }
    }
}

impl Default for WorkingCapitalChanges {
    fn default() -> Self {
        Self {
            trade_receivables: Amount::keyed("66"),
            inventories: Amount::keyed("67"),
            trade_payables: Amount::keyed("68"),
            other_working_capital: Amount::keyed("69"),
        }
    }
}

impl Default for InvestingActivities {
    fn default() -> Self {
        Self {
            purchase_of_property_plant_and_equipment: Amount::keyed("71"),
            proceeds_from_sale_of_property_plant_and_equipment: Amount::keyed("72"),
            purchase_of_investments: Amount::keyed("73"),
            proceeds_from_sale_of_investments: Amount::keyed("74"),
            interest_received: Amount::keyed("75"),
        }
    }
}

impl Default for FinancingActivities {
    fn default() -> Self {
        Self {
            proceeds_from_issue_of_shares: Amount::keyed("76"),
            proceeds_from_borrowings: Amount::keyed("77"),
            repayment_of_borrowings: Amount::keyed("78"),
            interest_paid: Amount::keyed("79"),
            dividends_paid: Amount::keyed("80"),
            other_financing_activities: Amount::keyed("81"),
        }
    }
}

impl OperatingActivities {
    pub fn keyed() -> Self {
        Self {
            income_taxes_paid: Amount::keyed("70"),
            ..Self::default()
        }
    }
}

impl CashFlowData {
    pub fn keyed() -> Self {
        Self {
            operating_activities: OperatingActivities::keyed(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Statement of Changes in Equity
// ---------------------------------------------------------------------------

/// Directly edited movement schedule; not aggregated, note-indexed, or
/// validated by the computation core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangesInEquityData {
    pub share_capital: ShareCapitalMovement,
    pub other_equity: OtherEquityMovement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareCapitalMovement {
    pub balance_at_beginning: Amount,
    pub changes_during_the_year: Amount,
    pub balance_at_end: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtherEquityMovement {
    pub balance_at_beginning: Amount,
    pub profit_for_the_year: Amount,
    pub other_comprehensive_income: Amount,
    pub dividends_paid: Amount,
    pub balance_at_end: Amount,
}
