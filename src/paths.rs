//! Dot-path resolution into the statement trees.
//!
//! The editing layer addresses leaves by logical camelCase paths matching the
//! JSON wire format (e.g. `"currentAssets.financialAssets.tradeReceivables"`).
//! Resolution happens through a single compile-time table per statement, so a
//! typo in a path is an `UnknownPath` error rather than a silent object-walk
//! miss.

use crate::company::Company;
use crate::error::{FinstatError, Result};
use crate::schema::{Amount, BalanceSheetData, CashFlowData, Column, ProfitLossData};

macro_rules! by_ref {
    ($leaf:expr) => {
        &$leaf
    };
}

macro_rules! by_mut {
    ($leaf:expr) => {
        &mut $leaf
    };
}

// One table per statement, shared by the & and &mut resolvers.
macro_rules! balance_sheet_table {
    ($borrow:ident, $bs:expr, $path:expr) => {
        match $path {
            "nonCurrentAssets.propertyPlantAndEquipment" => {
                Some($borrow!($bs.non_current_assets.property_plant_and_equipment))
            }
            "nonCurrentAssets.capitalWorkInProgress" => {
                Some($borrow!($bs.non_current_assets.capital_work_in_progress))
            }
            "nonCurrentAssets.investmentProperty" => {
                Some($borrow!($bs.non_current_assets.investment_property))
            }
            "nonCurrentAssets.goodwill" => Some($borrow!($bs.non_current_assets.goodwill)),
            "nonCurrentAssets.otherIntangibleAssets" => {
                Some($borrow!($bs.non_current_assets.other_intangible_assets))
            }
            "nonCurrentAssets.intangibleAssetsUnderDevelopment" => Some($borrow!(
                $bs.non_current_assets.intangible_assets_under_development
            )),
            "nonCurrentAssets.financialAssets.investments" => {
                Some($borrow!($bs.non_current_assets.financial_assets.investments))
            }
            "nonCurrentAssets.financialAssets.tradeReceivables" => Some($borrow!(
                $bs.non_current_assets.financial_assets.trade_receivables
            )),
            "nonCurrentAssets.financialAssets.loans" => {
                Some($borrow!($bs.non_current_assets.financial_assets.loans))
            }
            "nonCurrentAssets.financialAssets.others" => {
                Some($borrow!($bs.non_current_assets.financial_assets.others))
            }
            "nonCurrentAssets.deferredTaxAssets" => {
                Some($borrow!($bs.non_current_assets.deferred_tax_assets))
            }
            "nonCurrentAssets.otherNonCurrentAssets" => {
                Some($borrow!($bs.non_current_assets.other_non_current_assets))
            }
            "currentAssets.inventories" => Some($borrow!($bs.current_assets.inventories)),
            "currentAssets.financialAssets.investments" => {
                Some($borrow!($bs.current_assets.financial_assets.investments))
            }
            "currentAssets.financialAssets.tradeReceivables" => {
                Some($borrow!($bs.current_assets.financial_assets.trade_receivables))
            }
            "currentAssets.financialAssets.cashAndCashEquivalents" => Some($borrow!(
                $bs.current_assets.financial_assets.cash_and_cash_equivalents
            )),
            "currentAssets.financialAssets.otherBankBalances" => {
                Some($borrow!($bs.current_assets.financial_assets.other_bank_balances))
            }
            "currentAssets.financialAssets.loans" => {
                Some($borrow!($bs.current_assets.financial_assets.loans))
            }
            "currentAssets.financialAssets.others" => {
                Some($borrow!($bs.current_assets.financial_assets.others))
            }
            "currentAssets.currentTaxAssets" => {
                Some($borrow!($bs.current_assets.current_tax_assets))
            }
            "currentAssets.otherCurrentAssets" => {
                Some($borrow!($bs.current_assets.other_current_assets))
            }
            "equity.equityShareCapital" => Some($borrow!($bs.equity.equity_share_capital)),
            "equity.otherEquity" => Some($borrow!($bs.equity.other_equity)),
            "nonCurrentLiabilities.borrowings" => {
                Some($borrow!($bs.non_current_liabilities.borrowings))
            }
            "nonCurrentLiabilities.otherFinancialLiabilities" => Some($borrow!(
                $bs.non_current_liabilities.other_financial_liabilities
            )),
            "nonCurrentLiabilities.provisions" => {
                Some($borrow!($bs.non_current_liabilities.provisions))
            }
            "nonCurrentLiabilities.deferredTaxLiabilities" => {
                Some($borrow!($bs.non_current_liabilities.deferred_tax_liabilities))
            }
            "nonCurrentLiabilities.otherNonCurrentLiabilities" => Some($borrow!(
                $bs.non_current_liabilities.other_non_current_liabilities
            )),
            "currentLiabilities.borrowings" => Some($borrow!($bs.current_liabilities.borrowings)),
            "currentLiabilities.tradePayables.microSmallEnterprisesDues" => Some($borrow!(
                $bs.current_liabilities.trade_payables.micro_small_enterprises_dues
            )),
            "currentLiabilities.tradePayables.otherDues" => {
                Some($borrow!($bs.current_liabilities.trade_payables.other_dues))
            }
            "currentLiabilities.otherFinancialLiabilities" => {
                Some($borrow!($bs.current_liabilities.other_financial_liabilities))
            }
            "currentLiabilities.otherCurrentLiabilities" => {
                Some($borrow!($bs.current_liabilities.other_current_liabilities))
            }
            "currentLiabilities.provisions" => Some($borrow!($bs.current_liabilities.provisions)),
            "currentLiabilities.currentTaxLiabilities" => {
                Some($borrow!($bs.current_liabilities.current_tax_liabilities))
            }
            _ => None,
        }
    };
}

macro_rules! profit_loss_table {
    ($borrow:ident, $pl:expr, $path:expr) => {
        match $path {
            "revenueFromOperations" => Some($borrow!($pl.revenue_from_operations)),
            "otherIncome" => Some($borrow!($pl.other_income)),
            "expenses.costOfMaterialsConsumed" => {
                Some($borrow!($pl.expenses.cost_of_materials_consumed))
            }
            "expenses.purchasesOfStockInTrade" => {
                Some($borrow!($pl.expenses.purchases_of_stock_in_trade))
            }
            "expenses.changesInInventories" => Some($borrow!($pl.expenses.changes_in_inventories)),
            "expenses.employeeBenefitsExpense" => {
                Some($borrow!($pl.expenses.employee_benefits_expense))
            }
            "expenses.financeCosts" => Some($borrow!($pl.expenses.finance_costs)),
            "expenses.depreciationAndAmortisationExpense" => {
                Some($borrow!($pl.expenses.depreciation_and_amortisation_expense))
            }
            "expenses.otherExpenses" => Some($borrow!($pl.expenses.other_expenses)),
            "exceptionalItems" => Some($borrow!($pl.exceptional_items)),
            "taxExpense.currentTax" => Some($borrow!($pl.tax_expense.current_tax)),
            "taxExpense.deferredTax" => Some($borrow!($pl.tax_expense.deferred_tax)),
            "profitLossFromDiscontinuedOperations" => {
                Some($borrow!($pl.profit_loss_from_discontinued_operations))
            }
            "taxExpenseOfDiscontinuedOperations" => {
                Some($borrow!($pl.tax_expense_of_discontinued_operations))
            }
            "profitLossFromContinuingOperations" => {
                Some($borrow!($pl.profit_loss_from_continuing_operations))
            }
            "profitLossForThePeriod" => Some($borrow!($pl.profit_loss_for_the_period)),
            "otherComprehensiveIncome.remeasurementsOfDefinedBenefitPlans" => Some($borrow!(
                $pl.other_comprehensive_income.remeasurements_of_defined_benefit_plans
            )),
            "otherComprehensiveIncome.equityInstrumentsThroughOci" => Some($borrow!(
                $pl.other_comprehensive_income.equity_instruments_through_oci
            )),
            "otherComprehensiveIncome.incomeTaxOnItemsNotReclassified" => Some($borrow!(
                $pl.other_comprehensive_income.income_tax_on_items_not_reclassified
            )),
            "otherComprehensiveIncome.exchangeDifferencesOnTranslation" => Some($borrow!(
                $pl.other_comprehensive_income.exchange_differences_on_translation
            )),
            "otherComprehensiveIncome.debtInstrumentsThroughOci" => Some($borrow!(
                $pl.other_comprehensive_income.debt_instruments_through_oci
            )),
            "otherComprehensiveIncome.incomeTaxOnItemsReclassified" => Some($borrow!(
                $pl.other_comprehensive_income.income_tax_on_items_reclassified
            )),
            "earningsPerShare.basic" => Some($borrow!($pl.earnings_per_share.basic)),
            "earningsPerShare.diluted" => Some($borrow!($pl.earnings_per_share.diluted)),
            _ => None,
        }
    };
}

macro_rules! cash_flow_table {
    ($borrow:ident, $cf:expr, $path:expr) => {
        match $path {
            "operatingActivities.profitBeforeTax" => {
                Some($borrow!($cf.operating_activities.profit_before_tax))
            }
            "operatingActivities.adjustments.depreciationAndAmortisation" => Some($borrow!(
                $cf.operating_activities.adjustments.depreciation_and_amortisation
            )),
            "operatingActivities.adjustments.financeCosts" => {
                Some($borrow!($cf.operating_activities.adjustments.finance_costs))
            }
            "operatingActivities.adjustments.interestIncome" => {
                Some($borrow!($cf.operating_activities.adjustments.interest_income))
            }
            "operatingActivities.adjustments.otherNonCashItems" => Some($borrow!(
                $cf.operating_activities.adjustments.other_non_cash_items
            )),
            "operatingActivities.changesInWorkingCapital.tradeReceivables" => Some($borrow!(
                $cf.operating_activities.changes_in_working_capital.trade_receivables
            )),
            "operatingActivities.changesInWorkingCapital.inventories" => Some($borrow!(
                $cf.operating_activities.changes_in_working_capital.inventories
            )),
            "operatingActivities.changesInWorkingCapital.tradePayables" => Some($borrow!(
                $cf.operating_activities.changes_in_working_capital.trade_payables
            )),
            "operatingActivities.changesInWorkingCapital.otherWorkingCapital" => Some($borrow!(
                $cf.operating_activities.changes_in_working_capital.other_working_capital
            )),
            "operatingActivities.incomeTaxesPaid" => {
                Some($borrow!($cf.operating_activities.income_taxes_paid))
            }
            "investingActivities.purchaseOfPropertyPlantAndEquipment" => Some($borrow!(
                $cf.investing_activities.purchase_of_property_plant_and_equipment
            )),
            "investingActivities.proceedsFromSaleOfPropertyPlantAndEquipment" => Some($borrow!(
                $cf.investing_activities.proceeds_from_sale_of_property_plant_and_equipment
            )),
            "investingActivities.purchaseOfInvestments" => {
                Some($borrow!($cf.investing_activities.purchase_of_investments))
            }
            "investingActivities.proceedsFromSaleOfInvestments" => Some($borrow!(
                $cf.investing_activities.proceeds_from_sale_of_investments
            )),
            "investingActivities.interestReceived" => {
                Some($borrow!($cf.investing_activities.interest_received))
            }
            "financingActivities.proceedsFromIssueOfShares" => {
                Some($borrow!($cf.financing_activities.proceeds_from_issue_of_shares))
            }
            "financingActivities.proceedsFromBorrowings" => {
                Some($borrow!($cf.financing_activities.proceeds_from_borrowings))
            }
            "financingActivities.repaymentOfBorrowings" => {
                Some($borrow!($cf.financing_activities.repayment_of_borrowings))
            }
            "financingActivities.interestPaid" => {
                Some($borrow!($cf.financing_activities.interest_paid))
            }
            "financingActivities.dividendsPaid" => {
                Some($borrow!($cf.financing_activities.dividends_paid))
            }
            "financingActivities.otherFinancingActivities" => {
                Some($borrow!($cf.financing_activities.other_financing_activities))
            }
            "cashAndCashEquivalentsAtBeginning" => {
                Some($borrow!($cf.cash_and_cash_equivalents_at_beginning))
            }
            "cashAndCashEquivalentsAtEnd" => Some($borrow!($cf.cash_and_cash_equivalents_at_end)),
            _ => None,
        }
    };
}

pub fn balance_sheet_leaf<'a>(bs: &'a BalanceSheetData, path: &str) -> Option<&'a Amount> {
    balance_sheet_table!(by_ref, bs, path)
}

pub fn balance_sheet_leaf_mut<'a>(
    bs: &'a mut BalanceSheetData,
    path: &str,
) -> Option<&'a mut Amount> {
    balance_sheet_table!(by_mut, bs, path)
}

pub fn profit_loss_leaf<'a>(pl: &'a ProfitLossData, path: &str) -> Option<&'a Amount> {
    profit_loss_table!(by_ref, pl, path)
}

pub fn profit_loss_leaf_mut<'a>(pl: &'a mut ProfitLossData, path: &str) -> Option<&'a mut Amount> {
    profit_loss_table!(by_mut, pl, path)
}

pub fn cash_flow_leaf<'a>(cf: &'a CashFlowData, path: &str) -> Option<&'a Amount> {
    cash_flow_table!(by_ref, cf, path)
}

pub fn cash_flow_leaf_mut<'a>(cf: &'a mut CashFlowData, path: &str) -> Option<&'a mut Amount> {
    cash_flow_table!(by_mut, cf, path)
}

/// Resolves a company-rooted path such as
/// `"balanceSheet.currentAssets.inventories"`.
pub fn company_leaf<'a>(company: &'a Company, path: &str) -> Option<&'a Amount> {
    if let Some(rest) = path.strip_prefix("balanceSheet.") {
        balance_sheet_leaf(&company.balance_sheet, rest)
    } else if let Some(rest) = path.strip_prefix("profitLoss.") {
        profit_loss_leaf(&company.profit_loss, rest)
    } else if let Some(rest) = path.strip_prefix("cashFlow.") {
        cash_flow_leaf(&company.cash_flow, rest)
    } else {
        None
    }
}

pub fn company_leaf_mut<'a>(company: &'a mut Company, path: &str) -> Option<&'a mut Amount> {
    if let Some(rest) = path.strip_prefix("balanceSheet.") {
        balance_sheet_leaf_mut(&mut company.balance_sheet, rest)
    } else if let Some(rest) = path.strip_prefix("profitLoss.") {
        profit_loss_leaf_mut(&mut company.profit_loss, rest)
    } else if let Some(rest) = path.strip_prefix("cashFlow.") {
        cash_flow_leaf_mut(&mut company.cash_flow, rest)
    } else {
        None
    }
}

/// Writes one column of a balance sheet leaf, coercing non-finite input to 0.
pub fn set_balance_sheet_value(
    bs: &mut BalanceSheetData,
    path: &str,
    column: Column,
    value: f64,
) -> Result<()> {
    let leaf = balance_sheet_leaf_mut(bs, path).ok_or_else(|| FinstatError::UnknownPath {
        statement: "balance sheet",
        path: path.to_string(),
    })?;
    leaf.set(column, value);
    Ok(())
}

pub fn set_profit_loss_value(
    pl: &mut ProfitLossData,
    path: &str,
    column: Column,
    value: f64,
) -> Result<()> {
    let leaf = profit_loss_leaf_mut(pl, path).ok_or_else(|| FinstatError::UnknownPath {
        statement: "profit and loss",
        path: path.to_string(),
    })?;
    leaf.set(column, value);
    Ok(())
}

pub fn set_cash_flow_value(
    cf: &mut CashFlowData,
    path: &str,
    column: Column,
    value: f64,
) -> Result<()> {
    let leaf = cash_flow_leaf_mut(cf, path).ok_or_else(|| FinstatError::UnknownPath {
        statement: "cash flow",
        path: path.to_string(),
    })?;
    leaf.set(column, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CompanyInfo;

    #[test]
    fn test_set_then_read_back_through_the_same_path() {
        let mut bs = BalanceSheetData::default();
        set_balance_sheet_value(
            &mut bs,
            "currentAssets.financialAssets.tradeReceivables",
            Column::Current,
            42_500.0,
        )
        .unwrap();

        let leaf = balance_sheet_leaf(&bs, "currentAssets.financialAssets.tradeReceivables").unwrap();
        assert_eq!(leaf.current, 42_500.0);
        assert_eq!(leaf.previous, 0.0);
        // The hardcoded note key survives value writes.
        assert_eq!(leaf.note.as_deref(), Some("17"));
    }

    #[test]
    fn test_unknown_path_is_an_error() {
        let mut bs = BalanceSheetData::default();
        let err = set_balance_sheet_value(&mut bs, "currentAssets.goodwill", Column::Current, 1.0)
            .unwrap_err();
        assert!(err.to_string().contains("currentAssets.goodwill"));
    }

    #[test]
    fn test_non_finite_input_writes_zero() {
        let mut pl = ProfitLossData::keyed();
        set_profit_loss_value(&mut pl, "otherIncome", Column::Previous, f64::NAN).unwrap();
        assert_eq!(pl.other_income.previous, 0.0);
    }

    #[test]
    fn test_company_rooted_paths() {
        let mut company = Company::new(CompanyInfo::for_financial_year("Test Ltd", 2024));
        company.profit_loss.revenue_from_operations.set(Column::Current, 9_999.0);

        let leaf = company_leaf(&company, "profitLoss.revenueFromOperations").unwrap();
        assert_eq!(leaf.current, 9_999.0);

        let leaf = company_leaf_mut(&mut company, "cashFlow.financingActivities.dividendsPaid");
        assert!(leaf.is_some());

        assert!(company_leaf(&company, "changesInEquity.shareCapital").is_none());
    }

    #[test]
    fn test_every_cash_flow_line_resolves() {
        let cf = CashFlowData::keyed();
        for path in [
            "operatingActivities.profitBeforeTax",
            "operatingActivities.adjustments.interestIncome",
            "operatingActivities.changesInWorkingCapital.otherWorkingCapital",
            "operatingActivities.incomeTaxesPaid",
            "investingActivities.interestReceived",
            "financingActivities.otherFinancingActivities",
            "cashAndCashEquivalentsAtBeginning",
            "cashAndCashEquivalentsAtEnd",
        ] {
            assert!(cash_flow_leaf(&cf, path).is_some(), "missing {path}");
        }
    }
}
