//! Itemized schedules backing individual notes (the PPE schedule, share
//! capital schedule, borrowings schedule, and trade payables ageing).
//!
//! A leaf with a breakdown has two possible sources of truth. The rule is:
//! when a breakdown exists for a note key, its computed total is
//! authoritative and is pushed back into the statement leaf; otherwise the
//! leaf's stored value stands. [`LeafSource`] makes the two cases explicit
//! instead of scattering "use breakdown if non-empty" checks per screen.

use crate::company::Company;
use crate::error::{FinstatError, Result};
use crate::notes::financial_path;
use crate::paths::{company_leaf, company_leaf_mut};
use crate::schema::{Amount, Figures};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Breakdown {
    /// Gross block and accumulated depreciation per asset class; the note
    /// total is the net block.
    PropertyPlantAndEquipment { items: Vec<PpeItem> },
    ShareCapital { items: Vec<ShareCapitalItem> },
    Borrowings { items: Vec<BorrowingItem> },
    TradePayablesAgeing { items: Vec<TradePayablesAgeingItem> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PpeItem {
    pub description: String,
    pub gross_block: Figures,
    pub accumulated_depreciation: Figures,
}

impl PpeItem {
    pub fn net_block(&self) -> Figures {
        self.gross_block - self.accumulated_depreciation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareCapitalItem {
    pub class_of_shares: String,
    pub number_of_shares: Figures,
    pub amount: Figures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowingItem {
    pub lender: String,
    pub secured: bool,
    pub amount: Figures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradePayablesAgeingItem {
    pub particulars: String,
    pub unbilled: Figures,
    pub less_than_one_year: Figures,
    pub one_to_two_years: Figures,
    pub two_to_three_years: Figures,
    pub more_than_three_years: Figures,
}

impl TradePayablesAgeingItem {
    pub fn total(&self) -> Figures {
        self.unbilled
            + self.less_than_one_year
            + self.one_to_two_years
            + self.two_to_three_years
            + self.more_than_three_years
    }
}

impl Breakdown {
    /// The schedule total that overrides the corresponding statement leaf.
    pub fn total(&self) -> Figures {
        match self {
            Breakdown::PropertyPlantAndEquipment { items } => {
                items.iter().map(PpeItem::net_block).sum()
            }
            Breakdown::ShareCapital { items } => items.iter().map(|i| i.amount).sum(),
            Breakdown::Borrowings { items } => items.iter().map(|i| i.amount).sum(),
            Breakdown::TradePayablesAgeing { items } => {
                items.iter().map(TradePayablesAgeingItem::total).sum()
            }
        }
    }
}

/// Which value is authoritative for a note-backed leaf.
#[derive(Debug, Clone, Copy)]
pub enum LeafSource<'a> {
    Direct(&'a Amount),
    FromBreakdown(&'a Breakdown),
}

impl LeafSource<'_> {
    pub fn resolve(&self) -> Figures {
        match self {
            LeafSource::Direct(leaf) => leaf.figures(),
            LeafSource::FromBreakdown(breakdown) => breakdown.total(),
        }
    }
}

/// Looks up the authoritative source for a balance sheet / profit and loss
/// note key.
pub fn leaf_source<'a>(company: &'a Company, key: &str) -> Result<LeafSource<'a>> {
    if let Some(breakdown) = company.breakdowns.get(key) {
        return Ok(LeafSource::FromBreakdown(breakdown));
    }

    let path = financial_path(key).ok_or_else(|| FinstatError::UnknownNoteKey(key.to_string()))?;
    let leaf = company_leaf(company, path)
        .unwrap_or_else(|| unreachable!("financial_path targets always resolve: {path}"));
    Ok(LeafSource::Direct(leaf))
}

/// Resolves a note key to its authoritative `{current, previous}` pair.
pub fn resolve_leaf(company: &Company, key: &str) -> Result<Figures> {
    Ok(leaf_source(company, key)?.resolve())
}

/// Pushes every breakdown total back into its statement leaf, making the
/// stored tree consistent with the schedules before aggregation or export.
pub fn apply_breakdown_totals(company: &mut Company) -> Result<()> {
    let totals: Vec<(String, Figures)> = company
        .breakdowns
        .iter()
        .map(|(key, breakdown)| (key.clone(), breakdown.total()))
        .collect();

    for (key, total) in totals {
        let path =
            financial_path(&key).ok_or_else(|| FinstatError::UnknownNoteKey(key.clone()))?;
        let leaf = company_leaf_mut(company, path)
            .unwrap_or_else(|| unreachable!("financial_path targets always resolve: {path}"));
        leaf.set_figures(total);
        debug!("breakdown {key} -> {path}: {:.2} / {:.2}", total.current, total.previous);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CompanyInfo;
    use crate::schema::Column;

    fn company() -> Company {
        Company::new(CompanyInfo::for_financial_year("Schedules Ltd", 2024))
    }

    fn ppe_schedule() -> Breakdown {
        Breakdown::PropertyPlantAndEquipment {
            items: vec![
                PpeItem {
                    description: "Plant and Machinery".to_string(),
                    gross_block: Figures::new(800_000.0, 700_000.0),
                    accumulated_depreciation: Figures::new(300_000.0, 250_000.0),
                },
                PpeItem {
                    description: "Office Equipment".to_string(),
                    gross_block: Figures::new(100_000.0, 100_000.0),
                    accumulated_depreciation: Figures::new(40_000.0, 30_000.0),
                },
            ],
        }
    }

    #[test]
    fn test_ppe_total_is_net_block() {
        let total = ppe_schedule().total();
        assert_eq!(total, Figures::new(560_000.0, 520_000.0));
    }

    #[test]
    fn test_ageing_item_sums_all_five_buckets() {
        let item = TradePayablesAgeingItem {
            particulars: "Disputed dues".to_string(),
            unbilled: Figures::new(1.0, 0.0),
            less_than_one_year: Figures::new(2.0, 0.0),
            one_to_two_years: Figures::new(3.0, 0.0),
            two_to_three_years: Figures::new(4.0, 0.0),
            more_than_three_years: Figures::new(5.0, 0.0),
        };
        assert_eq!(item.total().current, 15.0);
    }

    #[test]
    fn test_leaf_without_breakdown_uses_stored_value() {
        let mut c = company();
        c.balance_sheet
            .non_current_assets
            .property_plant_and_equipment
            .set(Column::Current, 123_456.0);

        let resolved = resolve_leaf(&c, "3").unwrap();
        assert_eq!(resolved.current, 123_456.0);
        assert!(matches!(leaf_source(&c, "3").unwrap(), LeafSource::Direct(_)));
    }

    #[test]
    fn test_breakdown_overrides_stored_value() {
        let mut c = company();
        c.balance_sheet
            .non_current_assets
            .property_plant_and_equipment
            .set(Column::Current, 1.0);
        c.breakdowns.insert("3".to_string(), ppe_schedule());

        let resolved = resolve_leaf(&c, "3").unwrap();
        assert_eq!(resolved, Figures::new(560_000.0, 520_000.0));
    }

    #[test]
    fn test_apply_pushes_totals_into_leaves() {
        let mut c = company();
        c.breakdowns.insert("3".to_string(), ppe_schedule());
        c.breakdowns.insert(
            "24".to_string(),
            Breakdown::ShareCapital {
                items: vec![ShareCapitalItem {
                    class_of_shares: "Equity shares of Rs. 10 each".to_string(),
                    number_of_shares: Figures::new(40_000.0, 40_000.0),
                    amount: Figures::new(400_000.0, 400_000.0),
                }],
            },
        );

        apply_breakdown_totals(&mut c).unwrap();

        let ppe = &c.balance_sheet.non_current_assets.property_plant_and_equipment;
        assert_eq!(ppe.figures(), Figures::new(560_000.0, 520_000.0));
        assert_eq!(ppe.note.as_deref(), Some("3"));
        assert_eq!(
            c.balance_sheet.equity.equity_share_capital.current,
            400_000.0
        );
    }

    #[test]
    fn test_unknown_note_key_is_an_error() {
        let mut c = company();
        c.breakdowns.insert(
            "999".to_string(),
            Breakdown::Borrowings { items: vec![] },
        );
        assert!(apply_breakdown_totals(&mut c).is_err());
        assert!(resolve_leaf(&c, "998").is_err());
    }

    #[test]
    fn test_breakdown_json_is_tagged() {
        let json = serde_json::to_string(&ppe_schedule()).unwrap();
        assert!(json.contains("\"type\":\"propertyPlantAndEquipment\""));
        assert!(json.contains("grossBlock"));

        let back: Breakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ppe_schedule());
    }
}
