use crate::breakdowns::Breakdown;
use crate::schema::{BalanceSheetData, CashFlowData, ChangesInEquityData, ProfitLossData};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[schemars(description = "Legal name of the company as registered with the MCA.")]
    pub name: String,

    #[schemars(description = "Corporate Identification Number, if allotted.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_office: Option<String>,

    #[schemars(description = "First day of the financial year being reported.")]
    pub financial_year_start: NaiveDate,

    #[schemars(description = "Last day of the financial year being reported (31 March for most Indian companies).")]
    pub financial_year_end: NaiveDate,
}

impl CompanyInfo {
    /// Info for the April-to-March financial year ending in `end_year`.
    pub fn for_financial_year(name: &str, end_year: i32) -> Self {
        Self {
            name: name.to_string(),
            cin: None,
            registered_office: None,
            financial_year_start: NaiveDate::from_ymd_opt(end_year - 1, 4, 1)
                .expect("april 1 is always a valid date"),
            financial_year_end: NaiveDate::from_ymd_opt(end_year, 3, 31)
                .expect("march 31 is always a valid date"),
        }
    }
}

/// A full set of statutory statements for one company, plus the itemized
/// breakdown schedules backing individual notes.
///
/// A `Company` is always constructed fully populated: every leaf of every
/// statement tree exists (zero-valued) from the start, with its internal note
/// key assigned. This is the construction invariant the computation layer
/// relies on instead of defensive missing-field handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub info: CompanyInfo,
    pub balance_sheet: BalanceSheetData,
    pub profit_loss: ProfitLossData,
    pub cash_flow: CashFlowData,
    pub changes_in_equity: ChangesInEquityData,

    #[schemars(description = "Itemized note schedules, keyed by internal note key. When present, a schedule's total overrides the corresponding leaf's stored value.")]
    #[serde(default)]
    pub breakdowns: BTreeMap<String, Breakdown>,
}

impl Company {
    pub fn new(info: CompanyInfo) -> Self {
        Self {
            info,
            balance_sheet: BalanceSheetData::default(),
            profit_loss: ProfitLossData::keyed(),
            cash_flow: CashFlowData::keyed(),
            changes_in_equity: ChangesInEquityData::default(),
            breakdowns: BTreeMap::new(),
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(Company);
        serde_json::to_string_pretty(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn collect_note_keys(value: &serde_json::Value, keys: &mut Vec<String>) {
        match value {
            serde_json::Value::Object(map) => {
                if let Some(serde_json::Value::String(key)) = map.get("note") {
                    keys.push(key.clone());
                }
                for child in map.values() {
                    collect_note_keys(child, keys);
                }
            }
            serde_json::Value::Array(items) => {
                for child in items {
                    collect_note_keys(child, keys);
                }
            }
            _ => {}
        }
    }

    #[test]
    fn test_note_keys_are_unique_across_the_company() {
        let company = Company::new(CompanyInfo::for_financial_year("Test Ltd", 2024));
        let value = serde_json::to_value(&company).unwrap();

        let mut keys = Vec::new();
        collect_note_keys(&value, &mut keys);

        let unique: BTreeSet<&String> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len(), "duplicate note keys: {keys:?}");
        assert!(keys.len() > 50);
    }

    #[test]
    fn test_company_json_round_trip() {
        let mut company = Company::new(CompanyInfo::for_financial_year("Test Ltd", 2024));
        company
            .balance_sheet
            .current_assets
            .inventories
            .set(crate::schema::Column::Current, 250_000.0);

        let json = company.to_json().unwrap();
        let back = Company::from_json(&json).unwrap();
        assert_eq!(back, company);
    }

    #[test]
    fn test_financial_year_helper() {
        let info = CompanyInfo::for_financial_year("Test Ltd", 2024);
        assert_eq!(
            info.financial_year_start,
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
        );
        assert_eq!(
            info.financial_year_end,
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
    }

    #[test]
    fn test_schema_export_mentions_statements() {
        let schema = Company::schema_as_json().unwrap();
        assert!(schema.contains("balanceSheet"));
        assert!(schema.contains("profitLoss"));
        assert!(schema.contains("cashFlow"));
        assert!(schema.contains("breakdowns"));
    }
}
