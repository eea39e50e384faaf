//! In-memory multi-company store. This is the only stateful surface in the
//! crate: the computation engines stay pure over `Company` snapshots, and the
//! editing layer funnels every write through the path-based setters here.

use crate::company::{Company, CompanyInfo};
use crate::error::{FinstatError, Result};
use crate::paths;
use crate::schema::Column;
use log::{debug, info};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct CompanyStore {
    companies: BTreeMap<String, Company>,
}

impl CompanyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fully populated company record under `id`.
    pub fn create(&mut self, id: &str, info: CompanyInfo) -> Result<&mut Company> {
        if self.companies.contains_key(id) {
            return Err(FinstatError::DuplicateCompany(id.to_string()));
        }
        info!("creating company {id} ({})", info.name);
        Ok(self.companies.entry(id.to_string()).or_insert(Company::new(info)))
    }

    pub fn get(&self, id: &str) -> Option<&Company> {
        self.companies.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Company> {
        self.companies.get_mut(id)
    }

    /// Deletion is whole-company only.
    pub fn remove(&mut self, id: &str) -> Option<Company> {
        info!("removing company {id}");
        self.companies.remove(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.companies.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn update_balance_sheet(
        &mut self,
        id: &str,
        path: &str,
        column: Column,
        value: f64,
    ) -> Result<()> {
        let company = self.require_mut(id)?;
        debug!("update {id} balanceSheet.{path} {column:?} = {value}");
        paths::set_balance_sheet_value(&mut company.balance_sheet, path, column, value)
    }

    pub fn update_profit_loss(
        &mut self,
        id: &str,
        path: &str,
        column: Column,
        value: f64,
    ) -> Result<()> {
        let company = self.require_mut(id)?;
        debug!("update {id} profitLoss.{path} {column:?} = {value}");
        paths::set_profit_loss_value(&mut company.profit_loss, path, column, value)
    }

    pub fn update_cash_flow(
        &mut self,
        id: &str,
        path: &str,
        column: Column,
        value: f64,
    ) -> Result<()> {
        let company = self.require_mut(id)?;
        debug!("update {id} cashFlow.{path} {column:?} = {value}");
        paths::set_cash_flow_value(&mut company.cash_flow, path, column, value)
    }

    /// Wholesale replacement of one breakdown schedule.
    pub fn replace_breakdown(
        &mut self,
        id: &str,
        note_key: &str,
        breakdown: crate::breakdowns::Breakdown,
    ) -> Result<()> {
        let company = self.require_mut(id)?;
        company.breakdowns.insert(note_key.to_string(), breakdown);
        Ok(())
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut Company> {
        self.companies
            .get_mut(id)
            .ok_or_else(|| FinstatError::UnknownCompany(id.to_string()))
    }
}
