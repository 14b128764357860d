//! Credit card bookkeeping: cashback categories, reimbursement credits,
//! memberships, and alerts

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use super::{check_balance, check_positive, Alerts};
use crate::error::{ForecastError, Result};
use crate::rewards::RewardProgram;
use crate::round_cents;

/// How a cashback category pays out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    Cash,
    Points(RewardProgram),
}

/// Bonus earn rate on a spending category, valid over a date window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashbackCategory {
    /// Earn rate per unit spent (0.05 = 5% or 5 points per dollar)
    pub pct: f64,
    pub kind: RewardKind,
    pub starts: NaiveDate,
    pub expires: NaiveDate,
}

impl CashbackCategory {
    /// Open-ended category
    pub fn new(pct: f64, kind: RewardKind) -> Self {
        Self {
            pct,
            kind,
            starts: NaiveDate::MIN,
            expires: NaiveDate::MAX,
        }
    }

    pub fn with_window(mut self, starts: NaiveDate, expires: NaiveDate) -> Self {
        self.starts = starts;
        self.expires = expires;
        self
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires < today
    }

    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.starts <= today && today <= self.expires
    }

    /// Reward earned on `spend`, converted to cash when paid in points
    pub fn reward_value(&self, spend: f64) -> f64 {
        let earned = spend * self.pct;
        match self.kind {
            RewardKind::Cash => earned,
            RewardKind::Points(program) => program.cash_value(earned) / 100.0,
        }
    }
}

/// Statement credit that can be drawn down until it expires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reimbursement {
    pub amount: f64,
    pub expiration: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub name: String,
    balance: f64,
    pub restriction: Option<String>,
    pub annual_fee: f64,
    pub benefit: String,
    /// Whether foreign transactions incur a fee
    pub foreign_transaction_fee: bool,
    categories: BTreeMap<String, CashbackCategory>,
    reimbursements: BTreeMap<String, Reimbursement>,
    memberships: Vec<String>,
    alerts: Alerts,
}

impl CreditCard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: 0.0,
            restriction: None,
            annual_fee: 0.0,
            benefit: String::new(),
            foreign_transaction_fee: true,
            categories: BTreeMap::new(),
            reimbursements: BTreeMap::new(),
            memberships: Vec::new(),
            alerts: Alerts::new(),
        }
    }

    /// Outstanding statement balance
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Overwrite the statement balance, rounded to cents
    pub fn set_balance(&mut self, balance: f64) -> Result<()> {
        check_balance(balance)?;
        self.balance = round_cents(balance);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cashback categories
    // ------------------------------------------------------------------

    pub fn add_category(&mut self, name: impl Into<String>, category: CashbackCategory) {
        self.categories.insert(name.into(), category);
    }

    pub fn categories(&self) -> &BTreeMap<String, CashbackCategory> {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CashbackCategory> {
        self.categories.get(name)
    }

    /// Categories whose window covers `today`
    pub fn active_categories(&self, today: NaiveDate) -> impl Iterator<Item = (&str, &CashbackCategory)> {
        self.categories
            .iter()
            .filter(move |(_, c)| c.is_active(today))
            .map(|(name, c)| (name.as_str(), c))
    }

    /// Drop categories that expired before `today`; returns how many were removed
    pub fn remove_expired_categories(&mut self, today: NaiveDate) -> usize {
        let before = self.categories.len();
        self.categories.retain(|_, c| !c.is_expired(today));
        before - self.categories.len()
    }

    // ------------------------------------------------------------------
    // Reimbursement credits
    // ------------------------------------------------------------------

    pub fn add_reimbursement(
        &mut self,
        name: impl Into<String>,
        amount: f64,
        expiration: NaiveDate,
    ) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ForecastError::invalid(
                "amount",
                format!("reimbursement must be non-negative, got {amount}"),
            ));
        }
        self.reimbursements.insert(
            name.into(),
            Reimbursement { amount: round_cents(amount), expiration },
        );
        Ok(())
    }

    pub fn reimbursements(&self) -> &BTreeMap<String, Reimbursement> {
        &self.reimbursements
    }

    /// Draw `amount` from an unexpired credit; returns what remains
    pub fn withdraw_from_reimbursement(&mut self, name: &str, amount: f64, today: NaiveDate) -> Result<f64> {
        check_positive("amount", amount)?;
        let credit = self.reimbursements.get_mut(name).ok_or_else(|| {
            ForecastError::invalid("reimbursement", format!("no reimbursement named {name}"))
        })?;
        if credit.expiration < today {
            return Err(ForecastError::invalid(
                "reimbursement",
                format!("{name} expired on {}", credit.expiration),
            ));
        }
        if amount > credit.amount {
            return Err(ForecastError::invalid(
                "amount",
                format!("{amount} exceeds remaining {name} credit of {}", credit.amount),
            ));
        }
        credit.amount = round_cents(credit.amount - amount);
        info!("{}: used {amount} of {name}, {} left", self.name, credit.amount);
        Ok(credit.amount)
    }

    pub fn delete_reimbursement(&mut self, name: &str) -> Result<Reimbursement> {
        self.reimbursements.remove(name).ok_or_else(|| {
            ForecastError::invalid("reimbursement", format!("no reimbursement named {name}"))
        })
    }

    // ------------------------------------------------------------------
    // Memberships and alerts
    // ------------------------------------------------------------------

    pub fn add_membership(&mut self, membership: impl Into<String>) {
        self.memberships.push(membership.into());
    }

    pub fn memberships(&self) -> &[String] {
        &self.memberships
    }

    pub fn add_alerts<I, S>(&mut self, alerts: I)
    where
        I: IntoIterator<Item = (NaiveDate, S)>,
        S: Into<String>,
    {
        self.alerts
            .extend(alerts.into_iter().map(|(date, message)| (date, message.into())));
    }

    pub fn alerts(&self) -> &Alerts {
        &self.alerts
    }

    /// The alert with the earliest date
    pub fn latest_alert(&self) -> Option<(NaiveDate, &str)> {
        self.alerts
            .iter()
            .next()
            .map(|(date, message)| (*date, message.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card() -> CreditCard {
        let mut card = CreditCard::new("sapphire");
        card.annual_fee = 95.0;
        card
    }

    #[test]
    fn test_defaults() {
        let card = CreditCard::new("freedom");
        assert_eq!(card.balance(), 0.0);
        assert!(card.foreign_transaction_fee);
        assert!(card.categories().is_empty());
        assert!(card.latest_alert().is_none());
    }

    #[test]
    fn test_set_balance_validates_and_rounds() {
        let mut card = card();
        card.set_balance(1_234.567).unwrap();
        assert_eq!(card.balance(), 1_234.57);
        assert!(matches!(card.set_balance(-1.0), Err(ForecastError::InvalidInput { .. })));
        assert!(card.set_balance(f64::NAN).is_err());
        assert_eq!(card.balance(), 1_234.57);
    }

    #[test]
    fn test_category_expiry() {
        let mut card = card();
        card.add_category("dining", CashbackCategory::new(0.03, RewardKind::Cash));
        card.add_category(
            "gas",
            CashbackCategory::new(0.05, RewardKind::Cash).with_window(date(2024, 1, 1), date(2024, 3, 31)),
        );
        card.add_category(
            "travel",
            CashbackCategory::new(0.05, RewardKind::Cash).with_window(date(2024, 7, 1), date(2024, 9, 30)),
        );

        let active: Vec<&str> = card.active_categories(date(2024, 5, 1)).map(|(n, _)| n).collect();
        assert_eq!(active, vec!["dining"]);

        assert_eq!(card.remove_expired_categories(date(2024, 5, 1)), 1);
        assert!(card.category("gas").is_none());
        assert!(card.category("travel").is_some());
    }

    #[test]
    fn test_reward_value() {
        let cash = CashbackCategory::new(0.05, RewardKind::Cash);
        assert_relative_eq!(cash.reward_value(200.0), 10.0, epsilon = 1e-9);

        // 3x points at 1.6 cents each on $100 spend = $4.80
        let points = CashbackCategory::new(3.0, RewardKind::Points(RewardProgram::UltimateRewards));
        assert_relative_eq!(points.reward_value(100.0), 4.8, epsilon = 1e-9);
    }

    #[test]
    fn test_reimbursement_drawdown() {
        let mut card = card();
        card.add_reimbursement("travel credit", 300.0, date(2024, 12, 31)).unwrap();

        let remaining = card.withdraw_from_reimbursement("travel credit", 120.5, date(2024, 6, 1)).unwrap();
        assert_eq!(remaining, 179.5);
        assert_eq!(card.reimbursements()["travel credit"].amount, 179.5);

        assert!(card.withdraw_from_reimbursement("travel credit", 200.0, date(2024, 6, 1)).is_err());
        assert!(card.withdraw_from_reimbursement("travel credit", 10.0, date(2025, 1, 1)).is_err());
        assert!(card.withdraw_from_reimbursement("dining credit", 10.0, date(2024, 6, 1)).is_err());
    }

    #[test]
    fn test_delete_reimbursement() {
        let mut card = card();
        card.add_reimbursement("uber", 15.0, date(2024, 1, 31)).unwrap();
        assert_eq!(card.delete_reimbursement("uber").unwrap().amount, 15.0);
        assert!(matches!(
            card.delete_reimbursement("uber"),
            Err(ForecastError::InvalidInput { .. })
        ));
        assert!(card.add_reimbursement("bad", -1.0, date(2024, 1, 31)).is_err());
    }

    #[test]
    fn test_memberships_and_alerts() {
        let mut card = card();
        card.add_membership("Priority Pass");
        assert_eq!(card.memberships(), ["Priority Pass".to_string()]);

        card.add_alerts([
            (date(2024, 9, 1), "annual fee posts"),
            (date(2024, 6, 15), "statement closes"),
        ]);
        assert_eq!(card.alerts().len(), 2);
        assert_eq!(card.latest_alert(), Some((date(2024, 6, 15), "statement closes")));
    }
}
