//! Gift card balances with an expiration date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Account, Ledger};
use crate::error::Result;

fn default_expiration() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 1, 1).unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCard {
    account: Account,
    pub expiration: NaiveDate,
    pub code: Option<String>,
    /// Merchant or spending category the card is restricted to
    pub category: Option<String>,
}

impl GiftCard {
    pub fn new(name: impl Into<String>, balance: f64) -> Result<Self> {
        Ok(Self {
            account: Account::new(name, balance)?,
            expiration: default_expiration(),
            code: None,
            category: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_expiration(mut self, expiration: NaiveDate) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration < today
    }
}

impl Ledger for GiftCard {
    fn name(&self) -> &str {
        self.account.name()
    }

    fn balance(&self) -> f64 {
        self.account.balance()
    }

    fn deposit(&mut self, amount: f64) -> Result<f64> {
        self.account.deposit(amount)
    }

    fn withdraw(&mut self, amount: f64) -> Result<f64> {
        self.account.withdraw(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::transfer;

    #[test]
    fn test_defaults() {
        let card = GiftCard::new("coffee", 25.0).unwrap().with_category("dining");
        assert_eq!(card.expiration, NaiveDate::from_ymd_opt(2100, 1, 1).unwrap());
        assert_eq!(card.category.as_deref(), Some("dining"));
        assert!(card.code.is_none());
    }

    #[test]
    fn test_expiry() {
        let expiration = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let card = GiftCard::new("books", 50.0).unwrap().with_expiration(expiration);
        assert!(!card.is_expired(expiration));
        assert!(card.is_expired(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }

    #[test]
    fn test_spend_into_account() {
        let mut card = GiftCard::new("grocer", 40.0).unwrap();
        let mut wallet = Account::new("wallet", 0.0).unwrap();
        transfer(&mut card, &mut wallet, 15.5, 1.0).unwrap();
        assert_eq!(card.balance(), 24.5);
        assert_eq!(wallet.balance(), 15.5);
    }
}
