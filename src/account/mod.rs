//! Account ledger: plain balances, bank accounts, gift cards, and credit cards
//!
//! Balances are non-negative and rounded to cents after every mutation.
//! Forecasting reads a snapshot of an account and never mutates it.

mod bank;
mod credit_card;
mod gift_card;

pub use bank::BankAccount;
pub use credit_card::{CashbackCategory, CreditCard, Reimbursement, RewardKind};
pub use gift_card::GiftCard;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::round_cents;

/// Date-keyed reminder messages
pub type Alerts = BTreeMap<NaiveDate, String>;

/// Anything holding a balance that can take deposits and withdrawals
pub trait Ledger {
    fn name(&self) -> &str;

    fn balance(&self) -> f64;

    /// Add a positive amount; returns the new balance
    fn deposit(&mut self, amount: f64) -> Result<f64>;

    /// Remove a positive amount no larger than the balance; returns the new balance
    fn withdraw(&mut self, amount: f64) -> Result<f64>;
}

/// Basic account with a name, balance, and optional usage restriction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    name: String,
    balance: f64,
    pub restriction: Option<String>,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: f64) -> Result<Self> {
        check_balance(balance)?;
        Ok(Self {
            name: name.into(),
            balance: round_cents(balance),
            restriction: None,
        })
    }

    /// Overwrite the balance
    pub fn set_balance(&mut self, balance: f64) -> Result<()> {
        check_balance(balance)?;
        self.balance = round_cents(balance);
        Ok(())
    }
}

impl Ledger for Account {
    fn name(&self) -> &str {
        &self.name
    }

    fn balance(&self) -> f64 {
        self.balance
    }

    fn deposit(&mut self, amount: f64) -> Result<f64> {
        check_positive("deposit", amount)?;
        self.balance = round_cents(self.balance + amount);
        info!("{}: deposit of {amount}, balance now {}", self.name, self.balance);
        Ok(self.balance)
    }

    fn withdraw(&mut self, amount: f64) -> Result<f64> {
        check_positive("withdraw", amount)?;
        if amount > self.balance {
            return Err(ForecastError::invalid(
                "withdraw",
                format!("{amount} exceeds balance {} of {}", self.balance, self.name),
            ));
        }
        self.balance = round_cents(self.balance - amount);
        info!("{}: withdrawal of {amount}, balance now {}", self.name, self.balance);
        Ok(self.balance)
    }
}

/// Move `amount` out of `from` and credit `amount * factor` to `to`
///
/// `factor` converts between units, e.g. points to cash. Both legs are
/// validated before either is applied; if `to` still refuses the deposit,
/// the withdrawn amount is returned to `from`.
pub fn transfer(from: &mut dyn Ledger, to: &mut dyn Ledger, amount: f64, factor: f64) -> Result<()> {
    check_positive("amount", amount)?;
    check_positive("factor", factor)?;
    let credited = amount * factor;
    check_positive("amount", credited)?;
    if amount > from.balance() {
        return Err(ForecastError::invalid(
            "amount",
            format!("{amount} exceeds balance {} of {}", from.balance(), from.name()),
        ));
    }

    from.withdraw(amount)?;
    if let Err(err) = to.deposit(credited) {
        warn!("deposit into {} failed, returning {amount} to {}", to.name(), from.name());
        from.deposit(amount)?;
        return Err(err);
    }
    info!("transferred {amount} from {} to {} (credited {credited})", from.name(), to.name());
    Ok(())
}

pub(crate) fn check_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ForecastError::invalid(field, format!("must be positive, got {value}")))
    }
}

pub(crate) fn check_balance(balance: f64) -> Result<()> {
    if balance.is_finite() && balance >= 0.0 {
        Ok(())
    } else {
        Err(ForecastError::invalid(
            "balance",
            format!("must be non-negative, got {balance}"),
        ))
    }
}
