use crate::macros::{id_type, setter};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

id_type!(PersonId);
id_type!(AccountId);
id_type!(RecordId);
id_type!(SplitId);

// People

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// Accounts

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub description: Option<String>,
    pub beginning_balance: Decimal,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub description: Option<String>,
    pub beginning_balance: Decimal,
}

impl NewAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            beginning_balance: Decimal::ZERO,
        }
    }

    setter!(opt description: String);
    setter!(beginning_balance: Decimal);
}

/// Account with its balance derived from every record and paid split touching it
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalance {
    pub id: AccountId,
    pub name: String,
    pub balance: Decimal,
}

// Records

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub account_id: AccountId,
    #[serde(default)]
    pub is_income: bool,
}

impl Record {
    /// Signed effect of this record on its account
    pub fn signed_amount(&self) -> Decimal {
        if self.is_income {
            self.amount
        } else {
            -self.amount
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub label: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub account_id: AccountId,
    pub is_income: bool,
}

impl NewRecord {
    pub fn new(
        label: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        account_id: AccountId,
    ) -> Self {
        Self {
            label: label.into(),
            amount,
            date,
            account_id,
            is_income: false,
        }
    }

    setter!(is_income: bool);
}

// Splits

/// A share of a record owed by one person, optionally already paid back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub id: SplitId,
    pub record_id: RecordId,
    pub amount: Decimal,
    pub person_id: PersonId,
    #[serde(default)]
    pub is_paid: bool,
    pub account_id: Option<AccountId>,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSplit {
    pub amount: Decimal,
    pub person_id: PersonId,
    pub is_paid: bool,
    pub account_id: Option<AccountId>,
    pub paid_date: Option<NaiveDate>,
}

impl NewSplit {
    pub fn new(person_id: PersonId, amount: Decimal) -> Self {
        Self {
            amount,
            person_id,
            is_paid: false,
            account_id: None,
            paid_date: None,
        }
    }

    setter!(is_paid: bool);
    setter!(opt account_id: AccountId);
    setter!(opt paid_date: NaiveDate);
}
