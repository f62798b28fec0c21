//! Decimal coin amounts, used for per-gas prices.

use crate::coin::{validate_denom, CoinsError};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A decimal amount of one denomination, e.g. a price per unit of gas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecCoin {
    /// Denomination.
    pub denom: String,

    /// Non-negative decimal amount.
    pub amount: Decimal,
}

impl DecCoin {
    /// Create a new decimal coin.
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount.normalize(), self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| CoinsError::Parse(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(CoinsError::Parse(s.to_string()));
        }
        let amount = Decimal::from_str(amount).map_err(|_| CoinsError::Parse(s.to_string()))?;
        let denom = denom.trim_start();
        validate_denom(denom)?;
        Ok(DecCoin::new(denom, amount))
    }
}

/// A schedule of decimal amounts, one per denomination.
///
/// Kept sorted by denomination with zero entries removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DecCoins(Vec<DecCoin>);

impl DecCoins {
    /// The empty schedule.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a normalized schedule.
    pub fn new(coins: Vec<DecCoin>) -> Result<Self, CoinsError> {
        let mut coins: Vec<DecCoin> = coins
            .into_iter()
            .filter(|c| !c.amount.is_zero())
            .collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        for pair in coins.windows(2) {
            if pair[0].denom == pair[1].denom {
                return Err(CoinsError::DuplicateDenom(pair[1].denom.clone()));
            }
        }
        for coin in &coins {
            validate_denom(&coin.denom)?;
        }
        Ok(Self(coins))
    }

    /// Whether the schedule holds no positive entry.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.amount.is_zero())
    }

    /// Amount for `denom`, zero if absent.
    pub fn amount_of(&self, denom: &str) -> Decimal {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries in denomination order.
    pub fn iter(&self) -> std::slice::Iter<'_, DecCoin> {
        self.0.iter()
    }
}

impl fmt::Display for DecCoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", coin)?;
        }
        Ok(())
    }
}

impl FromStr for DecCoins {
    type Err = CoinsError;

    /// Parse `"0.15uluna,1uusd"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(str::parse::<DecCoin>)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}

impl Serialize for DecCoins {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DecCoins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
