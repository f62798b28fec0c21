//! In-memory fee allowances.

use parking_lot::Mutex;
use std::collections::HashMap;
use tollgate_core::{FeeGrantKeeper, KeeperError, ValidationContext};
use tollgate_types::{Address, Coins, Message};

/// A fee allowance from one account to another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowance {
    /// Remaining spendable amount; `None` is unlimited.
    pub spend_limit: Option<Coins>,

    /// Message types the allowance may pay for; `None` allows all.
    pub allowed_messages: Option<Vec<String>>,

    /// Whether the allowance has expired.
    pub expired: bool,
}

impl Allowance {
    /// An allowance with no limit.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// An allowance capped at `limit`.
    pub fn limited(limit: Coins) -> Self {
        Self {
            spend_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Restrict the allowance to the given message types.
    pub fn with_allowed_messages(mut self, type_urls: &[&str]) -> Self {
        self.allowed_messages = Some(type_urls.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Mark the allowance expired.
    pub fn expired(mut self) -> Self {
        self.expired = true;
        self
    }

    fn accept(&mut self, fee: &Coins, messages: &[Message]) -> Result<(), KeeperError> {
        if self.expired {
            return Err(KeeperError::GrantExpired);
        }
        if let Some(allowed) = &self.allowed_messages {
            if let Some(msg) = messages
                .iter()
                .find(|m| !allowed.iter().any(|t| t == m.type_url()))
            {
                return Err(KeeperError::MessageNotAllowed(msg.type_url().to_string()));
            }
        }
        if let Some(limit) = &self.spend_limit {
            if !limit.is_all_gte(fee) {
                return Err(KeeperError::GrantExceeded {
                    fee: fee.clone(),
                    remaining: limit.clone(),
                });
            }
            self.spend_limit = Some(limit.saturating_sub(fee));
        }
        Ok(())
    }

    fn is_exhausted(&self) -> bool {
        matches!(&self.spend_limit, Some(limit) if limit.is_zero())
    }
}

/// Fee allowances held in memory, keyed by `(granter, grantee)`.
///
/// Counts every authorization request so tests can check whether the
/// authorizer was consulted at all.
#[derive(Default)]
pub struct MemFeeGrants {
    grants: Mutex<HashMap<(Address, Address), Allowance>>,
    requests: Mutex<usize>,
}

impl MemFeeGrants {
    /// No allowances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an allowance from `granter` to `grantee`, replacing any other.
    pub fn grant(&self, granter: Address, grantee: Address, allowance: Allowance) {
        self.grants.lock().insert((granter, grantee), allowance);
    }

    /// The current allowance, if any.
    pub fn allowance(&self, granter: &Address, grantee: &Address) -> Option<Allowance> {
        self.grants.lock().get(&(*granter, *grantee)).cloned()
    }

    /// Number of `use_granted_fees` calls.
    pub fn requests(&self) -> usize {
        *self.requests.lock()
    }
}

impl FeeGrantKeeper for MemFeeGrants {
    fn use_granted_fees(
        &self,
        _ctx: &ValidationContext,
        granter: &Address,
        grantee: &Address,
        fee: &Coins,
        messages: &[Message],
    ) -> Result<(), KeeperError> {
        *self.requests.lock() += 1;

        let mut grants = self.grants.lock();
        let key = (*granter, *grantee);
        let allowance = grants.get_mut(&key).ok_or(KeeperError::GrantNotFound)?;
        allowance.accept(fee, messages)?;
        if allowance.is_exhausted() {
            grants.remove(&key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollgate_types::test_utils::{test_address, test_coins};
    use tollgate_types::{BlockHeight, MSG_AGGREGATE_EXCHANGE_RATE_VOTE, MSG_SEND};

    fn ctx() -> ValidationContext {
        ValidationContext::new(BlockHeight(1))
    }

    #[test]
    fn test_limited_allowance_is_debited() {
        let grants = MemFeeGrants::new();
        let (granter, grantee) = (test_address(1), test_address(2));
        grants.grant(granter, grantee, Allowance::limited(test_coins("100uluna")));

        grants
            .use_granted_fees(&ctx(), &granter, &grantee, &test_coins("30uluna"), &[])
            .unwrap();

        let left = grants.allowance(&granter, &grantee).unwrap();
        assert_eq!(left.spend_limit, Some(test_coins("70uluna")));
        assert_eq!(grants.requests(), 1);
    }

    #[test]
    fn test_exceeding_limit_fails() {
        let grants = MemFeeGrants::new();
        let (granter, grantee) = (test_address(1), test_address(2));
        grants.grant(granter, grantee, Allowance::limited(test_coins("10uluna")));

        let err = grants
            .use_granted_fees(&ctx(), &granter, &grantee, &test_coins("11uluna"), &[])
            .unwrap_err();
        assert!(matches!(err, KeeperError::GrantExceeded { .. }));
    }

    #[test]
    fn test_exhausted_allowance_is_removed() {
        let grants = MemFeeGrants::new();
        let (granter, grantee) = (test_address(1), test_address(2));
        grants.grant(granter, grantee, Allowance::limited(test_coins("10uluna")));

        grants
            .use_granted_fees(&ctx(), &granter, &grantee, &test_coins("10uluna"), &[])
            .unwrap();
        assert_eq!(grants.allowance(&granter, &grantee), None);
    }

    #[test]
    fn test_missing_and_expired() {
        let grants = MemFeeGrants::new();
        let (granter, grantee) = (test_address(1), test_address(2));
        assert_eq!(
            grants.use_granted_fees(&ctx(), &granter, &grantee, &test_coins("1uluna"), &[]),
            Err(KeeperError::GrantNotFound)
        );

        grants.grant(granter, grantee, Allowance::unlimited().expired());
        assert_eq!(
            grants.use_granted_fees(&ctx(), &granter, &grantee, &test_coins("1uluna"), &[]),
            Err(KeeperError::GrantExpired)
        );
    }

    #[test]
    fn test_allowed_messages() {
        let grants = MemFeeGrants::new();
        let (granter, grantee) = (test_address(1), test_address(2));
        grants.grant(
            granter,
            grantee,
            Allowance::unlimited().with_allowed_messages(&[MSG_AGGREGATE_EXCHANGE_RATE_VOTE]),
        );

        let vote = Message::new(MSG_AGGREGATE_EXCHANGE_RATE_VOTE, grantee);
        grants
            .use_granted_fees(&ctx(), &granter, &grantee, &test_coins("1uluna"), &[vote])
            .unwrap();

        let send = Message::send(grantee, test_coins("1uluna"));
        assert_eq!(
            grants.use_granted_fees(&ctx(), &granter, &grantee, &test_coins("1uluna"), &[send]),
            Err(KeeperError::MessageNotAllowed(MSG_SEND.to_string()))
        );
    }
}
