use core::cmp::min;

use serde::{Deserialize, Serialize};

use crate::amount::{self, Amount};

/// An edge of a trust snapshot, as delivered by the snapshot collaborator.
///
/// How the capacity was derived, and how fresh it is, is up to the collaborator.
pub trait CapacityEdge {
    type AccountId;
    type TokenId;

    fn from(&self) -> &Self::AccountId;
    fn to(&self) -> &Self::AccountId;
    fn token_owner(&self) -> &Self::TokenId;
    fn capacity(&self) -> Amount;
}

/// A snapshot edge whose capacity has already been computed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimpleEdge<AccountId, TokenId> {
    pub from: AccountId,
    pub to: AccountId,
    pub token_owner: TokenId,
    #[serde(with = "amount::decimal")]
    pub capacity: Amount,
}

impl<AccountId, TokenId> SimpleEdge<AccountId, TokenId> {
    pub fn new(from: AccountId, to: AccountId, token_owner: TokenId, capacity: Amount) -> Self {
        Self {
            from,
            to,
            token_owner,
            capacity,
        }
    }
}

impl<AccountId, TokenId> CapacityEdge for SimpleEdge<AccountId, TokenId> {
    type AccountId = AccountId;
    type TokenId = TokenId;

    fn from(&self) -> &AccountId {
        &self.from
    }

    fn to(&self) -> &AccountId {
        &self.to
    }

    fn token_owner(&self) -> &TokenId {
        &self.token_owner
    }

    fn capacity(&self) -> Amount {
        self.capacity.clone()
    }
}

/// A snapshot edge carrying both capacity inputs: what the receiver's trust allows it to accept
/// of `token_owner`'s token, and what the sender actually holds of it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrustEdge<AccountId, TokenId> {
    pub from: AccountId,
    pub to: AccountId,
    pub token_owner: TokenId,
    #[serde(with = "amount::decimal")]
    pub trust_limit: Amount,
    #[serde(with = "amount::decimal")]
    pub spendable_balance: Amount,
}

impl<AccountId, TokenId> CapacityEdge for TrustEdge<AccountId, TokenId> {
    type AccountId = AccountId;
    type TokenId = TokenId;

    fn from(&self) -> &AccountId {
        &self.from
    }

    fn to(&self) -> &AccountId {
        &self.to
    }

    fn token_owner(&self) -> &TokenId {
        &self.token_owner
    }

    fn capacity(&self) -> Amount {
        derive_capacity(&self.trust_limit, &self.spendable_balance)
    }
}

/// An edge can never move more than the trust limit allows, nor more than the sender holds.
pub fn derive_capacity(trust_limit: &Amount, spendable_balance: &Amount) -> Amount {
    min(trust_limit, spendable_balance).clone()
}
