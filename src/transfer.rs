use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use itertools::Itertools;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::amount::{self, Amount};
use crate::edge::FlowEdge;
use crate::error::Error;
use crate::network::{EdgeId, FlowNetwork};

/// One elementary token transfer of a transfer plan.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransferStep<AccountId, TokenId> {
    from: AccountId,
    to: AccountId,
    #[serde(with = "amount::decimal")]
    value: Amount,
    token_owner: TokenId,
}

impl<AccountId, TokenId> TransferStep<AccountId, TokenId> {
    pub fn new(from: AccountId, to: AccountId, value: Amount, token_owner: TokenId) -> Self {
        Self {
            from,
            to,
            value,
            token_owner,
        }
    }

    pub fn from(&self) -> &AccountId {
        &self.from
    }

    pub fn to(&self) -> &AccountId {
        &self.to
    }

    pub fn value(&self) -> &Amount {
        &self.value
    }

    pub fn token_owner(&self) -> &TokenId {
        &self.token_owner
    }

    /// Replaces both endpoints, e.g. to turn node indices back into addresses.
    pub fn map_accounts<B, F>(self, mut f: F) -> TransferStep<B, TokenId>
    where
        F: FnMut(AccountId) -> B,
    {
        TransferStep {
            from: f(self.from),
            to: f(self.to),
            value: self.value,
            token_owner: self.token_owner,
        }
    }
}

/// The result of a successful pathfinding request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPlan<AccountId, TokenId> {
    /// The maximum flow found between source and sink.
    #[serde(with = "amount::decimal")]
    pub max_flow_value: Amount,
    /// The transfers realizing that flow, in execution order.
    pub transfer_steps: Vec<TransferStep<AccountId, TokenId>>,
}

impl<AccountId, TokenId> TransferPlan<AccountId, TokenId> {
    pub fn map_accounts<B, F>(self, mut f: F) -> TransferPlan<B, TokenId>
    where
        F: FnMut(AccountId) -> B,
    {
        TransferPlan {
            max_flow_value: self.max_flow_value,
            transfer_steps: self
                .transfer_steps
                .into_iter()
                .map(|step| step.map_accounts(&mut f))
                .collect(),
        }
    }
}

/// Turns the final flow assignment of `network` into transfer steps, one per edge carrying flow.
///
/// Steps follow `commits`, the order in which the edges first received flow. A step whose sender
/// (other than `source`) has not yet received enough from the steps emitted before it is held
/// back until it has, so the plan can be executed front to back. Flow cancelled by a later
/// augmentation is the reason plain commit order is not always executable.
///
/// Fails with [`Error::UnfundedStep`] if no remaining step can be funded, which happens when
/// the flow still contains a cycle (see [`cancel_circulations`]).
///
/// [`cancel_circulations`]: crate::algo::circulation::cancel_circulations
pub fn synthesize<TokenId: Clone>(
    network: &FlowNetwork<TokenId>,
    commits: &[EdgeId],
    source: usize,
) -> Result<Vec<TransferStep<usize, TokenId>>, Error> {
    let mut pending: Vec<&FlowEdge<TokenId>> = commits
        .iter()
        .map(|id| network.edge(*id))
        .filter(|e| !e.flow().is_zero())
        .collect_vec();
    let mut received = vec![Amount::zero(); network.node_count()];
    let mut steps = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let next = pending
            .iter()
            .position(|e| e.from() == source || received[e.from()] >= *e.flow())
            .ok_or_else(|| {
                log::warn!(
                    "no funded transfer step left after {} of {}",
                    steps.len(),
                    steps.len() + pending.len()
                );
                Error::UnfundedStep { step: steps.len() }
            })?;
        let edge = pending.remove(next);

        if edge.from() != source {
            received[edge.from()] -= edge.flow();
        }
        received[edge.to()] += edge.flow();

        steps.push(TransferStep::new(
            edge.from(),
            edge.to(),
            edge.flow().clone(),
            edge.token_owner().clone(),
        ));
    }

    Ok(steps)
}

/// Executes `steps` in order against balances that start at zero for every account but
/// `source`, which may send without limit.
///
/// Returns the final balances of all accounts other than `source`, or the index of the first
/// step whose sender cannot cover it.
pub fn replay<AccountId, TokenId>(
    steps: &[TransferStep<AccountId, TokenId>],
    source: &AccountId,
) -> Result<BTreeMap<AccountId, Amount>, Error>
where
    AccountId: Ord + Clone,
{
    let mut balances = BTreeMap::<AccountId, Amount>::new();
    for (step, transfer) in steps.iter().enumerate() {
        if transfer.from() != source {
            let balance = balances.entry(transfer.from().clone()).or_default();
            if *balance < *transfer.value() {
                return Err(Error::UnfundedStep { step });
            }
            *balance -= transfer.value();
        }
        if transfer.to() != source {
            *balances.entry(transfer.to().clone()).or_default() += transfer.value();
        }
    }
    Ok(balances)
}

/// Checks that `steps` can be executed in order and that, once they have been, `sink` holds
/// exactly `value` while every other account except `source` is back to zero.
pub fn verify<AccountId, TokenId>(
    steps: &[TransferStep<AccountId, TokenId>],
    source: &AccountId,
    sink: &AccountId,
    value: &Amount,
) -> Result<(), Error>
where
    AccountId: Ord + Clone,
{
    let balances = replay(steps, source)?;
    let delivered = balances.get(sink).cloned().unwrap_or_default();
    let stranded = balances
        .iter()
        .any(|(account, balance)| account != sink && !balance.is_zero());

    if source != sink && (delivered != *value || stranded) {
        log::error!("transfer plan delivers {delivered} instead of {value}");
        return Err(Error::FlowNotConserved);
    }
    Ok(())
}
