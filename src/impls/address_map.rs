use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::address_book::AddressBook;
use crate::amount::Amount;
use crate::capacity::CapacityEdge;
use crate::error::Error;
use crate::id::Id;
use crate::network::EdgeSpec;
use crate::transfer::{TransferPlan, TransferStep};
use crate::{Pathfinder, Snapshot};

/// Runs an index-based pathfinder over a snapshot keyed by account addresses.
///
/// Addresses are numbered in the order they first appear (sender, receiver, then edge by
/// edge), so a given snapshot always maps to the same network. A sender or receiver that does
/// not appear in any edge becomes an isolated node.
#[derive(Clone, Debug)]
pub struct AddressMappedPathfinder<P, E> {
    inner: P,
    _phantom: PhantomData<E>,
}

impl<P, E> AddressMappedPathfinder<P, E> {
    pub fn wrapping(inner: P) -> Self {
        Self {
            inner,
            _phantom: PhantomData,
        }
    }
}

impl<P, E> Pathfinder for AddressMappedPathfinder<P, E>
where
    E: CapacityEdge,
    E::AccountId: Id,
    E::TokenId: Id,
    P: Pathfinder<
        AccountId = usize,
        TokenId = E::TokenId,
        Edges = Snapshot<E::TokenId>,
        Error = Error,
    >,
{
    type AccountId = E::AccountId;
    type TokenId = E::TokenId;
    type Edges = Vec<E>;
    type Error = Error;

    fn find_path(
        &mut self,
        edges: Self::Edges,
        source: &Self::AccountId,
        sink: &Self::AccountId,
        value: &Amount,
    ) -> Result<TransferPlan<Self::AccountId, Self::TokenId>, Self::Error> {
        let mut book = AddressBook::new();
        let source = book.insert(source.clone());
        let sink = book.insert(sink.clone());

        let edges: Vec<_> = edges
            .iter()
            .map(|e| {
                let from = book.insert(e.from().clone());
                let to = book.insert(e.to().clone());
                EdgeSpec::new(from, to, e.token_owner().clone(), e.capacity())
            })
            .collect();
        let snapshot = Snapshot {
            node_count: book.len(),
            edges,
        };

        let plan = self.inner.find_path(snapshot, &source, &sink, value)?;

        Ok(plan.map_accounts(|idx| book[idx].clone()))
    }

    fn check(
        &self,
        plan: &TransferPlan<Self::AccountId, Self::TokenId>,
        source: &Self::AccountId,
        sink: &Self::AccountId,
    ) -> Result<(), Self::Error> {
        let mut book = AddressBook::new();
        let source = book.insert(source.clone());
        let sink = book.insert(sink.clone());

        let steps = plan
            .transfer_steps
            .iter()
            .map(|step| {
                let from = book.insert(step.from().clone());
                let to = book.insert(step.to().clone());
                TransferStep::new(from, to, step.value().clone(), step.token_owner().clone())
            })
            .collect();
        let plan = TransferPlan {
            max_flow_value: plan.max_flow_value.clone(),
            transfer_steps: steps,
        };

        self.inner.check(&plan, &source, &sink)
    }
}
