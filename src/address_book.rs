use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Index;

use crate::id::Id;

/// Assigns dense node indices to account addresses, in first-seen order.
#[derive(Clone, Debug)]
pub struct AddressBook<AccountId> {
    addresses: Vec<AccountId>,
    indices: BTreeMap<AccountId, usize>,
}

impl<AccountId: Id> AddressBook<AccountId> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The index of `address`, assigning the next free one if it is new.
    pub fn insert(&mut self, address: AccountId) -> usize {
        if let Some(idx) = self.indices.get(&address) {
            return *idx;
        }
        let idx = self.addresses.len();
        self.indices.insert(address.clone(), idx);
        self.addresses.push(address);
        idx
    }

    pub fn index_of(&self, address: &AccountId) -> Option<usize> {
        self.indices.get(address).copied()
    }

    pub fn address(&self, idx: usize) -> Option<&AccountId> {
        self.addresses.get(idx)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl<AccountId> Default for AddressBook<AccountId> {
    fn default() -> Self {
        Self {
            addresses: Vec::new(),
            indices: BTreeMap::new(),
        }
    }
}

impl<AccountId> Index<usize> for AddressBook<AccountId> {
    type Output = AccountId;

    fn index(&self, idx: usize) -> &AccountId {
        &self.addresses[idx]
    }
}

impl<AccountId: Id> FromIterator<AccountId> for AddressBook<AccountId> {
    fn from_iter<I: IntoIterator<Item = AccountId>>(iter: I) -> Self {
        let mut book = Self::new();
        for address in iter {
            book.insert(address);
        }
        book
    }
}
