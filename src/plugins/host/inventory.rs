//! Item storage carried by actors.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    FireCharge,
    Stick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub amount: u32,
}

impl ItemStack {
    pub fn new(kind: ItemKind, amount: u32) -> Self {
        Self { kind, amount }
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub main_hand: Option<ItemStack>,
    pub storage: Vec<Option<ItemStack>>,
}

impl Inventory {
    pub fn holding(&self, kind: ItemKind) -> bool {
        self.main_hand.is_some_and(|stack| stack.kind == kind && stack.amount > 0)
    }

    pub fn count(&self, kind: ItemKind) -> u32 {
        self.main_hand
            .iter()
            .chain(self.storage.iter().flatten())
            .filter(|stack| stack.kind == kind)
            .map(|stack| stack.amount)
            .sum()
    }

    /// Take one item of `kind`, main hand first, then the first storage slot holding it.
    pub fn consume_one(&mut self, kind: ItemKind) -> bool {
        take_one(&mut self.main_hand, kind) || self.storage.iter_mut().any(|slot| take_one(slot, kind))
    }
}

fn take_one(slot: &mut Option<ItemStack>, kind: ItemKind) -> bool {
    let Some(stack) = slot.as_mut().filter(|s| s.kind == kind && s.amount > 0) else {
        return false;
    };
    stack.amount -= 1;
    if stack.amount == 0 {
        *slot = None;
    }
    true
}
