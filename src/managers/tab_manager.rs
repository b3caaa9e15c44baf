use crate::types::errors::TabError;
use crate::types::tab::{Tab, TAB_SLOTS};

/// Trait defining the tab registry interface.
pub trait TabManagerTrait {
    type View;

    fn get_tab(&self, slot: usize) -> Result<&Tab<Self::View>, TabError>;
    fn get_tab_mut(&mut self, slot: usize) -> Result<&mut Tab<Self::View>, TabError>;
    fn is_populated(&self, slot: usize) -> bool;
    fn insert_tab(&mut self, slot: usize, tab: Tab<Self::View>) -> Result<(), TabError>;
    fn tab_count(&self) -> usize;
    fn populated_slots(&self) -> Vec<usize>;
}

/// Fixed-capacity arena of lazily populated tab slots.
///
/// Slots are filled once and never freed; the whole registry is dropped
/// with the window.
pub struct TabManager<V> {
    slots: [Option<Tab<V>>; TAB_SLOTS],
}

impl<V> TabManager<V> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    fn check_index(slot: usize) -> Result<(), TabError> {
        if slot < TAB_SLOTS {
            Ok(())
        } else {
            Err(TabError::InvalidIndex(slot))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tab<V>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|tab| (i, tab)))
    }
}

impl<V> Default for TabManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TabManagerTrait for TabManager<V> {
    type View = V;

    fn get_tab(&self, slot: usize) -> Result<&Tab<V>, TabError> {
        Self::check_index(slot)?;
        self.slots[slot].as_ref().ok_or(TabError::EmptySlot(slot))
    }

    fn get_tab_mut(&mut self, slot: usize) -> Result<&mut Tab<V>, TabError> {
        Self::check_index(slot)?;
        self.slots[slot].as_mut().ok_or(TabError::EmptySlot(slot))
    }

    fn is_populated(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(Option::is_some)
    }

    /// Populates an empty slot. Populated slots are left untouched.
    fn insert_tab(&mut self, slot: usize, tab: Tab<V>) -> Result<(), TabError> {
        Self::check_index(slot)?;
        if self.slots[slot].is_none() {
            self.slots[slot] = Some(tab);
        }
        Ok(())
    }

    fn tab_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn populated_slots(&self) -> Vec<usize> {
        self.iter().map(|(i, _)| i).collect()
    }
}
