use crate::board::FormField;
use crate::presentation::PageView;

/// Something the cursor can rest on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FormField),
    Item(String),
}

/// Focus order: the form fields first, then every list item top to bottom.
#[derive(Debug, Clone, Default)]
pub struct FocusRing {
    targets: Vec<FocusTarget>,
    index: usize,
}

impl FocusRing {
    pub fn new(page: &PageView) -> Self {
        let mut ring = Self::default();
        ring.sync(page);
        ring
    }

    /// Rebuild the order after the page changed. The focused item keeps focus
    /// if it is still on the page; otherwise the position is clamped.
    pub fn sync(&mut self, page: &PageView) {
        let current = self.current().cloned();
        self.targets = page
            .fields
            .iter()
            .map(|field| FocusTarget::Field(field.field))
            .chain(
                page.lists
                    .iter()
                    .flat_map(|list| list.items.iter())
                    .map(|item| FocusTarget::Item(item.id.clone())),
            )
            .collect();
        if let Some(current) = current
            && let Some(position) = self.targets.iter().position(|target| *target == current)
        {
            self.index = position;
            return;
        }
        self.index = self.index.min(self.targets.len().saturating_sub(1));
    }

    pub fn current(&self) -> Option<&FocusTarget> {
        self.targets.get(self.index)
    }

    pub fn step(&mut self, delta: i32) {
        if self.targets.is_empty() {
            return;
        }
        let len = self.targets.len() as i64;
        let next = (self.index as i64 + delta as i64).rem_euclid(len);
        self.index = next as usize;
    }

    #[cfg(test)]
    pub fn focus(&mut self, target: &FocusTarget) -> bool {
        match self.targets.iter().position(|candidate| candidate == target) {
            Some(position) => {
                self.index = position;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.targets.len()
    }
}
