// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ImageRef, LineItem, LineItemId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemField {
    Description(String),
    PriceCents(i64),
    Image(Option<ImageRef>),
}

/// Repair rows of one order in display order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemLedger {
    items: Vec<LineItem>,
    next_id: LineItemId,
}

impl Default for LineItemLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemLedger {
    pub fn new() -> Self {
        let first = LineItemId::new(1);
        Self {
            items: vec![LineItem::blank(first)],
            next_id: LineItemId::new(2),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn add_item(&mut self) -> LineItemId {
        let id = self.next_id;
        // Ids start at 1 and grow by one per row; a draft never reaches i64::MAX rows.
        self.next_id = id.checked_next().unwrap_or(id);
        self.items.push(LineItem::blank(id));
        tracing::debug!(item = id.get(), rows = self.items.len(), "repair row added");
        id
    }

    /// Removes the row unless it is the last one. Unknown ids and the last
    /// row are left alone. The removed row is returned so its image handle
    /// can be released.
    pub fn remove_item(&mut self, id: LineItemId) -> Option<LineItem> {
        if self.items.len() <= 1 {
            return None;
        }
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        tracing::debug!(item = id.get(), rows = self.items.len(), "repair row removed");
        Some(removed)
    }

    /// Returns whether a row with this id existed.
    pub fn update_item(&mut self, id: LineItemId, field: LineItemField) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        match field {
            LineItemField::Description(description) => item.description = description,
            LineItemField::PriceCents(cents) => item.price_cents = cents,
            LineItemField::Image(image) => item.image = image,
        }
        true
    }

    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |sum, item| sum.saturating_add(item.price_cents))
    }

    pub fn first_incomplete(&self) -> Option<&LineItem> {
        self.items.iter().find(|item| !item.is_complete())
    }
}

#[cfg(test)]
mod tests {
    use super::{LineItemField, LineItemLedger};
    use crate::{ImageRef, LineItemId};

    fn priced(prices: &[i64]) -> LineItemLedger {
        let mut ledger = LineItemLedger::new();
        let first = ledger.items()[0].id;
        ledger.update_item(first, LineItemField::PriceCents(prices[0]));
        for price in &prices[1..] {
            let id = ledger.add_item();
            ledger.update_item(id, LineItemField::PriceCents(*price));
        }
        ledger
    }

    #[test]
    fn new_ledger_has_one_blank_row() {
        let ledger = LineItemLedger::new();
        assert_eq!(ledger.len(), 1);
        let item = &ledger.items()[0];
        assert!(item.description.is_empty());
        assert_eq!(item.image, None);
        assert_eq!(item.price_cents, 0);
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn add_item_appends_unique_ids_in_order() {
        let mut ledger = LineItemLedger::new();
        let second = ledger.add_item();
        let third = ledger.add_item();
        let ids = ledger.items().iter().map(|item| item.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![LineItemId::new(1), second, third]);
        assert_ne!(second, third);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut ledger = LineItemLedger::new();
        let second = ledger.add_item();
        ledger.remove_item(second);
        let replacement = ledger.add_item();
        assert_ne!(replacement, second);
    }

    #[test]
    fn last_row_cannot_be_removed() {
        let mut ledger = LineItemLedger::new();
        let only = ledger.items()[0].id;
        let before = ledger.clone();

        assert_eq!(ledger.remove_item(only), None);
        assert_eq!(ledger, before);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut ledger = priced(&[1_000, 2_000]);
        let before = ledger.clone();
        assert_eq!(ledger.remove_item(LineItemId::new(99)), None);
        assert_eq!(ledger, before);
    }

    #[test]
    fn add_then_remove_restores_rows() {
        let mut ledger = priced(&[1_500, 250]);
        let before = ledger.items().to_vec();

        let added = ledger.add_item();
        let removed = ledger.remove_item(added).expect("new row should be removable");
        assert_eq!(removed.id, added);
        assert_eq!(ledger.items(), before.as_slice());
        assert_eq!(ledger.total(), 1_750);
    }

    #[test]
    fn update_item_replaces_single_field() {
        let mut ledger = LineItemLedger::new();
        let id = ledger.items()[0].id;

        assert!(ledger.update_item(id, LineItemField::Description("Resize ring".to_owned())));
        assert!(ledger.update_item(id, LineItemField::Image(Some(ImageRef::new(7)))));
        let item = ledger.get(id).expect("row exists");
        assert_eq!(item.description, "Resize ring");
        assert_eq!(item.image, Some(ImageRef::new(7)));
        assert_eq!(item.price_cents, 0);

        assert!(!ledger.update_item(LineItemId::new(42), LineItemField::PriceCents(5)));
    }

    #[test]
    fn total_tracks_current_prices_through_edits() {
        let mut ledger = priced(&[2_000, 4_550, 99]);
        assert_eq!(ledger.total(), 6_649);

        let middle = ledger.items()[1].id;
        ledger.remove_item(middle);
        assert_eq!(ledger.total(), 2_099);

        let first = ledger.items()[0].id;
        ledger.update_item(first, LineItemField::PriceCents(1));
        assert_eq!(ledger.total(), 100);

        let sum: i64 = ledger.items().iter().map(|item| item.price_cents).sum();
        assert_eq!(ledger.total(), sum);
    }

    #[test]
    fn total_is_independent_of_insertion_order() {
        let forward = priced(&[100, 250, 3_000, 45]);
        let backward = priced(&[45, 3_000, 250, 100]);
        assert_eq!(forward.total(), backward.total());
    }

    #[test]
    fn first_incomplete_reports_blank_rows() {
        let mut ledger = LineItemLedger::new();
        let first = ledger.items()[0].id;
        ledger.update_item(first, LineItemField::Description("Polish".to_owned()));
        ledger.update_item(first, LineItemField::PriceCents(1_200));
        assert!(ledger.first_incomplete().is_none());

        let second = ledger.add_item();
        assert_eq!(ledger.first_incomplete().map(|item| item.id), Some(second));
    }
}
