// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use time::Date;

use crate::money::ValidationError;
use crate::{
    Client, DateField, ImageRef, ImageStore, LineItemField, LineItemId, LineItemLedger,
    RepairStatus, SubmittedOrder, TicketService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRejection {
    MissingCustomerDetails,
    IncompleteRepairItem(LineItemId),
    AlreadySubmitted,
}

impl std::fmt::Display for OrderRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCustomerDetails => f.write_str("missing customer details"),
            Self::IncompleteRepairItem(_) => f.write_str("incomplete repair item"),
            Self::AlreadySubmitted => f.write_str("order already submitted"),
        }
    }
}

impl std::error::Error for OrderRejection {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitted,
}

/// Draft of one repair order. Once submitted the draft is frozen and the
/// next order starts from a fresh form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOrderForm {
    client_name: String,
    client_mobile: String,
    items: LineItemLedger,
    paid_cents: i64,
    due_date: DateField,
    status: RepairStatus,
    phase: FormPhase,
}

impl RepairOrderForm {
    pub fn new(today: Date) -> Self {
        Self {
            client_name: String::new(),
            client_mobile: String::new(),
            items: LineItemLedger::new(),
            paid_cents: 0,
            due_date: DateField::new(None, today),
            status: RepairStatus::default(),
            phase: FormPhase::Editing,
        }
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn client_mobile(&self) -> &str {
        &self.client_mobile
    }

    pub fn items(&self) -> &LineItemLedger {
        &self.items
    }

    pub fn paid_cents(&self) -> i64 {
        self.paid_cents
    }

    pub fn due_date(&self) -> &DateField {
        &self.due_date
    }

    pub fn status(&self) -> RepairStatus {
        self.status
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn total(&self) -> i64 {
        self.items.total()
    }

    /// Negative when the customer paid more than the repairs cost.
    pub fn balance(&self) -> i64 {
        self.total().saturating_sub(self.paid_cents)
    }

    pub fn has_negative_balance(&self) -> bool {
        self.balance() < 0
    }

    pub fn set_client_name(&mut self, name: &str) -> Result<()> {
        self.ensure_editing()?;
        self.client_name = name.to_owned();
        Ok(())
    }

    pub fn set_client_mobile(&mut self, mobile: &str) -> Result<()> {
        self.ensure_editing()?;
        self.client_mobile = mobile.to_owned();
        Ok(())
    }

    /// Seeds the customer fields from a directory pick.
    pub fn pick_client(&mut self, client: &Client) -> Result<()> {
        self.ensure_editing()?;
        self.client_name = client.name.clone();
        self.client_mobile = client.mobile.clone();
        tracing::debug!(client = client.id.get(), "client picked for order");
        Ok(())
    }

    pub fn set_amount_paid(&mut self, cents: i64) -> Result<()> {
        self.ensure_editing()?;
        if cents < 0 {
            return Err(ValidationError::NegativeMoney.into());
        }
        self.paid_cents = cents;
        Ok(())
    }

    pub fn set_status(&mut self, status: RepairStatus) -> Result<()> {
        self.ensure_editing()?;
        self.status = status;
        Ok(())
    }

    pub fn add_item(&mut self) -> Result<LineItemId> {
        self.ensure_editing()?;
        Ok(self.items.add_item())
    }

    pub fn set_item_description(&mut self, id: LineItemId, description: &str) -> Result<bool> {
        self.ensure_editing()?;
        Ok(self
            .items
            .update_item(id, LineItemField::Description(description.to_owned())))
    }

    /// Zero is accepted here as a placeholder; it only fails at submission.
    pub fn set_item_price(&mut self, id: LineItemId, cents: i64) -> Result<bool> {
        self.ensure_editing()?;
        if cents < 0 {
            return Err(ValidationError::NegativeMoney.into());
        }
        Ok(self.items.update_item(id, LineItemField::PriceCents(cents)))
    }

    /// Removes a row and releases its image. The last row and unknown ids
    /// are left in place.
    pub fn remove_item(&mut self, id: LineItemId, images: &mut impl ImageStore) -> Result<bool> {
        self.ensure_editing()?;
        let Some(removed) = self.items.remove_item(id) else {
            return Ok(false);
        };
        if let Some(image) = removed.image {
            images.release(image);
        }
        Ok(true)
    }

    /// Uploads a photo for a row. A failed upload leaves the row untouched;
    /// the photo is optional so it never blocks submission.
    pub fn attach_image(
        &mut self,
        id: LineItemId,
        images: &mut impl ImageStore,
        file_name: &str,
        data: &[u8],
    ) -> Result<Option<ImageRef>> {
        self.ensure_editing()?;
        let Some(previous) = self.items.get(id).map(|item| item.image) else {
            return Ok(None);
        };

        let uploaded = match images.upload(file_name, data) {
            Ok(image) => image,
            Err(error) => {
                tracing::warn!(item = id.get(), file_name, error = %error, "image upload failed");
                return Err(error)
                    .with_context(|| format!("upload {file_name} for repair row {id}"));
            }
        };
        self.items.update_item(id, LineItemField::Image(Some(uploaded)));
        if let Some(previous) = previous {
            images.release(previous);
        }
        Ok(Some(uploaded))
    }

    pub fn detach_image(&mut self, id: LineItemId, images: &mut impl ImageStore) -> Result<bool> {
        self.ensure_editing()?;
        let Some(Some(image)) = self.items.get(id).map(|item| item.image) else {
            return Ok(false);
        };
        self.items.update_item(id, LineItemField::Image(None));
        images.release(image);
        Ok(true)
    }

    /// Date picker access for navigation and selection.
    pub fn due_date_mut(&mut self) -> Result<&mut DateField> {
        self.ensure_editing()?;
        Ok(&mut self.due_date)
    }

    /// Checks run in order and stop at the first failure: customer details
    /// first, then each repair row.
    pub fn validate(&self) -> std::result::Result<SubmittedOrder, OrderRejection> {
        if self.phase == FormPhase::Submitted {
            return Err(OrderRejection::AlreadySubmitted);
        }
        if self.client_name.trim().is_empty() || self.client_mobile.trim().is_empty() {
            return Err(OrderRejection::MissingCustomerDetails);
        }
        if let Some(item) = self.items.first_incomplete() {
            return Err(OrderRejection::IncompleteRepairItem(item.id));
        }
        Ok(SubmittedOrder {
            client_name: self.client_name.clone(),
            client_mobile: self.client_mobile.clone(),
            items: self.items.items().to_vec(),
            total_cents: self.total(),
            paid_cents: self.paid_cents,
            balance_cents: self.balance(),
            due_date: self.due_date.selected(),
            status: self.status,
        })
    }

    /// Validates and hands the order to the ticket service. A rejected or
    /// failed hand-off leaves the draft editable.
    pub fn submit(&mut self, tickets: &mut impl TicketService) -> Result<SubmittedOrder> {
        let order = match self.validate() {
            Ok(order) => order,
            Err(rejection) => {
                tracing::debug!(%rejection, "order rejected");
                return Err(rejection.into());
            }
        };

        if let Err(error) = tickets.submit_order(&order) {
            tracing::warn!(error = %error, "ticket service rejected order");
            return Err(error).context("hand order to ticket service");
        }

        self.phase = FormPhase::Submitted;
        self.due_date.close();
        tracing::debug!(
            total_cents = order.total_cents,
            items = order.items.len(),
            "order submitted"
        );
        Ok(order)
    }

    fn ensure_editing(&self) -> Result<()> {
        if self.phase == FormPhase::Submitted {
            return Err(OrderRejection::AlreadySubmitted.into());
        }
        Ok(())
    }
}
