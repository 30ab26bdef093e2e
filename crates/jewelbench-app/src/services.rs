// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Seams to the collaborators that live outside the intake core: image
//! uploads, ticket printing, and client persistence.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Client, ImageRef, LineItem, RepairStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub image: ImageRef,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

pub trait ImageStore {
    fn upload(&mut self, file_name: &str, data: &[u8]) -> Result<ImageRef>;

    fn preview(&self, image: ImageRef) -> Result<ImagePreview>;

    /// Drops the stored upload once no row refers to it.
    fn release(&mut self, image: ImageRef);
}

/// Snapshot of an accepted draft with its derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedOrder {
    pub client_name: String,
    pub client_mobile: String,
    pub items: Vec<LineItem>,
    pub total_cents: i64,
    pub paid_cents: i64,
    pub balance_cents: i64,
    pub due_date: Option<Date>,
    pub status: RepairStatus,
}

pub trait TicketService {
    fn submit_order(&mut self, order: &SubmittedOrder) -> Result<()>;
}

pub trait ClientStore {
    fn load(&self) -> Result<Vec<Client>>;

    fn save(&mut self, client: &Client) -> Result<Client>;
}
