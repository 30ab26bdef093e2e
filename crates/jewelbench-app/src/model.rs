// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    ReadyForPickup,
}

impl RepairStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::ReadyForPickup,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::ReadyForPickup => "ready_for_pickup",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::ReadyForPickup => "Ready for Pickup",
        }
    }

    /// Accepts either the storage key or the display label.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value || status.label().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenKind {
    NewRepair,
    TicketsList,
    JobStatus,
    ClientList,
}

impl ScreenKind {
    pub const ALL: [Self; 4] = [
        Self::NewRepair,
        Self::TicketsList,
        Self::JobStatus,
        Self::ClientList,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::NewRepair => "New Repair",
            Self::TicketsList => "Tickets List",
            Self::JobStatus => "Job Status",
            Self::ClientList => "Client List",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientSortKey {
    #[default]
    Name,
    LastRepairDate,
    TotalRepairs,
}

impl ClientSortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::LastRepairDate => "last_repair",
            Self::TotalRepairs => "total_repairs",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "last_repair" => Some(Self::LastRepairDate),
            "total_repairs" => Some(Self::TotalRepairs),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub last_repair_date: Option<Date>,
    #[serde(default)]
    pub total_repairs: u32,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub join_date: Option<Date>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub image: Option<ImageRef>,
    pub description: String,
    pub price_cents: i64,
}

impl LineItem {
    pub fn blank(id: LineItemId) -> Self {
        Self {
            id,
            image: None,
            description: String::new(),
            price_cents: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.description.trim().is_empty() && self.price_cents > 0
    }
}
