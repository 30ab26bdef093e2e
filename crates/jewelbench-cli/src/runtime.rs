// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use jewelbench_app::money::{format_cents, format_display_date, parse_amount, parse_date};
use jewelbench_app::{
    Client, ClientCandidate, ClientDirectory, ClientRepository, ClientStore, DateField,
    ImageStore, NewClient, RepairOrderForm, RepairStatus, SubmittedOrder, TicketService,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::Date;

/// Client records kept as a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonClientStore {
    path: PathBuf,
}

impl JsonClientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClientStore for JsonClientStore {
    fn load(&self) -> Result<Vec<Client>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read clients file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parse clients file {}", self.path.display()))
    }

    fn save(&mut self, client: &Client) -> Result<Client> {
        let mut clients = self.load()?;
        match clients.iter_mut().find(|existing| existing.id == client.id) {
            Some(existing) => *existing = client.clone(),
            None => clients.push(client.clone()),
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create clients directory {}", parent.display()))?;
        }
        let encoded = serde_json::to_string_pretty(&clients).context("encode clients")?;
        fs::write(&self.path, encoded)
            .with_context(|| format!("write clients file {}", self.path.display()))?;
        tracing::debug!(client = client.id.get(), path = %self.path.display(), "client saved");
        Ok(client.clone())
    }
}

#[derive(Debug, Serialize)]
struct TicketRecord<'a> {
    shop: &'a str,
    order: &'a SubmittedOrder,
}

/// Prints each accepted order as one JSON line.
pub struct JsonTicketPrinter<W> {
    out: W,
    shop_name: String,
}

impl<W: Write> JsonTicketPrinter<W> {
    pub fn new(out: W, shop_name: &str) -> Self {
        Self {
            out,
            shop_name: shop_name.to_owned(),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TicketService for JsonTicketPrinter<W> {
    fn submit_order(&mut self, order: &SubmittedOrder) -> Result<()> {
        let record = TicketRecord {
            shop: &self.shop_name,
            order,
        };
        serde_json::to_writer(&mut self.out, &record).context("encode ticket")?;
        writeln!(self.out).context("write ticket")?;
        self.out.flush().context("flush ticket output")
    }
}

/// Repair order as written by hand or exported from another till.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderDraft {
    pub client_name: String,
    pub client_mobile: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub items: Vec<DraftItem>,
    #[serde(default)]
    pub paid: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DraftItem {
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub photo: Option<PathBuf>,
}

impl OrderDraft {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read order draft {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| {
            format!(
                "parse order draft {}; expected client_name, client_mobile and items",
                path.display()
            )
        })
    }
}

/// Finds the draft's client by mobile number, registering a new client when
/// nobody matches.
pub fn resolve_client(
    directory: &mut ClientDirectory,
    store: &mut impl ClientStore,
    draft: &OrderDraft,
) -> Result<Client> {
    let mobile = draft.client_mobile.trim();
    let existing = directory
        .search(mobile)
        .into_iter()
        .find(|client| !mobile.is_empty() && client.mobile == mobile);
    let candidate = match existing {
        Some(client) => ClientCandidate::Existing(client),
        None => ClientCandidate::New(NewClient {
            name: draft.client_name.clone(),
            mobile: draft.client_mobile.clone(),
            email: draft.client_email.clone(),
        }),
    };
    directory.add_or_select_with(candidate, store)
}

/// Validates the draft, then registers or reuses its client and prints the
/// ticket. A rejected draft never reaches the client store.
pub fn submit_draft(
    draft: &OrderDraft,
    directory: &mut ClientDirectory,
    store: &mut impl ClientStore,
    images: &mut impl ImageStore,
    tickets: &mut impl TicketService,
    today: Date,
) -> Result<SubmittedOrder> {
    let mut form = build_form(draft, today, images)?;
    if let Err(rejection) = form.validate() {
        tracing::debug!(%rejection, "order draft rejected");
        return Err(rejection.into());
    }
    let client = resolve_client(directory, store, draft)?;
    form.pick_client(&client)?;
    form.submit(tickets)
}

pub fn build_form(
    draft: &OrderDraft,
    today: Date,
    images: &mut impl ImageStore,
) -> Result<RepairOrderForm> {
    let mut form = RepairOrderForm::new(today);
    form.set_client_name(&draft.client_name)?;
    form.set_client_mobile(&draft.client_mobile)?;

    let first = form.items().items()[0].id;
    for (index, item) in draft.items.iter().enumerate() {
        let id = if index == 0 { first } else { form.add_item()? };
        let position = index + 1;
        form.set_item_description(id, &item.description)?;
        let cents = parse_amount(&item.price)
            .with_context(|| format!("item {position} price {:?}", item.price))?;
        form.set_item_price(id, cents)?;
        if let Some(photo) = &item.photo {
            let data = fs::read(photo)
                .with_context(|| format!("read photo {} for item {position}", photo.display()))?;
            let file_name = photo
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            form.attach_image(id, images, &file_name, &data)?;
        }
    }

    let paid = parse_amount(&draft.paid).with_context(|| format!("paid {:?}", draft.paid))?;
    form.set_amount_paid(paid)?;

    if let Some(raw) = draft.due_date.as_deref().filter(|raw| !raw.trim().is_empty()) {
        let due = parse_date(raw.trim()).with_context(|| format!("due_date {raw:?}"))?;
        *form.due_date_mut()? = DateField::new(Some(due), today);
    }

    if let Some(raw) = &draft.status {
        let status = RepairStatus::parse(raw).ok_or_else(|| {
            anyhow!(
                "unknown status {raw:?}; use one of {}",
                RepairStatus::ALL
                    .iter()
                    .map(|status| status.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        form.set_status(status)?;
    }

    Ok(form)
}

pub fn render_client_table(shop_name: &str, clients: &[Client]) -> String {
    let headers = ["Name", "Mobile", "Email", "Last Repair", "Repairs"];
    let rows = clients
        .iter()
        .map(|client| {
            [
                client.name.clone(),
                client.mobile.clone(),
                client.email.clone().unwrap_or_else(|| "-".to_owned()),
                client
                    .last_repair_date
                    .map_or_else(|| "-".to_owned(), format_display_date),
                client.total_repairs.to_string(),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!("{shop_name}: {} client(s)\n", clients.len());
    let header_cells = headers.map(str::to_owned);
    for row in std::iter::once(&header_cells).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn render_order_summary(order: &SubmittedOrder) -> String {
    let due = order
        .due_date
        .map_or_else(|| "no due date".to_owned(), format_display_date);
    format!(
        "{} ({}): {} item(s), total {}, paid {}, balance {}, {}, {}",
        order.client_name,
        order.client_mobile,
        order.items.len(),
        format_cents(order.total_cents),
        format_cents(order.paid_cents),
        format_cents(order.balance_cents),
        order.status.label(),
        due,
    )
}
