// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::BTreeSet;

use anyhow::{Result, bail};

use crate::{Client, ClientId, ClientSortKey, ClientStore, NewClient, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientValidationError {
    MissingNameOrMobile,
}

impl std::fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNameOrMobile => {
                f.write_str("name and mobile number are required -- fill in both and retry")
            }
        }
    }
}

impl std::error::Error for ClientValidationError {}

/// Active column and direction of the client table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientSort {
    pub key: ClientSortKey,
    pub direction: SortDirection,
}

impl ClientSort {
    pub const fn new(key: ClientSortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: the active column flips direction, any other column
    /// becomes active ascending.
    pub fn select(&mut self, key: ClientSortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCandidate {
    Existing(Client),
    New(NewClient),
}

pub trait ClientRepository {
    fn search(&self, term: &str) -> Vec<Client>;

    fn add_or_select(&mut self, candidate: ClientCandidate) -> Result<Client>;

    fn sort(&self, results: Vec<Client>, sort: ClientSort) -> Vec<Client> {
        sort_clients(results, sort)
    }
}

/// Name and email match case-insensitively; mobile matches the raw text as
/// typed, punctuation included.
pub fn matches_term(client: &Client, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    client.name.to_lowercase().contains(&needle)
        || client.mobile.contains(term)
        || client
            .email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(&needle))
}

/// Stable in both directions: equal keys keep their incoming order.
pub fn sort_clients(mut clients: Vec<Client>, sort: ClientSort) -> Vec<Client> {
    clients.sort_by(|left, right| {
        let ordering = compare_by(left, right, sort.key);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    clients
}

fn compare_by(left: &Client, right: &Client, key: ClientSortKey) -> Ordering {
    match key {
        ClientSortKey::Name => left.name.to_lowercase().cmp(&right.name.to_lowercase()),
        // `None` orders before every date, so clients never seen for a
        // repair behave like the epoch.
        ClientSortKey::LastRepairDate => left.last_repair_date.cmp(&right.last_repair_date),
        ClientSortKey::TotalRepairs => left.total_repairs.cmp(&right.total_repairs),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDirectory {
    clients: Vec<Client>,
    next_id: ClientId,
}

impl ClientDirectory {
    pub fn new(clients: Vec<Client>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for client in &clients {
            if !seen.insert(client.id) {
                bail!(
                    "client id {} appears more than once -- client ids must be unique",
                    client.id
                );
            }
        }
        let next_id = match seen.last() {
            Some(highest) => following(*highest)?,
            None => ClientId::new(1),
        };
        Ok(Self { clients, next_id })
    }

    pub fn load(store: &impl ClientStore) -> Result<Self> {
        let clients = store.load()?;
        tracing::debug!(clients = clients.len(), "client directory loaded");
        Self::new(clients)
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    /// Filtered then sorted rows for the client table.
    pub fn view(&self, term: &str, sort: ClientSort) -> Vec<Client> {
        self.sort(self.search(term), sort)
    }

    /// Like [`ClientRepository::add_or_select`], but a newly created client
    /// is written through `store` first and the stored record is what joins
    /// the directory.
    pub fn add_or_select_with(
        &mut self,
        candidate: ClientCandidate,
        store: &mut impl ClientStore,
    ) -> Result<Client> {
        match candidate {
            ClientCandidate::Existing(client) => Ok(client),
            ClientCandidate::New(new_client) => {
                let draft = self.synthesize(&new_client)?;
                let saved = store.save(&draft)?;
                self.insert(saved.clone())?;
                Ok(saved)
            }
        }
    }

    fn synthesize(&self, new_client: &NewClient) -> Result<Client> {
        let name = new_client.name.trim();
        let mobile = new_client.mobile.trim();
        if name.is_empty() || mobile.is_empty() {
            return Err(ClientValidationError::MissingNameOrMobile.into());
        }
        let email = new_client
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_owned);
        Ok(Client {
            id: self.next_id,
            name: name.to_owned(),
            mobile: mobile.to_owned(),
            email,
            last_repair_date: None,
            total_repairs: 0,
            address: None,
            join_date: None,
            notes: None,
        })
    }

    fn insert(&mut self, client: Client) -> Result<()> {
        if self.clients.iter().any(|existing| existing.id == client.id) {
            bail!(
                "client id {} is already in the directory -- client ids must be unique",
                client.id
            );
        }
        if client.id >= self.next_id {
            self.next_id = following(client.id)?;
        }
        tracing::debug!(client = client.id.get(), "client added to directory");
        self.clients.push(client);
        Ok(())
    }
}

impl ClientRepository for ClientDirectory {
    fn search(&self, term: &str) -> Vec<Client> {
        self.clients
            .iter()
            .filter(|client| matches_term(client, term))
            .cloned()
            .collect()
    }

    fn add_or_select(&mut self, candidate: ClientCandidate) -> Result<Client> {
        match candidate {
            ClientCandidate::Existing(client) => Ok(client),
            ClientCandidate::New(new_client) => {
                let client = self.synthesize(&new_client)?;
                self.insert(client.clone())?;
                Ok(client)
            }
        }
    }
}

fn following(id: ClientId) -> Result<ClientId> {
    match id.checked_next() {
        Some(next) => Ok(next),
        None => bail!("client id {id} leaves no room for new clients -- renumber the client records"),
    }
}
