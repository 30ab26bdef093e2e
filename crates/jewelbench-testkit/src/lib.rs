// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Fixtures and collaborator fakes for exercising the intake core.

use anyhow::{Result, bail};
use jewelbench_app::{
    Client, ClientId, ClientStore, ImagePreview, ImageRef, ImageStore, SubmittedOrder,
    TicketService,
};
use time::macros::date;
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 14] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Rowan",
];
const LAST_NAMES: [&str; 14] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Turner", "Flores", "Bennett", "Brooks",
];
const CLIENT_NOTES: [&str; 6] = [
    "Prefers platinum settings.",
    "Bring loupe photos on pickup.",
    "Heirloom pieces only, handle with care.",
    "Call before starting any soldering.",
    "Allergic to nickel alloys.",
    "Pays on pickup.",
];

/// Reference "today" used by fixtures so calendars render the same month.
pub fn fixture_today() -> Date {
    date!(2024 - 01 - 20)
}

/// Month of `fixture_today`, for calendar assertions.
pub fn fixture_month() -> Month {
    fixture_today().month()
}

/// SplitMix64 stream; the same seed always yields the same clients.
#[derive(Debug, Clone)]
struct SeededRng {
    state: u64,
}

impl SeededRng {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-enough value in `0..bound`; zero when `bound` is zero.
    fn below(&mut self, bound: usize) -> usize {
        let bound = bound as u64;
        ((u128::from(self.next_u64()) * u128::from(bound)) >> 64) as usize
    }

    fn coin(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }
}

/// Seeded generator of plausible client records with ids counting up from 1.
#[derive(Debug, Clone)]
pub struct ClientFaker {
    rng: SeededRng,
    issued: i64,
}

impl ClientFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
            issued: 0,
        }
    }

    pub fn client(&mut self) -> Client {
        self.issued += 1;
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let join_date = self.day_within(date!(2019 - 01 - 01), 1_500);
        let last_repair_date = self
            .rng
            .coin()
            .then(|| self.day_within(join_date, 700));
        let total_repairs = match last_repair_date {
            Some(_) => 1 + self.rng.below(20) as u32,
            None => 0,
        };

        Client {
            id: ClientId::new(self.issued),
            name: format!("{first} {last}"),
            mobile: format!(
                "+1 (555) {:03}-{:04}",
                self.rng.below(1_000),
                self.rng.below(10_000)
            ),
            email: self
                .rng
                .coin()
                .then(|| format!("{}.{}@email.com", first.to_lowercase(), last.to_lowercase())),
            last_repair_date,
            total_repairs,
            address: None,
            join_date: Some(join_date),
            notes: self
                .rng
                .coin()
                .then(|| self.pick(&CLIENT_NOTES).to_owned()),
        }
    }

    pub fn clients(&mut self, count: usize) -> Vec<Client> {
        (0..count).map(|_| self.client()).collect()
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.below(items.len())]
    }

    fn day_within(&mut self, start: Date, days: usize) -> Date {
        start.saturating_add(Duration::days(self.rng.below(days) as i64))
    }
}

/// Ticket printer that keeps every order it was handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingTicketService {
    pub submitted: Vec<SubmittedOrder>,
    pub fail_next: bool,
}

impl TicketService for RecordingTicketService {
    fn submit_order(&mut self, order: &SubmittedOrder) -> Result<()> {
        if std::mem::take(&mut self.fail_next) {
            bail!("ticket printer offline");
        }
        self.submitted.push(order.clone());
        Ok(())
    }
}

/// Client store whose records can be read but never written.
#[derive(Debug, Clone, Default)]
pub struct ReadOnlyClientStore {
    pub clients: Vec<Client>,
}

impl ClientStore for ReadOnlyClientStore {
    fn load(&self) -> Result<Vec<Client>> {
        Ok(self.clients.clone())
    }

    fn save(&mut self, client: &Client) -> Result<Client> {
        bail!("client store is read-only; {} was not saved", client.name)
    }
}

/// Image store that turns every upload away.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingImageStore;

impl ImageStore for RejectingImageStore {
    fn upload(&mut self, file_name: &str, _data: &[u8]) -> Result<ImageRef> {
        bail!("upload rejected for {file_name}")
    }

    fn preview(&self, image: ImageRef) -> Result<ImagePreview> {
        bail!("image {image} not found")
    }

    fn release(&mut self, _image: ImageRef) {}
}

#[cfg(test)]
mod tests {
    use super::{
        ClientFaker, ReadOnlyClientStore, RecordingTicketService, RejectingImageStore,
        SeededRng, fixture_month,
    };
    use anyhow::Result;
    use jewelbench_app::{
        ClientId, ClientStore, ImageStore, RepairStatus, SubmittedOrder, TicketService,
        demo_clients,
    };
    use std::collections::BTreeSet;
    use time::Month;

    #[test]
    fn fixture_month_is_january() {
        assert_eq!(fixture_month(), Month::January);
    }

    #[test]
    fn rng_stays_below_bound() {
        let mut rng = SeededRng::new(9);
        assert!((0..1_000).all(|_| rng.below(7) < 7));
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn faker_is_deterministic() {
        let left = ClientFaker::new(42).clients(10);
        let right = ClientFaker::new(42).clients(10);
        assert_eq!(left, right);
    }

    #[test]
    fn faker_assigns_sequential_ids_and_consistent_history() {
        let clients = ClientFaker::new(7).clients(25);
        for (index, client) in clients.iter().enumerate() {
            assert_eq!(client.id, ClientId::new(index as i64 + 1));
            assert_eq!(client.last_repair_date.is_none(), client.total_repairs == 0);
            if let (Some(joined), Some(repaired)) = (client.join_date, client.last_repair_date) {
                assert!(repaired >= joined, "{} repaired before joining", client.name);
            }
        }
    }

    #[test]
    fn faker_varies_across_seeds() {
        let names = (0_u64..10)
            .map(|seed| ClientFaker::new(seed).client().name)
            .collect::<BTreeSet<_>>();
        assert!(names.len() > 1);
    }

    #[test]
    fn read_only_store_loads_but_refuses_writes() -> Result<()> {
        let mut store = ReadOnlyClientStore {
            clients: demo_clients(),
        };
        let sarah = store.load()?[0].clone();
        let error = store.save(&sarah).expect_err("writes should fail");
        assert!(error.to_string().contains("read-only"));
        assert_eq!(store.clients.len(), 6);
        Ok(())
    }

    #[test]
    fn ticket_service_failure_is_one_shot() -> Result<()> {
        let order = SubmittedOrder {
            client_name: "Ann".to_owned(),
            client_mobile: "555".to_owned(),
            items: Vec::new(),
            total_cents: 0,
            paid_cents: 0,
            balance_cents: 0,
            due_date: None,
            status: RepairStatus::Pending,
        };
        let mut tickets = RecordingTicketService {
            fail_next: true,
            ..RecordingTicketService::default()
        };
        tickets.submit_order(&order).expect_err("first call fails");
        tickets.submit_order(&order)?;
        assert_eq!(tickets.submitted, vec![order]);
        Ok(())
    }

    #[test]
    fn rejecting_image_store_names_the_file() {
        let error = RejectingImageStore
            .upload("ring.png", &[1])
            .expect_err("uploads are rejected");
        assert!(error.to_string().contains("ring.png"));
    }
}
