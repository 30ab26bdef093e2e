// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::date;

use crate::{Client, ClientId};

/// Walk-in clients the shop ships with for demos.
pub fn demo_clients() -> Vec<Client> {
    vec![
        Client {
            id: ClientId::new(1),
            name: "Sarah Johnson".to_owned(),
            mobile: "+1 (555) 123-4567".to_owned(),
            email: Some("sarah.johnson@email.com".to_owned()),
            last_repair_date: Some(date!(2024 - 01 - 15)),
            total_repairs: 8,
            address: Some("123 Main St, Anytown, ST 12345".to_owned()),
            join_date: Some(date!(2022 - 03 - 15)),
            notes: Some(
                "Prefers gold jewelry repairs. Very particular about finish quality.".to_owned(),
            ),
        },
        Client {
            id: ClientId::new(2),
            name: "Michael Chen".to_owned(),
            mobile: "+1 (555) 987-6543".to_owned(),
            email: Some("michael.chen@email.com".to_owned()),
            last_repair_date: Some(date!(2024 - 01 - 10)),
            total_repairs: 12,
            address: Some("456 Oak Ave, Somewhere, ST 67890".to_owned()),
            join_date: Some(date!(2021 - 11 - 08)),
            notes: Some("Regular customer. Often brings vintage watches for repair.".to_owned()),
        },
        Client {
            id: ClientId::new(3),
            name: "Emily Rodriguez".to_owned(),
            mobile: "+1 (555) 456-7890".to_owned(),
            email: Some("emily.rodriguez@email.com".to_owned()),
            last_repair_date: Some(date!(2024 - 01 - 08)),
            total_repairs: 5,
            address: Some("789 Pine Rd, Elsewhere, ST 13579".to_owned()),
            join_date: Some(date!(2023 - 06 - 20)),
            notes: None,
        },
        Client {
            id: ClientId::new(4),
            name: "David Thompson".to_owned(),
            mobile: "+1 (555) 321-0987".to_owned(),
            email: Some("david.thompson@email.com".to_owned()),
            last_repair_date: Some(date!(2023 - 12 - 20)),
            total_repairs: 15,
            address: None,
            join_date: Some(date!(2020 - 09 - 12)),
            notes: Some(
                "Collector of antique jewelry. Requires specialized restoration techniques."
                    .to_owned(),
            ),
        },
        Client {
            id: ClientId::new(5),
            name: "Lisa Wang".to_owned(),
            mobile: "+1 (555) 654-3210".to_owned(),
            email: Some("lisa.wang@email.com".to_owned()),
            last_repair_date: Some(date!(2024 - 01 - 12)),
            total_repairs: 3,
            address: None,
            join_date: Some(date!(2023 - 10 - 05)),
            notes: None,
        },
        Client {
            id: ClientId::new(6),
            name: "Robert Martinez".to_owned(),
            mobile: "+1 (555) 789-0123".to_owned(),
            email: Some("robert.martinez@email.com".to_owned()),
            last_repair_date: Some(date!(2023 - 11 - 28)),
            total_repairs: 7,
            address: Some("321 Elm St, Nowhere, ST 24680".to_owned()),
            join_date: Some(date!(2022 - 07 - 30)),
            notes: Some("Prefers silver jewelry. Quick turnaround preferred.".to_owned()),
        },
    ]
}
