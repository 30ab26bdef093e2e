// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod calendar;
pub mod demo;
pub mod directory;
pub mod forms;
pub mod ids;
pub mod ledger;
pub mod memory;
pub mod model;
pub mod money;
pub mod services;
pub mod state;

pub use calendar::*;
pub use demo::*;
pub use directory::*;
pub use forms::*;
pub use ids::*;
pub use ledger::*;
pub use memory::*;
pub use model::*;
pub use services::*;
pub use state::*;
