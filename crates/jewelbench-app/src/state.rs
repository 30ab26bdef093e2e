// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use time::Date;

use crate::{NavDirection, RepairOrderForm, ScreenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayKind {
    DueDatePicker,
    ClientLookup,
    ClientDetail,
    RowActions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Explicit,
    OutsideDismiss,
    Forced,
}

/// Outside-click listeners. An overlay holds exactly one subscription while
/// it is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DismissListeners {
    subscribed: BTreeSet<OverlayKind>,
}

impl DismissListeners {
    fn subscribe(&mut self, kind: OverlayKind) -> bool {
        self.subscribed.insert(kind)
    }

    fn unsubscribe(&mut self, kind: OverlayKind) -> bool {
        self.subscribed.remove(&kind)
    }

    pub fn is_subscribed(&self, kind: OverlayKind) -> bool {
        self.subscribed.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.subscribed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribed.is_empty()
    }
}

/// Session state: the active screen, open overlays and the order being
/// drafted. The due date picker overlay is open exactly when the draft's due
/// date field is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub screen: ScreenKind,
    pub status_line: Option<String>,
    today: Date,
    draft: RepairOrderForm,
    overlays: Vec<OverlayKind>,
    listeners: DismissListeners,
}

/// Picker actions on the draft's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAction {
    Navigate(NavDirection),
    SelectDay(u8),
    Today,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    NextScreen,
    PrevScreen,
    GoTo(ScreenKind),
    OpenOverlay(OverlayKind),
    ToggleOverlay(OverlayKind),
    CloseOverlay(OverlayKind),
    /// Explicit action inside an overlay that keeps it open, such as paging
    /// the calendar.
    InteractWith(OverlayKind),
    /// Pointer down somewhere on screen; `inside` names the overlay whose
    /// region contains it, if any.
    PointerDown { inside: Option<OverlayKind> },
    DueDate(DateAction),
    /// Replaces the draft with a blank order.
    StartNewOrder,
    CloseAll,
    ClearStatus,
}

impl AppCommand {
    const fn is_outside_signal(self) -> bool {
        matches!(self, Self::PointerDown { .. })
    }

    const fn target(self) -> Option<OverlayKind> {
        match self {
            Self::OpenOverlay(kind)
            | Self::ToggleOverlay(kind)
            | Self::CloseOverlay(kind)
            | Self::InteractWith(kind) => Some(kind),
            Self::DueDate(_) => Some(OverlayKind::DueDatePicker),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ScreenChanged(ScreenKind),
    OverlayOpened(OverlayKind),
    OverlayClosed(OverlayKind, CloseReason),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(today: Date) -> Self {
        Self {
            screen: ScreenKind::NewRepair,
            status_line: None,
            today,
            draft: RepairOrderForm::new(today),
            overlays: Vec::new(),
            listeners: DismissListeners::default(),
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        self.apply(command, &BTreeSet::new())
    }

    /// Applies every command produced by one user interaction. Explicit
    /// commands run first; a pointer-down cannot dismiss an overlay that an
    /// explicit command in the same frame acted on.
    pub fn dispatch_frame(&mut self, commands: &[AppCommand]) -> Vec<AppEvent> {
        let shielded = commands
            .iter()
            .filter_map(|command| command.target())
            .collect::<BTreeSet<_>>();
        let (outside, explicit): (Vec<AppCommand>, Vec<AppCommand>) = commands
            .iter()
            .copied()
            .partition(|command| command.is_outside_signal());

        let mut events = Vec::new();
        for command in explicit.into_iter().chain(outside) {
            events.extend(self.apply(command, &shielded));
        }
        events
    }

    pub fn is_open(&self, kind: OverlayKind) -> bool {
        self.overlays.contains(&kind)
    }

    /// Open overlays, oldest first.
    pub fn open_overlays(&self) -> &[OverlayKind] {
        &self.overlays
    }

    pub fn listeners(&self) -> &DismissListeners {
        &self.listeners
    }

    pub fn draft(&self) -> &RepairOrderForm {
        &self.draft
    }

    /// Runs `edit` against the draft, then opens or closes the picker
    /// overlay to follow the due date field.
    pub fn edit_draft<T>(
        &mut self,
        edit: impl FnOnce(&mut RepairOrderForm) -> T,
    ) -> (T, Vec<AppEvent>) {
        let value = edit(&mut self.draft);
        let events = self.sync_picker().into_iter().collect();
        (value, events)
    }

    fn apply(&mut self, command: AppCommand, shielded: &BTreeSet<OverlayKind>) -> Vec<AppEvent> {
        match command {
            AppCommand::NextScreen => self.rotate_screen(1),
            AppCommand::PrevScreen => self.rotate_screen(-1),
            AppCommand::GoTo(screen) => self.switch_screen(screen),
            AppCommand::OpenOverlay(kind) => self.open(kind).into_iter().collect(),
            AppCommand::ToggleOverlay(kind) => {
                if self.is_open(kind) {
                    self.close(kind, CloseReason::Explicit).into_iter().collect()
                } else {
                    self.open(kind).into_iter().collect()
                }
            }
            AppCommand::CloseOverlay(kind) => {
                self.close(kind, CloseReason::Explicit).into_iter().collect()
            }
            AppCommand::InteractWith(_) => Vec::new(),
            AppCommand::PointerDown { inside } => self.dismiss_outside(inside, shielded),
            AppCommand::DueDate(action) => self.due_date(action),
            AppCommand::StartNewOrder => self.start_new_order(),
            AppCommand::CloseAll => self.close_all(),
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn open(&mut self, kind: OverlayKind) -> Option<AppEvent> {
        if self.is_open(kind) {
            return None;
        }
        if kind == OverlayKind::DueDatePicker {
            match self.draft.due_date_mut() {
                Ok(field) => field.open(),
                Err(error) => {
                    tracing::debug!(%error, "due date picker unavailable");
                    return None;
                }
            }
        }
        self.listeners.subscribe(kind);
        self.overlays.push(kind);
        tracing::debug!(overlay = ?kind, "overlay opened");
        Some(AppEvent::OverlayOpened(kind))
    }

    /// Single exit path for every overlay: the listener is dropped here no
    /// matter why the overlay closes.
    fn close(&mut self, kind: OverlayKind, reason: CloseReason) -> Option<AppEvent> {
        let position = self.overlays.iter().position(|open| *open == kind)?;
        self.overlays.remove(position);
        self.listeners.unsubscribe(kind);
        // A submitted draft already closed its field.
        if kind == OverlayKind::DueDatePicker
            && let Ok(field) = self.draft.due_date_mut()
        {
            field.close();
        }
        tracing::debug!(overlay = ?kind, ?reason, "overlay closed");
        Some(AppEvent::OverlayClosed(kind, reason))
    }

    fn dismiss_outside(
        &mut self,
        inside: Option<OverlayKind>,
        shielded: &BTreeSet<OverlayKind>,
    ) -> Vec<AppEvent> {
        let targets = self
            .overlays
            .iter()
            .copied()
            .filter(|kind| Some(*kind) != inside)
            .filter(|kind| !shielded.contains(kind))
            .filter(|kind| self.listeners.is_subscribed(*kind))
            .collect::<Vec<_>>();
        targets
            .into_iter()
            .filter_map(|kind| self.close(kind, CloseReason::OutsideDismiss))
            .collect()
    }

    fn due_date(&mut self, action: DateAction) -> Vec<AppEvent> {
        let today = self.today;
        let outcome = self.draft.due_date_mut().and_then(|field| match action {
            DateAction::Navigate(direction) => {
                field.navigate(direction);
                Ok(())
            }
            DateAction::SelectDay(day) => field.select_day(day).map(|_| ()),
            DateAction::Today => {
                field.today(today);
                Ok(())
            }
            DateAction::Clear => {
                field.clear();
                Ok(())
            }
        });

        let mut events = Vec::new();
        if let Err(error) = outcome {
            events.push(self.set_status(&error.to_string()));
        }
        events.extend(self.sync_picker());
        events
    }

    fn sync_picker(&mut self) -> Option<AppEvent> {
        let field_open = self.draft.due_date().is_open();
        match (field_open, self.is_open(OverlayKind::DueDatePicker)) {
            (true, false) => self.open(OverlayKind::DueDatePicker),
            (false, true) => self.close(OverlayKind::DueDatePicker, CloseReason::Explicit),
            _ => None,
        }
    }

    fn start_new_order(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        events.extend(self.close(OverlayKind::DueDatePicker, CloseReason::Forced));
        self.draft = RepairOrderForm::new(self.today);
        events.push(self.set_status("New order started"));
        events
    }

    fn close_all(&mut self) -> Vec<AppEvent> {
        let open = self.overlays.clone();
        open.into_iter()
            .rev()
            .filter_map(|kind| self.close(kind, CloseReason::Forced))
            .collect()
    }

    fn rotate_screen(&mut self, delta: isize) -> Vec<AppEvent> {
        let screens = ScreenKind::ALL;
        let current = screens
            .iter()
            .position(|screen| *screen == self.screen)
            .unwrap_or(0) as isize;
        let len = screens.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.switch_screen(screens[next])
    }

    fn switch_screen(&mut self, screen: ScreenKind) -> Vec<AppEvent> {
        let mut events = self.close_all();
        self.screen = screen;
        events.push(AppEvent::ScreenChanged(screen));
        events.push(self.set_status(screen.label()));
        events
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
