// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use time::{Date, Month};

use crate::money::format_display_date;

pub const DATE_PLACEHOLDER: &str = "Select due date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

/// Month shown by the picker. Independent of the selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub month: Month,
    pub year: i32,
}

impl CalendarCursor {
    pub const fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    pub fn of(date: Date) -> Self {
        Self::new(date.month(), date.year())
    }

    /// Zero-based month index, January = 0.
    pub fn month_index(self) -> u8 {
        u8::from(self.month) - 1
    }

    pub fn stepped(self, direction: NavDirection) -> Self {
        match direction {
            NavDirection::Prev if self.month == Month::January => {
                Self::new(Month::December, self.year - 1)
            }
            NavDirection::Next if self.month == Month::December => {
                Self::new(Month::January, self.year + 1)
            }
            NavDirection::Prev => Self::new(self.month.previous(), self.year),
            NavDirection::Next => Self::new(self.month.next(), self.year),
        }
    }
}

pub fn days_in_month(month: Month, year: i32) -> u8 {
    match month {
        Month::February if time::util::is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Weekday of the first of the month, 0 = Sunday through 6 = Saturday.
pub fn first_weekday(month: Month, year: i32) -> Result<u8> {
    let Ok(first) = Date::from_calendar_date(year, month, 1) else {
        bail!("year {year} is outside the supported calendar range");
    };
    Ok(first.weekday().number_days_from_sunday())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
    selected: Option<Date>,
    cursor: CalendarCursor,
    open: bool,
}

impl DateField {
    /// The cursor starts on the selected month, or on `today`'s month when
    /// nothing is selected yet.
    pub fn new(selected: Option<Date>, today: Date) -> Self {
        Self {
            selected,
            cursor: CalendarCursor::of(selected.unwrap_or(today)),
            open: false,
        }
    }

    pub fn selected(&self) -> Option<Date> {
        self.selected
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn navigate(&mut self, direction: NavDirection) {
        self.cursor = self.cursor.stepped(direction);
        tracing::debug!(
            month = self.cursor.month_index(),
            year = self.cursor.year,
            "calendar cursor moved"
        );
    }

    pub fn select_day(&mut self, day: u8) -> Result<Date> {
        let CalendarCursor { month, year } = self.cursor;
        let last = days_in_month(month, year);
        if day == 0 || day > last {
            bail!("day {day} is not in {month} {year} -- choose a day from 1 to {last}");
        }
        let Ok(date) = Date::from_calendar_date(year, month, day) else {
            bail!("year {year} is outside the supported calendar range");
        };
        self.selected = Some(date);
        self.open = false;
        Ok(date)
    }

    pub fn today(&mut self, today: Date) {
        self.selected = Some(today);
        self.cursor = CalendarCursor::of(today);
        self.open = false;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.open = false;
    }

    /// Cells for the cursor month: leading `None` padding up to the first
    /// weekday, then each day number.
    pub fn month_grid(&self) -> Result<Vec<Option<u8>>> {
        let CalendarCursor { month, year } = self.cursor;
        let padding = usize::from(first_weekday(month, year)?);
        let days = days_in_month(month, year);
        let mut cells = Vec::with_capacity(padding + usize::from(days));
        cells.extend(std::iter::repeat_n(None, padding));
        cells.extend((1..=days).map(Some));
        Ok(cells)
    }

    pub fn is_selected(&self, day: u8) -> bool {
        self.selected.is_some_and(|date| {
            date.day() == day && CalendarCursor::of(date) == self.cursor
        })
    }

    pub fn is_today(&self, day: u8, today: Date) -> bool {
        today.day() == day && CalendarCursor::of(today) == self.cursor
    }

    pub fn display_label(&self) -> String {
        self.selected
            .map_or_else(|| DATE_PLACEHOLDER.to_owned(), format_display_date)
    }
}
