//! Popup editor for a single break
//!
//! Targets one break by index and lets the user adjust its start time and
//! duration through lenient text fields. Saving yields the updated break;
//! cancelling yields nothing. Opening and closing is driven by the grid's
//! popup state machine via the application.

use iced::widget::{column, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Card;
use respite_core::{Break, TimeValue};

use crate::components::input::text_input;

/// Messages for the break editor popup
#[derive(Debug, Clone)]
pub enum BreakEditorMessage {
    StartChanged(String),
    DurationChanged(String),
    /// Commit the edited break back to the planner
    Save,
    /// Close without applying
    Cancel,
}

/// Editing state for one targeted break
#[derive(Debug, Clone)]
pub struct BreakEditor {
    index: usize,
    start_field: String,
    duration_field: String,
}

impl BreakEditor {
    /// Open an editor over the break at `index`.
    pub fn new(index: usize, current: &Break) -> Self {
        Self {
            index,
            start_field: current.start.to_string(),
            duration_field: current.duration.to_string(),
        }
    }

    /// Index of the break this editor targets.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Apply a field edit. Save/Cancel are routed by the application.
    pub fn update(&mut self, message: BreakEditorMessage) {
        match message {
            BreakEditorMessage::StartChanged(value) => self.start_field = value,
            BreakEditorMessage::DurationChanged(value) => self.duration_field = value,
            BreakEditorMessage::Save | BreakEditorMessage::Cancel => {}
        }
    }

    /// The break described by the current field contents, if both parse.
    pub fn edited_break(&self) -> Option<Break> {
        let start = parse_time_field(&self.start_field)?;
        let duration = parse_time_field(&self.duration_field)?;
        Some(Break::new(start, duration))
    }

    pub fn view(&self) -> Element<'_, BreakEditorMessage> {
        let start_row = row![
            text("Start").size(14).width(Length::Fixed(70.0)),
            text_input("H:MM:SS", &self.start_field)
                .size(14)
                .width(Length::Fixed(120.0))
                .on_input(BreakEditorMessage::StartChanged),
        ]
        .spacing(8)
        .align_items(Alignment::Center);

        let duration_row = row![
            text("Duration").size(14).width(Length::Fixed(70.0)),
            text_input("H:MM:SS", &self.duration_field)
                .size(14)
                .width(Length::Fixed(120.0))
                .on_input(BreakEditorMessage::DurationChanged),
        ]
        .spacing(8)
        .align_items(Alignment::Center);

        let body = column![start_row, duration_row].spacing(10);

        let save = iced::widget::button(text("Save").size(14))
            .padding([6, 16])
            .style(iced::theme::Button::Primary)
            .on_press_maybe(self.edited_break().map(|_| BreakEditorMessage::Save));

        let cancel = iced::widget::button(text("Cancel").size(14))
            .padding([6, 16])
            .style(iced::theme::Button::Secondary)
            .on_press(BreakEditorMessage::Cancel);

        let foot = row![save, cancel].spacing(10);

        Card::new(text(format!("Edit break #{}", self.index + 1)).size(16), body)
            .foot(foot)
            .max_width(300.0)
            .on_close(BreakEditorMessage::Cancel)
            .into()
    }
}

/// Parse a lenient time field: `MM`, `H:MM` or `H:MM:SS`. A bare number is
/// taken as whole minutes and may exceed 59; in the colon forms minutes and
/// seconds must be in range.
pub fn parse_time_field(value: &str) -> Option<TimeValue> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    let number = |s: &str| s.trim().parse::<u32>().ok();

    match parts.as_slice() {
        [minutes] => {
            let minutes = number(minutes)?;
            Some(TimeValue::from_total_seconds(minutes as u64 * 60))
        }
        [hours, minutes] => {
            let (hours, minutes) = (number(hours)?, number(minutes)?);
            (minutes < 60).then(|| TimeValue::new(hours, minutes, 0))
        }
        [hours, minutes, seconds] => {
            let (hours, minutes, seconds) = (number(hours)?, number(minutes)?, number(seconds)?);
            (minutes < 60 && seconds < 60).then(|| TimeValue::new(hours, minutes, seconds))
        }
        _ => None,
    }
}
