//! Main UI views for different app states

use crate::app::{AppState, Message, PlanningSession, RespiteApp, SetupForm};
use crate::ui::toolbar::toolbar_view;
use iced::widget::{column, container, pick_list, row, scrollable, text, Space};
use iced::{Alignment, Element, Length};
use respite_ui::{input_field, primary_button, secondary_button};

const HOUR_OPTIONS: [u32; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
const MINUTE_OPTIONS: [u32; 12] = [0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55];

pub fn main_view(app: &RespiteApp) -> Element<'_, Message> {
    let content: Element<Message> = match &app.state {
        AppState::Setup => setup_view(&app.setup),
        AppState::Planning => match &app.session {
            Some(session) => planning_view(session),
            None => error_view("No session in progress"),
        },
        AppState::Error(msg) => error_view(msg),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
        .into()
}

fn setup_view(form: &SetupForm) -> Element<'_, Message> {
    let title = text("Respite")
        .size(48)
        .style(iced::theme::Text::Color(iced::Color::from_rgb(
            0.2, 0.3, 0.5,
        )));

    let subtitle = text("Plan the breaks in your study session")
        .size(16)
        .style(iced::theme::Text::Color(iced::Color::from_rgb(
            0.4, 0.4, 0.4,
        )));

    let name_input = input_field("Session name", &form.name)
        .size(14)
        .width(Length::Fixed(260.0))
        .on_input(Message::SetupNameChanged);

    let duration_row = row![
        text("Duration").size(14),
        pick_list(&HOUR_OPTIONS[..], Some(form.hours), Message::SetupHoursPicked).text_size(14),
        text("h").size(14),
        pick_list(
            &MINUTE_OPTIONS[..],
            Some(form.minutes),
            Message::SetupMinutesPicked
        )
        .text_size(14),
        text("min").size(14),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    let start_button = primary_button("Start Planning").on_press(Message::StartSession);

    let mut content = column![
        title,
        subtitle,
        Space::with_height(24),
        name_input,
        duration_row,
        start_button,
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    if !form.saved_plans.is_empty() {
        content = content
            .push(Space::with_height(24))
            .push(text("Saved plans").size(18));

        for (index, plan) in form.saved_plans.iter().enumerate() {
            let summary = format!(
                "{} - {} with {} breaks, updated {}",
                plan.name,
                plan.duration,
                plan.breaks.len(),
                plan.updated_at.format("%Y-%m-%d %H:%M"),
            );
            content = content.push(
                row![
                    text(summary).size(13),
                    secondary_button("Resume").on_press(Message::ResumePlan(index)),
                ]
                .spacing(12)
                .align_items(Alignment::Center),
            );
        }
    }

    content.into()
}

fn planning_view(session: &PlanningSession) -> Element<'_, Message> {
    let grid = session.grid.view(session.planner.breaks()).map(Message::Grid);

    let mut workspace = row![scrollable(grid).height(Length::Fill)].spacing(20);

    if let Some(editor) = &session.editor {
        workspace = workspace.push(editor.view().map(Message::Editor));
    }

    column![
        toolbar_view(&session.plan, session.dirty),
        Space::with_height(12),
        workspace,
    ]
    .into()
}

fn error_view(msg: &str) -> Element<'_, Message> {
    let title = text("Something went wrong")
        .size(32)
        .style(iced::theme::Text::Color(iced::Color::from_rgb(
            0.8, 0.2, 0.2,
        )));

    let detail = text(msg).size(14);

    let back = secondary_button("Back to setup").on_press(Message::NewSession);

    column![title, detail, Space::with_height(16), back]
        .spacing(12)
        .align_items(Alignment::Center)
        .into()
}
