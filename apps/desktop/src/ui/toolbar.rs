use crate::app::Message;
use iced::{
    widget::{button, row, text},
    Alignment, Element, Length,
};
use respite_core::SessionPlan;

pub fn toolbar_view(plan: &SessionPlan, dirty: bool) -> Element<'_, Message> {
    let summary = format!(
        "{} - {} session, {} breaks",
        plan.name,
        plan.duration,
        plan.breaks.len()
    );

    let save_label = if dirty { "Save Plan" } else { "Saved" };
    let save_button = button(text(save_label).size(12))
        .padding([6, 12])
        .style(iced::theme::Button::Primary)
        .on_press_maybe(dirty.then_some(Message::SavePlan));

    row![
        text(summary).size(13),
        iced::widget::Space::with_width(Length::Fill),
        save_button,
        button(text("New Session").size(12))
            .padding([6, 12])
            .style(iced::theme::Button::Text)
            .on_press(Message::NewSession),
    ]
    .spacing(8)
    .align_items(Alignment::Center)
    .into()
}
