use iced::widget::{button, text};

pub fn primary_button<Message: Clone>(label: &str) -> button::Button<'_, Message> {
    button(
        text(label)
            .size(14)
            .horizontal_alignment(iced::alignment::Horizontal::Center),
    )
    .padding([10, 20])
    .style(iced::theme::Button::Primary)
}

pub fn secondary_button<Message: Clone>(label: &str) -> button::Button<'_, Message> {
    button(
        text(label)
            .size(14)
            .horizontal_alignment(iced::alignment::Horizontal::Center),
    )
    .padding([10, 20])
    .style(iced::theme::Button::Secondary)
}
