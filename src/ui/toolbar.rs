use iced::widget::{button, checkbox, column, container, horizontal_space, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::{FILE_INPUT_ID, SEARCH_INPUT_ID, SEARCH_PLACEHOLDER, UPLOAD_BUTTON_ID};
use crate::state::search::SearchQuery;
use crate::Message;

/// Search field, upload controls and status line
pub fn view<'a>(query: &'a SearchQuery, status: &'a str, has_images: bool) -> Element<'a, Message> {
    let search = row![
        text_input(SEARCH_PLACEHOLDER, query.text())
            .id(text_input::Id::new(SEARCH_INPUT_ID))
            .on_input(Message::SearchChanged)
            .padding(8)
            .width(Length::FillPortion(3)),
        button("Clear")
            .on_press_maybe((!query.is_empty()).then_some(Message::ClearSearch))
            .padding(8),
        checkbox("Match case", query.policy().is_case_sensitive())
            .on_toggle(Message::MatchCaseToggled),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let upload = container(
        row![
            container(
                button("Upload Photos")
                    .on_press(Message::OpenFilePicker)
                    .padding(10),
            )
            .id(iced::widget::container::Id::new(UPLOAD_BUTTON_ID)),
            text("or drop files on the window").size(14),
            horizontal_space(),
            button("Clear all")
                .on_press_maybe(has_images.then_some(Message::ClearLibrary))
                .padding(10),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .id(iced::widget::container::Id::new(FILE_INPUT_ID))
    .width(Length::Fill);

    column![search, upload, text(status).size(14)]
        .spacing(12)
        .into()
}
