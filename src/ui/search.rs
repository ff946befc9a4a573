// src/ui/search.rs

use iced::widget::{column, container, row, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::coordinator::{Phase, SelectionState};
use crate::messages::Message;
use crate::models::Artist;
use crate::ui::{card_style, empty_state, palette, primary_button, secondary_button, section_header, status_badge, styles};
use crate::ui_state::UiState;
use crate::utils::{format_thousands, truncate_label};

fn input<'a>(placeholder: &str, value: &str, on_input: fn(String) -> Message) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(on_input)
        .on_submit(Message::SubmitSearch)
        .padding(10)
        .size(14)
        .style(iced::theme::TextInput::Custom(Box::new(styles::FormInput)))
        .into()
}

pub fn view_search_form(ui: &UiState, searching: bool) -> Element<'_, Message> {
    let submit = primary_button(if searching { "Searching..." } else { "Search" });
    let submit = if searching { submit } else { submit.on_press(Message::SubmitSearch) };

    container(
        column![
            section_header("Find an artist"),
            row![
                column![
                    text("Artist").size(12).style(palette::TEXT_MUTED),
                    input("e.g. Adele", &ui.artist_input, Message::ArtistNameChanged),
                ]
                .spacing(4)
                .width(Length::FillPortion(3)),
                column![
                    text("Country").size(12).style(palette::TEXT_MUTED),
                    input("US", &ui.country_input, Message::CountryChanged),
                ]
                .spacing(4)
                .width(Length::FillPortion(1)),
                column![
                    text("City").size(12).style(palette::TEXT_MUTED),
                    input("Boston", &ui.city_input, Message::CityChanged),
                ]
                .spacing(4)
                .width(Length::FillPortion(2)),
            ]
            .spacing(12),
            submit,
        ]
        .spacing(14),
    )
    .padding(20)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

pub fn view_artist(artist: &Artist, selected: bool) -> Element<'_, Message> {
    let popularity = format!("Popularity {}/100", artist.popularity);
    let mut actions = row![primary_button("View Events")
        .on_press(Message::SelectArtist(artist.name.clone(), artist.popularity))]
    .spacing(8);
    if !artist.profile_url.is_empty() {
        actions = actions.push(secondary_button("Open profile").on_press(Message::OpenUrl(artist.profile_url.clone())));
    }
    actions = actions.push(
        secondary_button("Photo").on_press(Message::OpenUrl(artist.image_or_placeholder().to_string())),
    );

    container(
        column![
            row![
                text(truncate_label(&artist.name, 40)).size(18).style(palette::TEXT_MAIN),
                status_badge(if selected { "Selected" } else { "Artist" }, selected),
            ]
            .spacing(10)
            .align_items(Alignment::Center),
            text(format!("{} followers", format_thousands(artist.followers)))
                .size(13)
                .style(palette::TEXT_MUTED),
            text(popularity).size(13).style(palette::TEXT_MUTED),
            text(artist.genre_summary()).size(12).style(palette::TEXT_MUTED),
            actions,
        ]
        .spacing(6),
    )
    .padding(15)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

pub fn view_artists<'a>(state: &'a SelectionState, phase: Phase) -> Element<'a, Message> {
    match phase {
        Phase::Idle => empty_state("Search for an artist to get started."),
        Phase::Searching => empty_state("Searching artists..."),
        _ if state.artists.is_empty() => empty_state("No artists found. Try another name."),
        _ => {
            let selected = state.selected_artist.as_deref();
            let cards: Vec<Element<'a, Message>> = state
                .artists
                .iter()
                .map(|artist| view_artist(artist, selected == Some(artist.name.as_str())))
                .collect();

            Column::with_children(cards).spacing(12).into()
        }
    }
}
