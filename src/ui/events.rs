// src/ui/events.rs

use iced::widget::{button, column, container, row, text, text_input, Column, Row};
use iced::{Alignment, Background, Border, Element, Length};

use crate::coordinator::{Phase, SelectionState};
use crate::messages::Message;
use crate::models::{EventCandidate, MarkerBatch};
use crate::ui::{card_style, empty_state, palette, primary_button, secondary_button, section_header, styles};
use crate::ui_state::CalendarDraft;
use crate::utils::{format_price, format_thousands};

pub fn view_event(event: &EventCandidate) -> Element<'_, Message> {
    let location = event.location();

    let mut details = column![
        text(&event.name).size(16).style(palette::TEXT_MAIN),
        text(format!("📅 {}", event.date_label())).size(13).style(palette::TEXT_MUTED),
        text(format!("📍 {}", if location.is_empty() { "Venue TBA" } else { location.as_str() }))
            .size(13)
            .style(palette::TEXT_MUTED),
    ]
    .spacing(4);

    if event.has_forecast() {
        let mut forecast = Row::new().spacing(16);
        if let Some(price) = event.suggested_price {
            forecast = forecast.push(text(format!("Suggested price {}", format_price(price))).size(12).style(palette::ACCENT));
        }
        if let Some(sales) = event.predicted_sales {
            forecast = forecast.push(text(format!("Predicted sales {}", format_thousands(sales))).size(12).style(palette::ACCENT));
        }
        details = details.push(forecast);
    }

    let mut actions = Row::new().spacing(8);
    if let Some(url) = &event.ticket_url {
        actions = actions.push(secondary_button("Get Tickets").on_press(Message::OpenUrl(url.clone())));
    }
    actions = actions.push(primary_button("Add to Calendar").on_press(Message::OpenDraft(event.id.clone())));

    container(
        row![
            container("").width(4).height(48).style(container::Appearance {
                background: Some(Background::Color(palette::ACCENT)),
                border: Border { radius: 2.0.into(), ..Border::default() },
                ..Default::default()
            }),
            details.width(Length::Fill),
            actions,
        ]
        .spacing(12)
        .align_items(Alignment::Center),
    )
    .padding(15)
    .width(Length::Fill)
    .style(card_style)
    .into()
}

pub fn view_events<'a>(state: &'a SelectionState, phase: Phase) -> Element<'a, Message> {
    let artist = state.selected_artist.as_deref().unwrap_or_default();
    match phase {
        Phase::EventsLoading => empty_state("Loading events..."),
        Phase::NoEventsShown => container(
            column![
                text(format!("No upcoming events found for {}", artist)).size(16).style(palette::TEXT_MAIN),
                text("Try another city, or check back later.").size(13).style(palette::TEXT_MUTED),
            ]
            .spacing(6)
            .align_items(Alignment::Center),
        )
        .padding(20)
        .width(Length::Fill)
        .center_x()
        .into(),
        Phase::EventsShown => {
            let cards: Vec<Element<'a, Message>> = state.events.iter().map(view_event).collect();
            column![
                section_header("Upcoming events"),
                text(format!("{} events for {}", state.events.len(), artist)).size(13).style(palette::TEXT_MUTED),
                Column::with_children(cards).spacing(12),
            ]
            .spacing(10)
            .into()
        }
        _ => column![].into(),
    }
}

/// Resolved venues and the viewport that fits them.
pub fn view_map(markers: Option<&MarkerBatch>) -> Element<'_, Message> {
    let body: Element<'_, Message> = match markers {
        None => empty_state("Locating venues..."),
        Some(batch) => match batch.bounds {
            None => empty_state("No venue locations resolved"),
            Some(bounds) => {
                let center = bounds.center();
                let mut rows = Column::new().spacing(6).push(
                    text(format!(
                        "Viewport {:.4}, {:.4} to {:.4}, {:.4} (center {:.4}, {:.4})",
                        bounds.south, bounds.west, bounds.north, bounds.east, center.lat, center.lon
                    ))
                    .size(12)
                    .style(palette::TEXT_MUTED),
                );
                for marker in &batch.markers {
                    rows = rows.push(
                        row![
                            text("📍").size(14),
                            column![
                                text(&marker.event_name).size(14).style(palette::TEXT_MAIN),
                                text(format!(
                                    "{} ({:.4}, {:.4})",
                                    marker.venue_name, marker.point.lat, marker.point.lon
                                ))
                                .size(12)
                                .style(palette::TEXT_MUTED),
                            ]
                            .spacing(2),
                        ]
                        .spacing(8)
                        .align_items(Alignment::Center),
                    );
                }
                if batch.skipped > 0 {
                    rows = rows.push(
                        text(format!("{} venues could not be located", batch.skipped))
                            .size(12)
                            .style(palette::TEXT_MUTED),
                    );
                }
                rows.into()
            }
        },
    };

    container(column![section_header("Venue map"), body].spacing(10))
        .padding(20)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

pub fn view_draft(draft: &CalendarDraft, saving: bool) -> Element<'_, Message> {
    let field = |label: &'static str, placeholder: &'static str, value: &str, on_input: fn(String) -> Message| {
        column![
            text(label).size(12).style(palette::TEXT_MUTED),
            text_input(placeholder, value)
                .on_input(on_input)
                .padding(10)
                .size(14)
                .style(iced::theme::TextInput::Custom(Box::new(styles::FormInput))),
        ]
        .spacing(4)
    };

    let save = primary_button(if saving { "Saving..." } else { "Save" });
    let save = if saving { save } else { save.on_press(Message::SaveDraft) };

    let mut content = column![
        text("Add to Calendar").size(22).style(palette::TEXT_MAIN),
        field("Event name", "Event name", &draft.name, Message::DraftNameChanged),
        field("Location", "Venue, City", &draft.location, Message::DraftLocationChanged),
        field("Date", "YYYY-MM-DD", &draft.date, Message::DraftDateChanged),
    ]
    .spacing(12);

    if let Some(error) = &draft.error {
        content = content.push(text(error).size(13).style(palette::DANGER));
    }

    content = content.push(
        row![
            save,
            button(text("Cancel").size(14))
                .padding([8, 16])
                .on_press(Message::CancelDraft)
                .style(iced::theme::Button::Text),
        ]
        .spacing(10),
    );

    container(content)
        .padding(24)
        .max_width(480.0)
        .style(iced::theme::Container::Custom(Box::new(styles::Modal)))
        .into()
}
