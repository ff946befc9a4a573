// src/ui/calendar.rs

use chrono::NaiveDate;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Row};
use iced::{Alignment, Element, Length};

use crate::calendar::CalendarBook;
use crate::messages::Message;
use crate::models::{AvailableEvent, SavedEvent};
use crate::ui::{card_style, empty_state, palette, primary_button, secondary_button, section_header, styles};
use crate::ui_state::{AvailabilityPanel, View};

fn stat<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    container(
        column![
            text(value).size(28).style(palette::ACCENT),
            text(label).size(13).style(palette::TEXT_MUTED),
        ]
        .spacing(4)
        .align_items(Alignment::Center),
    )
    .padding(20)
    .width(Length::Fill)
    .center_x()
    .style(card_style)
    .into()
}

fn saved_row(event: &SavedEvent) -> Element<'_, Message> {
    row![
        text(event.date.format("%a %d").to_string())
            .size(14)
            .style(palette::ACCENT)
            .width(70),
        column![
            text(&event.name).size(15).style(palette::TEXT_MAIN),
            text(&event.location).size(12).style(palette::TEXT_MUTED),
        ]
        .spacing(2)
        .width(Length::Fill),
        button(text("Delete").size(12))
            .padding([4, 10])
            .on_press(Message::DeleteSavedEvent(event.id.clone()))
            .style(iced::theme::Button::Custom(Box::new(styles::DangerButton))),
    ]
    .spacing(10)
    .align_items(Alignment::Center)
    .padding(6)
    .into()
}

/// Event Management dashboard: booked totals and the next few dates.
pub fn view_dashboard(book: &CalendarBook, today: NaiveDate, loading: bool) -> Element<'_, Message> {
    let header = row![
        text("Event Management").size(28).style(palette::TEXT_MAIN).width(Length::Fill),
        secondary_button(if loading { "Refreshing..." } else { "Refresh" }).on_press(Message::LoadCalendar),
        primary_button("Open Calendar").on_press(Message::Navigate(View::CalendarPage)),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    if !book.is_loaded() {
        return column![header, empty_state(if loading { "Loading your events..." } else { "Calendar not loaded yet." })]
            .spacing(20)
            .into();
    }

    let upcoming = book.upcoming(today);
    let stats = row![
        stat("Upcoming events", upcoming.len().to_string()),
        stat("Booked venues", book.distinct_locations().len().to_string()),
        stat("Saved in total", book.len().to_string()),
    ]
    .spacing(16);

    let next: Element<'_, Message> = if upcoming.is_empty() {
        empty_state("Nothing booked ahead. Find artists to add some dates.")
    } else {
        Column::with_children(upcoming.into_iter().take(5).map(saved_row)).spacing(4).into()
    };

    column![
        header,
        stats,
        container(column![section_header("Coming up"), next].spacing(10))
            .padding(20)
            .width(Length::Fill)
            .style(card_style),
    ]
    .spacing(20)
    .into()
}

/// Saved events grouped by month.
pub fn view_calendar_page(book: &CalendarBook, loading: bool) -> Element<'_, Message> {
    let export = secondary_button("Export .ics");
    let export = if book.is_empty() { export } else { export.on_press(Message::ExportCalendar) };

    let header = row![
        text("My Calendar").size(28).style(palette::TEXT_MAIN).width(Length::Fill),
        export,
        primary_button(if loading { "Refreshing..." } else { "Refresh" }).on_press(Message::LoadCalendar),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    if book.is_empty() {
        let label = if loading {
            "Loading your events..."
        } else {
            "No saved events yet. Use \"Add to Calendar\" on an event."
        };
        return column![header, empty_state(label)].spacing(20).into();
    }

    let months: Vec<Element<'_, Message>> = book
        .group_by_month()
        .into_iter()
        .map(|group| {
            container(
                column![
                    text(group.label).size(18).style(palette::TEXT_MAIN),
                    iced::widget::horizontal_rule(1),
                    Column::with_children(group.events.into_iter().map(saved_row)).spacing(0),
                ]
                .spacing(12),
            )
            .width(Length::Fill)
            .padding(20)
            .style(card_style)
            .into()
        })
        .collect();

    column![
        header,
        scrollable(Column::with_children(months).spacing(20)).height(Length::Fill),
    ]
    .spacing(20)
    .into()
}

fn filter<'a>(label: &'a str, placeholder: &str, value: &str, on_input: fn(String) -> Message) -> Column<'a, Message> {
    column![
        text(label).size(12).style(palette::TEXT_MUTED),
        text_input(placeholder, value)
            .on_input(on_input)
            .on_submit(Message::SubmitAvailability)
            .padding(10)
            .size(14)
            .style(iced::theme::TextInput::Custom(Box::new(styles::FormInput))),
    ]
    .spacing(4)
}

const COLUMNS: [(&str, u16); 5] = [("Artist", 2), ("Event", 3), ("Venue", 2), ("Date", 1), ("Location", 2)];

fn table_row<'a>(cells: [&'a str; 5], header: bool) -> Element<'a, Message> {
    let color = if header { palette::TEXT_MUTED } else { palette::TEXT_MAIN };
    let size = if header { 12 } else { 13 };
    Row::with_children(cells.into_iter().zip(COLUMNS).map(|(cell, (_, portion))| {
        text(cell).size(size).style(color).width(Length::FillPortion(portion)).into()
    }))
    .spacing(10)
    .padding([6, 0])
    .into()
}

fn availability_row(event: &AvailableEvent) -> Element<'_, Message> {
    table_row(
        [
            event.artist.as_str(),
            event.name.as_str(),
            event.venue.as_str(),
            event.date.as_str(),
            event.location.as_str(),
        ],
        false,
    )
}

/// Availability search form and its results table.
pub fn view_availability(panel: &AvailabilityPanel) -> Element<'_, Message> {
    let searching = panel.is_searching();
    let submit = primary_button(if searching { "Searching..." } else { "Search" });
    let submit = if searching { submit } else { submit.on_press(Message::SubmitAvailability) };

    let form = row![
        filter("Artist", "e.g. Adele", &panel.artist, Message::AvailabilityArtistChanged).width(Length::FillPortion(3)),
        filter("Zip code", "02114", &panel.zip_code, Message::AvailabilityZipChanged).width(Length::FillPortion(2)),
        filter("Radius (mi)", "25", &panel.radius, Message::AvailabilityRadiusChanged).width(Length::FillPortion(1)),
        filter("From", "YYYY-MM-DD", &panel.start_date, Message::AvailabilityStartChanged).width(Length::FillPortion(2)),
        filter("To", "YYYY-MM-DD", &panel.end_date, Message::AvailabilityEndChanged).width(Length::FillPortion(2)),
    ]
    .spacing(10);

    let mut content = column![section_header("Check availability"), form, submit].spacing(14);
    if let Some(error) = &panel.error {
        content = content.push(text(error).size(13).style(palette::DANGER));
    }

    let results: Element<'_, Message> = match &panel.results {
        None => empty_state("Search by artist, zip code or dates."),
        Some(rows) if rows.is_empty() => empty_state("No events found."),
        Some(rows) => column![
            table_row(COLUMNS.map(|(label, _)| label), true),
            iced::widget::horizontal_rule(1),
            Column::with_children(rows.iter().map(availability_row)),
        ]
        .spacing(4)
        .into(),
    };
    content = content.push(results);

    container(content)
        .padding(20)
        .width(Length::Fill)
        .style(card_style)
        .into()
}
