// src/ui/mod.rs

use iced::widget::{button, column, container, row, text};
use iced::{Background, Border, Color, Element, Length, Shadow, Theme, Vector};

use crate::messages::Message;
use crate::models::{Notification, NotificationKind};
use crate::ui_state::View;

pub mod calendar;
pub mod events;
pub mod search;
pub mod styles;

// --- STAGE THEME PALETTE ---
pub mod palette {
    use iced::Color;

    pub const BACKGROUND: Color = Color::from_rgb(0.96, 0.96, 0.98); // Cool Paper
    pub const SIDEBAR: Color = Color::from_rgb(0.92, 0.92, 0.96);
    pub const SURFACE: Color = Color::WHITE;
    pub const TEXT_MAIN: Color = Color::from_rgb(0.15, 0.15, 0.2);   // Ink
    pub const TEXT_MUTED: Color = Color::from_rgb(0.5, 0.5, 0.56);
    pub const ACCENT: Color = Color::from_rgb(0.36, 0.32, 0.72);     // Stage Indigo
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.28, 0.24, 0.6);
    pub const SUCCESS: Color = Color::from_rgb(0.3, 0.62, 0.45);
    pub const DANGER: Color = Color::from_rgb(0.82, 0.36, 0.38);
}

// --- REUSABLE STYLES ---

pub fn card_style(_theme: &Theme) -> container::Appearance {
    container::Appearance {
        background: Some(Background::Color(palette::SURFACE)),
        border: Border {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.04),
            width: 1.0,
            radius: 12.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 10.0,
        },
        text_color: Some(palette::TEXT_MAIN),
    }
}

pub fn primary_button(label: &str) -> button::Button<'_, Message> {
    button(text(label).size(14))
        .padding([8, 16])
        .style(iced::theme::Button::Custom(Box::new(styles::PrimaryButton)))
}

pub fn secondary_button(label: &str) -> button::Button<'_, Message> {
    button(text(label).size(13))
        .padding([6, 12])
        .style(iced::theme::Button::Custom(Box::new(styles::SecondaryButton)))
}

pub fn status_badge(label: &str, is_positive: bool) -> Element<'_, Message> {
    let (bg, text_color) = if is_positive {
        (Color { a: 0.15, ..palette::ACCENT }, palette::ACCENT)
    } else {
        (Color::from_rgba(0.5, 0.5, 0.5, 0.1), palette::TEXT_MUTED)
    };

    container(text(label).size(10).style(iced::theme::Text::Color(text_color)))
        .padding([4, 8])
        .style(container::Appearance {
            background: Some(Background::Color(bg)),
            border: Border { radius: 10.0.into(), ..Border::default() },
            ..Default::default()
        })
        .into()
}

// Helper for section headers
pub fn section_header(label: &str) -> Element<'_, Message> {
    text(label)
        .size(20)
        .style(palette::ACCENT)
        .into()
}

/// Muted one-line placeholder for empty lists.
pub fn empty_state(label: &str) -> Element<'_, Message> {
    container(text(label).size(14).style(palette::TEXT_MUTED))
        .padding(20)
        .width(Length::Fill)
        .center_x()
        .into()
}

pub fn notification_banner(notification: &Notification) -> Element<'_, Message> {
    let icon = match notification.kind {
        NotificationKind::Success => "✓",
        NotificationKind::Failure => "!",
    };

    container(
        row![
            text(icon).size(16),
            text(&notification.message).size(14).width(Length::Fill),
            button(text("Dismiss").size(12))
                .on_press(Message::DismissNotification)
                .style(iced::theme::Button::Text),
        ]
        .spacing(12)
        .align_items(iced::Alignment::Center),
    )
    .padding([10, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(styles::Banner {
        kind: notification.kind,
    })))
    .into()
}

pub fn view_home<'a>() -> Element<'a, Message> {
    let tile = |title: &'a str, blurb: &'a str, target: View| -> Element<'a, Message> {
        container(
            column![
                text(title).size(18).style(palette::TEXT_MAIN),
                text(blurb).size(13).style(palette::TEXT_MUTED),
                primary_button("Open").on_press(Message::Navigate(target)),
            ]
            .spacing(10),
        )
        .padding(20)
        .width(Length::Fill)
        .style(card_style)
        .into()
    };

    column![
        text("RLM Booking").size(32).style(palette::TEXT_MAIN),
        text("Find artists, check where they play and book the dates.")
            .size(16)
            .style(palette::TEXT_MUTED),
        row![
            tile(
                "Artist Recommendation",
                "Search artists by name and see their upcoming shows near you.",
                View::ArtistRecommendation,
            ),
            tile(
                "Event Management",
                "Review the events you have booked and export your calendar.",
                View::EventManagement,
            ),
        ]
        .spacing(20),
    ]
    .spacing(20)
    .into()
}
