use iced::widget::{button, container, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::models::NotificationKind;
use crate::ui::palette;

fn rounded(radius: f32) -> Border {
    Border {
        radius: radius.into(),
        ..Default::default()
    }
}

fn outlined(radius: f32, color: Color) -> Border {
    Border {
        radius: radius.into(),
        width: 1.0,
        color,
    }
}

fn soft_shadow(offset: f32, blur_radius: f32, alpha: f32) -> Shadow {
    Shadow {
        color: Color::from_rgba(0.0, 0.0, 0.0, alpha),
        offset: Vector::new(0.0, offset),
        blur_radius,
    }
}

/// Sidebar navigation entry; `active` marks the current view.
pub struct NavButton {
    pub active: bool,
}

impl button::StyleSheet for NavButton {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        if self.active {
            button::Appearance {
                background: Some(Background::Color(palette::SURFACE)),
                text_color: palette::ACCENT,
                border: rounded(6.0),
                shadow: soft_shadow(1.0, 2.0, 0.06),
                ..Default::default()
            }
        } else {
            button::Appearance {
                background: None,
                text_color: palette::TEXT_MUTED,
                ..Default::default()
            }
        }
    }
    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        if self.active {
            return self.active(style);
        }
        button::Appearance {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.04))),
            text_color: palette::TEXT_MAIN,
            border: rounded(6.0),
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.hovered(style)
    }
    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

pub struct PrimaryButton;
impl button::StyleSheet for PrimaryButton {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::ACCENT)),
            text_color: Color::WHITE,
            border: rounded(6.0),
            shadow: soft_shadow(2.0, 4.0, 0.1),
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::ACCENT_HOVER)),
            text_color: Color::WHITE,
            border: rounded(6.0),
            shadow: soft_shadow(3.0, 5.0, 0.15),
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
    fn disabled(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color::from_rgb(0.82, 0.82, 0.85))),
            text_color: Color::from_rgb(0.5, 0.5, 0.55),
            border: rounded(6.0),
            ..Default::default()
        }
    }
}

/// Outlined button for secondary actions such as "Open profile".
pub struct SecondaryButton;
impl button::StyleSheet for SecondaryButton {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: palette::ACCENT,
            border: outlined(6.0, palette::ACCENT),
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(Color { a: 0.08, ..palette::ACCENT })),
            text_color: palette::ACCENT_HOVER,
            border: outlined(6.0, palette::ACCENT_HOVER),
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.hovered(style)
    }
    fn disabled(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: palette::TEXT_MUTED,
            border: outlined(6.0, palette::TEXT_MUTED),
            ..Default::default()
        }
    }
}

pub struct DangerButton;
impl button::StyleSheet for DangerButton {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: palette::DANGER,
            border: outlined(6.0, palette::DANGER),
            ..Default::default()
        }
    }
    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(palette::DANGER)),
            text_color: Color::WHITE,
            border: outlined(6.0, palette::DANGER),
            ..Default::default()
        }
    }
    fn pressed(&self, style: &Self::Style) -> button::Appearance {
        self.hovered(style)
    }
    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        self.active(style)
    }
}

pub struct Sidebar;
impl container::StyleSheet for Sidebar {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(palette::SIDEBAR)),
            border: outlined(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.06)),
            ..Default::default()
        }
    }
}

pub struct Page;
impl container::StyleSheet for Page {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(palette::BACKGROUND)),
            text_color: Some(palette::TEXT_MAIN),
            ..Default::default()
        }
    }
}

/// Dialog surface for the calendar draft.
pub struct Modal;
impl container::StyleSheet for Modal {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(palette::SURFACE)),
            border: outlined(12.0, palette::ACCENT),
            shadow: soft_shadow(8.0, 24.0, 0.18),
            text_color: Some(palette::TEXT_MAIN),
        }
    }
}

pub struct Banner {
    pub kind: NotificationKind,
}

impl container::StyleSheet for Banner {
    type Style = Theme;
    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        let color = match self.kind {
            NotificationKind::Success => palette::SUCCESS,
            NotificationKind::Failure => palette::DANGER,
        };
        container::Appearance {
            background: Some(Background::Color(Color { a: 0.12, ..color })),
            border: outlined(8.0, color),
            text_color: Some(palette::TEXT_MAIN),
            ..Default::default()
        }
    }
}

pub struct FormInput;
impl text_input::StyleSheet for FormInput {
    type Style = Theme;
    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(Color::WHITE),
            border: outlined(6.0, Color::from_rgba(0.0, 0.0, 0.0, 0.12)),
            icon_color: palette::TEXT_MUTED,
        }
    }
    fn focused(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(Color::WHITE),
            border: outlined(6.0, palette::ACCENT),
            icon_color: palette::ACCENT,
        }
    }
    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.0, 0.0, 0.0, 0.3)
    }
    fn value_color(&self, _style: &Self::Style) -> Color {
        palette::TEXT_MAIN
    }
    fn disabled_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.0, 0.0, 0.0, 0.3)
    }
    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color { a: 0.2, ..palette::ACCENT }
    }
    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        self.active(style)
    }
}
