// RLM Booking - artist search and event booking client
// Main entry point for iced application

use log::{debug, error, info, warn};

use rlm_booking::calendar::CalendarBook;
use rlm_booking::command_handlers::{self, CommandHandlers};
use rlm_booking::coordinator::{Outcome, SelectionCoordinator};
use rlm_booking::messages::Message;
use rlm_booking::models::Notification;
use rlm_booking::ui::{self, palette, styles};
use rlm_booking::ui_state::{CalendarDraft, UiState, View};
use rlm_booking::utils::{self, logging};
use rlm_booking::{AppConfig, AppContext};

use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Application, Command, Element, Length, Settings as IcedSettings, Theme};

// Helper function to convert technical errors to user-friendly messages
fn user_friendly_error(error: &str) -> String {
    if error.contains("Network request failed") || error.contains("connection") {
        "Could not reach the booking service. Please check your internet connection.".to_string()
    } else if error.contains("timed out") || error.contains("timeout") {
        "The booking service took too long to answer. Please try again in a moment.".to_string()
    } else if error.contains("HTTP 5") {
        "The booking service is having trouble right now. Please try again later.".to_string()
    } else if error.contains("HTTP 404") {
        "That event no longer exists on the server.".to_string()
    } else if error.contains("malformed") {
        "The booking service sent an unexpected response.".to_string()
    } else if error.contains("File operation failed") {
        "Could not write the calendar file. Please check the download folder.".to_string()
    } else {
        // Fallback: clean up technical error message
        error
            .replace("Backend error:", "")
            .replace("Validation error:", "")
            .trim()
            .to_string()
    }
}

pub struct BookingApp {
    // Command handlers for async operations
    handlers: CommandHandlers,

    // Search, selection and event results
    coordinator: SelectionCoordinator,

    // UI state management
    ui_state: UiState,

    // Saved events
    calendar: CalendarBook,
}

impl BookingApp {
    fn load_calendar(&mut self) -> Command<Message> {
        self.ui_state.calendar_loading = true;
        let booking = self.handlers.booking.clone();
        Command::perform(async move { booking.load_saved().await }, Message::CalendarLoaded)
    }

    fn submit_search(&mut self) -> Command<Message> {
        match self.coordinator.submit_search(self.ui_state.search_form()) {
            Ok(ticket) => {
                self.ui_state.markers = None;
                self.ui_state.draft = None;
                self.ui_state.current_view = View::ArtistRecommendation;
                let booking = self.handlers.booking.clone();
                Command::perform(async move { booking.search(ticket).await }, |(generation, result)| {
                    Message::SearchCompleted(generation, result)
                })
            }
            Err(e) => {
                debug!("Search not submitted: {}", e);
                self.ui_state.notify(Notification::failure(user_friendly_error(&e.to_safe_string())));
                Command::none()
            }
        }
    }

    fn select_artist(&mut self, name: String, popularity: u8) -> Command<Message> {
        match self.coordinator.select_artist(&name, popularity) {
            Ok(ticket) => {
                self.ui_state.markers = None;
                self.ui_state.draft = None;
                let booking = self.handlers.booking.clone();
                Command::perform(async move { booking.find_events(ticket).await }, |(generation, result)| {
                    Message::EventsLoaded(generation, result)
                })
            }
            Err(e) => {
                warn!("Cannot select '{}': {}", name, e);
                Command::none()
            }
        }
    }
}

impl Application for BookingApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = AppContext;

    fn new(context: Self::Flags) -> (Self, Command<Message>) {
        let handlers = CommandHandlers::new(&context);
        let defaults = context.config.default_search_params();

        let mut app = BookingApp {
            ui_state: UiState::new(&defaults),
            coordinator: SelectionCoordinator::new(defaults),
            calendar: CalendarBook::new(),
            handlers,
        };

        // Load saved events on startup for the dashboard
        let startup_command = app.load_calendar();
        (app, startup_command)
    }

    fn title(&self) -> String {
        format!("RLM Booking - {}", self.ui_state.current_view.title())
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Navigate(view) => {
                self.ui_state.current_view = view;
                let needs_calendar = matches!(view, View::EventManagement | View::CalendarPage);
                if needs_calendar && !self.calendar.is_loaded() && !self.ui_state.calendar_loading {
                    self.load_calendar()
                } else {
                    Command::none()
                }
            }
            Message::OpenUrl(url) => {
                utils::open_in_browser(&url);
                Command::none()
            }
            Message::DismissNotification => {
                self.ui_state.notification = None;
                Command::none()
            }

            Message::ArtistNameChanged(value) => {
                self.ui_state.artist_input = value;
                Command::none()
            }
            Message::CountryChanged(value) => {
                self.ui_state.country_input = value;
                Command::none()
            }
            Message::CityChanged(value) => {
                self.ui_state.city_input = value;
                Command::none()
            }
            Message::SubmitSearch => self.submit_search(),
            Message::SearchCompleted(generation, result) => {
                self.coordinator.complete_search(generation, result);
                Command::none()
            }

            Message::SelectArtist(name, popularity) => self.select_artist(name, popularity),
            Message::EventsLoaded(generation, result) => {
                if self.coordinator.complete_event_lookup(generation, result) == Outcome::Stale {
                    return Command::none();
                }
                let events = self.coordinator.state().events.clone();
                if events.is_empty() {
                    return Command::none();
                }
                let map = self.handlers.map.clone();
                Command::perform(async move { map.resolve(generation, events).await }, |(generation, batch)| {
                    Message::MarkersResolved(generation, batch)
                })
            }
            Message::MarkersResolved(generation, batch) => {
                if self.coordinator.current_event_generation() == Some(generation) {
                    self.ui_state.markers = Some((generation, batch));
                } else {
                    logging::log_stale_response("marker", generation, self.coordinator.current_event_generation());
                }
                Command::none()
            }

            Message::OpenDraft(event_id) => {
                match self.coordinator.state().events.iter().find(|e| e.id == event_id) {
                    Some(event) => self.ui_state.draft = Some(CalendarDraft::from_event(event)),
                    None => warn!("Event {} is no longer displayed", event_id),
                }
                Command::none()
            }
            Message::DraftNameChanged(value) => {
                if let Some(draft) = self.ui_state.draft.as_mut() {
                    draft.name = value;
                    draft.error = None;
                }
                Command::none()
            }
            Message::DraftLocationChanged(value) => {
                if let Some(draft) = self.ui_state.draft.as_mut() {
                    draft.location = value;
                    draft.error = None;
                }
                Command::none()
            }
            Message::DraftDateChanged(value) => {
                if let Some(draft) = self.ui_state.draft.as_mut() {
                    draft.date = value;
                    draft.error = None;
                }
                Command::none()
            }
            Message::SaveDraft => {
                let Some(draft) = self.ui_state.draft.as_mut() else {
                    return Command::none();
                };
                match draft.to_entry() {
                    Ok(entry) => {
                        self.ui_state.saving_draft = true;
                        let booking = self.handlers.booking.clone();
                        Command::perform(async move { booking.save(entry).await }, Message::EventSaved)
                    }
                    Err(e) => {
                        draft.error = Some(user_friendly_error(&e.to_safe_string()));
                        Command::none()
                    }
                }
            }
            Message::CancelDraft => {
                self.ui_state.draft = None;
                self.ui_state.saving_draft = false;
                Command::none()
            }
            Message::EventSaved(notification) => {
                self.ui_state.saving_draft = false;
                let saved = notification.is_success();
                self.ui_state.notify(notification);
                if saved {
                    self.ui_state.draft = None;
                    if self.calendar.is_loaded() {
                        return self.load_calendar();
                    }
                }
                Command::none()
            }

            Message::LoadCalendar => self.load_calendar(),
            Message::CalendarLoaded(result) => {
                self.ui_state.calendar_loading = false;
                let result = result.map_err(|e| user_friendly_error(&e));
                if let Some(notification) = self.calendar.apply_loaded(result) {
                    self.ui_state.notify(notification);
                }
                Command::none()
            }
            Message::DeleteSavedEvent(id) => {
                let booking = self.handlers.booking.clone();
                Command::perform(async move { booking.delete_saved(id).await }, |(id, result)| {
                    Message::SavedEventDeleted(id, result)
                })
            }
            Message::SavedEventDeleted(id, result) => {
                let result = result.map_err(|e| user_friendly_error(&e));
                let notification = self.calendar.confirm_delete(&id, result);
                self.ui_state.notify(notification);
                Command::none()
            }
            Message::ExportCalendar => {
                let events = self.calendar.events().to_vec();
                let path = command_handlers::export_path();
                Command::perform(command_handlers::export_calendar(events, path), Message::CalendarExported)
            }
            Message::AvailabilityArtistChanged(value) => {
                self.ui_state.availability.artist = value;
                Command::none()
            }
            Message::AvailabilityZipChanged(value) => {
                self.ui_state.availability.zip_code = value;
                Command::none()
            }
            Message::AvailabilityRadiusChanged(value) => {
                self.ui_state.availability.radius = value;
                Command::none()
            }
            Message::AvailabilityStartChanged(value) => {
                self.ui_state.availability.start_date = value;
                Command::none()
            }
            Message::AvailabilityEndChanged(value) => {
                self.ui_state.availability.end_date = value;
                Command::none()
            }
            Message::SubmitAvailability => match self.ui_state.availability.begin() {
                Ok((generation, query)) => {
                    let booking = self.handlers.booking.clone();
                    Command::perform(
                        async move { booking.search_availability(generation, query).await },
                        |(generation, result)| Message::AvailabilityLoaded(generation, result),
                    )
                }
                Err(e) => {
                    debug!("Availability search not submitted: {}", e);
                    Command::none()
                }
            },
            Message::AvailabilityLoaded(generation, result) => {
                let result = result.map_err(|e| user_friendly_error(&e));
                self.ui_state.availability.complete(generation, result);
                Command::none()
            }
            Message::CalendarExported(result) => {
                let notification = match result {
                    Ok(path) => Notification::success(format!("Calendar exported to {}", path)),
                    Err(e) => {
                        error!("Calendar export failed: {}", e);
                        Notification::failure(user_friendly_error(&e))
                    }
                };
                self.ui_state.notify(notification);
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let current = self.ui_state.current_view;
        let nav_button = |label: &str, view: View| {
            button(
                text(label)
                    .size(14)
                    .horizontal_alignment(iced::alignment::Horizontal::Left),
            )
            .width(Length::Fill)
            .padding(10)
            .style(iced::theme::Button::Custom(Box::new(styles::NavButton {
                active: view == current,
            })))
            .on_press(Message::Navigate(view))
        };

        let status = if self.coordinator.search_in_flight() {
            "Searching artists...".to_string()
        } else if self.coordinator.events_in_flight() {
            "Loading events...".to_string()
        } else {
            format!("{} artists, {} events", self.coordinator.state().artists.len(), self.coordinator.state().events.len())
        };

        let sidebar = container(
            column![
                text("RLM Booking")
                    .size(24)
                    .style(iced::theme::Text::Color(palette::ACCENT)),
                column![
                    nav_button("Home", View::Home),
                    nav_button("Artists", View::ArtistRecommendation),
                    nav_button("Events", View::EventManagement),
                    nav_button("Calendar", View::CalendarPage),
                ]
                .spacing(5),
                iced::widget::vertical_space(),
                container(
                    column![
                        text("Status").size(12).style(iced::theme::Text::Color(palette::TEXT_MUTED)),
                        text(status).size(11).style(iced::theme::Text::Color(palette::TEXT_MAIN)),
                        text(format!(
                            "{} / {}",
                            self.coordinator.state().search_params.country_code,
                            self.coordinator.state().search_params.city
                        ))
                        .size(11)
                        .style(iced::theme::Text::Color(palette::TEXT_MUTED)),
                    ]
                    .spacing(4),
                )
                .padding(10)
                .style(ui::card_style),
            ]
            .spacing(40)
            .padding(20),
        )
        .width(200)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(styles::Sidebar)));

        let page = match current {
            View::Home => ui::view_home(),
            View::ArtistRecommendation => self.view_artist_recommendation(),
            View::EventManagement => scrollable(
                column![
                    ui::calendar::view_dashboard(
                        &self.calendar,
                        chrono::Local::now().date_naive(),
                        self.ui_state.calendar_loading,
                    ),
                    ui::calendar::view_availability(&self.ui_state.availability),
                ]
                .spacing(20),
            )
            .height(Length::Fill)
            .into(),
            View::CalendarPage => ui::calendar::view_calendar_page(&self.calendar, self.ui_state.calendar_loading),
        };

        let mut content = Column::new().spacing(16);
        if let Some(notification) = &self.ui_state.notification {
            content = content.push(ui::notification_banner(notification));
        }
        content = content.push(page);

        container(row![
            sidebar,
            container(content).width(Length::Fill).height(Length::Fill).padding(40)
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(styles::Page)))
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

impl BookingApp {
    fn view_artist_recommendation(&self) -> Element<'_, Message> {
        let state = self.coordinator.state();
        let phase = self.coordinator.phase();

        if let Some(draft) = &self.ui_state.draft {
            return container(ui::events::view_draft(draft, self.ui_state.saving_draft))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x()
                .center_y()
                .into();
        }

        let mut results = column![
            ui::search::view_search_form(&self.ui_state, self.coordinator.search_in_flight()),
            row![
                column![ui::section_header("Artists"), ui::search::view_artists(state, phase)]
                    .spacing(10)
                    .width(Length::FillPortion(2)),
                column![
                    ui::events::view_events(state, phase),
                ]
                .spacing(10)
                .width(Length::FillPortion(3)),
            ]
            .spacing(20),
        ]
        .spacing(20);

        if !state.events.is_empty() {
            let generation = self.coordinator.current_event_generation();
            results = results.push(ui::events::view_map(self.ui_state.markers_for(generation)));
        }

        scrollable(results).height(Length::Fill).into()
    }
}

#[tokio::main]
async fn main() -> iced::Result {
    // Initialize logging
    if let Err(e) = logging::init_logging() {
        eprintln!("Logger already initialised: {}", e);
    }

    info!("Starting RLM Booking with iced UI");

    let context = match AppConfig::load().and_then(AppContext::from_config) {
        Ok(context) => context,
        Err(e) => {
            logging::log_error_with_context(&anyhow::Error::new(e), "startup");
            eprintln!("Could not start RLM Booking. Please check your configuration and try again.");
            std::process::exit(1);
        }
    };
    info!("Using backend {}", context.config.backend_url);

    // Run iced application
    BookingApp::run(IcedSettings {
        flags: context,
        window: iced::window::Settings {
            size: iced::Size::new(1100.0, 760.0),
            resizable: true,
            ..Default::default()
        },
        id: None,
        fonts: vec![],
        default_font: Default::default(),
        default_text_size: iced::Pixels(16.0),
        antialiasing: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_error() {
        assert_eq!(
            user_friendly_error("Backend error: save-event failed with HTTP 500 Internal Server Error"),
            "The booking service is having trouble right now. Please try again later."
        );
        assert_eq!(
            user_friendly_error("Network request failed"),
            "Could not reach the booking service. Please check your internet connection."
        );
        assert_eq!(user_friendly_error("Validation error: Location cannot be empty"), "Location cannot be empty");
    }
}
