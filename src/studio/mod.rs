//! Interactive video page.
//!
//! Lists the user's images, lets them pick some, choose a resolution and an
//! audio mood, and request a render. All requests go through the same
//! [`Controller`] the CLI uses; this module only maps keys to handlers and
//! draws the view.

mod view;

pub use view::StudioView;

use crate::api::ApiClient;
use crate::components::footer::Footer;
use crate::components::gallery::GalleryComponent;
use crate::components::header::Header;
use crate::components::message_box::MessageBox;
use crate::components::{Component, ComponentAction};
use crate::config::Config;
use crate::controller::{Controller, Outcome};
use crate::session::{FileSessionStore, SessionStore};
use crate::styles::theme;
use crate::tui::Tui;
use crate::utils::{create_split_layout, create_standard_layout};
use crate::video::VideoOptions;
use crate::view::{Route, View};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{error, info};

const FOOTER_HINTS: &str =
    "Move: ↑/↓ | Select: Space/Click | Resolution: r | Mood: m | Create: c | Download: d | Reload: g | Quit: q";

/// Studio application state
pub struct StudioApp {
    config: Config,
    runtime: Runtime,
    tui: Tui,
    controller: Controller<ApiClient, FileSessionStore, StudioView>,
    gallery_component: GalleryComponent,
    should_quit: bool,
    /// Quit as soon as the alert queue drains
    quit_after_alerts: bool,
    exit_message: Option<String>,
    /// Where and when the last video was saved
    last_download: Option<(PathBuf, DateTime<Local>)>,
}

impl StudioApp {
    pub fn new(config: Config, server_url: &str) -> Result<Self> {
        let session = FileSessionStore::open(&crate::utils::get_session_path())?;
        let backend = ApiClient::new(server_url)?;
        let options = VideoOptions {
            resolution: config.default_resolution,
            audio_mood: config.default_audio_mood,
        };
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;

        Ok(Self {
            controller: Controller::new(backend, session, StudioView::new(options)),
            config,
            runtime,
            tui: Tui::new()?,
            gallery_component: GalleryComponent::new(),
            should_quit: false,
            quit_after_alerts: false,
            exit_message: None,
            last_download: None,
        })
    }

    /// Run the event loop; returns a message to print after the terminal is restored
    pub fn run(&mut self) -> Result<Option<String>> {
        self.tui.enter()?;

        let outcome = self.runtime.block_on(self.controller.on_page_load());
        self.after_handler(outcome);

        loop {
            self.draw()?;

            if self.should_quit {
                break;
            }

            if let Some(event) = self.tui.poll_event(Duration::from_millis(250))? {
                self.handle_event(event)?;
            }
        }

        self.tui.exit()?;
        Ok(self.exit_message.take())
    }

    fn draw(&mut self) -> Result<()> {
        if let Some(gallery) = self.controller.view_mut().image_container() {
            self.gallery_component.sync(gallery);
        }

        let gallery_component = &mut self.gallery_component;
        let view = self.controller.view();
        let username = self.controller.session().username();
        let server_url = self.controller.backend().base_url().to_string();
        let last_download = self.last_download.as_ref();

        let mut render_result = Ok(());
        self.tui.draw(|frame| {
            render_result = (|| -> Result<()> {
                let area = frame.area();
                let (header, content, footer) = create_standard_layout(area, 4, 2);

                let who = username.as_deref().unwrap_or("not logged in");
                Header::render(
                    frame,
                    header,
                    "montage - Video Studio",
                    "Pick images and render them into a video.",
                    &[("Server", server_url.as_str()), ("User", who)],
                )?;

                let (left, right) = create_split_layout(content, 60);
                gallery_component.render(frame, left)?;
                render_details(frame, right, view, last_download);

                Footer::render(frame, footer, FOOTER_HINTS)?;

                if let Some(alert) = view.current_alert() {
                    MessageBox::render(frame, area, alert)?;
                }
                Ok(())
            })();
        })?;
        render_result
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if self.controller.view().has_alert() {
            let is_press = match &event {
                Event::Key(key) => key.kind == KeyEventKind::Press,
                Event::Mouse(mouse) => matches!(
                    mouse.kind,
                    crossterm::event::MouseEventKind::Down(_)
                ),
                _ => false,
            };
            if is_press {
                self.apply(ComponentAction::DismissAlert)?;
            }
            return Ok(());
        }

        let action = self.gallery_component.handle_event(event)?;
        self.apply(action)
    }

    fn apply(&mut self, action: ComponentAction) -> Result<()> {
        match action {
            ComponentAction::None | ComponentAction::Update => {}
            ComponentAction::Quit => self.should_quit = true,
            ComponentAction::DismissAlert => {
                self.controller.view_mut().dismiss_alert();
                if self.quit_after_alerts && !self.controller.view().has_alert() {
                    self.should_quit = true;
                }
            }
            ComponentAction::ToggleImage(index) => {
                if let Some(selected) = self.controller.toggle_image(index) {
                    info!("Image {} selected={}", index, selected);
                }
            }
            ComponentAction::CycleResolution => {
                let options = self.controller.view_mut().options_mut();
                options.resolution = options.resolution.next();
            }
            ComponentAction::CycleAudioMood => {
                let options = self.controller.view_mut().options_mut();
                options.audio_mood = options.audio_mood.next();
            }
            ComponentAction::CreateVideo => {
                let outcome = self.runtime.block_on(self.controller.create_video());
                self.after_handler(outcome);
            }
            ComponentAction::Refresh => {
                let outcome = self.runtime.block_on(self.controller.fetch_images());
                self.after_handler(outcome);
            }
            ComponentAction::Download => self.download(),
        }
        Ok(())
    }

    fn download(&mut self) {
        let href = self
            .controller
            .view_mut()
            .video_panel()
            .and_then(|panel| panel.download_link.href.clone());

        let Some(url) = href else {
            self.controller
                .view_mut()
                .alert("No video yet. Select images and press c to create one.");
            return;
        };

        let dest = crate::utils::expand_path(&self.config.download_name);
        let result = self
            .runtime
            .block_on(self.controller.backend().download(&url, &dest));

        match result {
            Ok(bytes) => {
                self.controller.view_mut().alert(&format!(
                    "Saved {} ({} bytes)",
                    crate::utils::format_path_for_display(&dest),
                    bytes
                ));
                self.last_download = Some((dest, Local::now()));
            }
            Err(e) => {
                error!("Download failed: {:#}", e);
                self.controller
                    .view_mut()
                    .alert(&format!("Download failed: {}", e));
            }
        }
    }

    /// React to navigation a handler asked for
    fn after_handler(&mut self, outcome: Outcome) {
        info!("Handler finished: {:?}", outcome);
        if let Some(route) = self.controller.view_mut().take_navigation() {
            if route == Route::Login {
                self.exit_message =
                    Some("Log in first with `montage login`, then reopen the studio.".to_string());
                self.quit_after_alerts = true;
                if !self.controller.view().has_alert() {
                    self.should_quit = true;
                }
            }
        }
    }
}

/// Right-hand pane: dropdown values and the rendered video
fn render_details(
    frame: &mut Frame,
    area: Rect,
    view: &StudioView,
    last_download: Option<&(PathBuf, DateTime<Local>)>,
) {
    let t = theme();
    let options = view.video_options().unwrap_or_default();
    let panel = view.page().video_panel.clone().unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let option_lines = vec![
        Line::from(vec![
            Span::styled("Resolution: ", t.muted_style()),
            Span::styled(options.resolution.as_str(), t.emphasis_style()),
        ]),
        Line::from(vec![
            Span::styled("Audio mood: ", t.muted_style()),
            Span::styled(options.audio_mood.as_str(), t.emphasis_style()),
        ]),
    ];
    let options_block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title("Options")
        .padding(ratatui::widgets::Padding::new(1, 1, 1, 0));
    frame.render_widget(Paragraph::new(option_lines).block(options_block), chunks[0]);

    let mut video_lines = Vec::new();
    match &panel.preview_src {
        Some(src) => {
            video_lines.push(Line::from(Span::styled("Preview:", t.muted_style())));
            video_lines.push(Line::from(Span::styled(src.clone(), t.success_style())));
        }
        None => video_lines.push(Line::from(Span::styled(
            "No video yet.",
            t.muted_style(),
        ))),
    }
    if panel.download_link.display.is_visible() {
        video_lines.push(Line::from(""));
        video_lines.push(Line::from(vec![
            Span::styled("Download as: ", t.muted_style()),
            Span::styled(
                panel.download_link.download.clone().unwrap_or_default(),
                t.emphasis_style(),
            ),
            Span::styled("  (press d)", t.muted_style()),
        ]));
    }
    if let Some((path, saved_at)) = last_download {
        video_lines.push(Line::from(vec![
            Span::styled("Saved to: ", t.muted_style()),
            Span::styled(crate::utils::format_path_for_display(path), t.text_style()),
            Span::styled(format!(" at {}", saved_at.format("%H:%M:%S")), t.muted_style()),
        ]));
    }

    let video_block = Block::default()
        .borders(Borders::ALL)
        .border_style(t.border_style())
        .title("Video")
        .padding(ratatui::widgets::Padding::new(1, 1, 1, 0));
    frame.render_widget(
        Paragraph::new(video_lines)
            .wrap(Wrap { trim: true })
            .block(video_block),
        chunks[1],
    );
}
