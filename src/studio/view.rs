use crate::video::VideoOptions;
use crate::view::{Page, Route, View};
use std::collections::VecDeque;
use tracing::info;

/// View backing the studio screen.
///
/// Alerts queue up and are shown one at a time as modal boxes. Navigation
/// cannot leave the studio, so it is recorded for the app loop to act on.
#[derive(Debug)]
pub struct StudioView {
    page: Page,
    alerts: VecDeque<String>,
    navigation: Option<Route>,
}

impl StudioView {
    pub fn new(options: VideoOptions) -> Self {
        let mut page = Page::for_route(Route::Video);
        page.video_options = Some(options);
        Self {
            page,
            alerts: VecDeque::new(),
            navigation: None,
        }
    }

    /// Alert on top of the queue
    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    pub fn has_alert(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Route requested by the last handler, if any
    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn options_mut(&mut self) -> &mut VideoOptions {
        self.page.video_options.get_or_insert_with(VideoOptions::default)
    }
}

impl View for StudioView {
    fn alert(&mut self, message: &str) {
        info!("Alert: {}", message);
        self.alerts.push_back(message.to_string());
    }

    fn navigate(&mut self, route: Route) {
        info!("Navigation requested to {}", route.path());
        self.navigation = Some(route);
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}
