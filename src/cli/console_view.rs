//! View used by one-shot CLI commands.
//!
//! Alerts go to the terminal as they happen and are also kept, so the command
//! can decide on an exit status and tests can inspect them.

use crate::cli::common::{print_error, print_info, print_success};
use crate::view::{is_failure_message, Page, Route, View};
use tracing::debug;

#[derive(Debug)]
pub struct ConsoleView {
    page: Page,
    alerts: Vec<String>,
    navigations: Vec<Route>,
    echo: bool,
}

impl ConsoleView {
    /// View of `route` that prints alerts
    pub fn new(route: Route) -> Self {
        Self {
            page: Page::for_route(route),
            alerts: Vec::new(),
            navigations: Vec::new(),
            echo: true,
        }
    }

    /// View of `route` that only records alerts
    pub fn quiet(route: Route) -> Self {
        Self {
            echo: false,
            ..Self::new(route)
        }
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn navigations(&self) -> &[Route] {
        &self.navigations
    }

    pub fn last_navigation(&self) -> Option<Route> {
        self.navigations.last().copied()
    }
}

impl View for ConsoleView {
    fn alert(&mut self, message: &str) {
        if self.echo {
            if is_failure_message(message) {
                print_error(message);
            } else {
                print_success(message);
            }
        }
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, route: Route) {
        debug!("Navigate to {}", route.path());
        if self.echo && route == Route::Login && self.page.route != Route::Signup {
            print_info("Run `montage login` to sign in.");
        }
        self.navigations.push(route);
    }

    fn page(&self) -> &Page {
        &self.page
    }

    fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}
