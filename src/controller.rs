//! Handlers behind every user action.
//!
//! Each handler is one round trip: validate locally, call the backend, branch
//! on the `success` flag and write the result into the view. Failures never
//! propagate as errors; they end as an alert (or, for the image listing, a log
//! line) and an [`Outcome`].

use crate::api::{Backend, CreateVideoRequest, Credentials, UploadFile};
use crate::session::SessionStore;
use crate::utils::file_validation::is_allowed_image;
use crate::view::{Display, Route, View, NO_IMAGES_PLACEHOLDER};
use tracing::{error, info, warn};

pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match!";
pub const MSG_SIGNUP_OK: &str = "Signup successful!";
pub const MSG_SIGNUP_FAILED_PREFIX: &str = "Signup failed: ";
pub const MSG_LOGIN_OK: &str = "Login successful.";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
pub const MSG_GENERIC_ERROR: &str = "An error occurred. Please try again later.";
pub const MSG_INVALID_FILE_TYPE: &str = "Invalid file type. Only JPG, JPEG, and PNG are allowed.";
pub const MSG_UPLOAD_OK: &str = "Image uploaded successfully";
pub const MSG_UPLOAD_FAILED_PREFIX: &str = "Upload failed: ";
pub const MSG_UPLOAD_ERROR: &str = "An error occurred during upload. Please try again later.";
pub const MSG_NOT_LOGGED_IN_IMAGES: &str = "You are not logged in. Please log in to view images.";
pub const MSG_NOT_LOGGED_IN: &str = "You are not logged in. Please log in first.";
pub const MSG_VIDEO_FAILED: &str = "Failed to create video";
pub const MSG_LOGOUT_FAILED: &str = "Logout failed: the stored session could not be removed.";

/// How a handler ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// Stopped locally (validation or missing session) before any request
    Rejected,
    /// The server said no, or the round trip failed
    Failed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

/// Binds a backend, a session store and a view together
pub struct Controller<B, S, V> {
    backend: B,
    session: S,
    view: V,
}

impl<B: Backend, S: SessionStore, V: View> Controller<B, S, V> {
    pub fn new(backend: B, session: S, view: V) -> Self {
        Self {
            backend,
            session,
            view,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_parts(self) -> (B, S, V) {
        (self.backend, self.session, self.view)
    }

    /// Run the load-time behaviour of the view's current page
    pub async fn on_page_load(&mut self) -> Outcome {
        let route = self.view.route();
        info!("Page load: {}", route.path());
        match route {
            Route::Home => self.check_logged_in(),
            Route::Video => self.fetch_images().await,
            Route::Login | Route::Signup => Outcome::Succeeded,
        }
    }

    pub async fn handle_sign_up(
        &mut self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Outcome {
        if password != confirm_password {
            self.view.alert(MSG_PASSWORD_MISMATCH);
            return Outcome::Rejected;
        }

        let credentials = Credentials::new(username, password);
        match self.backend.signup(&credentials).await {
            Ok(response) if response.success => {
                info!("Signed up {}", username);
                self.view.alert(MSG_SIGNUP_OK);
                self.view.navigate(Route::Login);
                Outcome::Succeeded
            }
            Ok(response) => {
                let message = response.message.unwrap_or_default();
                warn!("Signup rejected for {}: {}", username, message);
                self.view
                    .alert(&format!("{}{}", MSG_SIGNUP_FAILED_PREFIX, message));
                Outcome::Failed
            }
            Err(e) => {
                error!("Signup request failed: {:#}", e);
                self.view.alert(MSG_GENERIC_ERROR);
                Outcome::Failed
            }
        }
    }

    pub async fn handle_login(&mut self, username: &str, password: &str) -> Outcome {
        let credentials = Credentials::new(username, password);
        let response = match self.backend.login(&credentials).await {
            Ok(response) => response,
            Err(e) => {
                error!("Login request failed: {:#}", e);
                self.view.alert(MSG_GENERIC_ERROR);
                return Outcome::Failed;
            }
        };

        if !response.success {
            warn!("Login rejected for {}", username);
            self.view.alert(MSG_INVALID_CREDENTIALS);
            return Outcome::Failed;
        }

        let Some(token) = response.access_token else {
            error!("Login for {} succeeded without an access token", username);
            self.view.alert(MSG_GENERIC_ERROR);
            return Outcome::Failed;
        };

        if let Err(e) = self.session.store_login(&token, username) {
            error!("Failed to persist session: {:#}", e);
            self.view.alert(MSG_GENERIC_ERROR);
            return Outcome::Failed;
        }

        info!("Logged in as {}", username);
        self.view.alert(MSG_LOGIN_OK);
        self.view.navigate(Route::Home);
        Outcome::Succeeded
    }

    pub async fn upload_file(&mut self, file: &UploadFile) -> Outcome {
        if !is_allowed_image(file.name()) {
            self.view.alert(MSG_INVALID_FILE_TYPE);
            return Outcome::Rejected;
        }

        let Some(token) = self.session.token() else {
            self.view.alert(MSG_NOT_LOGGED_IN);
            self.view.navigate(Route::Login);
            return Outcome::Rejected;
        };

        match self.backend.upload(&token, file).await {
            Ok(response) if response.success => {
                self.view.alert(MSG_UPLOAD_OK);
                info!(
                    "Image URL: {}",
                    response.image_url.as_deref().unwrap_or("<none>")
                );
                Outcome::Succeeded
            }
            Ok(response) => {
                let message = response.message.unwrap_or_default();
                warn!("Upload of {} rejected: {}", file.name(), message);
                self.view
                    .alert(&format!("{}{}", MSG_UPLOAD_FAILED_PREFIX, message));
                Outcome::Failed
            }
            Err(e) => {
                error!("Upload request failed: {:#}", e);
                self.view.alert(MSG_UPLOAD_ERROR);
                Outcome::Failed
            }
        }
    }

    /// Load the user's images into the image container.
    ///
    /// Failures are logged and never alerted; the container keeps whatever it
    /// showed before.
    pub async fn fetch_images(&mut self) -> Outcome {
        let Some(token) = self.session.token() else {
            self.view.alert(MSG_NOT_LOGGED_IN_IMAGES);
            self.view.navigate(Route::Login);
            return Outcome::Rejected;
        };

        let response = match self.backend.get_images(&token).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching images: {:#}", e);
                return Outcome::Failed;
            }
        };

        let Some(gallery) = self.view.image_container() else {
            warn!("Page has no image container, dropping {} images", response.images.len());
            return Outcome::Succeeded;
        };

        if response.success && !response.images.is_empty() {
            info!("Rendering {} images", response.images.len());
            gallery.replace_images(response.images);
        } else {
            gallery.show_placeholder(NO_IMAGES_PLACEHOLDER);
        }
        Outcome::Succeeded
    }

    /// Click on a gallery item; returns the new selected state
    pub fn toggle_image(&mut self, index: usize) -> Option<bool> {
        self.view.image_container()?.toggle(index)
    }

    /// Send the selected images and dropdown values to the render endpoint
    pub async fn create_video(&mut self) -> Outcome {
        let Some(token) = self.session.token() else {
            self.view.alert(MSG_NOT_LOGGED_IN);
            self.view.navigate(Route::Login);
            return Outcome::Rejected;
        };

        let image_urls = self
            .view
            .image_container()
            .map(|gallery| gallery.selected_urls())
            .unwrap_or_default();
        let options = self.view.video_options().unwrap_or_default();

        info!("Selected image URLs: {:?}", image_urls);
        info!("Selected resolution: {}", options.resolution);
        info!("Selected audio: {}", options.audio_mood);

        let request = CreateVideoRequest {
            image_urls,
            resolution: options.resolution,
            audio_mood: options.audio_mood,
        };

        let video_url = match self.backend.create_video(&token, &request).await {
            Ok(response) if response.success => response.video_url,
            Ok(response) => {
                warn!(
                    "Video creation rejected: {}",
                    response.message.as_deref().unwrap_or("<no message>")
                );
                None
            }
            Err(e) => {
                error!("Error creating video: {:#}", e);
                None
            }
        };

        let Some(video_url) = video_url else {
            self.view.alert(MSG_VIDEO_FAILED);
            return Outcome::Failed;
        };

        info!("Video ready at {}", video_url);
        if let Some(panel) = self.view.video_panel() {
            panel.show_video(&video_url);
        }
        Outcome::Succeeded
    }

    /// Sync the home page sections with the stored username
    pub fn check_logged_in(&mut self) -> Outcome {
        let username = self.session.username();
        let Some(panel) = self.view.session_panel() else {
            return Outcome::Succeeded;
        };

        match username {
            Some(username) => {
                panel.login_section = Display::None;
                panel.logged_in_section = Display::Block;
                panel.username_text = username;
                panel.logout_button = Display::Block;
            }
            None => {
                panel.login_section = Display::Block;
                panel.logged_in_section = Display::None;
                panel.logout_button = Display::None;
            }
        }
        Outcome::Succeeded
    }

    /// Forget the session; the stored pair is removed together or not at all
    pub fn logout(&mut self) -> Outcome {
        if let Err(e) = self.session.clear() {
            error!("Failed to clear session: {:#}", e);
            self.view.alert(MSG_LOGOUT_FAILED);
            self.check_logged_in();
            return Outcome::Failed;
        }
        info!("Logged out");
        self.check_logged_in();
        self.view.navigate(Route::Home);
        Outcome::Succeeded
    }
}
