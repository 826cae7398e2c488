//! View abstraction the controller renders into.
//!
//! A page is a set of optional slots. Which slots exist depends on the route,
//! and the controller only touches the ones that are present, so one
//! controller drives every page.

use crate::video::VideoOptions;

/// Class every gallery item carries
pub const IMAGE_ITEM_CLASS: &str = "image-item";
/// Class toggled on a gallery item when it is picked for the video
pub const SELECTED_CLASS: &str = "selected";
/// Width of an unselected gallery item
pub const DEFAULT_IMAGE_WIDTH: &str = "90%";
/// Width of a selected gallery item
pub const SELECTED_IMAGE_WIDTH: &str = "100%";
/// Text shown in the gallery when there is nothing to list
pub const NO_IMAGES_PLACEHOLDER: &str = "No images to display";
/// File name offered by the download link
pub const DOWNLOAD_FILE_NAME: &str = "YourVideo.mp4";

/// Whether an alert reports a failure, judged by its wording.
///
/// Every front end styles alerts with this one check.
pub fn is_failure_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    ["error", "fail", "invalid", "not logged in", "do not match"]
        .iter()
        .any(|needle| lower.contains(needle))
}

/// Pages of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Signup,
    Video,
}

impl Route {
    /// Server path of the page
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Video => "/video",
        }
    }
}

/// Visibility of a page section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

impl Display {
    pub fn is_visible(&self) -> bool {
        matches!(self, Display::Block)
    }
}

/// Login / logged-in sections of the home page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionPanel {
    pub login_section: Display,
    pub logged_in_section: Display,
    pub username_text: String,
    pub logout_button: Display,
}

impl SessionPanel {
    /// Whether the panel currently shows the logged-in state
    pub fn shows_logged_in(&self) -> bool {
        self.logged_in_section.is_visible() && !self.login_section.is_visible()
    }
}

/// One image in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    src: String,
    selected: bool,
}

impl ImageItem {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            selected: false,
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Flip the selected class, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.selected = !self.selected;
        self.selected
    }

    /// Current width style
    pub fn width(&self) -> &'static str {
        if self.selected {
            SELECTED_IMAGE_WIDTH
        } else {
            DEFAULT_IMAGE_WIDTH
        }
    }

    /// Current class list
    pub fn classes(&self) -> Vec<&'static str> {
        if self.selected {
            vec![IMAGE_ITEM_CLASS, SELECTED_CLASS]
        } else {
            vec![IMAGE_ITEM_CLASS]
        }
    }
}

/// What the image container currently holds
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GalleryContent {
    /// Nothing rendered yet
    #[default]
    Empty,
    Images(Vec<ImageItem>),
    Placeholder(String),
}

/// The image container slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gallery {
    content: GalleryContent,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &GalleryContent {
        &self.content
    }

    /// Replace the contents with one unselected item per URL
    pub fn replace_images<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = GalleryContent::Images(urls.into_iter().map(ImageItem::new).collect());
    }

    /// Replace the contents with a text node
    pub fn show_placeholder(&mut self, text: &str) {
        self.content = GalleryContent::Placeholder(text.to_string());
    }

    pub fn clear(&mut self) {
        self.content = GalleryContent::Empty;
    }

    pub fn items(&self) -> &[ImageItem] {
        match &self.content {
            GalleryContent::Images(items) => items,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Toggle one item; `None` when the index is out of range
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        match &mut self.content {
            GalleryContent::Images(items) => items.get_mut(index).map(ImageItem::toggle),
            _ => None,
        }
    }

    /// URLs of selected items, in gallery order
    pub fn selected_urls(&self) -> Vec<String> {
        self.items()
            .iter()
            .filter(|item| item.is_selected())
            .map(|item| item.src().to_string())
            .collect()
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.content {
            GalleryContent::Placeholder(text) => Some(text),
            _ => None,
        }
    }
}

/// Download anchor under the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: Option<String>,
    pub download: Option<String>,
    pub display: Display,
}

impl Default for DownloadLink {
    fn default() -> Self {
        Self {
            href: None,
            download: None,
            display: Display::None,
        }
    }
}

/// Preview player and download link of the video page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoPanel {
    pub preview_src: Option<String>,
    pub download_link: DownloadLink,
}

impl VideoPanel {
    /// Point the preview and the download link at a rendered video
    pub fn show_video(&mut self, url: &str) {
        self.preview_src = Some(url.to_string());
        self.download_link.href = Some(url.to_string());
        self.download_link.display = Display::Block;
        self.download_link.download = Some(DOWNLOAD_FILE_NAME.to_string());
    }
}

/// Slots of the page currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub session_panel: Option<SessionPanel>,
    pub gallery: Option<Gallery>,
    pub video_options: Option<VideoOptions>,
    pub video_panel: Option<VideoPanel>,
}

impl Page {
    /// Build the slots a route's page has
    pub fn for_route(route: Route) -> Self {
        let mut page = Self {
            route,
            session_panel: None,
            gallery: None,
            video_options: None,
            video_panel: None,
        };
        match route {
            Route::Home => page.session_panel = Some(SessionPanel::default()),
            Route::Video => {
                page.gallery = Some(Gallery::new());
                page.video_options = Some(VideoOptions::default());
                page.video_panel = Some(VideoPanel::default());
            }
            Route::Login | Route::Signup => {}
        }
        page
    }
}

/// Surface the controller renders into.
///
/// Implementors provide alerts, navigation and the current [`Page`]; slot
/// accessors are derived from the page.
pub trait View {
    /// Show a blocking message to the user
    fn alert(&mut self, message: &str);

    /// Leave the current page for `route`
    fn navigate(&mut self, route: Route);

    fn page(&self) -> &Page;

    fn page_mut(&mut self) -> &mut Page;

    fn route(&self) -> Route {
        self.page().route
    }

    fn session_panel(&mut self) -> Option<&mut SessionPanel> {
        self.page_mut().session_panel.as_mut()
    }

    fn image_container(&mut self) -> Option<&mut Gallery> {
        self.page_mut().gallery.as_mut()
    }

    fn video_options(&self) -> Option<VideoOptions> {
        self.page().video_options
    }

    fn video_panel(&mut self) -> Option<&mut VideoPanel> {
        self.page_mut().video_panel.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_wording() {
        assert!(is_failure_message("Passwords do not match!"));
        assert!(is_failure_message("Upload failed: Username already exists"));
        assert!(is_failure_message("Invalid credentials. Please try again."));
        assert!(is_failure_message("You are not logged in. Please log in first."));
        assert!(is_failure_message("Logout failed: the stored session could not be removed."));
        assert!(!is_failure_message("Login successful."));
        assert!(!is_failure_message("Image uploaded successfully"));
        assert!(!is_failure_message("No video yet. Select images and press c to create one."));
    }

    #[test]
    fn test_image_item_toggle_updates_width_and_class() {
        let mut item = ImageItem::new("a.png");
        assert_eq!(item.width(), "90%");
        assert_eq!(item.classes(), vec!["image-item"]);

        assert!(item.toggle());
        assert_eq!(item.width(), "100%");
        assert_eq!(item.classes(), vec!["image-item", "selected"]);

        assert!(!item.toggle());
        assert_eq!(item.width(), "90%");
    }

    #[test]
    fn test_gallery_toggle_out_of_range() {
        let mut gallery = Gallery::new();
        assert_eq!(gallery.toggle(0), None);
        gallery.replace_images(["a.png"]);
        assert_eq!(gallery.toggle(3), None);
        assert_eq!(gallery.toggle(0), Some(true));
    }

    #[test]
    fn test_gallery_selected_urls_keep_order() {
        let mut gallery = Gallery::new();
        gallery.replace_images(["a.png", "b.png", "c.png"]);
        gallery.toggle(2);
        gallery.toggle(0);
        assert_eq!(gallery.selected_urls(), vec!["a.png", "c.png"]);
    }

    #[test]
    fn test_replace_resets_selection() {
        let mut gallery = Gallery::new();
        gallery.replace_images(["a.png"]);
        gallery.toggle(0);
        gallery.replace_images(["a.png"]);
        assert!(gallery.selected_urls().is_empty());
    }

    #[test]
    fn test_video_panel_show_video() {
        let mut panel = VideoPanel::default();
        assert!(!panel.download_link.display.is_visible());

        panel.show_video("http://host/v.mp4");
        assert_eq!(panel.preview_src.as_deref(), Some("http://host/v.mp4"));
        assert_eq!(panel.download_link.href.as_deref(), Some("http://host/v.mp4"));
        assert_eq!(panel.download_link.download.as_deref(), Some("YourVideo.mp4"));
        assert!(panel.download_link.display.is_visible());
    }

    #[test]
    fn test_page_slots_per_route() {
        let home = Page::for_route(Route::Home);
        assert!(home.session_panel.is_some());
        assert!(home.gallery.is_none());

        let video = Page::for_route(Route::Video);
        assert!(video.gallery.is_some());
        assert!(video.video_panel.is_some());
        assert!(video.video_options.is_some());

        let login = Page::for_route(Route::Login);
        assert!(login.session_panel.is_none() && login.gallery.is_none());
    }
}
