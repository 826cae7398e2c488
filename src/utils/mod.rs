pub mod file_validation;
pub mod layout;
pub mod path;

// Export utilities that are used
pub use file_validation::{is_allowed_image, ALLOWED_IMAGE_EXTENSIONS};
pub use layout::{center_popup, create_split_layout, create_standard_layout};
pub use path::{
    expand_path, format_path_for_display, get_config_dir, get_config_path, get_home_dir,
    get_log_dir, get_log_path, get_session_path,
};
