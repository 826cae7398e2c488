use crate::api::UploadFile;
use crate::cli::common::{
    print_error, print_info, print_success, print_warning, prompt_password, require_value,
    runtime, CliContext,
};
use crate::controller::Outcome;
use crate::session::SessionStore;
use crate::styles::{init_theme, ThemeType};
use crate::video::{AudioMood, Resolution};
use crate::view::{GalleryContent, Route, View};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use indoc::indoc;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Terminal client for the montage photo-to-video service
#[derive(Parser, Debug)]
#[command(name = "montage", version, about = "Turn your photos into videos from the terminal", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server URL for this invocation (overrides config and MONTAGE_SERVER_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Disable colors in the studio (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account
    Signup {
        /// Username to register
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Log in and remember the session
    Login {
        /// Username to log in with
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show who is logged in
    Status,
    /// Upload a JPG, JPEG or PNG image
    Upload {
        /// Image file to upload
        path: PathBuf,
    },
    /// List your uploaded images
    Images,
    /// Render a video from your images
    Video {
        /// Images to include, by number from `montage images` (e.g. 1,3,4)
        #[arg(short, long, value_delimiter = ',', required_unless_present = "all")]
        select: Vec<usize>,
        /// Include every image
        #[arg(long, conflicts_with = "select")]
        all: bool,
        /// Output resolution (defaults to the configured one)
        #[arg(short, long, value_enum)]
        resolution: Option<Resolution>,
        /// Background music mood (defaults to the configured one)
        #[arg(short, long, value_enum)]
        mood: Option<AudioMood>,
        /// Save the rendered video to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Save the rendered video under the configured download name
        #[arg(short, long)]
        download: bool,
    },
    /// Open the interactive video studio
    Studio,
    /// Configuration file location
    Config,
    /// Shows logs location and how to view them
    Logs,
    /// Generate shell completions
    Completions {
        /// Shell to generate for (detected from $SHELL when omitted)
        #[arg(value_enum)]
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        let server = self.server;
        match self.command {
            Some(Commands::Signup { username }) => Self::cmd_signup(server, username),
            Some(Commands::Login { username }) => Self::cmd_login(server, username),
            Some(Commands::Logout) => Self::cmd_logout(server),
            Some(Commands::Status) => Self::cmd_status(server),
            Some(Commands::Upload { path }) => Self::cmd_upload(server, path),
            Some(Commands::Images) => Self::cmd_images(server),
            Some(Commands::Video {
                select,
                all,
                resolution,
                mood,
                output,
                download,
            }) => Self::cmd_video(
                server,
                VideoArgs {
                    select,
                    all,
                    resolution,
                    mood,
                    output,
                    download,
                },
            ),
            Some(Commands::Studio) => Self::cmd_studio(server, self.no_colors),
            Some(Commands::Config) => Self::cmd_config(),
            Some(Commands::Logs) => Self::cmd_logs(),
            Some(Commands::Completions { shell }) => {
                crate::cli::completions::generate(shell)?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                Self::print_all_commands();
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    fn context(server: Option<String>) -> Result<CliContext> {
        let mut ctx = CliContext::load()?;
        if let Some(url) = server.filter(|url| !url.trim().is_empty()) {
            ctx.server_url = url.trim().to_string();
        }
        Ok(ctx)
    }

    /// Exit non-zero when a handler did not succeed; its alert was already printed
    fn finish(outcome: Outcome) -> Result<ExitCode> {
        Ok(if outcome.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }

    fn cmd_signup(server: Option<String>, username: Option<String>) -> Result<ExitCode> {
        info!("CLI: signup command executed");
        let ctx = Self::context(server)?;
        let username = require_value(username, "Username")?;
        let password = prompt_password("Password")?;
        let confirm_password = prompt_password("Confirm password")?;

        let mut controller = ctx.controller(Route::Signup)?;
        let rt = runtime()?;
        let outcome = rt.block_on(controller.handle_sign_up(&username, &password, &confirm_password));
        if outcome.is_success() {
            print_info(&format!("Now log in with `montage login -u {}`.", username));
        }
        Self::finish(outcome)
    }

    fn cmd_login(server: Option<String>, username: Option<String>) -> Result<ExitCode> {
        info!("CLI: login command executed");
        let ctx = Self::context(server)?;
        let username = require_value(username, "Username")?;
        let password = prompt_password("Password")?;

        let mut controller = ctx.controller(Route::Login)?;
        let rt = runtime()?;
        let outcome = rt.block_on(controller.handle_login(&username, &password));
        Self::finish(outcome)
    }

    fn cmd_logout(server: Option<String>) -> Result<ExitCode> {
        info!("CLI: logout command executed");
        let ctx = Self::context(server)?;
        let mut controller = ctx.controller(Route::Home)?;
        let was_logged_in = controller.session().username().is_some();
        if !controller.logout().is_success() {
            return Ok(ExitCode::FAILURE);
        }

        if was_logged_in {
            print_success("Logged out.");
        } else {
            print_info("No session was stored.");
        }
        Ok(ExitCode::SUCCESS)
    }

    fn cmd_status(server: Option<String>) -> Result<ExitCode> {
        let ctx = Self::context(server)?;
        let mut controller = ctx.controller(Route::Home)?;
        let rt = runtime()?;
        rt.block_on(controller.on_page_load());

        println!("Server: {}", ctx.server_url);
        match controller.view_mut().session_panel() {
            Some(panel) if panel.shows_logged_in() => {
                print_success(&format!("Logged in as {}", panel.username_text));
            }
            _ => print_info("Not logged in. Run `montage login` to sign in."),
        }
        Ok(ExitCode::SUCCESS)
    }

    fn cmd_upload(server: Option<String>, path: PathBuf) -> Result<ExitCode> {
        info!("CLI: upload command executed for {:?}", path);
        let ctx = Self::context(server)?;
        let path = crate::utils::expand_path(&path.to_string_lossy());
        let file = UploadFile::from_path(&path);

        // Only readable files get past the extension check to the network
        if crate::utils::is_allowed_image(file.name()) && !path.is_file() {
            print_error(&format!("File not found: {}", path.display()));
            return Ok(ExitCode::FAILURE);
        }

        let mut controller = ctx.controller(Route::Home)?;
        let rt = runtime()?;
        let outcome = rt.block_on(controller.upload_file(&file));
        Self::finish(outcome)
    }

    fn cmd_images(server: Option<String>) -> Result<ExitCode> {
        let ctx = Self::context(server)?;
        let mut controller = ctx.controller(Route::Video)?;
        let rt = runtime()?;
        let outcome = rt.block_on(controller.on_page_load());
        if !outcome.is_success() {
            return Ok(ExitCode::FAILURE);
        }

        if let Some(gallery) = controller.view_mut().image_container() {
            print_gallery(gallery.content());
        }
        Ok(ExitCode::SUCCESS)
    }

    fn cmd_video(server: Option<String>, args: VideoArgs) -> Result<ExitCode> {
        info!("CLI: video command executed");
        let ctx = Self::context(server)?;
        let mut controller = ctx.controller(Route::Video)?;
        let rt = runtime()?;

        let outcome = rt.block_on(controller.on_page_load());
        if !outcome.is_success() {
            return Ok(ExitCode::FAILURE);
        }

        let count = controller
            .view_mut()
            .image_container()
            .map_or(0, |gallery| gallery.len());
        if count == 0 {
            print_warning("You have no images yet. Upload some with `montage upload <FILE>`.");
            return Ok(ExitCode::FAILURE);
        }

        let indices: Vec<usize> = if args.all {
            (0..count).collect()
        } else {
            let mut indices = Vec::new();
            for number in &args.select {
                if *number == 0 || *number > count {
                    print_error(&format!(
                        "No image #{} (you have {} image(s), numbered from 1)",
                        number, count
                    ));
                    return Ok(ExitCode::FAILURE);
                }
                let index = number - 1;
                if indices.contains(&index) {
                    warn!("Image #{} selected twice", number);
                    continue;
                }
                indices.push(index);
            }
            indices
        };

        for index in indices {
            controller.toggle_image(index);
        }

        if let Some(options) = controller.view_mut().page_mut().video_options.as_mut() {
            options.resolution = args.resolution.unwrap_or(ctx.config.default_resolution);
            options.audio_mood = args.mood.unwrap_or(ctx.config.default_audio_mood);
        }

        println!("🎬 Rendering video (this can take a while)...");
        let outcome = rt.block_on(controller.create_video());
        if !outcome.is_success() {
            return Ok(ExitCode::FAILURE);
        }

        let video_url = controller
            .view_mut()
            .video_panel()
            .and_then(|panel| panel.download_link.href.clone())
            .context("Video panel missing after render")?;
        print_success(&format!("Video ready: {}", video_url));

        let dest = match (args.output, args.download) {
            (Some(path), _) => Some(crate::utils::expand_path(&path.to_string_lossy())),
            (None, true) => Some(crate::utils::expand_path(&ctx.config.download_name)),
            (None, false) => None,
        };

        if let Some(dest) = dest {
            let bytes = rt
                .block_on(controller.backend().download(&video_url, &dest))
                .context("Failed to download video")?;
            print_success(&format!(
                "Saved {} ({} bytes)",
                crate::utils::format_path_for_display(&dest),
                bytes
            ));
        }
        Ok(ExitCode::SUCCESS)
    }

    fn cmd_studio(server: Option<String>, no_colors: bool) -> Result<ExitCode> {
        info!("CLI: studio command executed");
        let ctx = Self::context(server)?;

        let theme_type = if no_colors || std::env::var_os("NO_COLOR").is_some() {
            ThemeType::NoColor
        } else {
            ctx.config.theme.parse().unwrap_or_default()
        };
        init_theme(theme_type);
        crate::tui::setup_panic_hook();

        let mut app = crate::studio::StudioApp::new(ctx.config, &ctx.server_url)?;
        if let Some(message) = app.run()? {
            print_info(&message);
        }
        Ok(ExitCode::SUCCESS)
    }

    fn cmd_config() -> Result<ExitCode> {
        let config_path = crate::utils::get_config_path();
        println!("{}", config_path.display());
        Ok(ExitCode::SUCCESS)
    }

    fn cmd_logs() -> Result<ExitCode> {
        let log_file = crate::utils::get_log_path();
        println!("{}", log_file.display());
        println!("View logs in real-time: tail -f {:?}", log_file);
        Ok(ExitCode::SUCCESS)
    }

    fn print_all_commands() {
        println!(
            "{}",
            indoc! {"
                montage - turn your photos into videos

                Getting started:
                  montage signup            Create an account
                  montage login             Log in and remember the session
                  montage upload <FILE>     Upload a JPG, JPEG or PNG image
                  montage images            List your uploaded images
                  montage video -s 1,2      Render a video from images 1 and 2
                  montage studio            Pick images interactively

                Session:
                  montage status            Show who is logged in
                  montage logout            Forget the stored session

                Run `montage --help` for every command and option.
            "}
        );
    }
}

/// Arguments of `montage video`
#[derive(Debug)]
struct VideoArgs {
    select: Vec<usize>,
    all: bool,
    resolution: Option<Resolution>,
    mood: Option<AudioMood>,
    output: Option<PathBuf>,
    download: bool,
}

/// Numbered gallery listing, or the placeholder text
fn print_gallery(content: &GalleryContent) {
    match content {
        GalleryContent::Images(items) => {
            for (i, item) in items.iter().enumerate() {
                println!("{:>3}. {}", i + 1, item.src());
            }
        }
        GalleryContent::Placeholder(text) => println!("{}", text),
        GalleryContent::Empty => {}
    }
}
