//! Thavma Showroom - terminal edition of the Thavma Interiors site
//!
//! Browses the project gallery, sends contact enquiries and runs the admin
//! panel against the showroom REST API.

mod clipboard;
mod config;
mod core;
mod data;
mod frontend;
mod network;
mod session;
mod theme;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::Frontend;
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "showroom")]
#[command(about = "Thavma Interiors showroom and admin panel", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.thavma-showroom)
    /// Can also be set via SHOWROOM_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// API base URL, overriding the config file
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the project gallery
    Projects {
        /// Only show one category (e.g. medical, residential)
        #[arg(long)]
        category: Option<String>,
    },
    /// Sign in as an admin and store the session
    Login {
        #[arg(short, long, default_value = "admin")]
        username: String,
    },
    /// Forget the stored admin session
    Logout,
    /// List contact messages (requires a stored session)
    Messages,
    /// Check the configuration file for errors
    ValidateConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config::Config::base_dir()?,
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG to control level, e.g. RUST_LOG=debug)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::Config::log_path(&data_dir))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!("Using data directory: {:?}", data_dir);

    let mut config = config::Config::load_with_options(Some(data_dir.as_path()), cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        tracing::info!("API URL overridden on the command line: {}", url);
        config.api.base_url = url.trim_end_matches('/').to_string();
    }

    if let Some(command) = cli.command {
        return match command {
            Commands::ValidateConfig => {
                validate_config(&config);
                Ok(())
            }
            Commands::Projects { category } => print_projects(config, category.as_deref()),
            Commands::Login { username } => login(config, &username),
            Commands::Logout => {
                session::SessionStore::new(&config.data_dir).clear()?;
                println!("✓ Signed out");
                Ok(())
            }
            Commands::Messages => print_messages(config),
        };
    }

    config.validate()?;
    run_tui(config)
}

fn validate_config(config: &config::Config) {
    println!("Validating config in {:?}", config.data_dir);
    match config.validate() {
        Ok(()) => {
            println!("✓ Config is valid");
            println!("  API: {}", config.api.base_url);
            println!("  Theme: {}", config.ui.theme);
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}

fn api_client(config: &config::Config) -> Result<network::ApiClient> {
    let client = network::ApiClient::new(
        &config.api.base_url,
        &config.api.login_path,
        config.api.timeout(),
    )?;
    Ok(client)
}

/// One-shot gallery fetch, driven through the same reload hook the TUI uses
fn print_projects(config: config::Config, category: Option<&str>) -> Result<()> {
    use crate::core::gallery::{CategoryFilter, Gallery, LoadState};
    use crate::core::lightbox::KeyListenerRegistry;
    use crate::core::tasks::{self, ApiEvent, ApiRequest};
    use std::time::Instant;
    use tokio::sync::mpsc;

    let client = api_client(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let mut gallery = Gallery::new(config.carousel.gallery_options(), KeyListenerRegistry::new());
    gallery.set_reload_hook(tasks::queue_reload(request_tx));
    gallery.request_reload();

    while let Ok(request) = request_rx.try_recv() {
        match runtime.block_on(tasks::execute(&client, request)) {
            Some(ApiEvent::ProjectsLoaded(Ok(projects))) => gallery.set_projects(projects, Instant::now()),
            Some(ApiEvent::ProjectsLoaded(Err(e))) => gallery.set_failed(&e.message),
            _ => {}
        }
    }

    if let Some(raw) = category {
        let filter = CategoryFilter::Only(data::Category::parse(raw));
        gallery.set_filter(filter, Instant::now());
    }

    if let LoadState::Failed(message) = gallery.state() {
        bail!("{}", message);
    }
    if gallery.items().is_empty() {
        println!("{}", gallery.empty_message());
        return Ok(());
    }

    println!("{} ({})", data::site::GALLERY_HEADING, gallery.filter().label());
    for item in gallery.items() {
        let project = &item.project;
        println!();
        println!("  {}  [{}]", project.title, project.category);
        println!("    {}", project.description);
        match project.cover_image() {
            Some(cover) => println!("    {} image(s), cover {}", project.images.len(), cover),
            None => println!("    no images"),
        }
    }
    Ok(())
}

fn login(config: config::Config, username: &str) -> Result<()> {
    let client = api_client(&config)?;
    let password = rpassword::prompt_password(format!("Password for {}: ", username))
        .context("Failed to read password")?;

    let runtime = tokio::runtime::Runtime::new()?;
    let reply = runtime
        .block_on(client.login(username, &password))
        .context("Login failed")?;

    let session = session::Session::new(reply.token, reply.username.or_else(|| Some(username.to_string())));
    session::SessionStore::new(&config.data_dir).save(&session)?;
    println!("✓ Signed in as {}", session.username);
    Ok(())
}

fn print_messages(config: config::Config) -> Result<()> {
    let store = session::SessionStore::new(&config.data_dir);
    let Some(stored) = store.load() else {
        bail!("Not signed in; run `showroom login` first");
    };

    let client = api_client(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let messages = runtime.block_on(async {
        client.set_token(Some(stored.token.clone())).await;
        client.get_contact_messages().await
    });

    let messages = match messages {
        Ok(messages) => messages,
        Err(e) if e.is_unauthorized() => {
            store.clear()?;
            bail!("Session expired; run `showroom login` again");
        }
        Err(e) => return Err(e.into()),
    };

    if messages.is_empty() {
        println!("No messages yet");
        return Ok(());
    }
    for message in &messages {
        let date = message
            .created_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "[{}] {}  {} <{}>  {}",
            message.status.label(),
            date,
            message.name,
            message.email,
            message.phone
        );
        println!("    {}", message.message.replace('\n', "\n    "));
        if let Some(response) = &message.response {
            println!("    ↳ {}", response.replace('\n', "\n      "));
        }
    }
    Ok(())
}

fn run_tui(config: config::Config) -> Result<()> {
    // Use tokio runtime for async network I/O
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config))
}

/// Async TUI main loop with network support
async fn async_run_tui(config: config::Config) -> Result<()> {
    use crate::core::input_router::{is_form_mode, route_input, Action, RouteContext};
    use crate::core::tasks::{ApiDispatcher, ApiEvent, ApiRequest};
    use crate::core::AppCore;
    use frontend::{FrontendEvent, TuiFrontend};
    use std::time::Instant;
    use tokio::sync::mpsc;

    let client = api_client(&config)?;
    let session_store = session::SessionStore::new(&config.data_dir);

    // The restored token must be on the client before the first request goes out
    if let Some(stored) = session_store.load() {
        client.set_token(Some(stored.token)).await;
    }

    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ApiEvent>();
    let dispatcher = ApiDispatcher::new(client, event_tx);

    let theme = theme::ThemePresets::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!("Unknown theme '{}', using dark", config.ui.theme);
        theme::ThemePresets::dark()
    });
    let poll_timeout = config.ui.poll_timeout();

    let mut app_core = AppCore::new(config, session_store, request_tx, Instant::now());

    let mut frontend = TuiFrontend::new(theme)?;
    let (width, height) = frontend.size();
    tracing::info!("TUI started at {}x{}", width, height);

    // Main event loop
    while app_core.running {
        // Wake in time for the next autoplay step
        let wait = app_core
            .gallery
            .next_tick_at()
            .map(|at| at.saturating_duration_since(Instant::now()))
            .map_or(poll_timeout, |d| d.min(poll_timeout));
        frontend.set_poll_timeout(wait);

        let events = frontend.poll_events()?;
        let now = Instant::now();

        for event in events {
            match event {
                FrontendEvent::Key { .. } => {
                    let Some(key) = event.as_key_event() else {
                        continue;
                    };
                    let action = route_input(
                        key,
                        RouteContext {
                            mode: &app_core.ui.input_mode,
                            section: app_core.ui.section,
                            logged_in: app_core.admin.is_logged_in(),
                            admin_tab: app_core.admin.tab,
                        },
                    );

                    // Form keys belong to the widget; only Ctrl+C routes globally
                    if matches!(action, Action::None) && is_form_mode(&app_core.ui.input_mode) {
                        let forms = frontend.forms_mut();
                        forms.sync(&mut app_core);
                        forms.handle_key(key, &mut app_core, now);
                    } else {
                        app_core.handle_action(action, now);
                    }
                }
                FrontendEvent::Paste { text } => {
                    frontend.forms_mut().handle_paste(&text, &mut app_core);
                }
                FrontendEvent::Resize { width, height } => {
                    tracing::debug!("Terminal resized to {}x{}", width, height);
                }
                FrontendEvent::Quit => app_core.running = false,
            }
        }

        while let Ok(api_event) = event_rx.try_recv() {
            app_core.apply_api_event(api_event, Instant::now());
        }

        while let Ok(request) = request_rx.try_recv() {
            dispatcher.dispatch(request);
        }

        app_core.tick(Instant::now());
        frontend.render(&mut app_core)?;
    }

    frontend.cleanup()?;
    tracing::info!("Showroom closed");
    Ok(())
}
