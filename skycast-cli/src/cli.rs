use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Select, Text};
use skycast_core::{App, ClickTarget, Config};

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Place search and weather forecasts from Open-Meteo")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the settings file interactively.
    Configure,

    /// List places matching a query.
    Search {
        query: String,
    },

    /// Show current weather and forecast for a place.
    Show {
        /// Place name; the best match is used unless --pick is given.
        query: String,

        /// Choose among the matches interactively.
        #[arg(long)]
        pick: bool,
    },

    /// Show weather for your position.
    Here {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// Start with the default place, then search repeatedly.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        tracing::debug!(?config, "loaded configuration");

        match self.command {
            Command::Configure => blocking(move || configure(config)).await??,
            Command::Search { query } => {
                let app = App::from_config(&config)?;
                search(&app, &query).await;

                let view = app.snapshot();
                if view.suggestions.is_visible() {
                    print!("{}", display::suggestions(&view)?);
                } else {
                    println!("{}", display::status_line(&view));
                }
            }
            Command::Show { query, pick } => {
                let app = App::from_config(&config)?;
                search(&app, &query).await;

                let view = app.snapshot();
                if !view.suggestions.is_visible() {
                    bail!("{}", view.status.text);
                }

                let index = if pick { pick_suggestion(&app).await? } else { Some(0) };
                if let Some(index) = index {
                    app.choose_suggestion(index).await;
                    print_weather(&app)?;
                }
            }
            Command::Here { lat, lon } => {
                if let (Some(lat), Some(lon)) = (lat, lon) {
                    config.set_location(lat, lon)?;
                }
                let app = App::from_config(&config)?;
                app.use_location().await;
                print_weather(&app)?;
            }
            Command::Interactive => interactive(&App::from_config(&config)?).await?,
        }

        Ok(())
    }
}

/// Each submitted line replaces the whole input, so the field is cleared first
/// and re-entering the previous query searches again.
async fn search(app: &App, query: &str) {
    app.on_input("");
    app.on_input(query);
    app.flush_search().await;
}

fn print_weather(app: &App) -> anyhow::Result<()> {
    let view = app.snapshot();
    print!("{}", display::weather_card(&view)?);
    println!("{}", display::status_line(&view));
    Ok(())
}

/// Run a terminal prompt off the async workers; pending timers keep running meanwhile.
async fn blocking<T, F>(prompt: F) -> anyhow::Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(prompt)
        .await
        .context("Prompt task failed")
}

/// Let the user choose a suggestion. Escape dismisses the list like an outside click.
async fn pick_suggestion(app: &App) -> anyhow::Result<Option<usize>> {
    let labels = app.snapshot().suggestions.labels();
    let picked = blocking(move || Select::new("Pick a place:", labels).raw_prompt_skippable())
        .await?
        .context("Failed to read place selection")?;

    match picked {
        Some(option) => Ok(Some(option.index)),
        None => {
            app.on_click(ClickTarget::Elsewhere);
            Ok(None)
        }
    }
}

async fn interactive(app: &App) -> anyhow::Result<()> {
    app.startup().await;
    print_weather(app)?;

    loop {
        let prompt = blocking(|| {
            Text::new("Search:")
                .with_help_message("empty line to quit, @ for your location")
                .prompt()
        });
        let input = match prompt.await? {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search input"),
        };

        let input = input.trim();
        if input.is_empty() {
            break;
        }
        if input == "@" {
            app.use_location().await;
            print_weather(app)?;
            continue;
        }

        search(app, input).await;
        let view = app.snapshot();
        if !view.suggestions.is_visible() {
            println!("{}", display::status_line(&view));
            continue;
        }

        if let Some(index) = pick_suggestion(app).await? {
            app.choose_suggestion(index).await;
            print_weather(app)?;
        }
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.default_place = Text::new("Place to show on startup:")
        .with_default(&config.default_place)
        .prompt()?;

    config.language = Text::new("Language for place names:")
        .with_default(&config.language)
        .prompt()?;

    config.result_count = CustomType::<u8>::new("Number of suggestions to request:")
        .with_default(config.result_count)
        .prompt()?;

    config.debounce_ms = CustomType::<u64>::new("Search debounce in milliseconds:")
        .with_default(config.debounce_ms)
        .prompt()?;

    let pin = Confirm::new("Pin a position for `skycast here`?")
        .with_default(config.location.is_some())
        .prompt()?;

    if pin {
        let current = config.location;
        let lat = CustomType::<f64>::new("Latitude:")
            .with_default(current.map_or(0.0, |l| l.latitude))
            .prompt()?;
        let lon = CustomType::<f64>::new("Longitude:")
            .with_default(current.map_or(0.0, |l| l.longitude))
            .prompt()?;
        config.set_location(lat, lon)?;
    } else {
        config.location = None;
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
