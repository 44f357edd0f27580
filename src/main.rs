//! Weather TUI - current conditions from OpenWeatherMap

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_app::action::Action;
use weather_app::api::{self, WeatherClient};
use weather_app::calendar;
use weather_app::components::{
    Component, SearchOverlay, SearchOverlayProps, WeatherPanel, WeatherPanelProps,
};
use weather_app::config::{self, AppConfig, GeolocationSource};
use weather_app::effect::Effect;
use weather_app::geolocation::{self, Geolocator};
use weather_app::history::{self, SearchHistory};
use weather_app::reducer::reducer;
use weather_app::state::{
    AppState, DEFAULT_CITY, LOADING_ANIM_TICK_MS, PanelSettings, UnitPreference, WeatherReport,
};

/// Weather TUI - look up current conditions by city
#[derive(Parser, Debug)]
#[command(name = "weather-app")]
#[command(about = "Current weather for a city, with day/night theming and recent searches")]
struct Args {
    /// City used when the start-up position cannot be resolved
    #[arg(long, short, default_value = DEFAULT_CITY)]
    city: String,

    /// Unit system for temperatures and wind speed
    #[arg(long, short, value_enum, default_value = "metric")]
    units: UnitPreference,

    /// Resolve the start-up position from the public IP address
    #[arg(long)]
    locate: bool,

    /// Start-up latitude (takes precedence over --locate)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Start-up longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Current-weather endpoint
    #[arg(long, default_value = api::DEFAULT_BASE_URL)]
    api_url: String,

    /// Where recent searches are kept
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long, env = "WEATHER_LOG")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn split(self) -> (AppConfig, Option<PathBuf>, DebugCliArgs) {
        let config = AppConfig {
            api_key: self.api_key,
            api_url: self.api_url,
            default_city: self.city,
            unit: self.units,
            history_path: self
                .history_file
                .unwrap_or_else(config::default_history_path),
            geolocation: GeolocationSource::from_flags(self.lat, self.lon, self.locate),
        };
        (config, self.log_file, self.debug)
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Panel,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Main,
    Search,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        if self.search_mode {
            Some(WeatherComponentId::Search)
        } else {
            Some(WeatherComponentId::Panel)
        }
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        if self.search_mode {
            Some(WeatherComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: WeatherComponentId) -> WeatherContext {
        match id {
            WeatherComponentId::Panel => WeatherContext::Main,
            WeatherComponentId::Search => WeatherContext::Search,
        }
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

/// Everything effect tasks need, cheap to clone into each task
#[derive(Clone)]
struct Services {
    client: WeatherClient,
    geolocator: Arc<dyn Geolocator>,
    history_path: Arc<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    // The terminal belongs to the UI; without a file, logs go nowhere
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let (config, log_file, debug_args) = Args::parse().split();
    init_logging(log_file.as_ref())?;

    if config.api_key.is_none() {
        warn!("OPENWEATHER_API_KEY is not set; the provider will reject requests");
    }
    info!(
        history = %config.history_path.display(),
        geolocation = ?config.geolocation,
        "starting"
    );

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let history_path = config.history_path.clone();
    let settings = PanelSettings {
        unit: config.unit,
        default_city: config.default_city.clone(),
        is_ramadan: calendar::is_ramadan_today(),
        history: SearchHistory::default(),
    };
    let state = debug
        .load_state_or_else_async(move || async move {
            let history = match history::load(&history_path).await {
                Ok(history) => history,
                Err(e) => {
                    warn!(path = %history_path.display(), error = %e, "ignoring unreadable history");
                    SearchHistory::default()
                }
            };
            Ok::<AppState, io::Error>(AppState::new(PanelSettings { history, ..settings }))
        })
        .await
        .map_err(debug_error)?;

    let services = Services {
        client: config.weather_client(),
        geolocator: config.geolocation.geolocator(),
        history_path: Arc::new(config.history_path.clone()),
    };

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, services, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// The shell: exactly one weather panel plus its search overlay
struct WeatherUi {
    panel: WeatherPanel,
    search: SearchOverlay,
}

impl WeatherUi {
    fn new() -> Self {
        Self {
            panel: WeatherPanel,
            search: SearchOverlay::new(),
        }
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> SearchOverlayProps<'a> {
        SearchOverlayProps {
            query: &state.search_query,
            recent: state.history.entries(),
            selected: state.search_selected,
            is_focused,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::WeatherSearch,
            on_select: Action::SearchSelect,
            on_pick: Action::HistoryPick,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        event_ctx.set_component_area(WeatherComponentId::Panel, area);

        let props = WeatherPanelProps {
            state,
            is_focused: render_ctx.is_focused() && !state.search_mode,
        };
        self.panel.render(frame, area, props);

        self.search.set_open(state.search_mode);
        if state.search_mode {
            let modal_area = centered_rect(60, 12, area);
            event_ctx.set_component_area(WeatherComponentId::Search, modal_area);
            let props = Self::search_props(state, render_ctx.is_focused());
            self.search.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&WeatherComponentId::Search);
        }
    }

    fn handle_panel_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherPanelProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .panel
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.search.set_open(state.search_mode);
        let props = Self::search_props(state, true);
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    services: Services,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new()));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_panel = Rc::clone(&ui);
    bus.register(WeatherComponentId::Panel, move |event, state| {
        ui_panel.borrow_mut().handle_panel_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(WeatherComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::GeoLocate),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect: Effect, ctx: &mut EffectContext<Action>| {
                handle_effect(effect, ctx, &services)
            },
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::FetchWeather { city, unit } => {
            let client = services.client.clone();
            // A newer search replaces the in-flight one under the same key
            ctx.tasks().spawn("weather", async move {
                match client.current_by_city(&city, unit).await {
                    Ok(payload) => {
                        info!(city = %city, units = unit.token(), "weather loaded");
                        Action::WeatherDidLoad(WeatherReport::received_now(payload.into_reading()))
                    }
                    Err(e) => {
                        warn!(city = %city, error = %e, "weather search failed");
                        Action::WeatherDidError(e.to_string())
                    }
                }
            });
        }
        Effect::Locate { unit } => {
            let client = services.client.clone();
            let geolocator = Arc::clone(&services.geolocator);
            ctx.tasks().spawn("geolocation", async move {
                match geolocation::resolve_city(geolocator.as_ref(), &client, unit).await {
                    Ok(city) => {
                        info!(city = %city, "start-up position resolved");
                        Action::GeoDidResolve(city)
                    }
                    Err(e) => {
                        info!(reason = %e, "no start-up position, using default city");
                        Action::GeoDidFail(e.to_string())
                    }
                }
            });
        }
        Effect::SaveHistory { entries } => {
            let path = Arc::clone(&services.history_path);
            ctx.tasks().spawn("history", async move {
                match history::save(&path, &entries).await {
                    Ok(()) => Action::HistoryDidSave,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to save history");
                        Action::HistoryDidError(e.to_string())
                    }
                }
            });
        }
    }
}
