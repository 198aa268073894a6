use std::time::Duration;

use api_types::chart::ChartSpec;
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::Currency;

use crate::{
    charts::{ChartSet, DashboardView},
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    loader,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Categories,
    Totals,
    Gains,
}

impl ChartKind {
    pub const ALL: [Self; 3] = [Self::Categories, Self::Totals, Self::Gains];

    pub fn label(self) -> &'static str {
        match self {
            Self::Categories => "Por categoria",
            Self::Totals => "Totais",
            Self::Gains => "Rendimento",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Categories => Self::Totals,
            Self::Totals => Self::Gains,
            Self::Gains => Self::Categories,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Categories => Self::Gains,
            Self::Totals => Self::Categories,
            Self::Gains => Self::Totals,
        }
    }

    pub fn spec(self, charts: &ChartSet) -> &ChartSpec {
        match self {
            Self::Categories => &charts.bar_chart,
            Self::Totals => &charts.line_chart,
            Self::Gains => &charts.gain_chart,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub source: String,
    pub currency: Currency,
    /// `None` until a load succeeds, and again after a failed reload.
    pub dashboard: Option<DashboardView>,
    pub selected: ChartKind,
    pub last_refresh: Option<DateTime<Local>>,
}

impl AppState {
    fn new(config: &AppConfig) -> Self {
        Self {
            source: config.source.clone(),
            currency: config.currency,
            dashboard: None,
            selected: ChartKind::Categories,
            last_refresh: None,
        }
    }

    fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::NextChart => self.selected = self.selected.next(),
            AppAction::PrevChart => self.selected = self.selected.prev(),
            AppAction::SelectChart(index) => {
                if let Some(kind) = ChartKind::ALL.get(index) {
                    self.selected = *kind;
                }
            }
            AppAction::Quit | AppAction::Reload | AppAction::None => {}
        }
    }
}

pub struct App {
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            state: AppState::new(config),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.reload().await;
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await;
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Reload => self.reload().await,
            action => self.state.apply(action),
        }
    }

    /// Loads the source again; on failure the dashboard falls back to the
    /// empty state and the error goes to the log.
    async fn reload(&mut self) {
        match loader::load_dashboard(&self.client, &self.state.source).await {
            Ok(series) => {
                self.state.dashboard = Some(DashboardView::new(&series, self.state.currency));
                self.state.last_refresh = Some(Local::now());
            }
            Err(err) => {
                tracing::error!("failed to load {}: {err}", self.state.source);
                self.state.dashboard = None;
            }
        }
    }
}
