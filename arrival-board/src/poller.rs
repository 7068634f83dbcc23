//! The polling loop.
//!
//! Each cycle re-reads the settings file, fetches every enabled feed
//! concurrently, folds the results into the [`BoardState`] and shows the
//! resulting pages one after another.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::alerts::{AlertClient, AlertConfig, AlertError, alert_pages};
use crate::board::{BoardRules, BoardState, BusFetch, CycleInput, DockFetch, TrainFetch};
use crate::cache::{CacheConfig, CachedDivvyClient};
use crate::cta::{CtaClient, CtaConfig, CtaSource, MockCtaClient};
use crate::divvy::{DivvyClient, DivvyConfig, DivvySource, MockDivvyClient, build_dock_reports};
use crate::domain::WordReplacer;
use crate::error::AppError;
use crate::render::{Page, Panel, alert_page_list, record_pages, render};
use crate::retry::RetryPolicy;
use crate::settings::{Credentials, Settings};

/// Configuration for the poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub settings_path: PathBuf,
    /// Serve CTA and Divvy data from fixture files in this directory.
    pub mock_dir: Option<PathBuf>,
    pub retry: RetryPolicy,
    pub cache: CacheConfig,
    /// Request timeout for every live client, in seconds
    pub timeout_secs: u64,
}

impl PollerConfig {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            mock_dir: None,
            retry: RetryPolicy::default(),
            cache: CacheConfig::default(),
            timeout_secs: 15,
        }
    }

    pub fn with_mock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_dir = Some(dir.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Clients built from one version of the settings.
struct Sources {
    /// Settings with sources lacking credentials switched off.
    settings: Settings,
    cta: Option<CtaSource>,
    divvy: Option<DivvySource>,
    alerts: Option<AlertClient>,
    street_names: WordReplacer,
}

impl Sources {
    fn build(
        settings: &Settings,
        credentials: &Credentials,
        config: &PollerConfig,
    ) -> Result<Self, AppError> {
        let settings = effective_settings(settings, credentials, config.mock_dir.is_some());
        let street_names = settings.street_replacer()?;

        let cta = if !settings.train_tracker.enabled && !settings.bus_tracker.enabled {
            None
        } else if let Some(dir) = &config.mock_dir {
            Some(CtaSource::Mock(MockCtaClient::new(dir)?))
        } else {
            let cta_config = CtaConfig::new(
                credentials.train_api_key.clone(),
                credentials.bus_api_key.clone(),
            )
            .with_train_url(&settings.train_tracker.api_url)
            .with_bus_url(&settings.bus_tracker.api_url)
            .with_timeout(config.timeout_secs);
            Some(CtaSource::Live(CtaClient::new(cta_config)?))
        };

        let divvy = if settings.active_docks().is_empty() {
            None
        } else if let Some(dir) = &config.mock_dir {
            Some(DivvySource::Mock(MockDivvyClient::new(dir)?))
        } else {
            let divvy_config = DivvyConfig::new()
                .with_urls(
                    &settings.divvy_tracker.api_station_information_url,
                    &settings.divvy_tracker.api_station_status_url,
                )
                .with_timeout(config.timeout_secs);
            Some(DivvySource::Live(CachedDivvyClient::new(
                DivvyClient::new(divvy_config)?,
                &config.cache,
            )))
        };

        let alerts = match (&credentials.alert_token, settings.tweet_tracker.enabled) {
            (Some(token), true) => Some(AlertClient::new(
                AlertConfig::new(
                    token,
                    &settings.tweet_tracker.api_url,
                    &settings.tweet_tracker.account_id,
                )
                .with_timeout(config.timeout_secs),
            )?),
            _ => None,
        };

        Ok(Self {
            settings,
            cta,
            divvy,
            alerts,
            street_names,
        })
    }
}

/// Turn off sources whose credentials are missing.
fn effective_settings(settings: &Settings, credentials: &Credentials, mock: bool) -> Settings {
    let mut settings = settings.clone();

    if mock {
        if settings.tweet_tracker.enabled {
            info!("Service alerts are not available with mock feeds");
            settings.tweet_tracker.enabled = false;
        }
        return settings;
    }

    if settings.train_tracker.enabled && credentials.train_api_key.is_none() {
        warn!("TRAIN_API_KEY is not set; train tracker disabled");
        settings.train_tracker.enabled = false;
    }
    if settings.bus_tracker.enabled && credentials.bus_api_key.is_none() {
        warn!("BUS_API_KEY is not set; bus tracker disabled");
        settings.bus_tracker.enabled = false;
    }
    if settings.tweet_tracker.enabled && credentials.alert_token.is_none() {
        warn!("TWITTER_API_KEY is not set; service alerts disabled");
        settings.tweet_tracker.enabled = false;
    }
    settings
}

/// Drives the board: fetch, transform, present, repeat.
pub struct Poller<P> {
    config: PollerConfig,
    credentials: Credentials,
    /// Settings as last read from disk.
    loaded: Settings,
    sources: Sources,
    state: BoardState,
    panel: P,
}

impl<P: Panel> Poller<P> {
    /// Read the settings file and build the clients it asks for.
    pub fn new(config: PollerConfig, credentials: Credentials, panel: P) -> Result<Self, AppError> {
        let loaded = Settings::load(&config.settings_path)?;
        let sources = Sources::build(&loaded, &credentials, &config)?;

        info!(
            trains = sources.settings.active_train_stops().len(),
            buses = sources.settings.active_bus_stops().len(),
            docks = sources.settings.active_docks().len(),
            alerts = sources.alerts.is_some(),
            mock = config.mock_dir.is_some(),
            "Board configured"
        );

        Ok(Self {
            config,
            credentials,
            loaded,
            sources,
            state: BoardState::new(),
            panel,
        })
    }

    /// Settings in effect, after credential checks.
    pub fn settings(&self) -> &Settings {
        &self.sources.settings
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Run cycles every `refresh-secs`; a single one when `once` is set.
    pub async fn run(&mut self, once: bool) {
        loop {
            self.run_cycle().await;
            if once {
                break;
            }
            tokio::time::sleep(self.sources.settings.display.refresh()).await;
        }
    }

    /// One full cycle using the local clock.
    pub async fn run_cycle(&mut self) {
        self.reload_settings();
        self.cycle_at(Local::now().naive_local()).await;
    }

    /// One cycle at a fixed time, without reloading settings.
    pub async fn cycle_at(&mut self, now: NaiveDateTime) {
        let (input, alert) = tokio::join!(self.fetch(now), self.fetch_alert());

        let rules = BoardRules::from_settings(&self.sources.settings);
        let (state, records) = std::mem::take(&mut self.state).apply(input, &rules);
        self.state = state;
        debug!(records = records.len(), "Board updated");

        let mut pages = record_pages(&records);
        if let Some(post) = alert {
            pages.extend(alert_page_list(alert_pages(&post)));
        }
        self.present(&pages).await;
    }

    /// Re-read the settings file, keeping the current settings on failure.
    fn reload_settings(&mut self) {
        let path = &self.config.settings_path;
        match Settings::load(path) {
            Ok(settings) if settings == self.loaded => {}
            Ok(settings) => match Sources::build(&settings, &self.credentials, &self.config) {
                Ok(sources) => {
                    info!(path = %path.display(), "Settings changed");
                    self.loaded = settings;
                    self.sources = sources;
                }
                Err(e) => warn!(error = %e, "Keeping previous settings"),
            },
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to reload settings"),
        }
    }

    async fn fetch(&self, now: NaiveDateTime) -> CycleInput {
        let (trains, buses, docks) =
            tokio::join!(self.fetch_trains(), self.fetch_buses(), self.fetch_docks());
        CycleInput {
            now,
            trains,
            buses,
            docks,
        }
    }

    async fn fetch_trains(&self) -> Vec<TrainFetch> {
        let Some(cta) = &self.sources.cta else {
            return Vec::new();
        };
        let retry = &self.config.retry;

        join_all(
            self.sources
                .settings
                .active_train_stops()
                .iter()
                .map(|stop_id| async move {
                    let arrivals = retry
                        .run("train arrivals", || cta.train_arrivals(stop_id))
                        .await
                        .inspect_err(|e| warn!(stop_id = %stop_id, error = %e, "Train arrivals unavailable"))
                        .ok();
                    TrainFetch {
                        stop_id: stop_id.clone(),
                        arrivals,
                    }
                }),
        )
        .await
    }

    async fn fetch_buses(&self) -> Vec<BusFetch> {
        let Some(cta) = &self.sources.cta else {
            return Vec::new();
        };
        let retry = &self.config.retry;

        join_all(
            self.sources
                .settings
                .active_bus_stops()
                .into_iter()
                .map(|(stop_id, route)| async move {
                    let predictions = retry
                        .run("bus predictions", || cta.bus_predictions(&stop_id, &route))
                        .await
                        .inspect_err(|e| {
                            warn!(stop_id = %stop_id, route = %route, error = %e, "Bus predictions unavailable")
                        })
                        .ok();
                    BusFetch {
                        stop_id,
                        route,
                        predictions,
                    }
                }),
        )
        .await
    }

    async fn fetch_docks(&self) -> DockFetch {
        let wanted = self.sources.settings.active_docks();
        let Some(divvy) = &self.sources.divvy else {
            return DockFetch::Skipped;
        };
        if wanted.is_empty() {
            return DockFetch::Skipped;
        }
        let retry = &self.config.retry;

        let (information, status) = tokio::join!(
            retry.run("station information", || divvy.station_information()),
            retry.run("station status", || divvy.station_status()),
        );

        match (information, status) {
            (Ok(information), Ok(status)) => DockFetch::Fresh(build_dock_reports(
                &information,
                &status,
                wanted,
                self.credentials.home,
                &self.sources.street_names,
            )),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Divvy feeds unavailable");
                DockFetch::Failed
            }
        }
    }

    async fn fetch_alert(&self) -> Option<String> {
        let client = self.sources.alerts.as_ref()?;
        match self
            .config
            .retry
            .run("status post", || client.latest_status_post())
            .await
        {
            Ok(post) => Some(post),
            Err(AlertError::NoStatusPost { checked }) => {
                debug!(checked, "No status post among recent posts");
                None
            }
            Err(e) => {
                warn!(error = %e, "Service alert unavailable");
                None
            }
        }
    }

    async fn present(&mut self, pages: &[Page]) {
        if pages.is_empty() {
            info!("Nothing to display");
            return;
        }

        let dwell = self.sources.settings.display.page_dwell();
        let size = self.panel.size();
        self.panel.begin_cycle();

        for (index, page) in pages.iter().enumerate() {
            let rendered = render(page, size);
            if let Err(e) = self.panel.present(&rendered) {
                warn!(page = index + 1, error = %e, "Failed to present page");
            }
            tokio::time::sleep(dwell).await;
        }

        if let Err(e) = self.panel.end_cycle() {
            warn!(error = %e, "Failed to finish cycle");
        }
    }
}
