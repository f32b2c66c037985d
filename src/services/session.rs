//! Search session: the state behind one movie discovery page.
//!
//! A session owns the search term, the debounced term, the last movie list,
//! the fetch status and the trending list. Input goes through a
//! [`Debouncer`]; once the debounced term changes a fetch starts. Every fetch
//! gets a generation number and only the newest generation may write
//! results, so a slow superseded response is dropped. State changes are
//! published on a `watch` channel.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::clients::tmdb::{MovieQuery, TmdbError};
use crate::constants::FETCH_ERROR_MESSAGE;
use crate::debounce::Debouncer;
use crate::models::{MovieRecord, TrendingEntry};
use crate::services::catalog::MovieCatalog;
use crate::services::trending_service::{RecordOutcome, TrendingService};
use crate::services::view::{FetchStatus, ViewState};

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub debounce: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordStats {
    pub recorded: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub search_term: String,
    pub debounced_term: String,
    /// Last successfully fetched list. Kept across failures.
    pub movies: Vec<MovieRecord>,
    pub status: FetchStatus,
    pub trending: Vec<TrendingEntry>,
    /// Generation of the most recently started fetch.
    pub generation: u64,
    pub records: RecordStats,
    pub last_record: Option<RecordOutcome>,
}

impl SessionSnapshot {
    fn new() -> Self {
        Self {
            search_term: String::new(),
            debounced_term: String::new(),
            movies: Vec::new(),
            status: FetchStatus::Idle,
            trending: Vec::new(),
            generation: 0,
            records: RecordStats::default(),
            last_record: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        ViewState::from_parts(&self.status, &self.movies)
    }
}

struct SessionCore {
    catalog: Arc<dyn MovieCatalog>,
    trending: Arc<TrendingService>,
    state: watch::Sender<SessionSnapshot>,
    records: Mutex<JoinSet<RecordOutcome>>,
}

/// Settles its fetch when dropped unresolved, so a fetch task that panics or
/// is cancelled can never leave the session loading.
struct FetchTicket {
    core: Arc<SessionCore>,
    generation: u64,
    resolved: bool,
}

impl FetchTicket {
    fn resolve(mut self, result: Result<Vec<MovieRecord>, String>) {
        self.resolved = true;
        self.core.apply_result(self.generation, result);
    }
}

impl Drop for FetchTicket {
    fn drop(&mut self) {
        if !self.resolved {
            warn!(generation = self.generation, "Fetch ended without a result");
            self.core
                .apply_result(self.generation, Err(FETCH_ERROR_MESSAGE.to_string()));
        }
    }
}

impl SessionCore {
    /// Marks a new fetch as loading and returns its ticket.
    fn begin_fetch(self: &Arc<Self>) -> FetchTicket {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            s.status = FetchStatus::Loading { generation };
        });

        FetchTicket {
            core: Arc::clone(self),
            generation,
            resolved: false,
        }
    }

    fn apply_result(&self, generation: u64, result: Result<Vec<MovieRecord>, String>) {
        self.state.send_if_modified(|s| {
            if s.generation != generation {
                debug!(
                    generation,
                    latest = s.generation,
                    "Dropping superseded fetch result"
                );
                return false;
            }

            match result {
                Ok(movies) => {
                    s.movies = movies;
                    s.status = FetchStatus::Ready;
                }
                Err(message) => {
                    s.status = FetchStatus::Failed(message);
                }
            }
            true
        });
    }

    fn start_fetch(self: &Arc<Self>, term: String) -> u64 {
        let ticket = self.begin_fetch();
        let generation = ticket.generation;
        let core = Arc::clone(self);

        tokio::spawn(async move {
            let query = MovieQuery::from_input(Some(&term));
            let mode = query.mode();

            match core.catalog.fetch_movies(&query).await {
                Ok(movies) => {
                    info!(
                        mode,
                        generation,
                        count = movies.len(),
                        "Movies fetched"
                    );
                    metrics::counter!("cinefind_fetch_total", "mode" => mode, "outcome" => "success")
                        .increment(1);

                    if let (Some(search), Some(top)) = (query.search_term(), movies.first()) {
                        core.schedule_record(search.to_string(), top.clone());
                    }

                    ticket.resolve(Ok(movies));
                }
                Err(e) => {
                    log_fetch_error(mode, generation, &e);
                    metrics::counter!("cinefind_fetch_total", "mode" => mode, "outcome" => "error")
                        .increment(1);
                    ticket.resolve(Err(FETCH_ERROR_MESSAGE.to_string()));
                }
            }
        });

        generation
    }

    fn schedule_record(self: &Arc<Self>, query: String, top_result: MovieRecord) {
        let core = Arc::clone(self);
        let trending = Arc::clone(&self.trending);

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);

        // Outcomes of finished records are already on the snapshot.
        while records.try_join_next().is_some() {}

        records.spawn(async move {
            let outcome = trending.record(&query, &top_result).await;
            core.state.send_modify(|s| {
                if outcome.is_recorded() {
                    s.records.recorded += 1;
                } else {
                    s.records.failed += 1;
                }
                s.last_record = Some(outcome.clone());
            });
            outcome
        });
    }

    fn apply_debounced(self: &Arc<Self>, term: String) {
        let changed = self.state.send_if_modified(|s| {
            if s.debounced_term == term {
                return false;
            }
            s.debounced_term.clone_from(&term);
            true
        });

        if changed {
            debug!(term = %term, "Debounced search term changed");
            self.start_fetch(term);
        }
    }

    fn load_trending(self: &Arc<Self>) {
        let core = Arc::clone(self);
        tokio::spawn(async move {
            match core.trending.load().await {
                Ok(entries) => core.state.send_modify(|s| s.trending = entries),
                Err(e) => warn!(error = %e, "Error fetching trending movies"),
            }
        });
    }
}

fn log_fetch_error(mode: &str, generation: u64, err: &TmdbError) {
    match err {
        TmdbError::Status { status, .. } => {
            error!(mode, generation, status = %status, error = %err, "Fetch error");
        }
        TmdbError::Transport(_) | TmdbError::Decode(_) => {
            error!(mode, generation, error = %err, "Fetch error");
        }
    }
}

pub struct SearchSession {
    core: Arc<SessionCore>,
    debouncer: Debouncer<String>,
}

impl SearchSession {
    /// Creates the session and starts the initial discover fetch and the
    /// trending load. Must be called from within a tokio runtime.
    pub fn mount(
        catalog: Arc<dyn MovieCatalog>,
        trending: Arc<TrendingService>,
        options: SessionOptions,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::new());
        let core = Arc::new(SessionCore {
            catalog,
            trending,
            state,
            records: Mutex::new(JoinSet::new()),
        });

        let debounced = Arc::clone(&core);
        let debouncer = Debouncer::new(options.debounce, move |term: String| {
            debounced.apply_debounced(term);
        });

        core.start_fetch(String::new());
        core.load_trending();
        // Mirrors the debounce armed at mount; the unchanged empty term fetches nothing.
        debouncer.trigger(String::new());

        Self { core, debouncer }
    }

    /// Stores the raw input and restarts the debounce window.
    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.core
            .state
            .send_modify(|s| s.search_term.clone_from(&term));
        self.debouncer.trigger(term);
    }

    /// Fetches again for the current debounced term. Returns the fetch's
    /// generation.
    pub fn refresh(&self) -> u64 {
        let term = self.core.state.borrow().debounced_term.clone();
        self.core.start_fetch(term)
    }

    pub fn reload_trending(&self) {
        self.core.load_trending();
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.core.state.borrow().clone()
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.core.state.borrow().view()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.core.state.subscribe()
    }

    #[must_use]
    pub fn debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Resolves once no fetch is loading.
    pub async fn wait_until_settled(&self) -> SessionSnapshot {
        let mut rx = self.core.state.subscribe();
        match rx.wait_for(|s| !s.status.is_loading()).await {
            Ok(snapshot) => snapshot.clone(),
            // The sender lives in `core`, which `self` keeps alive.
            Err(_) => self.snapshot(),
        }
    }

    /// Waits for every outstanding trending record and returns their
    /// outcomes. Records already reaped are reflected in the snapshot only.
    pub async fn flush_trending(&self) -> Vec<RecordOutcome> {
        let mut pending = {
            let mut records = self
                .core
                .records
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *records)
        };

        let mut outcomes = Vec::new();
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!(error = %e, "Trending record task failed"),
            }
        }
        outcomes
    }

    /// Cancels the pending debounce. In-flight fetches run to completion.
    pub fn unmount(&self) {
        if self.debouncer.cancel() {
            debug!("Pending debounced search cancelled");
        }
    }
}
