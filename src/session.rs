//! In-memory dashboard state and request sequencing.
//!
//! Every selection fetch gets a [`Ticket`] from a monotonically increasing counter.
//! A response is applied only if its ticket is still the latest one issued, so a
//! slow response for an earlier selection can never overwrite a newer one.

use crate::api::{Client, SelectedStats};
use crate::map::MapView;
use crate::models::{CasesType, CountryOption, CountryStat, Selection, Snapshot, country_options};
use crate::sort::sort_data;
use anyhow::Result;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Sequence number of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    pub fn latest(&self) -> Option<Ticket> {
        (self.latest > 0).then_some(Ticket(self.latest))
    }
}

/// Result of one background selection fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: Ticket,
    pub selection: Selection,
    pub result: Result<SelectedStats>,
}

/// Runs selection fetches on worker threads and hands results back over a channel.
#[derive(Debug)]
pub struct BackgroundFetch {
    tx: mpsc::Sender<FetchOutcome>,
    rx: mpsc::Receiver<FetchOutcome>,
}

impl Default for BackgroundFetch {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl BackgroundFetch {
    pub fn spawn<F>(&self, ticket: Ticket, selection: Selection, fetch: F)
    where
        F: FnOnce(&Selection) -> Result<SelectedStats> + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = fetch(&selection);
            // Receiver gone means the dashboard was dropped; nothing to report to.
            let _ = tx.send(FetchOutcome {
                ticket,
                selection,
                result,
            });
        });
    }

    fn try_recv(&self) -> Option<FetchOutcome> {
        self.rx.try_recv().ok()
    }

    fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Everything the views render from.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub selection: Selection,
    pub country_info: Snapshot,
    /// Sorted by cases, largest first.
    pub table_data: Vec<CountryStat>,
    /// As received from the API.
    pub map_countries: Vec<CountryStat>,
    pub countries: Vec<CountryOption>,
    pub map_view: MapView,
    pub cases_type: CasesType,
    sequencer: RequestSequencer,
    background: BackgroundFetch,
    /// Latest ticket whose response has been handled, and whether it was applied.
    resolved: Option<(Ticket, bool)>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the country list wholesale.
    pub fn load_countries(&mut self, countries: Vec<CountryStat>) {
        self.table_data = sort_data(&countries);
        self.countries = country_options(&countries);
        self.map_countries = countries;
    }

    pub fn set_cases_type(&mut self, kind: CasesType) {
        self.cases_type = kind;
    }

    pub fn begin_selection(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequencer.is_current(ticket)
    }

    /// Apply a selection response. Returns `false` (and changes nothing) if a newer
    /// request has been issued since `ticket`.
    pub fn apply_selection(
        &mut self,
        ticket: Ticket,
        selection: Selection,
        stats: SelectedStats,
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            log::debug!(
                "dropping stale response #{} for {} (latest is #{:?})",
                ticket.seq(),
                selection,
                self.sequencer.latest().map(Ticket::seq)
            );
            return false;
        }
        if let Some(info) = stats.country_info.as_ref() {
            self.map_view = MapView::focus(info);
        }
        self.selection = selection;
        self.country_info = stats.snapshot;
        true
    }

    /// A failed fetch leaves the previous state in place.
    pub fn fail_selection(&self, ticket: Ticket, selection: &Selection, err: &anyhow::Error) {
        log::warn!("fetch #{} for {} failed: {:#}", ticket.seq(), selection, err);
    }

    /// Issue a ticket and run `fetch` for `selection` in the background.
    pub fn select_with<F>(&mut self, selection: Selection, fetch: F) -> Ticket
    where
        F: FnOnce(&Selection) -> Result<SelectedStats> + Send + 'static,
    {
        let ticket = self.begin_selection();
        log::debug!("request #{} for {}", ticket.seq(), selection);
        self.background.spawn(ticket, selection, fetch);
        ticket
    }

    pub fn select(&mut self, client: &Client, selection: Selection) -> Ticket {
        let client = client.clone();
        self.select_with(selection, move |s| client.fetch_selection(s))
    }

    fn handle(&mut self, outcome: FetchOutcome) -> bool {
        let ticket = outcome.ticket;
        let applied = match outcome.result {
            Ok(stats) => self.apply_selection(ticket, outcome.selection, stats),
            Err(e) => {
                self.fail_selection(ticket, &outcome.selection, &e);
                false
            }
        };
        if self.sequencer.is_current(ticket) {
            self.resolved = Some((ticket, applied));
        }
        applied
    }

    fn resolved_for(&self, ticket: Ticket) -> Option<bool> {
        match self.resolved {
            Some((t, applied)) if t == ticket => Some(applied),
            _ => None,
        }
    }

    /// Apply every response that has arrived so far. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Some(outcome) = self.background.try_recv() {
            if self.handle(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until the latest request resolves or `timeout` elapses.
    /// Returns `true` if the latest request was applied, including by an earlier `poll`.
    pub fn wait_current(&mut self, timeout: Duration) -> bool {
        let Some(latest) = self.sequencer.latest() else {
            return false;
        };
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(applied) = self.resolved_for(latest) {
                return applied;
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                log::warn!("request #{} still pending after {:?}", latest.seq(), timeout);
                return false;
            }
            if let Some(outcome) = self.background.recv_timeout(left) {
                self.handle(outcome);
            }
        }
    }
}
