use leptos::prelude::*;
use uuid::Uuid;

use crate::features::dashboard::feed::{FeedEvent, Frame};
use crate::models::{idle_status_map, AgentStatusMap, LogEntry, Transaction};

/// A received log entry plus a client-side key, so the log list can render
/// under a keyed `<For/>` without re-keying the whole history on append.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub key: String,
    pub entry: LogEntry,
}

/// The reconciler: sole owner of the three UI state slots and the session
/// flag. Feed client and poller never touch the signals directly; they hand
/// events to the `apply_*` methods together with the epoch they were
/// spawned under, and stale work is discarded.
///
/// `logs` grows without bound for the lifetime of a session. That matches
/// the feed contract (append-only, cleared on the next session start), so a
/// very long run costs memory linear in the number of lines.
#[derive(Debug, Clone, Copy)]
pub struct DashboardState {
    logs: RwSignal<Vec<LogRecord>>,
    agents: RwSignal<AgentStatusMap>,
    transactions: RwSignal<Vec<Transaction>>,
    running: RwSignal<bool>,
    epoch: RwSignal<u64>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            logs: RwSignal::new(Vec::new()),
            agents: RwSignal::new(idle_status_map()),
            transactions: RwSignal::new(Vec::new()),
            running: RwSignal::new(false),
            epoch: RwSignal::new(0),
        }
    }

    // Read-only views for the rendering layer.

    pub fn logs(&self) -> ReadSignal<Vec<LogRecord>> {
        self.logs.read_only()
    }

    pub fn agents(&self) -> ReadSignal<AgentStatusMap> {
        self.agents.read_only()
    }

    pub fn transactions(&self) -> ReadSignal<Vec<Transaction>> {
        self.transactions.read_only()
    }

    pub fn running(&self) -> ReadSignal<bool> {
        self.running.read_only()
    }

    pub fn is_running(&self) -> bool {
        self.running.get_untracked()
    }

    /// True while `epoch` is still the live session. Async continuations
    /// call this before mutating anything.
    pub fn session_is(&self, epoch: u64) -> bool {
        self.running.get_untracked() && self.epoch.get_untracked() == epoch
    }

    // Mutation operations. Appends preserve receipt order; the status map
    // and the transaction list are replaced wholesale, never merged.

    pub fn append_log(&self, entry: LogEntry) {
        let record = LogRecord {
            key: Uuid::new_v4().to_string(),
            entry,
        };
        self.logs.update(|logs| logs.push(record));
    }

    pub fn replace_status(&self, map: AgentStatusMap) {
        self.agents.set(map);
    }

    pub fn replace_transactions(&self, list: Vec<Transaction>) {
        self.transactions.set(list);
    }

    /// Start (or restart) a session: clear logs and transactions, reset the
    /// agent map to idle defaults, flip the flag on, and move to a fresh
    /// epoch. Returns the new epoch for the feed and poller tasks to carry.
    pub fn begin_session(&self) -> u64 {
        self.logs.set(Vec::new());
        self.transactions.set(Vec::new());
        self.agents.set(idle_status_map());
        self.running.set(true);
        self.epoch.update(|e| *e += 1);
        self.epoch.get_untracked()
    }

    /// End the session. Bumping the epoch here is what invalidates any
    /// in-flight poll response or queued frame the moment this returns.
    pub fn end_session(&self) {
        self.running.set(false);
        self.epoch.update(|e| *e += 1);
    }

    /// Apply one feed event under the epoch guard. Returns whether the
    /// event was applied. Transport errors are not state; the session
    /// consumer handles them by closing the connection.
    pub fn apply_frame(&self, epoch: u64, event: FeedEvent) -> bool {
        if !self.session_is(epoch) {
            return false;
        }
        match event {
            FeedEvent::Frame(Frame::Status(map)) => self.replace_status(map),
            FeedEvent::Frame(Frame::Log(entry)) => self.append_log(entry),
            FeedEvent::TransportError => return false,
        }
        true
    }

    /// Apply one transaction snapshot under the epoch guard.
    pub fn apply_snapshot(&self, epoch: u64, list: Vec<Transaction>) -> bool {
        if !self.session_is(epoch) {
            return false;
        }
        self.replace_transactions(list);
        true
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentPhase, AgentState, LogLevel, TxStatus};

    fn log(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "t1".into(),
            level: LogLevel::Info,
            agent: None,
            message: message.into(),
            details: None,
        }
    }

    fn tx(hash: &str) -> Transaction {
        Transaction {
            timestamp: "2025-11-02T10:15:30".into(),
            agent: "Demand Forecast".into(),
            amount: 0.003,
            address: "0xabc".into(),
            tx_hash: hash.into(),
            status: TxStatus::Completed,
        }
    }

    fn status_frame(pairs: &[(&str, AgentPhase, u8)]) -> FeedEvent {
        let map: AgentStatusMap = pairs
            .iter()
            .map(|(id, status, progress)| {
                (
                    id.to_string(),
                    AgentState {
                        status: *status,
                        progress: *progress,
                    },
                )
            })
            .collect();
        FeedEvent::Frame(Frame::Status(map))
    }

    #[test]
    fn log_frames_append_in_receipt_order() {
        let state = DashboardState::new();
        let epoch = state.begin_session();
        for i in 0..5 {
            assert!(state.apply_frame(epoch, FeedEvent::Frame(Frame::Log(log(&format!("line {i}"))))));
        }
        state.logs.with_untracked(|logs| {
            assert_eq!(logs.len(), 5);
            for (i, record) in logs.iter().enumerate() {
                assert_eq!(record.entry.message, format!("line {i}"));
            }
        });
    }

    #[test]
    fn status_frame_replaces_map_wholesale() {
        let state = DashboardState::new();
        let epoch = state.begin_session();

        state.apply_frame(
            epoch,
            status_frame(&[
                ("demand_forecast", AgentPhase::Running, 40),
                ("inventory_optimizer", AgentPhase::Idle, 0),
                ("report_generator", AgentPhase::Idle, 0),
            ]),
        );
        state.agents.with_untracked(|agents| {
            assert_eq!(agents["demand_forecast"].status, AgentPhase::Running);
            assert_eq!(agents["demand_forecast"].progress, 40);
        });

        // A later frame missing two keys erases them; nothing is merged in
        // from the previous map.
        state.apply_frame(
            epoch,
            status_frame(&[("report_generator", AgentPhase::Running, 10)]),
        );
        state.agents.with_untracked(|agents| {
            assert_eq!(agents.len(), 1);
            assert!(!agents.contains_key("demand_forecast"));
        });
    }

    #[test]
    fn snapshot_replaces_not_merges() {
        let state = DashboardState::new();
        let epoch = state.begin_session();

        assert!(state.apply_snapshot(epoch, vec![tx("0x1"), tx("0x2")]));
        assert!(state.apply_snapshot(epoch, vec![tx("0x3")]));
        state.transactions.with_untracked(|txs| {
            assert_eq!(txs.len(), 1);
            assert_eq!(txs[0].tx_hash, "0x3");
        });
    }

    #[test]
    fn failed_poll_leaves_previous_snapshot_intact() {
        let state = DashboardState::new();
        let epoch = state.begin_session();

        assert!(state.apply_snapshot(epoch, vec![tx("0x1")]));
        // Tick K fails: the poller never calls apply_snapshot, so tick K-1's
        // data is still there for tick K+1 to replace.
        state.transactions.with_untracked(|txs| assert_eq!(txs.len(), 1));
        assert!(state.apply_snapshot(epoch, vec![tx("0x2"), tx("0x3")]));
        state.transactions.with_untracked(|txs| {
            assert_eq!(txs.len(), 2);
            assert_eq!(txs[0].tx_hash, "0x2");
        });
    }

    #[test]
    fn nothing_mutates_after_end_session_returns() {
        let state = DashboardState::new();
        let epoch = state.begin_session();
        state.apply_frame(epoch, FeedEvent::Frame(Frame::Log(log("before stop"))));
        state.apply_snapshot(epoch, vec![tx("0x1")]);

        state.end_session();

        // A frame and a poll response that were already in flight land late.
        assert!(!state.apply_frame(epoch, FeedEvent::Frame(Frame::Log(log("too late")))));
        assert!(!state.apply_snapshot(epoch, vec![tx("0x2")]));
        state.logs.with_untracked(|logs| assert_eq!(logs.len(), 1));
        state.transactions.with_untracked(|txs| assert_eq!(txs[0].tx_hash, "0x1"));
    }

    #[test]
    fn stale_epoch_cannot_resurrect_data_after_restart() {
        let state = DashboardState::new();
        let old_epoch = state.begin_session();
        state.apply_snapshot(old_epoch, vec![tx("0xold")]);

        state.end_session();
        let new_epoch = state.begin_session();

        // The cancelled session's in-flight response resolves now. It must
        // not repopulate the cleared table.
        assert!(!state.apply_snapshot(old_epoch, vec![tx("0xstale")]));
        state.transactions.with_untracked(|txs| assert!(txs.is_empty()));

        assert!(state.apply_snapshot(new_epoch, vec![tx("0xnew")]));
        state.transactions.with_untracked(|txs| assert_eq!(txs[0].tx_hash, "0xnew"));
    }

    #[test]
    fn begin_session_clears_logs_transactions_and_resets_agents() {
        let state = DashboardState::new();
        let epoch = state.begin_session();
        state.apply_frame(epoch, FeedEvent::Frame(Frame::Log(log("old"))));
        state.apply_frame(
            epoch,
            status_frame(&[("demand_forecast", AgentPhase::Completed, 100)]),
        );
        state.apply_snapshot(epoch, vec![tx("0x1")]);

        state.begin_session();
        state.logs.with_untracked(|logs| assert!(logs.is_empty()));
        state.transactions.with_untracked(|txs| assert!(txs.is_empty()));
        state.agents.with_untracked(|agents| {
            assert_eq!(agents.len(), 3);
            assert_eq!(agents["demand_forecast"], AgentState::default());
        });
        assert!(state.is_running());
    }

    #[test]
    fn transport_error_is_not_applied_as_state() {
        let state = DashboardState::new();
        let epoch = state.begin_session();
        assert!(!state.apply_frame(epoch, FeedEvent::TransportError));
        assert!(state.is_running());
    }

    #[test]
    fn worked_example_status_then_payment_log() {
        let state = DashboardState::new();
        let epoch = state.begin_session();

        state.apply_frame(
            epoch,
            status_frame(&[
                ("demand_forecast", AgentPhase::Running, 40),
                ("inventory_optimizer", AgentPhase::Idle, 0),
                ("report_generator", AgentPhase::Idle, 0),
            ]),
        );
        state.agents.with_untracked(|agents| {
            assert_eq!(
                agents["demand_forecast"],
                AgentState {
                    status: AgentPhase::Running,
                    progress: 40
                }
            );
        });

        state.apply_frame(
            epoch,
            FeedEvent::Frame(Frame::Log(LogEntry {
                timestamp: "t1".into(),
                level: LogLevel::Payment,
                agent: Some("demand_forecast".into()),
                message: "paid".into(),
                details: None,
            })),
        );
        state.logs.with_untracked(|logs| {
            assert_eq!(logs.len(), 1);
            assert_eq!(logs[0].entry.timestamp, "t1");
            assert_eq!(logs[0].entry.level, LogLevel::Payment);
        });
    }
}
