pub mod agent_panel;
pub mod log_view;
pub mod transactions_table;

pub use agent_panel::AgentsPanel;
pub use log_view::LogView;
pub use transactions_table::TransactionsTable;
