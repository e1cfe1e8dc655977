use chrono::NaiveDateTime;
use leptos::prelude::*;

use crate::models::Transaction;

const EXPLORER_TX_BASE: &str = "https://amoy.polygonscan.com/tx";

/// The backend stamps transactions with a naive ISO timestamp; show the
/// clock time, or the raw string if it ever stops parsing.
fn format_clock_time(timestamp: &str) -> String {
    match timestamp.parse::<NaiveDateTime>() {
        Ok(dt) => dt.format("%H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn shorten_address(address: &str) -> String {
    if address.len() > 10 {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

fn shorten_hash(hash: &str) -> String {
    if hash.len() > 10 {
        format!("{}...", &hash[..10])
    } else {
        hash.to_string()
    }
}

#[component]
pub fn TransactionsTable(transactions: ReadSignal<Vec<Transaction>>) -> impl IntoView {
    view! {
        <div class="transactions-section">
            <h2>"Transaction History"</h2>
            <table class="tx-table">
                <thead>
                    <tr>
                        <th>"Timestamp"</th>
                        <th>"Agent"</th>
                        <th>"Amount"</th>
                        <th>"Address"</th>
                        <th>"TX Hash"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        transactions.with(|txs| {
                            if txs.is_empty() {
                                vec![
                                    view! {
                                        <tr>
                                            <td colspan="6" class="tx-empty">"No transactions yet"</td>
                                        </tr>
                                    }
                                        .into_any(),
                                ]
                            } else {
                                txs.iter()
                                    .map(|tx| {
                                        let link = format!("{EXPLORER_TX_BASE}/{}", tx.tx_hash);
                                        let status_class = format!("tx-status {}", tx.status.as_str());
                                        view! {
                                            <tr>
                                                <td>{format_clock_time(&tx.timestamp)}</td>
                                                <td>{tx.agent.clone()}</td>
                                                <td class="tx-amount">{format!("{} JPYC", tx.amount)}</td>
                                                <td class="tx-address">{shorten_address(&tx.address)}</td>
                                                <td>
                                                    <a
                                                        class="tx-link"
                                                        href=link
                                                        target="_blank"
                                                        rel="noopener noreferrer"
                                                    >
                                                        {shorten_hash(&tx.tx_hash)}
                                                    </a>
                                                </td>
                                                <td>
                                                    <span class=status_class>{tx.status.as_str()}</span>
                                                </td>
                                            </tr>
                                        }
                                            .into_any()
                                    })
                                    .collect::<Vec<_>>()
                            }
                        })
                    }}
                </tbody>
            </table>
        </div>
    }
}
