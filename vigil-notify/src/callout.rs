use anyhow::Context as _;
use tracing::{info, warn};

use vigil_utils::formatting::format_compact_duration;

use crate::escalation::{EscalationPolicy, TierState, evaluate};

/// HTTP client for the phone call-out gateway.
///
/// The gateway is addressed by host (no scheme) and takes one GET per
/// destination: `http://<endpoint>/?tel=..&platform=..&msg=..`.
#[derive(Clone, Debug)]
pub struct CallOutClient {
    endpoint: String,
    http: reqwest::Client,
}

impl CallOutClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    fn call_url(&self, tel: &str, title: &str, message: &str) -> anyhow::Result<reqwest::Url> {
        reqwest::Url::parse_with_params(
            &format!("http://{}/", self.endpoint),
            &[("tel", tel), ("platform", title), ("msg", message)],
        )
        .context("invalid call-out endpoint")
    }

    /// Place one call per destination, stopping at the first failure.
    ///
    /// The outcome is a human-readable summary either way; call-out
    /// failures are reported as text, never as errors, so one tier's
    /// failure cannot halt evaluation of the others.
    pub async fn call_tier(&self, contacts: &[String], title: &str, message: &str) -> String {
        let mut notified = Vec::with_capacity(contacts.len());

        for tel in contacts {
            let url = match self.call_url(tel, title, message) {
                Ok(url) => url,
                Err(source) => {
                    warn!(?source, tel = %tel, "call-out request could not be built");
                    return format!("call-out failed: {source}");
                }
            };

            info!(%url, "placing call-out");
            let response = match self.http.get(url).send().await {
                Ok(response) => response,
                Err(source) => {
                    warn!(?source, tel = %tel, "call-out request failed");
                    return format!("call-out failed: {source}");
                }
            };

            if !response.status().is_success() {
                warn!(status = %response.status(), tel = %tel, "call-out gateway rejected request");
                return format!("call-out failed: {}", response.status());
            }

            notified.push(format!("@{tel}"));
        }

        format!("call-out succeeded, notified {}", notified.join(" "))
    }
}

/// Evaluate `policy` at a single `now` snapshot and render one status line
/// per tier, placing call-outs for due tiers.
///
/// A missing gateway (`call_out` is `None`) turns due tiers into failure
/// lines instead of halting; pending and skipped tiers render countdowns
/// and skip notes without touching the network.
pub async fn tier_status_lines(
    policy: &EscalationPolicy,
    call_out: Option<&CallOutClient>,
    trigger_at_secs: u64,
    now_secs: u64,
    title: &str,
    message: &str,
) -> Vec<String> {
    let statuses = evaluate(policy, trigger_at_secs, now_secs);
    let mut lines = Vec::with_capacity(statuses.len());

    for status in statuses {
        let line = match status.state {
            TierState::Skipped => {
                format!("* tier {}: no contacts configured", status.tier)
            }
            TierState::Pending { remaining_secs } => format!(
                "* tier {}: calling contacts in {}",
                status.tier,
                format_compact_duration(remaining_secs)
            ),
            TierState::Due => {
                let contacts = &policy.tiers[status.tier - 1];
                let summary = match call_out {
                    Some(client) => client.call_tier(contacts, title, message).await,
                    None => "call-out failed: no call-out endpoint configured".to_owned(),
                };
                format!("* tier {}: calling contacts now\n> {}", status.tier, summary)
            }
        };
        lines.push(line);
    }

    lines
}
