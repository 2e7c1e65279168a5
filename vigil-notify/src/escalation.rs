//! Tiered phone-escalation evaluation.
//!
//! Tier *k* (1-based) becomes due `k * after_time_secs` seconds after the
//! trigger instant. Evaluation is a pure function of the policy and two
//! timestamps; nothing is recorded between calls, so a due tier is
//! re-reported (and re-called by the caller) on every evaluation.

/// Ordered phone-escalation configuration for a notification channel.
#[derive(Clone, Debug)]
pub struct EscalationPolicy {
    /// Contact destinations per tier, in escalation order (tier 1 first).
    pub tiers: Vec<Vec<String>>,
    /// Base delay quantum in seconds. Must be positive.
    pub after_time_secs: u64,
}

/// Classification of a single tier at one evaluation instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TierState {
    /// No contacts configured for this tier; it never fires but does not
    /// block later tiers.
    Skipped,
    /// Threshold not yet reached; due in `remaining_secs`.
    Pending { remaining_secs: u64 },
    /// Threshold elapsed; eligible for call-out now.
    Due,
}

/// Per-tier evaluation result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierStatus {
    /// 1-based tier index.
    pub tier: usize,
    pub state: TierState,
}

/// Classify every tier of `policy` given the alert's trigger instant and a
/// single `now` snapshot (both unix seconds).
///
/// Clock skew is tolerated: elapsed time is the absolute difference, so
/// `now < trigger_at_secs` never faults. Returns exactly one status per
/// configured tier, in tier order. Performing call-outs for due tiers is
/// the caller's responsibility.
pub fn evaluate(policy: &EscalationPolicy, trigger_at_secs: u64, now_secs: u64) -> Vec<TierStatus> {
    let elapsed = now_secs.abs_diff(trigger_at_secs);

    policy
        .tiers
        .iter()
        .enumerate()
        .map(|(index, contacts)| {
            let tier = index + 1;
            let state = if contacts.is_empty() {
                TierState::Skipped
            } else {
                let threshold = tier as u64 * policy.after_time_secs;
                if elapsed >= threshold {
                    TierState::Due
                } else {
                    TierState::Pending {
                        remaining_secs: threshold - elapsed,
                    }
                }
            };

            TierStatus { tier, state }
        })
        .collect()
}
