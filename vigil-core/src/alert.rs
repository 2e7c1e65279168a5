use serde::{Deserialize, Serialize};

/// State of an alert rule at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Alerting,
    Ok,
    NoData,
    Unknown,
}

impl AlertState {
    /// User-facing label prefixed to notification titles.
    pub fn label(self) -> &'static str {
        match self {
            AlertState::Alerting => "[Alerting]",
            AlertState::Ok => "[OK]",
            AlertState::NoData => "[No Data]",
            AlertState::Unknown => "[Unknown]",
        }
    }
}

/// A single metric/value pair captured when the rule fired.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvalMatch {
    pub metric: String,
    pub value: f64,
}

/// Snapshot of an alert rule evaluation, handed to notification channels
/// by the alerting engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlertContext {
    pub rule_name: String,
    #[serde(default)]
    pub message: String,
    pub state: AlertState,
    /// Unix seconds of the rule's last state change (the trigger instant).
    pub last_state_change: u64,
    /// Unix seconds of this evaluation.
    pub evaluated_at: u64,
    #[serde(default)]
    pub rule_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub eval_matches: Vec<EvalMatch>,
}

impl AlertContext {
    /// Notification title: state label followed by the rule name.
    pub fn notification_title(&self) -> String {
        format!("{} {}", self.state.label(), self.rule_name)
    }

    /// The rule message, or the title when no message is configured.
    pub fn message_or_title(&self) -> String {
        if self.message.is_empty() {
            self.notification_title()
        } else {
            self.message.clone()
        }
    }

    /// Seconds the rule has been in its current state. Absolute difference,
    /// so an evaluation clock behind the state-change clock does not fault.
    pub fn elapsed_secs(&self) -> u64 {
        self.evaluated_at.abs_diff(self.last_state_change)
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertContext, AlertState};

    fn context(state: AlertState, message: &str) -> AlertContext {
        AlertContext {
            rule_name: "cpu usage high".to_owned(),
            message: message.to_owned(),
            state,
            last_state_change: 1_000,
            evaluated_at: 1_090,
            rule_url: None,
            image_url: None,
            eval_matches: Vec::new(),
        }
    }

    #[test]
    fn titles_carry_state_labels() {
        assert_eq!(
            context(AlertState::Alerting, "").notification_title(),
            "[Alerting] cpu usage high"
        );
        assert_eq!(
            context(AlertState::Ok, "").notification_title(),
            "[OK] cpu usage high"
        );
    }

    #[test]
    fn empty_message_falls_back_to_title() {
        assert_eq!(
            context(AlertState::NoData, "").message_or_title(),
            "[No Data] cpu usage high"
        );
        assert_eq!(
            context(AlertState::Alerting, "disk is on fire").message_or_title(),
            "disk is on fire"
        );
    }

    #[test]
    fn elapsed_is_absolute() {
        let mut ctx = context(AlertState::Alerting, "");
        assert_eq!(ctx.elapsed_secs(), 90);

        ctx.evaluated_at = 900;
        assert_eq!(ctx.elapsed_secs(), 100);
    }
}
