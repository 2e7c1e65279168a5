/// Phone call-out client and per-tier status line rendering.
pub mod callout;
/// Tiered escalation evaluation (pure).
pub mod escalation;
/// Message body rendering for the chat webhook.
pub mod message;
/// The DingTalk notification channel.
pub mod notifier;
/// Channel settings parsing and validation.
pub mod settings;

pub use callout::CallOutClient;
pub use escalation::{EscalationPolicy, TierState, TierStatus, evaluate};
pub use notifier::DingTalkNotifier;
pub use settings::{DingTalkSettings, MessageType};
