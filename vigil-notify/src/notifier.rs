use anyhow::{Context as _, bail};
use serde_json::Value;
use tracing::{debug, info};

use vigil_core::AlertContext;

use crate::callout::{CallOutClient, tier_status_lines};
use crate::message;
use crate::settings::{DingTalkSettings, MessageType};

/// Notification channel posting alert state to a DingTalk robot webhook,
/// with optional phone escalation for markdown messages.
#[derive(Clone, Debug)]
pub struct DingTalkNotifier {
    settings: DingTalkSettings,
    call_out: Option<CallOutClient>,
    http: reqwest::Client,
}

impl DingTalkNotifier {
    /// Validate raw channel settings and build a notifier. `default_call_out`
    /// is used when the settings carry no `callOutUrl` of their own.
    pub fn from_settings(
        settings: &Value,
        default_call_out: Option<&str>,
    ) -> anyhow::Result<Self> {
        let settings = DingTalkSettings::from_value(settings)?;
        Ok(Self::new(settings, default_call_out))
    }

    pub fn new(settings: DingTalkSettings, default_call_out: Option<&str>) -> Self {
        let endpoint = settings
            .call_out_url
            .clone()
            .or_else(|| default_call_out.map(str::to_owned))
            .filter(|endpoint| !endpoint.is_empty());

        Self {
            settings,
            call_out: endpoint.map(CallOutClient::new),
            http: reqwest::Client::new(),
        }
    }

    /// Render the alert into the configured message shape and post it to
    /// the webhook. Escalation call-outs (markdown only) happen during
    /// rendering; their failures are embedded in the message text and do
    /// not fail the notification itself.
    pub async fn notify(&self, ctx: &AlertContext) -> anyhow::Result<()> {
        info!(rule = %ctx.rule_name, "sending dingtalk notification");

        let body = self.build_body(ctx).await;
        debug!(body = %body, "dingtalk webhook body");

        let response = self
            .http
            .post(&self.settings.url)
            .json(&body)
            .send()
            .await
            .context("failed to send dingtalk webhook")?;

        if !response.status().is_success() {
            bail!("dingtalk webhook returned {}", response.status());
        }

        Ok(())
    }

    async fn build_body(&self, ctx: &AlertContext) -> Value {
        let message_url = message::client_link(ctx.rule_url.as_deref().unwrap_or(""));

        match self.settings.msg_type {
            MessageType::Link => message::link_body(ctx, &message_url),
            MessageType::ActionCard => message::action_card_body(ctx, &message_url),
            MessageType::Markdown => {
                let escalation_lines = match &self.settings.escalation {
                    Some(policy) => {
                        tier_status_lines(
                            policy,
                            self.call_out.as_ref(),
                            ctx.last_state_change,
                            ctx.evaluated_at,
                            &ctx.notification_title(),
                            &ctx.message_or_title(),
                        )
                        .await
                    }
                    None => vec!["phone alerting is disabled".to_owned()],
                };

                message::markdown_body(ctx, &self.settings.at_mobiles, &escalation_lines, &message_url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use vigil_core::{AlertContext, AlertState};

    use super::DingTalkNotifier;

    fn context() -> AlertContext {
        AlertContext {
            rule_name: "cpu usage high".to_owned(),
            message: String::new(),
            state: AlertState::Alerting,
            last_state_change: 1_000,
            evaluated_at: 1_030,
            rule_url: Some("https://vigil.example/alerts/42".to_owned()),
            image_url: None,
            eval_matches: Vec::new(),
        }
    }

    #[test]
    fn settings_call_out_overrides_the_default() {
        let notifier = DingTalkNotifier::from_settings(
            &json!({"url": "https://hooks.example/robot", "callOutUrl": "callout.a"}),
            Some("callout.b"),
        )
        .unwrap();
        assert!(notifier.call_out.is_some());

        let notifier =
            DingTalkNotifier::from_settings(&json!({"url": "https://hooks.example/robot"}), None)
                .unwrap();
        assert!(notifier.call_out.is_none());
    }

    #[tokio::test]
    async fn markdown_body_includes_countdown_lines() {
        let notifier = DingTalkNotifier::from_settings(
            &json!({
                "url": "https://hooks.example/robot",
                "msgType": "markdown",
                "telAlert": true,
                "afterTime": "60s",
                "firstContacts": "111",
            }),
            None,
        )
        .unwrap();

        let body = notifier.build_body(&context()).await;
        let text = body["markdown"]["text"].as_str().unwrap();
        assert!(text.contains("* tier 1: calling contacts in 30s"));
        assert!(text.contains("* tier 2: no contacts configured"));
        assert!(text.contains("* tier 3: no contacts configured"));
    }

    #[tokio::test]
    async fn markdown_without_tel_alert_notes_it_is_disabled() {
        let notifier = DingTalkNotifier::from_settings(
            &json!({"url": "https://hooks.example/robot", "msgType": "markdown"}),
            None,
        )
        .unwrap();

        let body = notifier.build_body(&context()).await;
        let text = body["markdown"]["text"].as_str().unwrap();
        assert!(text.contains("phone alerting is disabled"));
    }
}
