use anyhow::bail;
use serde_json::Value;

use vigil_utils::formatting::split_contacts;
use vigil_utils::parse::parse_duration_seconds;

use crate::escalation::EscalationPolicy;

/// Shape of the webhook message body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageType {
    #[default]
    Link,
    Markdown,
    ActionCard,
}

impl MessageType {
    /// Unrecognized values fall back to the default link shape, matching
    /// how the webhook itself treats unknown `msgtype` payloads.
    fn parse(raw: &str) -> Self {
        match raw {
            "markdown" => MessageType::Markdown,
            "actionCard" => MessageType::ActionCard,
            _ => MessageType::Link,
        }
    }
}

/// Validated DingTalk channel settings, parsed from the free-form JSON
/// settings object stored with the notification channel.
#[derive(Clone, Debug)]
pub struct DingTalkSettings {
    /// Robot webhook URL. Required.
    pub url: String,
    pub msg_type: MessageType,
    /// Numbers to @-mention in markdown messages.
    pub at_mobiles: Vec<String>,
    /// Phone escalation policy; present iff `telAlert` is enabled.
    pub escalation: Option<EscalationPolicy>,
    /// Call-out gateway host. When absent the caller may supply a default.
    pub call_out_url: Option<String>,
}

impl DingTalkSettings {
    pub fn from_value(settings: &Value) -> anyhow::Result<Self> {
        let url = str_field(settings, "url");
        if url.is_empty() {
            bail!("could not find url property in settings");
        }

        let msg_type = MessageType::parse(str_field(settings, "msgType"));
        let at_mobiles = split_contacts(str_field(settings, "mobiles"));

        let escalation = if bool_field(settings, "telAlert") {
            let raw_after = str_field(settings, "afterTime");
            let Some(after_time_secs) = parse_duration_seconds(raw_after) else {
                bail!("could not parse afterTime property in settings: {raw_after:?}");
            };

            Some(EscalationPolicy {
                tiers: vec![
                    split_contacts(str_field(settings, "firstContacts")),
                    split_contacts(str_field(settings, "secondContacts")),
                    split_contacts(str_field(settings, "thirdContacts")),
                ],
                after_time_secs,
            })
        } else {
            None
        };

        let call_out_url = Some(str_field(settings, "callOutUrl"))
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        Ok(Self {
            url: url.to_owned(),
            msg_type,
            at_mobiles,
            escalation,
            call_out_url,
        })
    }
}

fn str_field<'a>(settings: &'a Value, key: &str) -> &'a str {
    settings.get(key).and_then(Value::as_str).unwrap_or("")
}

fn bool_field(settings: &Value, key: &str) -> bool {
    settings.get(key).and_then(Value::as_bool).unwrap_or(false)
}
