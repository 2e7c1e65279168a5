use serde_json::{Value, json};

use vigil_core::AlertContext;
use vigil_utils::formatting::{format_compact_duration, format_mentions};
use vigil_utils::time::format_unix_datetime;

/// Wrap a rule URL in the chat client's deep link so the message opens
/// outside the in-app browser.
pub(crate) fn client_link(rule_url: &str) -> String {
    match reqwest::Url::parse_with_params(
        "dingtalk://dingtalkclient/page/link",
        &[("pc_slide", "false"), ("url", rule_url)],
    ) {
        Ok(url) => url.to_string(),
        Err(_) => rule_url.to_owned(),
    }
}

/// Numbered metric/value lines appended to the message text.
fn metric_lines(ctx: &AlertContext) -> String {
    let mut lines = String::new();
    for (index, eval_match) in ctx.eval_matches.iter().enumerate() {
        lines.push_str(&format!(
            "\n{:2}. {}: {}",
            index + 1,
            eval_match.metric,
            eval_match.value
        ));
    }
    lines
}

pub(crate) fn link_body(ctx: &AlertContext, message_url: &str) -> Value {
    let message = format!("{}{}", ctx.message_or_title(), metric_lines(ctx));

    json!({
        "msgtype": "link",
        "link": {
            "text": message,
            "title": ctx.notification_title(),
            "picUrl": ctx.image_url.as_deref().unwrap_or(""),
            "messageUrl": message_url,
        },
    })
}

pub(crate) fn action_card_body(ctx: &AlertContext, message_url: &str) -> Value {
    let mut message = format!("{}{}", ctx.message_or_title(), metric_lines(ctx));

    // actionCard has no picUrl field; embed the image into the markdown.
    if let Some(image_url) = ctx.image_url.as_deref() {
        message = format!("![]({})\n\n{}", image_url, message);
    }

    json!({
        "msgtype": "actionCard",
        "actionCard": {
            "text": message,
            "title": ctx.notification_title(),
            "singleTitle": "More",
            "singleURL": message_url,
        },
    })
}

pub(crate) fn markdown_body(
    ctx: &AlertContext,
    at_mobiles: &[String],
    escalation_lines: &[String],
    message_url: &str,
) -> Value {
    let title = ctx.notification_title();

    let mut text = format!("### {}\n", title);
    if let Some(image_url) = ctx.image_url.as_deref() {
        text.push_str(&format!("### ![image]({})\n", image_url));
    }
    text.push_str(&format!("### {}", ctx.message_or_title()));
    text.push_str(&metric_lines(ctx));
    text.push_str(&format!(
        "\n### Triggered at: {}",
        format_unix_datetime(ctx.last_state_change)
    ));
    text.push_str(&format!(
        "\n### Elapsed: {}",
        format_compact_duration(ctx.elapsed_secs())
    ));
    text.push_str(&format!("\n### [Details]({})", message_url));
    for line in escalation_lines {
        text.push_str(&format!("\n{}", line));
    }
    if !at_mobiles.is_empty() {
        text.push_str(&format!("\n### {}", format_mentions(at_mobiles)));
    }

    json!({
        "msgtype": "markdown",
        "markdown": {
            "text": text,
            "title": title,
        },
        "at": {
            "atMobiles": at_mobiles,
            "isAtAll": false,
        },
    })
}

#[cfg(test)]
mod tests {
    use vigil_core::{AlertContext, AlertState, EvalMatch};

    use super::{action_card_body, client_link, link_body, markdown_body};

    fn context() -> AlertContext {
        AlertContext {
            rule_name: "cpu usage high".to_owned(),
            message: "load average over threshold".to_owned(),
            state: AlertState::Alerting,
            last_state_change: 1_700_000_000,
            evaluated_at: 1_700_000_090,
            rule_url: Some("https://vigil.example/alerts/42".to_owned()),
            image_url: Some("https://vigil.example/render/42.png".to_owned()),
            eval_matches: vec![EvalMatch {
                metric: "load1".to_owned(),
                value: 4.5,
            }],
        }
    }

    #[test]
    fn client_link_encodes_the_rule_url() {
        let link = client_link("https://vigil.example/alerts/42");
        assert!(link.starts_with("dingtalk://dingtalkclient/page/link?"));
        assert!(link.contains("pc_slide=false"));
        assert!(link.contains("url=https%3A%2F%2Fvigil.example%2Falerts%2F42"));
    }

    #[test]
    fn link_body_shape() {
        let body = link_body(&context(), "dingtalk://x");
        assert_eq!(body["msgtype"], "link");
        assert_eq!(body["link"]["title"], "[Alerting] cpu usage high");
        assert_eq!(body["link"]["picUrl"], "https://vigil.example/render/42.png");
        assert_eq!(body["link"]["messageUrl"], "dingtalk://x");
        let text = body["link"]["text"].as_str().unwrap();
        assert!(text.starts_with("load average over threshold"));
        assert!(text.contains("load1: 4.5"));
    }

    #[test]
    fn action_card_embeds_the_image_inline() {
        let body = action_card_body(&context(), "dingtalk://x");
        assert_eq!(body["msgtype"], "actionCard");
        assert_eq!(body["actionCard"]["singleTitle"], "More");
        let text = body["actionCard"]["text"].as_str().unwrap();
        assert!(text.starts_with("![](https://vigil.example/render/42.png)\n\n"));
    }

    #[test]
    fn markdown_body_carries_escalation_lines_and_mentions() {
        let mobiles = vec!["111".to_owned(), "222".to_owned()];
        let lines = vec![
            "* tier 1: calling contacts in 30s".to_owned(),
            "* tier 2: no contacts configured".to_owned(),
        ];
        let body = markdown_body(&context(), &mobiles, &lines, "dingtalk://x");

        assert_eq!(body["msgtype"], "markdown");
        assert_eq!(body["markdown"]["title"], "[Alerting] cpu usage high");
        assert_eq!(body["at"]["isAtAll"], false);
        assert_eq!(body["at"]["atMobiles"][1], "222");

        let text = body["markdown"]["text"].as_str().unwrap();
        assert!(text.starts_with("### [Alerting] cpu usage high\n"));
        assert!(text.contains("### Triggered at: 2023-11-14 22:13:20 UTC"));
        assert!(text.contains("### Elapsed: 1m 30s"));
        assert!(text.contains("### [Details](dingtalk://x)"));
        assert!(text.contains("\n* tier 1: calling contacts in 30s"));
        assert!(text.contains("\n* tier 2: no contacts configured"));
        assert!(text.ends_with("### @111 @222"));
    }
}
