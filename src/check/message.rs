//! Notification message composition.

use std::net::{IpAddr, Ipv4Addr};

use handlebars::Handlebars;
use serde::Serialize;

/// Composes the notification text for a detected mismatch.
///
/// Without a template, messages follow a fixed multi-line format. An
/// optional Handlebars template (validated at configuration load time)
/// overrides it; available variables are `mode`, `current`, `previous`,
/// `domain`, and `records`.
#[derive(Debug, Clone, Default)]
pub struct MessageComposer {
    template: Option<String>,
}

/// Template data for rendering a mismatch message.
#[derive(Serialize)]
struct MessageContext<'a> {
    mode: &'static str,
    current: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<&'a str>,
    records: Vec<String>,
}

impl MessageComposer {
    /// Creates a composer, optionally with a Handlebars template.
    #[must_use]
    pub const fn new(template: Option<String>) -> Self {
        Self { template }
    }

    /// Builds the message for a DNS-mode mismatch.
    #[must_use]
    pub fn dns_mismatch(&self, domain: &str, current: IpAddr, records: &[Ipv4Addr]) -> String {
        let context = MessageContext {
            mode: "dns",
            current: current.to_string(),
            previous: None,
            domain: Some(domain),
            records: records.iter().map(ToString::to_string).collect(),
        };

        self.render(&context).unwrap_or_else(|| {
            format!(
                "External IP does not match any A-record!\n\
                 Domain = {domain}\n\
                 External IP = {current}\n\
                 A-records = {}",
                context.records.join(", ")
            )
        })
    }

    /// Builds the message for a change-mode mismatch.
    #[must_use]
    pub fn change_mismatch(&self, previous: IpAddr, current: IpAddr) -> String {
        let context = MessageContext {
            mode: "change",
            current: current.to_string(),
            previous: Some(previous.to_string()),
            domain: None,
            records: Vec::new(),
        };

        self.render(&context).unwrap_or_else(|| {
            format!(
                "External IP has changed!\n\
                 Previous IP = {previous}\n\
                 Current IP = {current}"
            )
        })
    }

    /// Renders the configured template, if any.
    ///
    /// The template was syntax-checked during configuration loading, so
    /// a render failure here is unexpected; it is logged and the caller
    /// falls back to the fixed format.
    fn render(&self, context: &MessageContext<'_>) -> Option<String> {
        let template = self.template.as_ref()?;

        match Handlebars::new().render_template(template, context) {
            Ok(rendered) => Some(rendered),
            Err(e) => {
                tracing::warn!("Message template failed to render: {e}");
                None
            }
        }
    }
}
