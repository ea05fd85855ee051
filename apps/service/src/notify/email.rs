//! SMTP report sink

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use netwatch::{AuditReport, CategoryReport, ReportKind, ReportSink, SinkError};
use tracing::{debug, info};

use crate::config::SmtpSettings;

pub const SUBJECT: &str = "Server and website status";

/// Mails audit reports as HTML
pub struct EmailSink {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
}

impl EmailSink {
    pub fn new(settings: &SmtpSettings) -> Result<Self> {
        let from = settings
            .from
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender address {:?}", settings.from))?;

        let to = settings
            .to
            .iter()
            .map(|addr| {
                addr.parse::<Mailbox>()
                    .with_context(|| format!("Invalid recipient address {addr:?}"))
            })
            .collect::<Result<Vec<_>>>()?;

        if to.is_empty() {
            anyhow::bail!("[smtp] needs at least one recipient in `to`");
        }

        let builder = if settings.implicit_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .with_context(|| format!("Invalid SMTP host {:?}", settings.host))?;

        let builder = builder.port(settings.port);
        let builder = match (&settings.username, &settings.password) {
            (Some(user), Some(pass)) => {
                builder.credentials(Credentials::new(user.clone(), pass.clone()))
            }
            _ => builder,
        };

        Ok(Self { transport: builder.build(), from, to })
    }

    fn message(&self, report: &AuditReport, kind: ReportKind) -> Result<Message, SinkError> {
        let mut builder = Message::builder().from(self.from.clone()).subject(SUBJECT);
        for mailbox in &self.to {
            builder = builder.to(mailbox.clone());
        }

        builder
            .header(ContentType::TEXT_HTML)
            .body(compose_html(report, kind))
            .map_err(|e| SinkError::Compose(e.to_string()))
    }
}

#[async_trait]
impl ReportSink for EmailSink {
    async fn dispatch(&self, report: &AuditReport, kind: ReportKind) -> Result<(), SinkError> {
        let message = self.message(report, kind)?;
        debug!(%kind, recipients = self.to.len(), "Sending audit mail");

        let response =
            self.transport.send(message).await.map_err(|e| SinkError::Delivery(Box::new(e)))?;

        info!(code = %response.code(), "Audit mail accepted by SMTP server");
        Ok(())
    }
}

/// HTML body: one section per category, failures listed first
pub fn compose_html(report: &AuditReport, kind: ReportKind) -> String {
    let mut body = String::new();

    if kind == ReportKind::Clean {
        body.push_str("<h1>Clean audit</h1>");
    }

    let sections: Vec<String> = report.sections.iter().map(compose_section).collect();
    body.push_str(&sections.join("<br>"));
    body
}

fn compose_section(section: &CategoryReport) -> String {
    let plural = section.category.plural();
    let noun = plural.to_lowercase();
    let mut html = format!("<h3>{plural}</h3>");

    if !section.failures.is_empty() {
        html.push_str(&format!("<p>The following {noun} failed their check:</p>"));
        html.push_str(&compose_list(&section.failures));
        html.push_str("<br>");
    }

    if !section.successes.is_empty() {
        html.push_str(&format!("<p>The following {noun} responded correctly:</p>"));
        html.push_str(&compose_list(&section.successes));
    }

    html
}

fn compose_list(lines: &[String]) -> String {
    let items: String = lines.iter().map(|line| format!("<li>{}</li>", escape_html(line))).collect();
    format!("<ul>{items}</ul>")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
