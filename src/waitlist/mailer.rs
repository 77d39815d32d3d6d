use std::time::Duration;

use lettre::{
    Message, SmtpTransport, Transport, message::Mailbox,
    transport::smtp::authentication::Credentials,
};
use tracing::info;

use crate::{config::SmtpConfig, error::MailError, waitlist::signup::Signup};

const SUBJECT: &str = "You're on the waitlist";
const TIMEOUT: Duration = Duration::from_secs(10);

pub trait Mailer: Send + Sync {
    /// Sends the "you're on the list" confirmation.
    ///
    /// # Errors
    /// If the message could not be built or handed to the transport.
    fn send_welcome(&self, signup: &Signup) -> Result<(), MailError>;
}

/// Writes the confirmation to the log instead of sending it. Used when no
/// mail server is configured.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send_welcome(&self, signup: &Signup) -> Result<(), MailError> {
        info!(email = %signup.email, platform = %signup.platform, "welcome email (not sent, no SMTP server configured)");
        Ok(())
    }
}

/// Sends over SMTP with STARTTLS.
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    /// # Errors
    /// If the sender address does not parse or the relay cannot be set up.
    pub fn new(smtp: &SmtpConfig, from: &str) -> Result<Self, MailError> {
        let from = from
            .parse::<Mailbox>()
            .map_err(|e| MailError::Address(format!("{from}: {e}")))?;
        let transport = SmtpTransport::starttls_relay(&smtp.server)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.username.clone(), smtp.password.clone()))
            .timeout(Some(TIMEOUT))
            .build();
        info!(server = %smtp.server, port = smtp.port, "created the smtp transport");
        Ok(SmtpMailer { transport, from })
    }
}

impl Mailer for SmtpMailer {
    fn send_welcome(&self, signup: &Signup) -> Result<(), MailError> {
        let message = welcome_message(&self.from, signup)?;
        self.transport
            .send(&message)
            .map_err(|e| MailError::Transport(e.to_string()))?;
        info!(email = %signup.email, "welcome email sent");
        Ok(())
    }
}

fn welcome_message(from: &Mailbox, signup: &Signup) -> Result<Message, MailError> {
    let to = signup
        .email
        .parse::<Mailbox>()
        .map_err(|e| MailError::Address(format!("{}: {e}", signup.email)))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(SUBJECT)
        .body(format!(
            "Hi {},\n\nThanks for joining the waitlist.\nWe'll email you when the {} app is ready.\n",
            signup.first_name, signup.platform
        ))
        .map_err(|e| MailError::Message(e.to_string()))
}
