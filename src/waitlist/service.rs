use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    error::WaitlistError,
    waitlist::{
        mailer::Mailer,
        signup::{Signup, SignupRequest},
        store::{Insert, WaitlistStore},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    Joined,
    AlreadyJoined,
}

pub struct WaitlistService {
    store: Arc<dyn WaitlistStore>,
    mailer: Arc<dyn Mailer>,
}

impl WaitlistService {
    #[must_use]
    pub fn new(store: Arc<dyn WaitlistStore>, mailer: Arc<dyn Mailer>) -> Self {
        WaitlistService { store, mailer }
    }

    /// Validates and stores a signup. New signups get a welcome email; the
    /// email is best effort and its failure never changes the outcome.
    ///
    /// # Errors
    /// [`WaitlistError::MissingField`] for a missing or blank field, a storage
    /// error if the insert fails.
    pub fn join(&self, request: SignupRequest) -> Result<SignupOutcome, WaitlistError> {
        let signup = Signup::try_from(request)?;

        match self.store.insert(&signup)? {
            Insert::Added => {
                info!(email = %signup.email, platform = %signup.platform, "joined waitlist");
                self.welcome(signup);
                Ok(SignupOutcome::Joined)
            }
            Insert::Duplicate => {
                info!(email = %signup.email, "already on waitlist");
                Ok(SignupOutcome::AlreadyJoined)
            }
        }
    }

    /// Inside a tokio runtime the email goes out on a blocking task;
    /// otherwise it is sent inline.
    fn welcome(&self, signup: Signup) {
        let mailer = Arc::clone(&self.mailer);
        let send = move || {
            if let Err(e) = mailer.send_welcome(&signup) {
                warn!(email = %signup.email, error = %e, "welcome email failed");
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(send);
            }
            Err(_) => send(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{error::MailError, waitlist::store::SqliteStore};

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<String>>,
    }

    impl Mailer for RecordingMailer {
        fn send_welcome(&self, signup: &Signup) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(signup.email.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    impl Mailer for FailingMailer {
        fn send_welcome(&self, _: &Signup) -> Result<(), MailError> {
            Err(MailError::Transport("connection refused".into()))
        }
    }

    struct BrokenStore;

    impl WaitlistStore for BrokenStore {
        fn insert(&self, _: &Signup) -> Result<Insert, WaitlistError> {
            Err(WaitlistError::Poisoned)
        }

        fn count(&self) -> Result<usize, WaitlistError> {
            Err(WaitlistError::Poisoned)
        }
    }

    fn service(mailer: Arc<dyn Mailer>) -> WaitlistService {
        WaitlistService::new(Arc::new(SqliteStore::in_memory().unwrap()), mailer)
    }

    #[test]
    fn new_signups_are_welcomed_once() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = service(mailer.clone());

        let request = SignupRequest::new("Sam", "sam@example.com", "ios");
        assert_eq!(service.join(request.clone()).unwrap(), SignupOutcome::Joined);
        assert_eq!(service.join(request).unwrap(), SignupOutcome::AlreadyJoined);

        assert_eq!(*mailer.sent.lock().unwrap(), vec!["sam@example.com".to_string()]);
    }

    #[test]
    fn duplicates_ignore_email_case() {
        let service = service(Arc::new(RecordingMailer::default()));
        service.join(SignupRequest::new("Sam", "sam@example.com", "ios")).unwrap();
        let again = service.join(SignupRequest::new("Sam", "SAM@example.com", "android"));
        assert_eq!(again.unwrap(), SignupOutcome::AlreadyJoined);
    }

    #[test]
    fn mail_failure_does_not_fail_the_signup() {
        let service = service(Arc::new(FailingMailer));
        let outcome = service.join(SignupRequest::new("Sam", "sam@example.com", "ios"));
        assert_eq!(outcome.unwrap(), SignupOutcome::Joined);
    }

    #[test]
    fn invalid_requests_never_reach_the_store() {
        let service = WaitlistService::new(Arc::new(BrokenStore), Arc::new(FailingMailer));
        let err = service.join(SignupRequest::default()).unwrap_err();
        assert!(matches!(err, WaitlistError::MissingField("firstName")));
    }

    #[test]
    fn storage_errors_propagate() {
        let service = WaitlistService::new(Arc::new(BrokenStore), Arc::new(FailingMailer));
        let err = service
            .join(SignupRequest::new("Sam", "sam@example.com", "ios"))
            .unwrap_err();
        assert!(matches!(err, WaitlistError::Poisoned));
    }
}
