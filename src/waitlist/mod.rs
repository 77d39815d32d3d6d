pub mod mailer;
pub mod service;
pub mod signup;
pub mod store;
