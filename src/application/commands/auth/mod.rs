mod login;
mod logout;
mod service;
mod terminate;

pub use login::{ClientContext, LoginCommand, LoginOutcome};
pub use service::SecurityEventCorrelator;
