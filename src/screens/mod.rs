//! Screens — account flows, route guards, and the home shell.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod recovery;
pub mod router;
pub mod signup;

pub use dashboard::DashboardScreen;
pub use home::{HomeScreen, Tab};
pub use login::{LoginOutcome, LoginScreen};
pub use recovery::{PasswordRecoveryScreen, RecoveryOutcome};
pub use router::{Guard, Route, entry_route, guard_protected};
pub use signup::{SignupOutcome, SignupScreen};
