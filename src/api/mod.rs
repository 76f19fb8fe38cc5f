//! Resource façades.
//!
//! Each façade borrows the client's [`Transport`](crate::Transport), renders an
//! endpoint path and request body, and returns whatever `execute` yields.
//! Reads return the decoded JSON. Actions whose endpoints may answer without a
//! body return the [`Payload`](crate::Payload) untouched, keeping an empty body
//! distinct from `null`. Façades hold no state and never recover from errors.

mod auth;
mod notifications;
mod repositories;
mod schedules;
mod snapshots;
mod system;
mod volumes;

pub use auth::Auth;
pub use notifications::Notifications;
pub use repositories::Repositories;
pub use schedules::BackupSchedules;
pub use snapshots::Snapshots;
pub use system::System;
pub use volumes::Volumes;
