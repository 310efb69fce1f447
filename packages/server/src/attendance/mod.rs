mod service;
pub mod stats;

pub use service::{AdminOverview, AttendanceService, RecentComplaint, RosterEntry, StudentSummary};
