//! Access-control domain: records, session, settings

mod models;
mod session;
mod settings;

pub use models::{
    AccessRecord, AccessResult, ActivityEntry, DashboardStats, Dataset, Device, DeviceStatus,
    ListKind, Member, MemberStatus, Role,
};
pub use session::{AuthError, Session, SessionUser};
pub use settings::{PasswordPolicy, SettingField, SettingsForm};
