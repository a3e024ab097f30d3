//! Access-control records shown on the dashboard

use serde::{Deserialize, Serialize};

/// Headline counters for the overview section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_access: u32,
    pub online_devices: u32,
    pub alarm_events: u32,
    pub registered_users: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

/// A door controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub status: DeviceStatus,
    pub last_active: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "Member",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }
}

/// A person enrolled in the access-control system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub status: MemberStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessResult {
    Success,
    Failed,
}

impl AccessResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessResult::Success => "success",
            AccessResult::Failed => "failed",
        }
    }
}

/// One door-open attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub id: u32,
    pub user: String,
    pub device: String,
    pub method: String,
    pub time: String,
    pub result: AccessResult,
}

/// Recent activity feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: u32,
    pub user: String,
    pub action: String,
    pub time: String,
}

/// The list datasets a provider can serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListKind {
    Activity,
    Devices,
    Members,
    Records,
}

impl ListKind {
    pub const ALL: [ListKind; 4] = [
        ListKind::Activity,
        ListKind::Devices,
        ListKind::Members,
        ListKind::Records,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ListKind::Activity => "activity",
            ListKind::Devices => "devices",
            ListKind::Members => "users",
            ListKind::Records => "records",
        }
    }
}

/// A loaded list, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dataset {
    Activity(Vec<ActivityEntry>),
    Devices(Vec<Device>),
    Members(Vec<Member>),
    Records(Vec<AccessRecord>),
}

impl Dataset {
    pub fn kind(&self) -> ListKind {
        match self {
            Dataset::Activity(_) => ListKind::Activity,
            Dataset::Devices(_) => ListKind::Devices,
            Dataset::Members(_) => ListKind::Members,
            Dataset::Records(_) => ListKind::Records,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Activity(items) => items.len(),
            Dataset::Devices(items) => items.len(),
            Dataset::Members(items) => items.len(),
            Dataset::Records(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
