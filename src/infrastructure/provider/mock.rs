//! Static in-memory provider

use async_trait::async_trait;

use super::{DataProvider, ProviderError};
use crate::domain::access::{
    AccessRecord, AccessResult, ActivityEntry, AuthError, DashboardStats, Dataset, Device,
    DeviceStatus, ListKind, Member, MemberStatus, Role, SessionUser,
};

const MOCK_USERNAME: &str = "admin";
const MOCK_PASSWORD: &str = "admin123";

/// Serves fixed records and accepts exactly one credential pair
#[derive(Debug, Default, Clone, Copy)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn stats() -> DashboardStats {
        DashboardStats {
            today_access: 128,
            online_devices: 8,
            alarm_events: 3,
            registered_users: 156,
        }
    }

    pub fn admin() -> SessionUser {
        SessionUser {
            id: 1,
            username: MOCK_USERNAME.to_string(),
            role: Role::Admin,
        }
    }

    pub fn activity() -> Vec<ActivityEntry> {
        [
            (1, "张三", "Card swipe", "2024-01-01 14:30:25"),
            (2, "李四", "Fingerprint", "2024-01-01 14:25:18"),
            (3, "王五", "PIN code", "2024-01-01 14:20:45"),
            (4, "赵六", "Face recognition", "2024-01-01 14:15:30"),
            (5, "管理员", "Remote unlock", "2024-01-01 14:10:12"),
        ]
        .into_iter()
        .map(|(id, user, action, time)| ActivityEntry {
            id,
            user: user.to_string(),
            action: action.to_string(),
            time: time.to_string(),
        })
        .collect()
    }

    pub fn devices() -> Vec<Device> {
        [
            (1, "Front door", "Reception", DeviceStatus::Online, "2024-01-01 14:30:25"),
            (2, "Back door", "Rear entrance", DeviceStatus::Online, "2024-01-01 14:25:18"),
            (3, "Warehouse door", "Warehouse", DeviceStatus::Offline, "2024-01-01 14:20:45"),
            (4, "Server room door", "Server room", DeviceStatus::Online, "2024-01-01 14:15:30"),
        ]
        .into_iter()
        .map(|(id, name, location, status, last_active)| Device {
            id,
            name: name.to_string(),
            location: location.to_string(),
            status,
            last_active: last_active.to_string(),
        })
        .collect()
    }

    pub fn members() -> Vec<Member> {
        [
            (1, "admin", "管理员", Role::Admin, MemberStatus::Active),
            (2, "zhangsan", "张三", Role::User, MemberStatus::Active),
            (3, "lisi", "李四", Role::User, MemberStatus::Active),
            (4, "wangwu", "王五", Role::User, MemberStatus::Inactive),
        ]
        .into_iter()
        .map(|(id, username, name, role, status)| Member {
            id,
            username: username.to_string(),
            name: name.to_string(),
            role,
            status,
        })
        .collect()
    }

    pub fn records() -> Vec<AccessRecord> {
        [
            (1, "张三", "Front door", "Card", "2024-01-01 14:30:25", AccessResult::Success),
            (2, "李四", "Back door", "Fingerprint", "2024-01-01 14:25:18", AccessResult::Success),
            (3, "陌生人", "Warehouse door", "PIN", "2024-01-01 14:20:45", AccessResult::Failed),
            (4, "赵六", "Server room door", "Face", "2024-01-01 14:15:30", AccessResult::Success),
            (5, "管理员", "Front door", "Remote", "2024-01-01 14:10:12", AccessResult::Success),
        ]
        .into_iter()
        .map(|(id, user, device, method, time, result)| AccessRecord {
            id,
            user: user.to_string(),
            device: device.to_string(),
            method: method.to_string(),
            time: time.to_string(),
            result,
        })
        .collect()
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        if username == MOCK_USERNAME && password == MOCK_PASSWORD {
            Ok(Self::admin())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn fetch_stats(&self) -> Result<DashboardStats, ProviderError> {
        Ok(Self::stats())
    }

    async fn fetch_list(&self, kind: ListKind) -> Result<Dataset, ProviderError> {
        Ok(match kind {
            ListKind::Activity => Dataset::Activity(Self::activity()),
            ListKind::Devices => Dataset::Devices(Self::devices()),
            ListKind::Members => Dataset::Members(Self::members()),
            ListKind::Records => Dataset::Records(Self::records()),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
