//! Platform-admin view across tenant churches.

pub mod tenant_health;

pub use tenant_health::{
    CriticalAlert, PlatformHealth, PlatformSummary, RiskLevel, TenantHealth, TenantSnapshot,
};
