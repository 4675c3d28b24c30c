//! Domain traits (ports)

mod repositories;

pub use repositories::{
    AuditLogFilter, AuditLogRepository, CategoryRepository, PostRepository, RepoResult,
    SettingRepository, ThreadRepository, UserRepository, WarningRepository,
};
