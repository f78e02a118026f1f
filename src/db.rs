// ==========================================
// 设备维护KPI驾驶舱 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// - 环境变量 MAINTENANCE_KPI_DB_PATH 可显式指定（便于调试/测试/CI）
/// - 否则使用用户数据目录/maintenance-kpi/maintenance_kpi.db
/// - 拿不到用户数据目录时回落当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("MAINTENANCE_KPI_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./maintenance_kpi.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("maintenance-kpi");
        // 目录创建失败不阻塞启动,回落默认值
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("maintenance_kpi.db");
        }
    }

    path.to_string_lossy().to_string()
}
