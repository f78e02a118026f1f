// ==========================================
// 设备维护KPI驾驶舱 - SQLite 快照存储
// ==========================================
// 职责: 管理 work_order_record / override_series 表的读写
// 红线: 存储层不含指标逻辑,只负责数据访问
// ==========================================
// 记录快照与覆盖集分表存放、独立生命周期:
// 重新导入记录只动 work_order_record,覆盖集原样保留
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::override_set::{OverrideSet, SeriesKey, SeriesValue};
use crate::domain::work_order::WorkOrderRecord;
use crate::repository::error::{StoreError, StoreResult};
use crate::repository::snapshot_store::SnapshotStore;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

// ==========================================
// SqliteSnapshotStore - SQLite 存储实现
// ==========================================
pub struct SqliteSnapshotStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSnapshotStore {
    /// 打开数据库并初始化 schema
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> StoreResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// 从已有连接创建存储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> StoreResult<Self> {
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// 获取数据库连接
    fn get_conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }

    /// 初始化 schema
    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS work_order_record (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                date_text TEXT,
                equipment_id TEXT,
                equipment_name TEXT,
                maintenance_type_code TEXT,
                criticality TEXT,
                analyst TEXT,
                state TEXT,
                material_cost TEXT,
                labor_cost TEXT
            );

            CREATE TABLE IF NOT EXISTS override_series (
                series_key TEXT PRIMARY KEY,
                value_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    /// 加载记录快照（按导入顺序,保证并列打破规则可复现）
    async fn load_records(&self) -> StoreResult<Vec<WorkOrderRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                date_text, equipment_id, equipment_name, maintenance_type_code,
                criticality, analyst, state, material_cost, labor_cost
            FROM work_order_record
            ORDER BY seq
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(WorkOrderRecord {
                date: row.get(0)?,
                equipment_id: row.get(1)?,
                equipment_name: row.get(2)?,
                maintenance_type_code: row.get(3)?,
                criticality: row.get(4)?,
                analyst: row.get(5)?,
                state: row.get(6)?,
                material_cost: row.get(7)?,
                labor_cost: row.get(8)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn load_overrides(&self) -> StoreResult<OverrideSet> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT series_key, value_json FROM override_series ORDER BY series_key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut overrides = OverrideSet::new();
        for row in rows {
            let (key_text, value_json) = row?;

            // 脏行降级: 未知键/坏形状只告警跳过,不让整个覆盖集加载失败
            let Some(key) = SeriesKey::from_db_str(&key_text) else {
                warn!(series_key = %key_text, "覆盖集存在未知序列键,跳过");
                continue;
            };
            let value: SeriesValue = match serde_json::from_str(&value_json) {
                Ok(value) => value,
                Err(e) => {
                    warn!(series_key = %key_text, error = %e, "覆盖值反序列化失败,跳过");
                    continue;
                }
            };
            if let Err(e) = overrides.set(key, value) {
                warn!(series_key = %key_text, error = %e, "覆盖值形状校验失败,跳过");
            }
        }
        Ok(overrides)
    }

    /// 保存记录快照（事务内整体替换）
    async fn save_records(&self, records: &[WorkOrderRecord]) -> StoreResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::TransactionError(e.to_string()))?;

        tx.execute("DELETE FROM work_order_record", [])?;
        for record in records {
            tx.execute(
                r#"
                INSERT INTO work_order_record (
                    date_text, equipment_id, equipment_name, maintenance_type_code,
                    criticality, analyst, state, material_cost, labor_cost
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    record.date,
                    record.equipment_id,
                    record.equipment_name,
                    record.maintenance_type_code,
                    record.criticality,
                    record.analyst,
                    record.state,
                    record.material_cost,
                    record.labor_cost,
                ],
            )?;
        }

        tx.commit()
            .map_err(|e| StoreError::TransactionError(e.to_string()))?;
        Ok(())
    }

    /// 保存覆盖集（事务内整体替换,后写覆盖）
    async fn save_overrides(&self, overrides: &OverrideSet) -> StoreResult<()> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::TransactionError(e.to_string()))?;

        let updated_at = Utc::now().to_rfc3339();
        tx.execute("DELETE FROM override_series", [])?;
        for (key, value) in overrides.iter() {
            let value_json = serde_json::to_string(value)?;
            tx.execute(
                "INSERT INTO override_series (series_key, value_json, updated_at) VALUES (?1, ?2, ?3)",
                params![key.to_db_str(), value_json, updated_at],
            )?;
        }

        tx.commit()
            .map_err(|e| StoreError::TransactionError(e.to_string()))?;
        Ok(())
    }
}
