// ==========================================
// 设备维护KPI驾驶舱 - 命令行入口
// ==========================================
// 用法:
//   maintenance-kpi [工单文件.csv|.xlsx] [年份] [月份]
// - 给定文件: 导入并落库,然后计算
// - 不给文件: 从存储加载既有快照后计算
// 结果以 JSON 打印到标准输出
// ==========================================

use std::sync::Arc;

use maintenance_kpi::db::get_default_db_path;
use maintenance_kpi::domain::dashboard::SnapshotFilter;
use maintenance_kpi::repository::sqlite_store::SqliteSnapshotStore;
use maintenance_kpi::{logging, DashboardApi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", maintenance_kpi::APP_NAME);
    tracing::info!("系统版本: {}", maintenance_kpi::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let file_path = args.first().cloned();
    let filter = SnapshotFilter {
        year: args.get(1).and_then(|s| s.parse().ok()),
        month: args.get(2).and_then(|s| s.parse().ok()),
    };

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let store = Arc::new(SqliteSnapshotStore::new(&db_path)?);
    let api = DashboardApi::new(store);

    match file_path {
        Some(path) => {
            let summary = api.import_file(&path).await?;
            tracing::info!(
                batch_id = %summary.batch_id,
                record_count = summary.record_count,
                "工单文件导入完成"
            );
        }
        None => {
            let summary = api.load().await?;
            tracing::info!(
                record_count = summary.record_count,
                override_count = summary.override_count,
                "既有快照加载完成"
            );
        }
    }

    let result = api.compute_dashboard(&filter);
    println!("{}", serde_json::to_string_pretty(&result)?);

    // 设备风险 Top 10 摘要输出到日志
    for profile in api.equipment_risk(&filter, Some(10)) {
        tracing::info!(
            equipment = %profile.equipment,
            risk_score = format!("{:.1}", profile.risk_score),
            corrective_ratio = format!("{:.1}", profile.corrective_ratio),
            "设备风险排名"
        );
    }

    Ok(())
}
