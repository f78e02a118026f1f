// ==========================================
// 指标管道性质测试
// ==========================================
// 覆盖: 合计守恒 / 序列长度与下界 / 风险排序 /
//       覆盖合并幂等 / 空输入零值 / 日期归一化口径
// ==========================================

mod helpers;

use helpers::{record, reference_time};
use maintenance_kpi::domain::dashboard::SnapshotFilter;
use maintenance_kpi::domain::override_set::{OverrideSet, SeriesKey, SeriesValue};
use maintenance_kpi::engine::pipeline::DashboardPipeline;

#[test]
fn monthly_cost_sum_equals_total_cost() {
    let pipeline = DashboardPipeline::default();
    // 全部记录日期有效,本地化数值混用
    let records = vec![
        record(Some("05/01/2024"), Some("EQ1"), Some("7"), Some("1.234,50"), Some("100,00")),
        record(Some("2024-02-10"), Some("EQ2"), Some("10"), Some("200"), None),
        record(Some("15-03-2024"), Some("EQ3"), Some("22"), Some("\"50.25\""), Some("10")),
        record(Some("20240630"), Some("EQ1"), Some("12"), None, Some("33,3")),
    ];
    let result = pipeline.compute_dashboard(
        &records,
        &OverrideSet::new(),
        &SnapshotFilter::all(),
        reference_time(),
    );
    let monthly_sum: f64 = result.monthly.costs.iter().sum();
    assert!((monthly_sum - result.kpis.total_cost).abs() < 1e-6);
    assert!((result.kpis.total_cost - (1334.50 + 200.0 + 60.25 + 33.3)).abs() < 1e-6);
}

#[test]
fn monthly_correctives_count_datable_corrective_records() {
    let pipeline = DashboardPipeline::default();
    let records = vec![
        record(Some("05/01/2024"), Some("EQ1"), Some("7"), None, None),
        record(Some("06/01/2024"), Some("EQ1"), Some("7"), None, None),
        record(Some("not-a-date"), Some("EQ1"), Some("7"), None, None), // 无日期纠正性
        record(Some("07/01/2024"), Some("EQ1"), Some("10"), None, None), // 预防性
    ];
    let result = pipeline.compute_dashboard(
        &records,
        &OverrideSet::new(),
        &SnapshotFilter::all(),
        reference_time(),
    );
    // 逐月纠正性合计 == 日期可解析的纠正性记录数
    assert_eq!(result.monthly.correctives.iter().sum::<u32>(), 2);
    // 类别合计仍包含无日期记录
    assert_eq!(result.kpis.corrective_count, 3);
}

#[test]
fn distinct_equipment_independent_of_duplicates() {
    let pipeline = DashboardPipeline::default();
    let records = vec![
        record(None, Some("Bomba 01"), None, None, None),
        record(None, Some("Bomba 01"), None, None, None),
        record(None, Some("Bomba 01"), None, None, None),
        record(None, Some("Compressor 02"), None, None, None),
        record(None, None, None, None, None), // 无设备
    ];
    let result = pipeline.compute_dashboard(
        &records,
        &OverrideSet::new(),
        &SnapshotFilter::all(),
        reference_time(),
    );
    assert_eq!(result.kpis.equipment_count, 2);
}

#[test]
fn reliability_series_lengths_and_floor() {
    let pipeline = DashboardPipeline::default();
    let records: Vec<_> = (1..=28)
        .map(|d| {
            record(
                Some(format!("{d:02}/01/2024").as_str()),
                Some("EQ1"),
                Some("7"),
                None,
                None,
            )
        })
        .collect();
    let result = pipeline.compute_dashboard(
        &records,
        &OverrideSet::new(),
        &SnapshotFilter::all(),
        reference_time(),
    );
    assert_eq!(result.mttr_quarterly.len(), 3);
    assert_eq!(result.mtbf_monthly.len(), 12);
    for value in result.mtbf_monthly {
        assert!(value >= 100.0);
    }
    // 1月28单: 1000 - 560 = 440
    assert!((result.mtbf_monthly[0] - 440.0).abs() < 1e-9);
}

#[test]
fn risk_scores_bounded_and_sorted() {
    let pipeline = DashboardPipeline::default();
    let mut records = Vec::new();
    for i in 0..6 {
        let equipment = format!("EQ{i}");
        let cost = format!("{}", 100 * (i + 1));
        for j in 0..=i {
            let type_code = if j % 2 == 0 { "7" } else { "10" };
            records.push(record(
                Some("05/03/2024"),
                Some(equipment.as_str()),
                Some(type_code),
                Some(cost.as_str()),
                None,
            ));
        }
    }
    let profiles = pipeline.equipment_profiles(&records, &SnapshotFilter::all());
    assert_eq!(profiles.len(), 6);
    for pair in profiles.windows(2) {
        assert!(pair[0].risk_score >= pair[1].risk_score);
    }
    for profile in &profiles {
        assert!(profile.risk_score >= 0.0 && profile.risk_score <= 100.0);
    }
}

#[test]
fn equal_ratio_higher_cost_scores_strictly_higher() {
    let pipeline = DashboardPipeline::default();
    let records = vec![
        record(Some("05/03/2024"), Some("CHEAP"), Some("7"), Some("100"), None),
        record(Some("05/03/2024"), Some("PRICEY"), Some("7"), Some("900"), None),
    ];
    let profiles = pipeline.equipment_profiles(&records, &SnapshotFilter::all());
    let cheap = profiles.iter().find(|p| p.equipment == "CHEAP").unwrap();
    let pricey = profiles.iter().find(|p| p.equipment == "PRICEY").unwrap();
    assert!((cheap.corrective_ratio - pricey.corrective_ratio).abs() < 1e-9);
    assert!(pricey.risk_score > cheap.risk_score);
}

#[test]
fn override_merge_idempotent_and_reversible() {
    let pipeline = DashboardPipeline::default();
    let records = vec![record(Some("05/03/2024"), Some("EQ1"), Some("7"), Some("10"), None)];

    let mut overrides = OverrideSet::new();
    overrides
        .set(
            SeriesKey::MonthlyCosts,
            SeriesValue::MonthlyValues(vec![42.0; 12]),
        )
        .unwrap();

    let once = pipeline.compute_dashboard(
        &records,
        &overrides,
        &SnapshotFilter::all(),
        reference_time(),
    );
    let twice = pipeline.compute_dashboard(&records, &overrides, &SnapshotFilter::all(), reference_time());
    assert_eq!(once, twice);
    assert_eq!(once.monthly.costs, [42.0; 12]);

    // 清除覆盖后回落计算值
    overrides.clear(SeriesKey::MonthlyCosts);
    let reverted = pipeline.compute_dashboard(
        &records,
        &overrides,
        &SnapshotFilter::all(),
        reference_time(),
    );
    assert!((reverted.monthly.costs[2] - 10.0).abs() < 1e-9);
}

#[test]
fn empty_input_yields_all_zero_snapshot() {
    let pipeline = DashboardPipeline::default();
    let result = pipeline.compute_dashboard(
        &[],
        &OverrideSet::new(),
        &SnapshotFilter::all(),
        reference_time(),
    );
    assert_eq!(result.kpis.corrective_count, 0);
    assert_eq!(result.kpis.preventive_count, 0);
    assert_eq!(result.kpis.overdue_preventive_count, 0);
    assert_eq!(result.kpis.predictive_count, 0);
    assert_eq!(result.kpis.improvement_count, 0);
    assert_eq!(result.kpis.equipment_count, 0);
    assert_eq!(result.kpis.order_count, 0);
    assert_eq!(result.kpis.total_cost, 0.0);
    assert_eq!(result.kpis.availability_pct, 0.0);
    assert_eq!(result.monthly.costs, [0.0; 12]);
    assert_eq!(result.monthly.correctives, [0; 12]);
    for series in result.monthly.status.values() {
        assert_eq!(series, &[0u32; 12]);
    }
}

#[test]
fn date_normalization_conventions_flow_through_pipeline() {
    let pipeline = DashboardPipeline::default();
    // 三种写法都落到 2024年3月;日先约定下 05/03 是 3月5日
    let records = vec![
        record(Some("05/03/2024"), Some("EQ1"), Some("7"), Some("1"), None),
        record(Some("2024-03-05"), Some("EQ1"), Some("7"), Some("1"), None),
        record(Some("03-05-2024"), Some("EQ1"), Some("7"), Some("1"), None), // 5月3日
        record(Some("not-a-date"), Some("EQ1"), Some("7"), Some("1"), None),
    ];
    let result = pipeline.compute_dashboard(
        &records,
        &OverrideSet::new(),
        &SnapshotFilter::all(),
        reference_time(),
    );
    assert_eq!(result.monthly.correctives[2], 2); // 3月两条
    assert_eq!(result.monthly.correctives[4], 1); // 5月一条
    assert_eq!(result.monthly.correctives.iter().sum::<u32>(), 3);
    assert_eq!(result.kpis.corrective_count, 4); // 无日期记录保留在类别合计
}

#[test]
fn overdue_preventive_relative_to_injected_reference() {
    let pipeline = DashboardPipeline::default();
    let records = vec![
        record(Some("14/06/2024"), Some("EQ1"), Some("10"), None, None),
        record(Some("16/06/2024"), Some("EQ1"), Some("10"), None, None),
    ];
    let result = pipeline.compute_dashboard(
        &records,
        &OverrideSet::new(),
        &SnapshotFilter::all(),
        reference_time(), // 2024-06-15 12:00
    );
    assert_eq!(result.kpis.overdue_preventive_count, 1);
}
