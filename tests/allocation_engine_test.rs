// ==========================================
// AllocationEngine 集成测试
// ==========================================
// 测试目标: 分配全流程（排序 / 比率 / 预算 / 日均 / 校验错误）
// ==========================================


use media_budget_allocator::config::ColumnLabels;
use media_budget_allocator::domain::{AllocationWarning, DataTable, PriorityMode, TableKind};
use media_budget_allocator::engine::{allocate, AllocationEngine, AllocationError, AllocationParams};
use media_budget_allocator::logging;
use test_helpers::{approx, history_table, plan_table, scenario_history, scenario_plan};

fn cv_params() -> AllocationParams {
    AllocationParams::new(PriorityMode::MaximizeConversions)
}

fn cost_params() -> AllocationParams {
    AllocationParams::new(PriorityMode::MinimizeCostPerConversion)
}

// ==========================================
// 排序与比率
// ==========================================

#[test]
fn test_rank_by_pace() {
    logging::init_test();

    let outcome = allocate(&scenario_plan(), &scenario_history(), &cv_params()).unwrap();
    let table = &outcome.table;

    assert_eq!(table.channel_order(), vec!["X", "Y"]);
    assert!(approx(table.row("X").unwrap().pace, 2.0));
    assert!(approx(table.row("Y").unwrap().pace, 1.0));
    assert!(approx(table.row("X").unwrap().weight, 2.0 / 3.0));
    assert!(approx(table.row("Y").unwrap().weight, 1.0 / 3.0));
    assert!(approx(table.row("X").unwrap().projected_cost, 200.0));
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_rank_by_pace_reorders_plan_rows() {
    let plan = plan_table(&[("Y", "200"), ("X", "100")]);

    let outcome = allocate(&plan, &scenario_history(), &cv_params()).unwrap();

    assert_eq!(outcome.table.channel_order(), vec!["X", "Y"]);
}

#[test]
fn test_rank_by_cost_efficiency() {
    // X: 2/日 × 50 → CPC 50；Y: 1/日 × 200 → CPC 200
    let plan = plan_table(&[("Y", "200"), ("X", "50")]);

    let outcome = allocate(&plan, &scenario_history(), &cost_params()).unwrap();
    let table = &outcome.table;

    assert_eq!(table.channel_order(), vec!["X", "Y"]);
    assert_eq!(table.row("X").unwrap().cost_per_conversion, Some(50.0));
    assert_eq!(table.row("Y").unwrap().cost_per_conversion, Some(200.0));
    assert!(approx(table.row("X").unwrap().weight, 0.8));
    assert!(approx(table.row("Y").unwrap().weight, 0.2));
}

#[test]
fn test_cost_efficiency_cpc_equals_unit_cost() {
    let outcome = allocate(&scenario_plan(), &scenario_history(), &cost_params()).unwrap();
    let table = &outcome.table;

    assert_eq!(table.row("X").unwrap().cost_per_conversion, Some(100.0));
    assert_eq!(table.row("Y").unwrap().cost_per_conversion, Some(200.0));
    assert!(approx(table.row("X").unwrap().weight, 2.0 / 3.0));
    assert!(approx(table.row("Y").unwrap().weight, 1.0 / 3.0));
}

#[test]
fn test_cost_efficiency_undefined_cpc_sorted_last() {
    // Z 无实绩 → CPC 无定义
    let plan = plan_table(&[("Z", "10"), ("Y", "200"), ("X", "100")]);

    let outcome = allocate(&plan, &scenario_history(), &cost_params()).unwrap();
    let table = &outcome.table;

    assert_eq!(table.channel_order(), vec!["X", "Y", "Z"]);
    assert_eq!(table.row("Z").unwrap().cost_per_conversion, None);
    assert_eq!(table.row("Z").unwrap().weight, 0.0);
    assert!(approx(table.total_weight(), 1.0));
}

#[test]
fn test_weights_normalized_and_non_negative() {
    let plan = plan_table(&[("X", "100"), ("Y", "200"), ("Z", "300")]);

    for params in [cv_params(), cost_params()] {
        let outcome = allocate(&plan, &scenario_history(), &params).unwrap();
        assert!(outcome.table.rows.iter().all(|r| r.weight >= 0.0));
        assert!(approx(outcome.table.total_weight(), 1.0));
    }
}

// ==========================================
// 合并
// ==========================================

#[test]
fn test_every_plan_row_appears_once() {
    let plan = plan_table(&[("X", "100"), ("Y", "200"), ("Q", "300")]);
    // W 只出现在後方数値中，不应出现在结果里
    let history = history_table(&[("X", "2025-01-01"), ("W", "2025-01-01")]);

    let outcome = allocate(&plan, &history, &cv_params()).unwrap();
    let mut ids = outcome.table.channel_order();
    ids.sort();

    assert_eq!(ids, vec!["Q", "X", "Y"]);
    assert!(outcome.table.row("W").is_none());
}

#[test]
fn test_passthrough_columns_preserved() {
    let plan = DataTable::from_rows(
        &["媒体コード", "AID", "運営社名", "成果単価"],
        &[vec!["X", "A-1", "Acme", "100"]],
    );

    let outcome = allocate(&plan, &scenario_history(), &cv_params()).unwrap();
    let x = outcome.table.row("X").unwrap();

    assert_eq!(outcome.table.plan_columns, vec!["媒体コード", "AID", "運営社名", "成果単価"]);
    assert!(x.passthrough.contains(&("運営社名".to_string(), "Acme".to_string())));
}

#[test]
fn test_missing_unit_cost_column_warns() {
    let plan = DataTable::from_rows(&["媒体コード"], &[vec!["X"]]);

    let outcome = allocate(&plan, &scenario_history(), &cv_params()).unwrap();

    assert!(outcome.warnings.contains(&AllocationWarning::MissingUnitCostColumn));
    assert_eq!(outcome.table.row("X").unwrap().projected_cost, 0.0);
    assert!(approx(outcome.table.row("X").unwrap().weight, 1.0));
}

// ==========================================
// 预算分配
// ==========================================

#[test]
fn test_budget_distribution() {
    let params = cv_params().with_budget(10_000.0);

    let outcome = allocate(&scenario_plan(), &scenario_history(), &params).unwrap();
    let table = &outcome.table;
    let x = table.row("X").unwrap();
    let y = table.row("Y").unwrap();

    assert!((x.projected_cost - 6666.67).abs() < 0.01);
    assert!((y.projected_cost - 3333.33).abs() < 0.01);
    assert_eq!(x.projected_conversions, Some(66.0));
    assert_eq!(y.projected_conversions, Some(16.0));
    assert!(approx(table.total_projected_cost(), 10_000.0));
    assert_eq!(table.budget, Some(10_000.0));
}

#[test]
fn test_zero_or_negative_budget_is_no_budget() {
    let baseline = allocate(&scenario_plan(), &scenario_history(), &cv_params()).unwrap();

    for budget in [0.0, -500.0] {
        let params = cv_params().with_budget(budget);
        let outcome = allocate(&scenario_plan(), &scenario_history(), &params).unwrap();

        assert_eq!(outcome.table.budget, None);
        assert_eq!(outcome.table, baseline.table);
    }
}

// ==========================================
// 日均投影
// ==========================================

#[test]
fn test_daily_projection() {
    let params = cv_params().with_budget(10_000.0).with_days_remaining(10);

    let outcome = allocate(&scenario_plan(), &scenario_history(), &params).unwrap();

    for row in &outcome.table.rows {
        let daily_budget = row.daily_budget.unwrap();
        assert!(approx(daily_budget * 10.0, row.projected_cost));
        let daily_cv = row.daily_conversions.unwrap();
        assert!(approx(daily_cv * 10.0, row.projected_conversions.unwrap()));
    }
    assert!(approx(outcome.table.row("X").unwrap().daily_conversions.unwrap(), 6.6));
}

#[test]
fn test_non_positive_days_skip_daily_columns() {
    for days in [0, -1] {
        let params = cv_params().with_budget(1000.0).with_days_remaining(days);
        let outcome = allocate(&scenario_plan(), &scenario_history(), &params).unwrap();

        assert_eq!(outcome.table.days_remaining, None);
        assert!(outcome.table.rows.iter().all(|r| r.daily_budget.is_none()));
        assert!(!outcome.table.header_labels().contains(&"1日あたり予算".to_string()));
    }
}

// ==========================================
// 校验错误 / 降级
// ==========================================

#[test]
fn test_missing_date_column() {
    let history = DataTable::from_rows(&["媒体コード", "備考"], &[vec!["X", "memo"]]);

    let err = allocate(&scenario_plan(), &history, &cv_params()).unwrap_err();

    assert!(matches!(err, AllocationError::MissingDateColumn { .. }));
}

#[test]
fn test_missing_join_key() {
    let plan = DataTable::from_rows(&["AID", "成果単価"], &[vec!["A-1", "100"]]);
    let err = allocate(&plan, &scenario_history(), &cv_params()).unwrap_err();
    assert!(matches!(
        err,
        AllocationError::MissingJoinKey {
            table: TableKind::Plan,
            ..
        }
    ));

    let history = DataTable::from_rows(&["申込日"], &[vec!["2025-01-01"]]);
    let err = allocate(&scenario_plan(), &history, &cv_params()).unwrap_err();
    assert!(matches!(
        err,
        AllocationError::MissingJoinKey {
            table: TableKind::History,
            ..
        }
    ));
}

#[test]
fn test_all_dates_unparseable() {
    let history = history_table(&[("X", "not-a-date"), ("Y", "2025-13-45")]);

    let outcome = allocate(&scenario_plan(), &history, &cv_params()).unwrap();
    let table = &outcome.table;

    assert_eq!(table.channel_order(), vec!["X", "Y"]);
    assert!(table.rows.iter().all(|r| r.pace == 0.0));
    assert!(table.rows.iter().all(|r| r.weight == 0.0));
    assert!(table.rows.iter().all(|r| r.projected_cost == 0.0));
    assert!(outcome.warnings.contains(&AllocationWarning::DroppedHistoryRows {
        invalid_date: 2,
        missing_channel: 0,
    }));
    assert!(outcome.has_warning("NO_RANKABLE_CHANNEL"));
}

#[test]
fn test_mixed_date_formats_and_excel_serial() {
    // 2025-01-20 = Excel 序列 45677
    let history = history_table(&[
        ("X", "2025/01/20"),
        ("X", "45677"),
        ("X", "2025-01-21 09:30:00"),
        ("", "2025-01-21"),
    ]);

    let outcome = allocate(&scenario_plan(), &history, &cv_params()).unwrap();

    assert!(approx(outcome.table.row("X").unwrap().pace, 1.5));
    assert!(outcome.warnings.contains(&AllocationWarning::DroppedHistoryRows {
        invalid_date: 0,
        missing_channel: 1,
    }));
}

#[test]
fn test_idempotent() {
    let params = cost_params().with_budget(5000.0).with_days_remaining(7);

    let first = allocate(&scenario_plan(), &scenario_history(), &params).unwrap();
    let second = allocate(&scenario_plan(), &scenario_history(), &params).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_custom_column_labels() {
    let labels = ColumnLabels {
        channel_id: vec!["code".to_string()],
        application_date: vec!["applied_on".to_string()],
        unit_cost: vec!["cpa".to_string()],
        ..ColumnLabels::default()
    };
    let engine = AllocationEngine::new(labels);
    let plan = DataTable::from_rows(&["code", "cpa"], &[vec!["X", "100"]]);
    let history = DataTable::from_rows(&["code", "applied_on"], &[vec!["X", "2025-01-01"]]);

    let outcome = engine.allocate(&plan, &history, &cv_params()).unwrap();

    assert!(approx(outcome.table.row("X").unwrap().projected_cost, 100.0));
}

#[test]
fn test_zero_unit_cost_ranks_first_by_cost_efficiency() {
    // X: 2/日 × 0 → CPC 0（有定义，最优，但 1/CPC 无定义 → 比率 0）
    let plan = plan_table(&[("Y", "100"), ("X", "0")]);

    let outcome = allocate(&plan, &scenario_history(), &cost_params()).unwrap();
    let table = &outcome.table;

    assert_eq!(table.channel_order(), vec!["X", "Y"]);
    assert_eq!(table.row("X").unwrap().cost_per_conversion, Some(0.0));
    assert_eq!(table.row("X").unwrap().weight, 0.0);
    assert!(approx(table.row("Y").unwrap().weight, 1.0));
    assert!(!outcome.has_warning("NO_RANKABLE_CHANNEL"));
}

#[test]
fn test_blank_unit_cost_cpc_undefined() {
    let plan = plan_table(&[("X", ""), ("Y", "200")]);

    let outcome = allocate(&plan, &scenario_history(), &cost_params()).unwrap();

    assert_eq!(outcome.table.channel_order(), vec!["Y", "X"]);
    assert_eq!(outcome.table.row("X").unwrap().cost_per_conversion, None);
}

#[test]
fn test_budget_with_nothing_rankable() {
    let history = history_table(&[("X", "invalid"), ("Y", "invalid")]);

    for params in [cv_params(), cost_params()] {
        let params = params.with_budget(10_000.0);
        let outcome = allocate(&scenario_plan(), &history, &params).unwrap();

        assert_eq!(outcome.table.budget, Some(10_000.0));
        assert!(outcome.table.rows.iter().all(|r| r.projected_cost == 0.0));
        assert!(outcome
            .table
            .rows
            .iter()
            .all(|r| r.projected_conversions == Some(0.0)));
        assert!(outcome.has_warning("NO_RANKABLE_CHANNEL"));
    }
}

#[test]
fn test_very_large_days_remaining_keeps_daily_columns() {
    let days: i64 = 5_000_000_000;
    let params = cv_params().with_budget(10_000.0).with_days_remaining(days);

    let outcome = allocate(&scenario_plan(), &scenario_history(), &params).unwrap();

    assert_eq!(outcome.table.days_remaining, Some(5_000_000_000));
    let x = outcome.table.row("X").unwrap();
    assert!(approx(x.daily_budget.unwrap() * days as f64, x.projected_cost));
}
