// ==========================================
// 予算分配シミュレータ - 会话状态
// ==========================================
// 职责: 持有已读入的两张表，驱动一次分配运行
// 状态: Idle ↔ Calculating（运行结束后无论成败都回到 Idle）
// ==========================================

use crate::app::error::{AppError, AppResult};
use crate::config::AppConfig;
use crate::domain::{DataTable, TableKind};
use crate::engine::{AllocationEngine, AllocationOutcome, AllocationParams};
use crate::i18n::t_with_args;
use crate::importer::UniversalFileParser;
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Idle,
    Calculating,
}

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub params: AllocationParams,
    pub outcome: AllocationOutcome,
}

pub struct Session {
    engine: AllocationEngine,
    parser: UniversalFileParser,
    plan: Option<DataTable>,
    history: Option<DataTable>,
    status: RunStatus,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            engine: AllocationEngine::new(config.columns.clone()),
            parser: UniversalFileParser,
            plan: None,
            history: None,
            status: RunStatus::Idle,
        }
    }

    /// 读入プラン表，返回数据行数
    pub fn load_plan(&mut self, path: &Path) -> AppResult<usize> {
        let table = self.parser.parse(path)?;
        let rows = table.len();
        tracing::info!(
            "{}",
            t_with_args("session.plan_loaded", &[("rows", &rows.to_string())])
        );
        self.plan = Some(table);
        Ok(rows)
    }

    /// 读入後方数値データ，返回数据行数
    pub fn load_history(&mut self, path: &Path) -> AppResult<usize> {
        let table = self.parser.parse(path)?;
        let rows = table.len();
        tracing::info!(
            "{}",
            t_with_args("session.history_loaded", &[("rows", &rows.to_string())])
        );
        self.history = Some(table);
        Ok(rows)
    }

    pub fn set_plan(&mut self, table: DataTable) {
        self.plan = Some(table);
    }

    pub fn set_history(&mut self, table: DataTable) {
        self.history = Some(table);
    }

    pub fn is_ready(&self) -> bool {
        self.plan.is_some() && self.history.is_some()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// 执行一次分配
    ///
    /// 两张表必须都已读入，否则返回 MissingInput（不进入 Calculating）
    pub fn run(&mut self, params: &AllocationParams) -> AppResult<RunReport> {
        let (plan, history) = match (&self.plan, &self.history) {
            (Some(plan), Some(history)) => (plan, history),
            (None, _) => {
                return Err(AppError::MissingInput {
                    missing: TableKind::Plan,
                })
            }
            (_, None) => {
                return Err(AppError::MissingInput {
                    missing: TableKind::History,
                })
            }
        };

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("run", %run_id);
        let _enter = span.enter();

        self.status = RunStatus::Calculating;
        let result = self.engine.allocate(plan, history, params);
        self.status = RunStatus::Idle;

        let outcome = result?;
        Ok(RunReport {
            run_id,
            params: *params,
            outcome,
        })
    }
}
