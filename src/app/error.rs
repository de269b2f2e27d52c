// ==========================================
// 予算分配シミュレータ - 应用层错误
// ==========================================

use crate::config::ConfigError;
use crate::domain::TableKind;
use crate::engine::AllocationError;
use crate::export::ExportError;
use crate::i18n::{t, t_with_args};
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{missing} が読み込まれていません")]
    MissingInput { missing: TableKind },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// 面向用户的本地化消息
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingInput { missing } => t_with_args(
                "session.missing_input",
                &[("table", &t(missing.message_key()))],
            ),
            AppError::Allocation(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
