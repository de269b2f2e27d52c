// ==========================================
// 予算分配シミュレータ - 命令行入口
// ==========================================
// 子命令:
// - allocate: 读入两张表 → 分配 → 终端展示 + 导出
// - template: 导出空白プラン表模板
// ==========================================

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use media_budget_allocator::config::AppConfig;
use media_budget_allocator::engine::AllocationParams;
use media_budget_allocator::export::{render_json, render_outcome_table, SpreadsheetExporter};
use media_budget_allocator::i18n::{self, t, t_with_args};
use media_budget_allocator::{logging, PriorityMode, Session, APP_NAME, VERSION};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "media-budget-allocator", version, about = APP_NAME)]
struct Cli {
    /// 配置文件路径（JSON）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 消息语言（ja / en），覆盖配置文件
    #[arg(long, global = true)]
    locale: Option<String>,

    /// 以 JSON 行输出日志
    #[arg(long = "log-json", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 预算分配
    Allocate {
        #[arg(long)]
        plan: PathBuf,
        #[arg(long)]
        history: PathBuf,
        /// cv / cost（或画面标签）
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<PriorityMode>,
        #[arg(short, long, allow_negative_numbers = true)]
        budget: Option<f64>,
        #[arg(short, long, allow_negative_numbers = true)]
        days: Option<i64>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        #[arg(long = "output-dir")]
        output_dir: Option<PathBuf>,
        /// 不写出结果文件
        #[arg(long = "no-export")]
        no_export: bool,
    },
    /// 导出空白プラン表模板
    Template {
        #[arg(long = "output-dir")]
        output_dir: Option<PathBuf>,
    },
}

fn parse_priority(raw: &str) -> std::result::Result<PriorityMode, String> {
    raw.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_with(cli.log_json);

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
        config.validate()?;
    }
    i18n::set_locale(&config.locale);

    tracing::debug!(version = VERSION, locale = %config.locale, "{}", t("app.title"));

    match cli.command {
        Commands::Allocate {
            plan,
            history,
            priority,
            budget,
            days,
            format,
            output_dir,
            no_export,
        } => {
            let mut session = Session::new(&config);
            session
                .load_plan(&plan)
                .map_err(|e| anyhow!(e.user_message()))?;
            session
                .load_history(&history)
                .map_err(|e| anyhow!(e.user_message()))?;

            let mut params = AllocationParams::new(priority.unwrap_or(config.default_priority));
            params.budget = budget;
            params.days_remaining = days;

            tracing::info!("{}", t("session.calculating"));
            let report = session.run(&params).map_err(|e| anyhow!(e.user_message()))?;
            let outcome = &report.outcome;

            for warning in &outcome.warnings {
                eprintln!("⚠ {}", warning.message());
            }

            let exporter = SpreadsheetExporter::new();
            match format {
                // 空结果提示已随警告输出
                OutputFormat::Table => {
                    if let Some(rendered) = render_outcome_table(outcome) {
                        println!("{}", rendered);
                    }
                }
                OutputFormat::Json => println!("{}", render_json(&report)?),
                OutputFormat::Csv => {
                    let bytes = exporter.result_to_csv_bytes(&outcome.table)?;
                    print!("{}", String::from_utf8_lossy(&bytes));
                }
            }

            if !no_export && !outcome.is_empty() {
                let dir = output_dir.unwrap_or_else(|| config.export.resolve_output_dir());
                let path =
                    exporter.write_result(&outcome.table, &dir, Local::now().date_naive())?;
                eprintln!(
                    "{}",
                    t_with_args("result.exported", &[("path", &path.display().to_string())])
                );
            }
        }
        Commands::Template { output_dir } => {
            let dir = output_dir.unwrap_or_else(|| config.export.resolve_output_dir());
            let path = SpreadsheetExporter::new().write_template(&dir)?;
            println!(
                "{}",
                t_with_args("template.exported", &[("path", &path.display().to_string())])
            );
        }
    }

    Ok(())
}
