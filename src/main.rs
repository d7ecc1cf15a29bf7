use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use exam_evaluate::models::load_batch_manifest;
use exam_evaluate::utils::logging::log_startup;
use exam_evaluate::{
    logger, BatchEvaluator, CandidateInfo, Config, EvaluationFlow, FileSchemeProvider,
    ResultStore, Submission,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "exam_evaluate", about = "考试答卷评分与成绩查询")]
struct Cli {
    /// 考试数据根目录
    #[arg(long, env = "EXAM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 初始化考试的空成绩表
    InitTable {
        #[arg(long)]
        exam: String,
    },
    /// 评分一份答题文档并写入成绩表
    Evaluate {
        #[arg(long)]
        exam: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        roll: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        gender: String,
        #[arg(long)]
        state: String,
        /// 答题文档路径
        #[arg(long)]
        file: PathBuf,
    },
    /// 查询考生成绩，输出 JSON
    Result {
        #[arg(long)]
        exam: String,
        #[arg(long)]
        roll: String,
    },
    /// 按清单批量评分
    Batch {
        /// 清单文件（TOML）
        manifest: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);
    log_startup(&config);

    let store = Arc::new(ResultStore::new(&config));
    let schemes = Arc::new(FileSchemeProvider::new(&config));
    let flow = EvaluationFlow::new(schemes, store);

    match cli.command {
        Command::InitTable { exam } => {
            let created = flow.init_exam_table(&exam).await?;
            println!("{}", if created { "created" } else { "exists" });
        }
        Command::Evaluate {
            exam,
            name,
            roll,
            category,
            gender,
            state,
            file,
        } => {
            let submission = Submission::new(
                exam,
                CandidateInfo {
                    name,
                    roll,
                    category,
                    gender,
                    state,
                },
            );
            let evaluation = flow
                .evaluate_file(&submission, &file)
                .await
                .with_context(|| format!("{} 评分失败", submission))?;
            println!("{}", serde_json::to_string_pretty(&evaluation.sheet)?);
        }
        Command::Result { exam, roll } => match flow.query_result(&exam, &roll).await {
            Ok(view) => println!("{}", serde_json::to_string_pretty(&view)?),
            Err(e) if e.is_not_found() => {
                eprintln!("Candidate not found");
                std::process::exit(2);
            }
            Err(e) => return Err(e.into()),
        },
        Command::Batch { manifest } => {
            let manifest = load_batch_manifest(&manifest).await?;
            let stats = BatchEvaluator::new(flow, &config).run(manifest).await?;
            if stats.failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
