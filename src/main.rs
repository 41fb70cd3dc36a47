//! mathjosa - 수학 문항 검수 CLI

use clap::{Parser, ValueEnum};
use mathjosa::config::load_config;
use mathjosa::{ReviewReport, Reviewer};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "mathjosa")]
#[command(version)]
#[command(about = "수학 문항 검수: 수식 뒤 조사 호응, 수식 표기, 계산, 맞춤법", long_about = None)]
struct Cli {
    /// 입력 파일 (없으면 표준 입력). 평문 또는 {"result": "..."} JSON
    inputs: Vec<PathBuf>,

    /// 설정 파일 경로 (기본: ~/.config/mathjosa/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 출력 형식
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// 출력 파일 (없으면 표준 출력)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 맞춤법 교정 끄기
    #[arg(long)]
    no_spelling: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// 교정본은 출력으로, 검수 내역은 표준 에러로
    Text,
    /// 전체 보고서 JSON
    Json,
}

fn main() -> ExitCode {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("오류: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> io::Result<()> {
    let config = load_config(cli.config.as_deref());
    let reviewer = Reviewer::from_config(&config).with_spelling(!cli.no_spelling);

    let docs = read_inputs(&cli.inputs)?;
    let reports = reviewer.review_batch(&docs);

    let rendered = match cli.format {
        Format::Json => {
            let json = if reports.len() == 1 {
                serde_json::to_string_pretty(&reports[0])
            } else {
                serde_json::to_string_pretty(&reports)
            };
            json.map_err(io::Error::other)?
        }
        Format::Text => {
            for (i, report) in reports.iter().enumerate() {
                let name = cli
                    .inputs
                    .get(i)
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<stdin>".to_string());
                print_summary(&name, report);
            }
            reports
                .iter()
                .map(|r| r.corrected.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered)
        }
    }
}

fn read_inputs(inputs: &[PathBuf]) -> io::Result<Vec<String>> {
    if inputs.is_empty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(vec![buf]);
    }
    inputs
        .iter()
        .map(|path| {
            fs::read_to_string(path)
                .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })
        .collect()
}

fn print_summary(name: &str, report: &ReviewReport) {
    if report.is_clean() {
        eprintln!("[{}] 문제 없음", name);
        return;
    }

    if !report.issues.is_empty() {
        eprintln!("[{}] 수식/계산 오류 {}건", name, report.issues.len());
        for issue in &report.issues {
            eprintln!(
                "  - [{}] {} | {} | {}",
                issue.kind, issue.target, issue.message, issue.context
            );
        }
    }

    let corrections: Vec<_> = report.corrections.iter().chain(&report.spelling).collect();
    if !corrections.is_empty() {
        eprintln!("[{}] 교정 {}건", name, corrections.len());
        for entry in corrections {
            eprintln!(
                "  - [{}] {}: '{}' → '{}' | {}",
                entry.reason, entry.target, entry.original, entry.corrected, entry.context
            );
        }
    }
}
