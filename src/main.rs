use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::warn;

use renhe_reply_client::api::ApiClient;
use renhe_reply_client::config::AppConfig;
use renhe_reply_client::errors::{ReplyClientError, Result};
use renhe_reply_client::forms::{AnswerDraft, SignatureEncoder};
use renhe_reply_client::services::admin::export::summary_csv;
use renhe_reply_client::services::messages::user_message;
use renhe_reply_client::services::{AdminService, StudentService};
use renhe_reply_client::session::create_session_store;
use renhe_reply_client::utils::validate::is_pin_shaped;
use renhe_reply_client::view::{ClassFilter, SortMode, ViewState, project};

#[derive(Parser)]
#[command(name = "renhe-reply", version, about = "仁和活動回條命令行客户端")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 登入：5 位数字视为学生密码，其余视为管理金钥
    Login {
        secret: String,
        #[arg(long)]
        class: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// 学生操作
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },
    /// 管理者操作
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// 登出并清除本地会话
    Logout {
        /// student / admin / all
        #[arg(long, default_value = "all")]
        role: String,
    },
}

#[derive(Subcommand)]
enum StudentCommand {
    /// 活动列表与本人回覆状态
    Events,
    /// 全校名单（确认班级与姓名的正确写法）
    Roster,
    /// 填写并送出回条
    Submit {
        event_id: String,
        /// 一般活动：是否参加
        #[arg(long)]
        attend: Option<String>,
        /// 备注 / 家长备注
        #[arg(long, default_value = "")]
        note: String,
        /// 同意书活动：同意 / 不同意
        #[arg(long)]
        consent: Option<String>,
        /// 遊覽車活动：去程是否搭车（是 / 否）
        #[arg(long)]
        go_bus: Option<String>,
        /// 遊覽車活动：回程是否搭车（是 / 否）
        #[arg(long)]
        back_bus: Option<String>,
        /// 家长签名 dataURL 文件
        #[arg(long)]
        signature_file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// 回覆统计摘要
    Summary {
        /// 另存本地摘要 CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// 单一活动明细表
    Detail {
        event_id: String,
        /// 跳过缓存强制重抓
        #[arg(long)]
        force: bool,
        /// 班级过滤
        #[arg(long)]
        class: Option<String>,
        /// 排序：instrument / time-asc / time-desc / class
        #[arg(long, default_value = "class")]
        sort: String,
    },
    /// 单一学生的全部最新回覆
    Student { class: String, name: String },
    /// 代学生填写回条（answer 为 JSON 对象字符串）
    Fill {
        event_id: String,
        class: String,
        name: String,
        answer: String,
    },
    /// 汇出活动明细 CSV
    Export { event_id: String, path: PathBuf },
}

/// 从文件读入现成 dataURL 的编码器（像素管线在客户端之外完成）
struct FileSignatureEncoder {
    data_url: String,
}

impl FileSignatureEncoder {
    fn load(path: &Path) -> Result<Self> {
        let data_url = std::fs::read_to_string(path)?.trim().to_string();
        if !data_url.starts_with("data:image/") {
            return Err(ReplyClientError::validation(
                "签名文件内容必须是 data:image/ 开头的 dataURL",
            ));
        }
        Ok(Self { data_url })
    }
}

impl SignatureEncoder for FileSignatureEncoder {
    fn encode(&self, _quality: f32) -> Result<String> {
        Ok(self.data_url.clone())
    }
}

fn parse_sort(raw: &str) -> Result<SortMode> {
    match raw {
        "instrument" => Ok(SortMode::Instrument),
        "time-asc" => Ok(SortMode::TimeAsc),
        "time-desc" => Ok(SortMode::TimeDesc),
        "class" => Ok(SortMode::Class),
        other => Err(ReplyClientError::validation(format!(
            "未知的排序模式：{other}"
        ))),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let api = ApiClient::from_config()?;
    let sessions = create_session_store()?;

    match cli.command {
        Command::Login {
            secret,
            class,
            name,
        } => {
            // 密码形状分流：5 位数字走学生端，其余走管理端
            if is_pin_shaped(secret.trim()) {
                let (class, name) = match (class, name) {
                    (Some(class), Some(name)) => (class, name),
                    _ => {
                        return Err(ReplyClientError::validation(
                            "學生登入需要 --class 與 --name",
                        ));
                    }
                };
                let service = StudentService::new(api, sessions);
                let session = service.login(&class, &name, secret.trim()).await?;
                println!(
                    "登入成功：{} {}",
                    session.class.unwrap_or_default(),
                    session.name.unwrap_or_default()
                );
            } else {
                let service = AdminService::new(api, sessions);
                service.login(&secret).await?;
                println!("管理者登入成功");
            }
        }

        Command::Student { command } => {
            let service = StudentService::new(api, sessions);
            match command {
                StudentCommand::Events => {
                    let entries = service.events().await?;
                    for entry in entries {
                        let status = match &entry.latest {
                            Some(r) => format!(
                                "已回覆（{}）",
                                r.last_reply_ts.clone().unwrap_or_default()
                            ),
                            None => "未回覆".to_string(),
                        };
                        println!(
                            "{}\t{}\t截止：{}\t{}",
                            entry.event.event_id,
                            entry.event.title,
                            entry.event.deadline.clone().unwrap_or_default(),
                            status
                        );
                    }
                }
                StudentCommand::Roster => {
                    for row in service.roster().await? {
                        println!(
                            "{}\t{}\t{}",
                            row.class,
                            row.name,
                            row.instrument.clone().unwrap_or_default()
                        );
                    }
                }
                StudentCommand::Submit {
                    event_id,
                    attend,
                    note,
                    consent,
                    go_bus,
                    back_bus,
                    signature_file,
                } => {
                    let mut opened = service.open(&event_id).await?;
                    match &mut opened.model.draft {
                        AnswerDraft::Plain {
                            attend: draft_attend,
                            note: draft_note,
                            ..
                        } => {
                            if attend.is_some() {
                                *draft_attend = attend;
                            }
                            if !note.is_empty() {
                                *draft_note = note;
                            }
                        }
                        AnswerDraft::Consent {
                            consent_choice,
                            go_bus: draft_go,
                            back_bus: draft_back,
                            parent_note,
                            signature,
                            ..
                        } => {
                            if let Some(raw) = consent {
                                *consent_choice = Some(
                                    raw.parse().map_err(ReplyClientError::validation)?,
                                );
                            }
                            if let Some(raw) = go_bus {
                                *draft_go =
                                    Some(raw.parse().map_err(ReplyClientError::validation)?);
                            }
                            if let Some(raw) = back_bus {
                                *draft_back =
                                    Some(raw.parse().map_err(ReplyClientError::validation)?);
                            }
                            if !note.is_empty() {
                                *parent_note = note;
                            }
                            if let Some(path) = signature_file {
                                let encoder = FileSignatureEncoder::load(&path)?;
                                signature.begin_drawing();
                                signature.capture(
                                    &encoder,
                                    AppConfig::get().form.signature_budget_chars,
                                )?;
                            }
                        }
                    }
                    let ack = service.submit(&opened.event, &opened.model).await?;
                    println!("已成功送出回條（時間：{}）", ack.ts);
                }
            }
        }

        Command::Admin { command } => {
            let service = AdminService::new(api, sessions);
            match command {
                AdminCommand::Summary { csv } => {
                    let summary = service.summary().await?;
                    let mut ids: Vec<&String> = summary.by_event.keys().collect();
                    ids.sort();
                    for id in &ids {
                        let item = &summary.by_event[*id];
                        println!(
                            "{}\t{}\t已回覆 {}/{}",
                            id,
                            item.event
                                .as_ref()
                                .map(|e| e.title.clone())
                                .unwrap_or_default(),
                            item.replied,
                            item.total_roster
                        );
                    }
                    if let Some(path) = csv {
                        std::fs::write(&path, summary_csv(&summary))?;
                        println!("摘要 CSV 已存至 {}", path.display());
                    }
                }
                AdminCommand::Detail {
                    event_id,
                    force,
                    class,
                    sort,
                } => {
                    let state = ViewState {
                        class_filter: class.map(ClassFilter::Class).unwrap_or(ClassFilter::All),
                        sort_mode: parse_sort(&sort)?,
                    };
                    let Some(detail) = service.view_results(&event_id, force).await? else {
                        return Ok(());
                    };
                    let table = project(&detail, &state);

                    println!(
                        "{}：已回覆 {}/{}",
                        detail.event.title, detail.replied_count, detail.total_roster
                    );
                    for row in &table.rows {
                        let mut line = format!(
                            "{}\t{}\t{}\t{}",
                            row.class,
                            row.name,
                            row.instrument.clone().unwrap_or_default(),
                            row.choice.clone().unwrap_or_default()
                        );
                        if table.has_bus_columns {
                            line.push_str(&format!(
                                "\t去程:{}\t回程:{}",
                                row.go_bus.clone().unwrap_or_default(),
                                row.back_bus.clone().unwrap_or_default()
                            ));
                        }
                        line.push('\t');
                        line.push_str(&row.reply_ts_raw.clone().unwrap_or_default());
                        println!("{line}");
                    }
                    if !table.not_replied.is_empty() {
                        println!("-- 未回覆 --");
                        for row in &table.not_replied {
                            println!("{}\t{}", row.class, row.name);
                        }
                    }
                }
                AdminCommand::Student { class, name } => {
                    let records = service.student_latest(&class, &name).await?;
                    for record in records {
                        println!(
                            "{}\t{}\t{}",
                            record.event_id,
                            record.last_reply_ts.clone().unwrap_or_default(),
                            record.answer
                        );
                    }
                }
                AdminCommand::Fill {
                    event_id,
                    class,
                    name,
                    answer,
                } => {
                    let ack = service.fill_reply(&event_id, &class, &name, &answer).await?;
                    println!("已代填回條（時間：{}）", ack.ts);
                }
                AdminCommand::Export { event_id, path } => {
                    service.export(&event_id, &path).await?;
                    println!("明細 CSV 已存至 {}", path.display());
                }
            }
        }

        Command::Logout { role } => {
            let student = StudentService::new(api.clone(), sessions.clone());
            let admin = AdminService::new(api, sessions);
            match role.as_str() {
                "student" => student.logout().await?,
                "admin" => admin.logout().await?,
                "all" => {
                    student.logout().await?;
                    admin.logout().await?;
                }
                other => {
                    return Err(ReplyClientError::validation(format!(
                        "未知的角色：{other}"
                    )));
                }
            }
            println!("已登出");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    setup_panic!();

    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return std::process::ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            warn!("Command failed: {}", e);
            eprintln!("{}", user_message(&e));
            std::process::ExitCode::FAILURE
        }
    }
}
