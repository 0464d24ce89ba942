use std::path::PathBuf;

use anyhow::{Context, bail};
use aula::aula_auth::peek_claims;
use aula::aula_config::AppConfig;
use aula::aula_models::{JustificationId, JustificationStatus, MonthRange};
use aula::aula_observability::init_tracing;
use aula::modules::auth::LoginController;
use aula::modules::calendar::CalendarPage;
use aula::modules::crud::{ListFilters, StatCard};
use aula::modules::justifications::{self, JustificationsPage};
use aula::modules::messages::MessagesPage;
use aula::modules::students::{self, StudentsPage};
use aula::navigation::Route;
use aula::notifications::{ToastVariant, Toaster};
use aula::state::{AppState, init_app_state};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "aula")]
#[command(about = "Aula - school administration from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and token expiry
    Whoami,
    /// List students
    Students {
        #[arg(long, default_value = "1")]
        page: i64,

        #[arg(long, default_value = "10")]
        limit: i64,

        /// Name or DNI to search for
        #[arg(short = 's', long)]
        search: Option<String>,
    },
    /// List absence justifications
    Justifications {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Approve a justification
    Approve {
        id: String,

        #[arg(short = 'c', long)]
        comment: Option<String>,
    },
    /// Reject a justification
    Reject {
        id: String,

        #[arg(short = 'c', long)]
        comment: Option<String>,
    },
    /// Calendar events for a month (defaults to the current one)
    Events {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,
    },
    /// Inbox summary
    Messages,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Approved,
    Rejected,
}

impl From<StatusArg> for JustificationStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => JustificationStatus::Pending,
            StatusArg::Approved => JustificationStatus::Approved,
            StatusArg::Rejected => JustificationStatus::Rejected,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let log_dir = std::env::var("AULA_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("storage/logs"));
    init_tracing(&log_dir);

    let cli = Cli::parse();
    let state = init_app_state(AppConfig::from_env()).context("Failed to start")?;

    let result = run(&state, cli.command).await;
    render_toasts(&state.toaster);
    result
}

async fn run(state: &AppState, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => handle_login(state, email, password).await,
        Commands::Logout => {
            LoginController::new(state).logout();
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => handle_whoami(state),
        Commands::Students {
            page,
            limit,
            search,
        } => handle_students(state, page, limit, search).await,
        Commands::Justifications { status } => handle_justifications(state, status).await,
        Commands::Approve { id, comment } => handle_review(state, id, comment, true).await,
        Commands::Reject { id, comment } => handle_review(state, id, comment, false).await,
        Commands::Events { year, month } => handle_events(state, year, month).await,
        Commands::Messages => handle_messages(state).await,
    }
}

/// Prints whatever the last command queued up.
fn render_toasts(toaster: &Toaster) {
    for toast in toaster.active() {
        let marker = match toast.variant {
            ToastVariant::Success => "✅",
            ToastVariant::Destructive => "❌",
            ToastVariant::Default => "ℹ️",
        };
        match &toast.description {
            Some(description) => eprintln!("{marker} {}: {description}", toast.title),
            None => eprintln!("{marker} {}", toast.title),
        }
    }
    toaster.dismiss_all();
}

fn require_session(state: &AppState, route: Route) -> anyhow::Result<()> {
    if state.router.open(route, &state.session) == Route::Login {
        bail!("Not signed in. Run `aula login` first.");
    }
    Ok(())
}

fn print_cards(cards: &[StatCard]) {
    let line: Vec<String> = cards
        .iter()
        .map(|card| format!("{}: {}", card.label, card.value))
        .collect();
    println!("{}", line.join("  |  "));
}

async fn handle_login(
    state: &AppState,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?,
    };

    let user = LoginController::new(state).login(email, password).await?;
    println!("\n✅ Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

fn handle_whoami(state: &AppState) -> anyhow::Result<()> {
    let (Some(user), Some(token)) = (state.session.user(), state.session.token()) else {
        println!("Not signed in.");
        return Ok(());
    };

    println!("{} <{}> ({})", user.name, user.email, user.role);
    match peek_claims(&token).ok().and_then(|c| c.expires_at()) {
        Some(at) if at <= Utc::now() => println!("Token expired at {at}"),
        Some(at) => println!("Token valid until {at}"),
        None => println!("Token expiry unknown"),
    }
    Ok(())
}

async fn handle_students(
    state: &AppState,
    page: i64,
    limit: i64,
    search: Option<String>,
) -> anyhow::Result<()> {
    require_session(state, Route::Students)?;

    let mut filters = ListFilters::default().with_limit(limit);
    if let Some(search) = search {
        filters.set_search(search);
    }
    filters.set_page(page);

    let students_page = StudentsPage::with_filters(state, filters);
    let list = students_page.settled().await;
    if let Some(error) = list.error {
        bail!(error);
    }

    if let Some(stats) = students_page.stats() {
        print_cards(&students::stat_cards(&stats));
    }
    let data = list.data.unwrap_or_default();
    for student in &data.items {
        println!("{:<26} {:<12} {}", student.id, student.dni, student.full_name());
    }
    if let Some(p) = data.pagination {
        println!("Page {} of {} ({} students)", p.page, p.pages, p.total);
    }
    Ok(())
}

async fn handle_justifications(
    state: &AppState,
    status: Option<StatusArg>,
) -> anyhow::Result<()> {
    require_session(state, Route::Justifications)?;

    let page = JustificationsPage::new(state);
    page.filter_by_status(status.map(Into::into));
    let list = page.settled().await;
    if let Some(error) = list.error {
        bail!(error);
    }

    if let Some(stats) = page.stats() {
        print_cards(&justifications::stat_cards(&stats));
    }
    for item in page.items() {
        println!(
            "{:<26} {:<9} {} → {}  {}",
            item.id,
            item.status.as_str(),
            item.start_date,
            item.end_date,
            item.reason
        );
        if let Some(url) = page.document_url(&item) {
            println!("{:<26} document: {url}", "");
        }
    }
    Ok(())
}

async fn handle_review(
    state: &AppState,
    id: String,
    comment: Option<String>,
    approve: bool,
) -> anyhow::Result<()> {
    require_session(state, Route::Justifications)?;

    let page = JustificationsPage::new(state);
    let id = JustificationId::new(id);
    let reviewed = if approve {
        page.approve(id, comment).await?
    } else {
        page.reject(id, comment).await?
    };
    println!("{} is now {}", reviewed.id, reviewed.status.as_str());
    Ok(())
}

async fn handle_events(
    state: &AppState,
    year: Option<i32>,
    month: Option<u32>,
) -> anyhow::Result<()> {
    require_session(state, Route::Calendar)?;

    let today = Utc::now().date_naive();
    let range = MonthRange::of(year.unwrap_or(today.year()), month.unwrap_or(today.month()))
        .context("Month must be between 1 and 12")?;

    let page = CalendarPage::new(state, range);
    let list = page.settled().await;
    if let Some(error) = list.error {
        bail!(error);
    }

    println!("Events {} to {}", range.from, range.to);
    for event in page.items() {
        let place = event.location.as_deref().unwrap_or("-");
        println!("{}  {:<30} {}", event.start.format("%Y-%m-%d %H:%M"), event.title, place);
    }
    Ok(())
}

async fn handle_messages(state: &AppState) -> anyhow::Result<()> {
    require_session(state, Route::Messages)?;

    let page = MessagesPage::new(state);
    let list = page.settled().await;
    if let Some(error) = list.error {
        bail!(error);
    }

    println!("{} unread", page.unread_settled().await);
    for message in page.items() {
        let marker = if message.read { ' ' } else { '*' };
        let from = message.sender.as_deref().unwrap_or("-");
        println!("{marker} {:<24} {}", from, message.subject);
    }
    Ok(())
}
