use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod sink;

#[derive(Parser)]
#[command(name = "learnhub")]
#[command(about = "LearnHub - learning platform client", long_about = None)]
struct Cli {
    /// Override the backend base URL from config.toml
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log out and clear stored credentials
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Register as an instructor
        #[arg(long)]
        instructor: bool,
    },
    /// Browse courses
    Courses {
        #[command(subcommand)]
        action: CourseAction,
    },
    /// Enroll in a course
    Enroll { course_id: String },
    /// Unenroll from a course
    Unenroll { course_id: String },
    /// Show progress for a course
    Progress { course_id: String },
    /// Mark a content section complete
    Complete {
        course_id: String,
        content_id: String,
    },
}

#[derive(Subcommand)]
enum CourseAction {
    /// List available courses
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// List the courses you are enrolled in
    Mine,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::AppContext::bootstrap(cli.api_url).await?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Register {
            name,
            email,
            password,
            instructor,
        } => commands::auth::register(&ctx, name, email, password, instructor).await,
        Commands::Courses { action } => match action {
            CourseAction::List {
                search,
                page,
                limit,
            } => commands::courses::list(&ctx, search, page, limit).await,
            CourseAction::Mine => commands::courses::mine(&ctx).await,
        },
        Commands::Enroll { course_id } => commands::courses::enroll(&ctx, &course_id).await,
        Commands::Unenroll { course_id } => commands::courses::unenroll(&ctx, &course_id).await,
        Commands::Progress { course_id } => commands::progress::show(&ctx, &course_id).await,
        Commands::Complete {
            course_id,
            content_id,
        } => commands::progress::complete(&ctx, &course_id, &content_id).await,
    }
}
