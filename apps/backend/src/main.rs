use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use health_backend::config::db::{db_url, DbProfile};
use health_backend::infra::db::connect_db;
use health_backend::{AppError, SecurityConfig, TokenAuthority};
use migration::{migrate, MigrationCommand};

mod telemetry;

#[derive(Clone, Copy, ValueEnum)]
enum MigrateCmd {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<MigrateCmd> for MigrationCommand {
    fn from(cmd: MigrateCmd) -> Self {
        match cmd {
            MigrateCmd::Up => MigrationCommand::Up,
            MigrateCmd::Down => MigrationCommand::Down,
            MigrateCmd::Fresh => MigrationCommand::Fresh,
            MigrateCmd::Reset => MigrationCommand::Reset,
            MigrateCmd::Refresh => MigrationCommand::Refresh,
            MigrateCmd::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "health-backend")]
#[command(about = "Access-token and appointment-schema operations for the health backend")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue an access token (needs BACKEND_JWT_SECRET)
    Issue {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        role: String,
    },
    /// Print a token's claims after checking its signature (expiry not enforced)
    Inspect { token: String },
    /// Check a token against a subject; exits 1 when invalid or expired
    Verify {
        token: String,
        #[arg(long)]
        subject: String,
    },
    /// Run appointment-schema migrations against DATABASE_URL
    Migrate {
        #[arg(value_enum)]
        command: MigrateCmd,
        #[arg(short, long, value_enum, default_value = "prod")]
        profile: Profile,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    let args = Args::parse();
    match run(args.command).await {
        Ok(code) => code,
        // Rejected tokens and broken setup both exit 2; only the log level differs
        Err(e) if e.is_auth_rejection() => {
            tracing::warn!(code = e.code(), error = %e, "token rejected");
            eprintln!("❌ {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "command failed");
            eprintln!("❌ {e}");
            ExitCode::from(2)
        }
    }
}

async fn run(command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Issue { subject, role } => {
            let authority = authority()?;
            println!("{}", authority.issue(&subject, &role)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Inspect { token } => {
            let claims = authority()?.decode(&token)?;
            println!("sub:  {}", claims.sub);
            println!("role: {}", claims.role.as_deref().unwrap_or("<missing>"));
            println!("iat:  {}", claims.iat);
            println!("exp:  {}", claims.exp);
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { token, subject } => {
            if authority()?.is_valid(&token, &subject)? {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::from(1))
            }
        }
        Command::Migrate { command, profile } => {
            let profile = match profile {
                Profile::Prod => DbProfile::Prod,
                Profile::Test => DbProfile::Test,
            };
            let conn = connect_db(&db_url(profile)?).await?;
            migrate(&conn, command.into()).await?;
            println!("✅ migrations complete");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn authority() -> Result<TokenAuthority, AppError> {
    Ok(TokenAuthority::new(&SecurityConfig::from_env()?))
}
