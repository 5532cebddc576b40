use alarmsync_api::models::{ArmState, Id};
use alarmsync_client::screens::{AlarmListScreen, LoginOutcome, LoginScreen};
use alarmsync_client::{AlarmClient, ApiMode, Settings};
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

/// Terminal front-end for the alarm monitoring backend
#[derive(Parser, Debug)]
#[command(name = "alarmsync")]
#[command(version, about = "Log in, check the session and arm or disarm device alarms")]
struct Args {
    /// Use the development backend regardless of configuration
    #[arg(long)]
    development: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in, reusing remembered credentials for any value left out
    Login {
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session token
    Logout,
    /// Ask the backend whether the stored session is still valid
    Check,
    /// List the enabled alarms of a device
    Alarms { mac: String },
    /// Arm one alarm of a device
    Arm { mac: String, id: Id },
    /// Disarm one alarm of a device
    Disarm { mac: String, id: Id },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level}").into()
        }))
        .init();

    let client = AlarmClient::open(&settings).await?;
    if args.development {
        client.context().set_mode(ApiMode::Development);
    }

    match args.command {
        Command::Login { email, password } => {
            let mut screen = LoginScreen::open(client.session.clone()).await?;
            if let Some(label) = screen.mode_label() {
                println!("{label}");
            }
            if let Some(email) = email {
                screen.email = email;
            }
            if let Some(password) = password {
                screen.password = password;
            }

            match screen.submit().await {
                LoginOutcome::Authenticated => println!("Logged in as {}", screen.email),
                _ => bail!("{}", screen.notice().map(|n| n.message()).unwrap_or_default()),
            }
        }
        Command::Logout => {
            client.session.logout().await?;
            println!("Logged out");
        }
        Command::Check => {
            if client.session.is_session_valid().await {
                println!("Session is valid");
            } else {
                bail!("Session is not valid");
            }
        }
        Command::Alarms { mac } => {
            let mut screen = AlarmListScreen::new(client.alarms.clone(), mac);
            if !screen.refresh().await {
                bail!("{}", screen.notice().map(|n| n.message()).unwrap_or_default());
            }
            if let Some(message) = screen.empty_message() {
                println!("{message}");
            }
            for alarm in screen.alarms().iter() {
                println!(
                    "{:>4}  {:<10}  {}",
                    alarm.id_alarm,
                    ArmState::from(alarm.armado).to_string(),
                    alarm.texto
                );
            }
        }
        Command::Arm { mac, id } => set_state(&client, mac, id, ArmState::Armed).await?,
        Command::Disarm { mac, id } => set_state(&client, mac, id, ArmState::Disarmed).await?,
    }

    Ok(())
}

async fn set_state(client: &AlarmClient, mac: String, id: Id, state: ArmState) -> Result<()> {
    let mut screen = AlarmListScreen::new(client.alarms.clone(), mac);
    if !screen.refresh().await {
        bail!("{}", screen.notice().map(|n| n.message()).unwrap_or_default());
    }
    if screen.select(id).is_none() {
        bail!("Alarm {id} is not enabled on this device");
    }

    match screen.choose(state).await {
        Some(alarm) => println!("{} -> {}", alarm.texto, ArmState::from(alarm.armado)),
        None => bail!("{}", screen.notice().map(|n| n.message()).unwrap_or_default()),
    }

    Ok(())
}
