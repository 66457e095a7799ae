use rentgate::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const ENV_SESSION_FILE: &str = "RENTGATE_SESSION_FILE";
const DEFAULT_SESSION_FILE: &str = "rentgate-session.json";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Login { username: String, password: String },
    Register { username: String, password: String, confirm: String },
    Goto(String),
    Nav(Option<String>),
    Whoami,
    Logout,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["login", user, pass] => Ok(Command::Login {
            username: user.to_string(),
            password: pass.to_string(),
        }),
        ["register", user, pass, confirm] => Ok(Command::Register {
            username: user.to_string(),
            password: pass.to_string(),
            confirm: confirm.to_string(),
        }),
        ["goto", path] => Ok(Command::Goto(path.to_string())),
        ["nav"] => Ok(Command::Nav(None)),
        ["nav", path] => Ok(Command::Nav(Some(path.to_string()))),
        ["whoami"] => Ok(Command::Whoami),
        ["logout"] => Ok(Command::Logout),
        ["help"] | [] => Ok(Command::Help),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        [cmd, ..] => Err(format!("unknown command or wrong arguments: {cmd} (try `help`)")),
    }
}

const HELP: &str = "\
commands:
  login <user> <password>
  register <user> <password> <confirm>
  goto <path>          navigate, e.g. `goto /cars`
  nav [path]           show the navigation bar
  whoami
  logout
  quit";

// ---------------------------------------------------------------------------
// Console loop
// ---------------------------------------------------------------------------

fn show_navigation(nav: &Navigation) {
    match nav {
        Navigation::Render { route, params } if params.is_empty() => println!("render {route}"),
        Navigation::Render { route, params } => println!("render {route} {params:?}"),
        Navigation::Redirect { to, reason } => println!("redirect → {to} ({reason})"),
        Navigation::NotFound => println!("not found"),
    }
}

async fn run<S: SessionStore, A: AuthApi>(shell: &Shell<S, A>, command: Command) {
    match command {
        Command::Login { username, password } => {
            match shell.sign_in(&Credentials::new(username, password)).await {
                Ok(signed_in) => {
                    println!("signed in as {}", signed_in.session.role);
                    show_navigation(&shell.navigate(&signed_in.landing));
                }
                Err(e) => println!("sign-in failed: {e}"),
            }
        }
        Command::Register { username, password, confirm } => {
            match shell.register(&Credentials::new(username, password), &confirm).await {
                Ok(signed_in) => {
                    println!("registered and signed in as {}", signed_in.session.role);
                    show_navigation(&shell.navigate(&signed_in.landing));
                }
                Err(RentgateError::AutoSignInFailed(e)) => {
                    println!("registered, but sign-in failed: {e}");
                    show_navigation(&shell.navigate(shell.sign_in_route()));
                }
                Err(e) => println!("registration failed: {e}"),
            }
        }
        Command::Goto(path) => show_navigation(&shell.navigate(&path)),
        Command::Nav(path) => {
            let path = path.unwrap_or_else(|| shell.landing());
            match shell.nav_bar(&path) {
                None => println!("(no navigation bar on {path})"),
                Some(bar) => {
                    for item in &bar.items {
                        println!("  {:<16} {}", item.label, item.route);
                    }
                    if bar.show_sign_out {
                        println!("  {:<16}", "Sign out");
                    }
                }
            }
        }
        Command::Whoami => match shell.session() {
            Some(session) => println!("{} (landing {})", session.role, shell.landing()),
            None => println!("not signed in"),
        },
        Command::Logout => {
            let next = shell.sign_out();
            show_navigation(&shell.navigate(next));
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let session_file =
        std::env::var(ENV_SESSION_FILE).unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string());
    let config = ClientConfig::from_env();
    tracing::info!(api = %config.base_url, session_file = %session_file, "starting console");

    let shell = Shell::builder()
        .session_store(FileStore::new(session_file))
        .auth_api(HttpAuthApi::new(config)?)
        .build();

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => run(&shell, command).await,
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}
