use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Dashboard,
    Summary,
    Login {
        username: String,
    },
    Logout,
    Status,
    Register {
        username: String,
        email: String,
    },
    Help,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub api: Option<String>,
    pub ephemeral: bool,
    pub command: Command,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_args_from(env::args().skip(1))
}

pub fn parse_args_from(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --api".to_string())?;
                parsed.api = Some(value);
            }
            "--ephemeral" => {
                parsed.ephemeral = true;
            }
            "--help" | "-h" => {
                parsed.command = Command::Help;
                return Ok(parsed);
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown argument: {arg}"));
            }
            _ => positional.push(arg),
        }
    }

    parsed.command = parse_command(positional)?;
    Ok(parsed)
}

fn parse_command(positional: Vec<String>) -> Result<Command, String> {
    let mut words = positional.into_iter();
    let Some(name) = words.next() else {
        return Ok(Command::Dashboard);
    };
    let mut operand = |label: &str| {
        words
            .next()
            .ok_or_else(|| format!("missing {label} for {name}"))
    };
    let command = match name.as_str() {
        "dashboard" => Command::Dashboard,
        "summary" => Command::Summary,
        "logout" => Command::Logout,
        "status" => Command::Status,
        "login" => Command::Login {
            username: operand("<username>")?,
        },
        "register" => Command::Register {
            username: operand("<username>")?,
            email: operand("<email>")?,
        },
        other => return Err(format!("unknown command: {other}")),
    };
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {extra}"));
    }
    Ok(command)
}

pub fn print_help() {
    println!(
        "AI Gateway Dashboard\n\n\
Usage:\n  gateway-dashboard [--api <url>] [--ephemeral] [command]\n\n\
Commands:\n  dashboard                    Interactive login + usage dashboard (default)\n  summary                      Fetch and print the usage summary once\n  login <username>             Log in; the password is read from stdin\n  logout                       Forget the stored access token\n  status                       Show whether an access token is stored\n  register <username> <email>  Create an account; the password is read from stdin\n\n\
Options:\n  --api <url>   Override the configured backend URL for this run only\n  --ephemeral   Keep the access token in memory only\n  -h, --help    Show this help message\n"
    );
}
