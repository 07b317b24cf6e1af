//! Line-oriented operator console.
//!
//! Each input line maps to one shell command; results and emitted events are
//! written to stdout as JSON lines.

use std::io::Write;

use serde::Serialize;

use hr_shell::commands;
use hr_shell::{AppRuntime, EventEmitter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Accounts,
    Enroll(String),
    Token(String),
    Start,
    Cancel,
    Retry,
    Close,
    View,
    Unregister(String),
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let required = |name: &str| {
            if arg.is_empty() {
                Err(format!("`{verb}` needs a {name}"))
            } else {
                Ok(arg.to_string())
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "accounts" | "ls" => Ok(Self::Accounts),
            "enroll" => required("user id").map(Self::Enroll),
            // An empty token is allowed: it clears the draft.
            "token" => Ok(Self::Token(arg.to_string())),
            "start" => Ok(Self::Start),
            "cancel" => Ok(Self::Cancel),
            "retry" => Ok(Self::Retry),
            "close" => Ok(Self::Close),
            "view" => Ok(Self::View),
            "unregister" => required("user id").map(Self::Unregister),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command `{other}`, try `help`")),
        }
    }
}

pub const HELP: &str = "\
accounts              list accounts and fingerprint status
enroll <user id>      open the enrollment view
token <fingerprint>   set the fingerprint ID
start                 start registration
cancel                cancel the running registration
retry                 back to the form after a failure
close                 close the enrollment view
view                  show the enrollment view
unregister <user id>  remove an account's fingerprint
quit";

/// Events go to stdout as `{"event": ..., "payload": ...}` lines.
pub struct StdoutEmitter;

impl EventEmitter for StdoutEmitter {
    fn emit(&self, event: &str, payload: serde_json::Value) -> anyhow::Result<()> {
        let line = serde_json::to_string(&serde_json::json!({
            "event": event,
            "payload": payload,
        }))?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}

/// Run one command. Returns `false` when the console should exit.
pub async fn dispatch(runtime: &AppRuntime, command: ConsoleCommand) -> bool {
    match command {
        ConsoleCommand::Accounts => print_result(commands::list_accounts(runtime).await),
        ConsoleCommand::Enroll(user_id) => {
            print_result(commands::open_enrollment(runtime, user_id).await)
        }
        ConsoleCommand::Token(token) => {
            print_result(commands::set_enrollment_token(runtime, token).await)
        }
        ConsoleCommand::Start => print_result(commands::start_enrollment(runtime).await),
        ConsoleCommand::Cancel => print_result(commands::cancel_enrollment(runtime).await),
        ConsoleCommand::Retry => print_result(commands::retry_enrollment(runtime).await),
        ConsoleCommand::Close => print_result(commands::close_enrollment(runtime).await),
        ConsoleCommand::View => print_result(commands::get_enrollment_view(runtime).await),
        ConsoleCommand::Unregister(user_id) => {
            print_result(commands::unregister_fingerprint(runtime, user_id).await)
        }
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => return false,
    }
    true
}

fn print_result<T: Serialize>(result: Result<T, String>) {
    let value = match result {
        Ok(value) => serde_json::to_value(value)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() })),
        Err(message) => serde_json::json!({ "error": message }),
    };
    println!("{value}");
}
