use std::io;

use gateway_app::SessionContainer;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

const MENU: &str = "[r] refresh  [l] logout  [q] quit > ";

pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prints `label` and reads one line. `None` means stdin is closed.
    pub async fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(label.as_bytes()).await?;
        stdout.flush().await?;
        self.lines.next_line().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Refresh,
    Logout,
    Quit,
}

pub fn parse_choice(input: &str) -> Option<MenuAction> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "r" | "refresh" => Some(MenuAction::Refresh),
        "l" | "logout" => Some(MenuAction::Logout),
        "q" | "quit" | "exit" => Some(MenuAction::Quit),
        _ => None,
    }
}

/// Drives the session container until the user quits or stdin closes.
pub async fn run(mut container: SessionContainer, prompt: &mut Prompt) -> io::Result<()> {
    loop {
        if !container.is_authenticated() {
            println!("{}\n", container.render());
            let Some(username) = prompt.ask("Username: ").await? else {
                return Ok(());
            };
            let Some(password) = prompt.ask("Password: ").await? else {
                return Ok(());
            };
            if let Some(login) = container.login_view_mut() {
                login.submit(&username, &password).await;
            }
            container.pump_events();
            continue;
        }

        container.mount_active().await;
        println!("{}\n", container.render());
        container.pump_events();
        if !container.is_authenticated() {
            continue;
        }

        let action = loop {
            let Some(input) = prompt.ask(MENU).await? else {
                return Ok(());
            };
            match parse_choice(&input) {
                Some(action) => break action,
                None => println!("unknown choice: {}", input.trim()),
            }
        };
        match action {
            MenuAction::Refresh => {}
            MenuAction::Logout => {
                if let Some(dashboard) = container.dashboard_mut() {
                    dashboard.logout();
                }
                container.pump_events();
            }
            MenuAction::Quit => return Ok(()),
        }
    }
}
