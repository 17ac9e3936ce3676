use std::io::{self, BufRead, Write};
use std::process;

use clap::{Parser, Subcommand};

use autocorrect_client::{
    AutocorrectClient, EditKey, HttpClient, Suggestable, Toggle, ViewEvent,
};

#[derive(Parser)]
#[command(name = "autotool", about = "Autocorrect service client diagnostics")]
struct Cli {
    /// Base URL of the autocorrect server
    #[arg(long, default_value = "http://localhost:4567")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch suggestions for a line of text, as the editor would on a keystroke
    Suggest {
        /// Field content; the last space-delimited token is the in-progress word
        text: String,
    },
    /// Fetch and print the canonical settings as JSON
    Settings,
    /// Interactive loop: type field content, get suggestions; `:led 5`,
    /// `:prefix on`, `:pick 2`, `:quit`
    Repl,
}

/// Terminal stand-in for the completion widget: prints the menu whenever a
/// new snapshot is pushed.
#[derive(Default)]
struct TermWidget {
    source: Vec<String>,
}

impl Suggestable for TermWidget {
    fn set_source(&mut self, items: Vec<String>) {
        self.source = items;
    }

    fn trigger_search(&mut self, _query: &str) {
        if self.source.is_empty() {
            println!("  (no suggestions)");
        }
        for (i, item) in self.source.iter().enumerate() {
            println!("  {}. {item}", i + 1);
        }
    }

    fn set_auto_focus(&mut self, _enabled: bool) {}

    fn is_menu_active(&self) -> bool {
        false
    }
}

fn main() {
    let cli = Cli::parse();
    let mut client = AutocorrectClient::new(HttpClient::new(cli.server), TermWidget::default());

    render(&client.start());
    match cli.command {
        Command::Suggest { text } => {
            render(&client.on_edit(&text, EditKey::Other));
            if client.session().suggestions().is_empty() {
                println!("  (no suggestions)");
            }
        }
        Command::Settings => print_settings(&client),
        Command::Repl => repl(&mut client),
    }
}

fn repl(client: &mut AutocorrectClient<HttpClient, TermWidget>) {
    let mut value = String::new();
    let stdin = io::stdin();
    prompt(&value);
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("stdin: {e}");
                process::exit(1);
            }
        };
        if let Some(command) = line.strip_prefix(':') {
            if !run_command(client, command, &mut value) {
                return;
            }
        } else {
            value = line;
            render(&client.on_edit(&value, EditKey::Other));
        }
        prompt(&value);
    }
}

/// Returns false when the loop should exit.
fn run_command(
    client: &mut AutocorrectClient<HttpClient, TermWidget>,
    command: &str,
    value: &mut String,
) -> bool {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit"), _) => return false,
        (Some("settings"), _) => print_settings(client),
        (Some("led"), Some(raw)) => render(&client.on_led_edit(raw)),
        (Some(name @ ("prefix" | "whitespace" | "smart")), Some(state)) => {
            let toggle = match name {
                "prefix" => Toggle::Prefix,
                "whitespace" => Toggle::Whitespace,
                _ => Toggle::Smart,
            };
            render(&client.on_toggle(toggle, state == "on"));
        }
        (Some("pick"), Some(index)) => match index
            .parse::<usize>()
            .ok()
            .and_then(|i| client.widget().source.get(i.wrapping_sub(1)).cloned())
        {
            Some(candidate) => {
                *value = client.on_select(value, &candidate);
                println!("field: {value:?}");
            }
            None => eprintln!("no such candidate"),
        },
        _ => eprintln!("commands: :prefix on|off :whitespace on|off :smart on|off :led N :pick N :settings :quit"),
    }
    true
}

fn render(events: &[ViewEvent]) {
    for event in events {
        match event {
            ViewEvent::MarkActive => {}
            ViewEvent::RenderSettings(settings) => match serde_json::to_string(settings) {
                Ok(json) => println!("settings: {json}"),
                Err(e) => eprintln!("settings: {e}"),
            },
            ViewEvent::LedRejected => eprintln!("led value rejected (integer 0-11)"),
            ViewEvent::LedAccepted => {}
        }
    }
}

fn print_settings<W: Suggestable>(client: &AutocorrectClient<HttpClient, W>) {
    match serde_json::to_string_pretty(client.session().settings()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("settings: {e}");
            process::exit(1);
        }
    }
}

fn prompt(value: &str) {
    print!("[{value}]> ");
    let _ = io::stdout().flush();
}
