//! Minutes terminal client.
//!
//! Line-oriented front-end for the meetings API. Talks to the backend at
//! `MINUTES_API_URL` (default http://127.0.0.1:8000).

use std::io::{self, BufRead, Write};

use minutes_ui::views::{CreateView, DetailPhase, DetailView, ListView};
use minutes_ui::{MeetingsApi, MeetingsClient, Route, Shell};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

// =====================================================
// Shell
// =====================================================

/// Alerts go to stdout, confirmations read a y/N line, navigation is
/// queued for the screen loop to pick up.
#[derive(Default)]
struct TerminalShell {
    pending: Option<Route>,
}

impl TerminalShell {
    fn take_route(&mut self) -> Option<Route> {
        self.pending.take()
    }
}

impl Shell for TerminalShell {
    fn alert(&mut self, message: &str) {
        println!("\n>> {}\n", message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        match prompt(&format!("{} [y/N] ", message)) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }

    fn navigate(&mut self, route: Route) {
        self.pending = Some(route);
    }
}

// =====================================================
// Input
// =====================================================

/// Print `label` and read one line. None on end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Read lines until a lone "." (or end of input)
fn read_block(label: &str) -> io::Result<String> {
    println!("{} (finish with a single '.' on its own line)", label);
    let mut lines = Vec::new();
    while let Some(line) = prompt("")? {
        if line == "." {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// Prompt showing the current value; an empty answer keeps it
fn prompt_with_default(label: &str, current: &str) -> io::Result<Option<String>> {
    let answer = if current.is_empty() {
        prompt(&format!("{}: ", label))?
    } else {
        prompt(&format!("{} [{}]: ", label, current))?
    };
    Ok(answer.map(|a| if a.is_empty() { current.to_string() } else { a }))
}

#[derive(Debug, PartialEq, Eq)]
enum ListCommand {
    Quit,
    New,
    Open(i64),
    /// Anything else is a search; blank reloads the full list
    Query(String),
    Invalid(String),
}

fn parse_list_command(line: &str) -> ListCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return ListCommand::Query(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "q"), None) => ListCommand::Quit,
        (Some("new" | "n"), None) => ListCommand::New,
        (Some("open" | "o"), Some(id)) => match id.parse() {
            Ok(id) => ListCommand::Open(id),
            Err(_) => ListCommand::Invalid(format!("Not a meeting id: {}", id)),
        },
        _ => ListCommand::Invalid(format!("Unknown command: {}", trimmed)),
    }
}

// =====================================================
// Screens
// =====================================================

fn print_list(view: &ListView) {
    println!();
    if view.query().trim().is_empty() {
        println!("== Meetings ==");
    } else {
        println!("== Meetings matching {:?} ==", view.query());
    }

    let rows = view.rows();
    if rows.is_empty() {
        println!("(no meetings)");
    }
    for row in rows {
        println!("#{:<5} {}  ({})", row.id, row.title, row.created_at);
        if let Some(preview) = row.summary_preview {
            println!("       {}", preview);
        }
    }
    println!();
    println!("Type to search, blank line to reload, :open <id>, :new, :quit");
}

/// Returns the next route, or None to exit
async fn list_screen(api: &dyn MeetingsApi) -> AppResult<Option<Route>> {
    let mut view = ListView::new();
    view.refresh(api).await;

    loop {
        print_list(&view);
        let Some(line) = prompt("search> ")? else {
            return Ok(None);
        };

        match parse_list_command(&line) {
            ListCommand::Quit => return Ok(None),
            ListCommand::New => return Ok(Some(Route::New)),
            ListCommand::Open(id) => return Ok(Some(Route::Detail(id))),
            ListCommand::Query(query) => view.search(api, &query).await,
            ListCommand::Invalid(msg) => println!("{}", msg),
        }
    }
}

async fn edit_meeting(
    view: &mut DetailView,
    api: &dyn MeetingsApi,
    shell: &mut TerminalShell,
) -> AppResult<()> {
    let Some(form) = view.form_mut() else {
        return Ok(());
    };

    if let Some(title) = prompt_with_default("Title", &form.title)? {
        form.title = title;
    }
    if shell.confirm("Replace the notes?") {
        form.content = read_block("Notes")?;
    }
    form.regenerate_summary = shell.confirm("Regenerate the AI summary?");

    if shell.confirm("Save changes?") {
        view.save(api, shell).await?;
    } else {
        view.cancel_edit()?;
    }
    Ok(())
}

async fn detail_screen(
    id: i64,
    api: &dyn MeetingsApi,
    shell: &mut TerminalShell,
) -> AppResult<Option<Route>> {
    let mut view = DetailView::new(id);
    view.load(api, shell).await?;

    loop {
        if let Some(route) = shell.take_route() {
            return Ok(Some(route));
        }

        match view.phase() {
            DetailPhase::Viewing => {
                if let Some(sections) = view.sections() {
                    println!("\n{}", sections.render());
                }
                let Some(choice) = prompt("[e]dit  [d]elete  [b]ack> ")? else {
                    return Ok(None);
                };
                match choice.trim() {
                    "e" => view.begin_edit()?,
                    "d" => view.delete(api, shell).await?,
                    "b" => return Ok(Some(Route::List)),
                    other => println!("Unknown choice: {}", other),
                }
            }
            DetailPhase::Editing => edit_meeting(&mut view, api, shell).await?,
            // The async helpers always settle the request before returning
            DetailPhase::Loading
            | DetailPhase::Updating
            | DetailPhase::Deleting
            | DetailPhase::Closed => return Ok(Some(Route::List)),
        }
    }
}

async fn create_screen(api: &dyn MeetingsApi, shell: &mut TerminalShell) -> AppResult<Route> {
    let mut view = CreateView::new();
    println!("\n== New meeting ==");

    loop {
        let Some(title) = prompt_with_default("Title", view.title())? else {
            view.cancel(shell);
            break;
        };
        view.set_title(title);
        view.set_content(read_block("Notes")?);

        view.submit(api, shell).await?;
        if shell.pending.is_some() {
            break;
        }

        if let Some(error) = view.error() {
            println!("\n>> {}", error);
        }
        if !shell.confirm("Try again?") {
            view.cancel(shell);
            break;
        }
    }

    Ok(shell.take_route().unwrap_or(Route::List))
}

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let api_url =
        std::env::var("MINUTES_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    log::info!("Using meetings API at {}", api_url);

    let client = MeetingsClient::new(&api_url);
    let mut shell = TerminalShell::default();

    let mut current = Route::List;
    let mut previous = Route::List;

    loop {
        let next = match current {
            Route::List | Route::Back => list_screen(&client).await?,
            Route::Detail(id) => detail_screen(id, &client, &mut shell).await?,
            Route::New => Some(create_screen(&client, &mut shell).await?),
        };

        let Some(next) = next else {
            break;
        };

        let target = if next == Route::Back { previous } else { next };
        previous = current;
        current = target;
    }

    println!("Bye.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_command() {
        assert_eq!(parse_list_command(":quit"), ListCommand::Quit);
        assert_eq!(parse_list_command(" :new "), ListCommand::New);
        assert_eq!(parse_list_command(":open 12"), ListCommand::Open(12));
        assert_eq!(
            parse_list_command("budget review"),
            ListCommand::Query("budget review".to_string())
        );
        assert_eq!(parse_list_command(""), ListCommand::Query(String::new()));
        assert!(matches!(parse_list_command(":open twelve"), ListCommand::Invalid(_)));
        assert!(matches!(parse_list_command(":frobnicate"), ListCommand::Invalid(_)));
    }
}
