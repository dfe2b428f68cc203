use std::io::{self, Write};

use ratatui::text::Text;

use crate::controller::{DefinitionSource, SearchController, SearchState};
use crate::recent::RecentStore;
use crate::render;
use crate::utilities::input;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Recent,
    /// 1-based position in the recent list.
    SearchRecent(usize),
    Clear,
    Quit,
    Unknown(String),
    Empty,
}

fn parse(line: &str) -> Command {
    let line = line.trim();
    let mut parts = line.split_ascii_whitespace();
    let Some(command) = parts.next() else {
        return Command::Empty;
    };
    let rest = parts.collect::<Vec<&str>>().join(" ");
    match command {
        "exit" | "leave" | "quit" | "e" | "q" | "l" => Command::Quit,
        "define" | "find" | "search" => Command::Search(rest),
        "recent" if rest.is_empty() => Command::Recent,
        "recent" => match rest.parse::<usize>() {
            Ok(position) if position > 0 => Command::SearchRecent(position),
            _ => Command::Unknown(line.to_owned()),
        },
        "clear" => Command::Clear,
        other if rest.is_empty() && !other.starts_with(':') => Command::Search(other.to_owned()),
        other => Command::Unknown(other.to_owned()),
    }
}

/// Line-oriented lookups until `quit` or end of input.
pub async fn run<S, D>(controller: &mut SearchController<S>, source: &D) -> anyhow::Result<()>
where
    S: RecentStore,
    D: DefinitionSource,
{
    let mut stdout = io::stdout();
    while let Some(line) = input(">> ")? {
        if !execute(parse(&line), controller, source, &mut stdout).await? {
            break;
        }
    }
    Ok(())
}

/// Returns false once the user asked to leave.
async fn execute<S, D>(
    command: Command,
    controller: &mut SearchController<S>,
    source: &D,
    out: &mut impl Write,
) -> anyhow::Result<bool>
where
    S: RecentStore,
    D: DefinitionSource,
{
    match command {
        Command::Quit => return Ok(false),
        Command::Empty => {}
        Command::Search(term) => {
            controller.search(source, &term).await;
            print_outcome(controller, out)?;
        }
        Command::Recent => print_recent(controller, out)?,
        Command::SearchRecent(position) => {
            match controller.recent().get(position - 1).map(str::to_owned) {
                Some(term) => {
                    controller.search(source, &term).await;
                    print_outcome(controller, out)?;
                }
                None => writeln!(out, "There is no recent search #{position}.")?,
            }
        }
        Command::Clear => {
            controller.clear_recent().await;
            writeln!(out, "Cleared recent searches.")?;
        }
        Command::Unknown(command) => writeln!(out, "Unknown command {command}.")?,
    }
    Ok(true)
}

pub fn print_outcome<S: RecentStore>(
    controller: &SearchController<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    match controller.state() {
        SearchState::Found(words) => writeln!(
            out,
            "{}",
            render::plain(&render::definitions(controller.query(), words))
        ),
        SearchState::Failed(message) => {
            writeln!(out, "{}", render::plain(&Text::from(render::error(message))))
        }
        SearchState::Idle | SearchState::Loading => Ok(()),
    }
}

pub fn print_recent<S: RecentStore>(
    controller: &SearchController<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    let lines = render::recent(controller.recent());
    writeln!(out, "{}", render::plain(&Text::from(lines)))
}
