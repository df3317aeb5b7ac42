use roster_core::{AppViewModel, Category, Msg};

pub const HELP: &str = "\
commands:
  refresh | r          reload page 1 of the current category
  next | n             load the next page
  switch [male|female] change category (no argument: the other one)
  layout | l           toggle one/two column layout
  edit | e             enter or leave edit mode
  tap <row>            select a row while editing, open its photo otherwise
  delete | d           delete the selected rows
  close                close the photo viewer
  dismiss              hide the error notice
  show | s             print the current list
  help | h             print this help
  quit | q             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Next,
    Switch(Option<Category>),
    Layout,
    Edit,
    Tap(usize),
    Delete,
    Close,
    Dismiss,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Show);
    };
    let arg = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "refresh" | "r" => Command::Refresh,
        "next" | "n" => Command::Next,
        "switch" => match arg {
            None => Command::Switch(None),
            Some(raw) => Command::Switch(Some(
                Category::parse(raw).ok_or_else(|| format!("unknown category '{raw}'"))?,
            )),
        },
        "layout" | "l" => Command::Layout,
        "edit" | "e" => Command::Edit,
        "tap" | "t" => {
            let raw = arg.ok_or("tap needs a row number")?;
            let row: usize = raw
                .parse()
                .map_err(|_| format!("'{raw}' is not a row number"))?;
            if row == 0 {
                return Err("rows are numbered from 1".to_string());
            }
            Command::Tap(row)
        }
        "delete" | "d" => Command::Delete,
        "close" => Command::Close,
        "dismiss" => Command::Dismiss,
        "show" | "s" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(command)
}

/// Translates a command into the intent it stands for, given what is on screen.
pub fn to_msg(command: &Command, view: &AppViewModel) -> Result<Option<Msg>, String> {
    let msg = match command {
        Command::Refresh => Msg::RefreshRequested(view.active),
        Command::Next => Msg::NextPageRequested(view.active),
        Command::Switch(target) => {
            let target = target.unwrap_or(match view.active {
                Category::Male => Category::Female,
                Category::Female => Category::Male,
            });
            Msg::CategorySelected(target)
        }
        Command::Layout => Msg::LayoutToggled,
        Command::Edit => Msg::EditToggled,
        Command::Tap(row) => {
            let pane = view.active_pane().ok_or("no active list")?;
            let item = pane
                .rows
                .get(row - 1)
                .ok_or_else(|| format!("row {row} is not on screen ({} rows)", pane.rows.len()))?;
            Msg::ItemTapped(item.id.clone())
        }
        Command::Delete => Msg::DeleteConfirmed,
        Command::Close => Msg::PhotoClosed,
        Command::Dismiss => Msg::ErrorDismissed,
        Command::Show | Command::Help | Command::Quit => return Ok(None),
    };
    Ok(Some(msg))
}
