use colored::Colorize;
use noteid::commands::{CmdMessage, CmdResult, CommandId};
use noteid::notice::{MessageLevel, Notice, Notifier};
use noteid::settings::SettingRow;
use unicode_width::UnicodeWidthStr;

/// Shows notices as soon as they are raised. Durations mean nothing on a
/// terminal and are ignored.
pub(super) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        print_line(notice.level, &notice.message);
    }
}

fn print_line(level: MessageLevel, content: &str) {
    match level {
        MessageLevel::Info => println!("{}", content.dimmed()),
        MessageLevel::Success => println!("{}", content.green()),
        MessageLevel::Warning => println!("{}", content.yellow()),
        MessageLevel::Error => println!("{}", content.red()),
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        print_line(message.level, &message.content);
    }
}

pub(super) fn print_summary(result: &CmdResult) {
    if result.outcomes.is_empty() {
        if result.not_a_note.is_none() {
            println!("{}", "No matching notes.".dimmed());
        }
        return;
    }

    let line = format!(
        "Assigned {}, skipped {}, failed {}",
        result.assigned(),
        result.already_present(),
        result.failed()
    );
    if result.failed() > 0 {
        println!("{}", line.red());
    } else {
        println!("{}", line.green());
    }
}

pub(super) fn print_settings(rows: &[SettingRow]) {
    let width = rows.iter().map(|r| r.name.width()).max().unwrap_or(0);
    for row in rows {
        let padding = " ".repeat(width.saturating_sub(row.name.width()));
        let mut values = row.value.lines();
        let first = values.next().unwrap_or("");
        if first.is_empty() {
            println!("{}{} = {}", row.name.bold(), padding, "(empty)".dimmed());
        } else {
            println!("{}{} = {}", row.name.bold(), padding, first);
        }
        let indent = " ".repeat(width + 3);
        for value in values {
            println!("{}{}", indent, value);
        }
        println!("{}{}", indent, row.description.dimmed());
    }
}

pub(super) fn print_commands(commands: &[CommandId]) {
    let width = commands.iter().map(|c| c.id().width()).max().unwrap_or(0);
    for command in commands {
        let padding = " ".repeat(width.saturating_sub(command.id().width()));
        println!("{}{}  {}", command.id().yellow(), padding, command.name());
    }
}
