//! Interactive shell
//!
//! Reads commands line by line and applies them to one session, so added,
//! edited and deleted records and the active filter persist until exit.

use std::io::{BufRead, Write};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use super::export::{export_to, resolve_format, write_export};
use super::record::{default_criteria, render_list, render_show, render_summary};
use crate::config::Settings;
use crate::display::{format_category_list, format_record_short};
use crate::error::{FinboardError, FinboardResult};
use crate::export::ExportFormat;
use crate::models::RecordKind;
use crate::services::{
    CategoryFilter, DateRange, FilterCriteria, RecordInput, RecordService, RecordUpdate,
    SortOrder,
};
use crate::storage::Session;

const PROMPT: &str = "finboard> ";

const HELP: &str = "\
Commands:
  add <income|expense> <amount> <description> <category> [date] [receipt=REF]
  edit <id> [type=..] [amount=..] [description=..] [category=..] [date=..] [receipt=..]
  delete <id>
  list [limit]                 records matching the active filter
  show <id>
  summary                      totals over every record
  filter [search=..] [category=..] [range=..] [sort=..]
  reset                        clear the active filter
  clear                        delete every record
  export [csv|json|yaml] [path]
  categories
  help
  quit | exit

Quote values containing spaces, e.g. add expense 12.50 \"Coffee beans\" Food
A quoted word is never read as key=value, e.g. add expense 5 \"Fee=late\" Food
";

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Print this text and read the next command
    Continue(String),
    /// Leave the shell
    Quit,
}

/// Interactive command interpreter over one session
pub struct Shell<'a> {
    session: &'a Session,
    settings: &'a Settings,
    criteria: FilterCriteria,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<'a> Shell<'a> {
    /// Create a shell using the local wall clock
    pub fn new(session: &'a Session, settings: &'a Settings) -> Self {
        Self {
            session,
            settings,
            criteria: default_criteria(settings),
            clock: local_now,
        }
    }

    /// Use a fixed clock for date ranges and default dates
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// The active filter
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Read commands from `input` until `quit` or end of input
    ///
    /// Command errors are reported and the loop continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> FinboardResult<()> {
        writeln!(output, "finboard shell. Type 'help' for commands.")?;
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(ShellOutcome::Quit) => return Ok(()),
                Ok(ShellOutcome::Continue(text)) => write!(output, "{}", text)?,
                Err(e) => writeln!(output, "Error: {}", e)?,
            }
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }

        writeln!(output)?;
        Ok(())
    }

    /// Execute one command line
    pub fn execute(&mut self, line: &str) -> FinboardResult<ShellOutcome> {
        let words = tokenize(line)?;
        let Some((command, words)) = words.split_first() else {
            return Ok(ShellOutcome::Continue(String::new()));
        };
        let args: Vec<String> = words.iter().map(|w| w.text.clone()).collect();
        let args = args.as_slice();
        debug!(command = %command.text, args = args.len(), "Shell command");

        let text = match command.text.to_lowercase().as_str() {
            "quit" | "exit" => return Ok(ShellOutcome::Quit),
            "help" | "?" => HELP.to_string(),
            "add" => self.add(words)?,
            "edit" => self.edit(words)?,
            "delete" | "rm" => self.delete(args)?,
            "list" | "ls" => self.list(args)?,
            "show" => render_show(self.session, self.settings, required(args, 0, "id")?)?,
            "summary" => render_summary(self.session, self.settings)?,
            "filter" => self.filter(words)?,
            "reset" => {
                self.criteria = default_criteria(self.settings);
                format!("Filter reset: {}\n", self.criteria)
            }
            "export" => self.export(args)?,
            "clear" => {
                let count = RecordService::new(self.session).clear()?;
                format!("Deleted {} records\n", count)
            }
            "categories" => format_category_list(),
            other => {
                return Err(FinboardError::Command(format!(
                    "Unknown command '{}'. Type 'help' for commands",
                    other
                )))
            }
        };

        Ok(ShellOutcome::Continue(text))
    }

    fn add(&self, args: &[Word]) -> FinboardResult<String> {
        let (positional, options) = split_options(args)?;
        if positional.len() < 4 || positional.len() > 5 {
            return Err(FinboardError::Command(
                "Usage: add <income|expense> <amount> <description> <category> [date]".into(),
            ));
        }

        let kind: RecordKind = positional[0].parse().map_err(FinboardError::Validation)?;
        let date = match positional.get(4) {
            Some(date) => date.clone(),
            None => (self.clock)().date().format("%Y-%m-%d").to_string(),
        };

        let mut input = RecordInput::new(
            kind,
            positional[1].as_str(),
            positional[2].as_str(),
            positional[3].as_str(),
            date,
        );
        for (key, value) in options {
            match key.as_str() {
                "receipt" => input.receipt = Some(value),
                other => {
                    return Err(FinboardError::Command(format!(
                        "Unknown option '{}' for add",
                        other
                    )))
                }
            }
        }

        let record = RecordService::new(self.session).create(input)?;
        Ok(format!(
            "Added {}\n",
            format_record_short(&record, self.settings)
        ))
    }

    fn edit(&self, args: &[Word]) -> FinboardResult<String> {
        let (positional, options) = split_options(args)?;
        let [id] = positional.as_slice() else {
            return Err(FinboardError::Command(
                "Usage: edit <id> [field=value ...]".into(),
            ));
        };

        let mut update = RecordUpdate::default();
        for (key, value) in options {
            match key.as_str() {
                "type" | "kind" => {
                    update.kind = Some(value.parse().map_err(FinboardError::Validation)?)
                }
                "amount" => update.amount = Some(value),
                "description" => update.description = Some(value),
                "category" => update.category = Some(value),
                "date" => update.date = Some(value),
                "receipt" => update.receipt = Some(Some(value)),
                other => {
                    return Err(FinboardError::Command(format!(
                        "Unknown field '{}'. Use type, amount, description, category, date or receipt",
                        other
                    )))
                }
            }
        }
        if update.is_empty() {
            return Err(FinboardError::Command("Nothing to change".into()));
        }

        let service = RecordService::new(self.session);
        let record = service.find(id)?;
        let record = service.update(record.id, update)?;
        Ok(format!(
            "Updated {}\n",
            format_record_short(&record, self.settings)
        ))
    }

    fn delete(&self, args: &[String]) -> FinboardResult<String> {
        let service = RecordService::new(self.session);
        let record = service.find(required(args, 0, "id")?)?;
        let record = service.delete(record.id)?;
        Ok(format!(
            "Deleted {}\n",
            format_record_short(&record, self.settings)
        ))
    }

    fn list(&self, args: &[String]) -> FinboardResult<String> {
        let limit = match args.first() {
            Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
                FinboardError::Command(format!("Invalid limit '{}'", raw))
            })?),
            None => None,
        };
        render_list(
            self.session,
            self.settings,
            &self.criteria,
            limit,
            (self.clock)(),
        )
    }

    fn filter(&mut self, args: &[Word]) -> FinboardResult<String> {
        let (positional, options) = split_options(args)?;
        if !positional.is_empty() {
            return Err(FinboardError::Command(
                "Usage: filter [search=..] [category=..] [range=..] [sort=..]".into(),
            ));
        }

        let mut criteria = self.criteria.clone();
        for (key, value) in options {
            match key.as_str() {
                "search" => criteria.search = value,
                "category" => criteria.category = CategoryFilter::parse(&value),
                "range" => criteria.date_range = DateRange::parse_lenient(&value),
                "sort" => criteria.sort = SortOrder::parse_lenient(&value),
                other => {
                    return Err(FinboardError::Command(format!(
                        "Unknown filter '{}'. Use search, category, range or sort",
                        other
                    )))
                }
            }
        }
        self.criteria = criteria;

        Ok(format!("Filter: {}\n", self.criteria))
    }

    fn export(&self, args: &[String]) -> FinboardResult<String> {
        let format = match args.first() {
            Some(raw) => Some(raw.parse::<ExportFormat>().map_err(FinboardError::Command)?),
            None => None,
        };
        let output = args.get(1).map(Path::new);
        let format = resolve_format(format, output);

        match output {
            Some(path) => Ok(format!(
                "{}\n",
                export_to(self.session, format, Some(path))?.unwrap_or_default()
            )),
            None => {
                let mut buffer = Vec::new();
                write_export(self.session, format, &mut buffer)?;
                String::from_utf8(buffer).map_err(|e| FinboardError::Export(e.to_string()))
            }
        }
    }
}

fn required<'s>(args: &'s [String], index: usize, name: &str) -> FinboardResult<&'s str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| FinboardError::Command(format!("Missing <{}>", name)))
}

/// One word of a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// The word opened with a quote, so it is always positional
    pub quoted: bool,
}

/// Separate `key=value` options from positional arguments
fn split_options(args: &[Word]) -> FinboardResult<(Vec<String>, Vec<(String, String)>)> {
    let mut positional = Vec::new();
    let mut options = Vec::new();
    for arg in args {
        let option = if arg.quoted {
            None
        } else {
            arg.text.split_once('=')
        };
        match option {
            Some((key, value)) if !key.is_empty() && !key.contains(' ') => {
                options.push((key.to_lowercase(), value.to_string()));
            }
            _ if !options.is_empty() => {
                return Err(FinboardError::Command(format!(
                    "Unexpected argument '{}' after options",
                    arg.text
                )))
            }
            _ => positional.push(arg.text.clone()),
        }
    }
    Ok((positional, options))
}

/// Split a command line into words, honoring single and double quotes
pub fn tokenize(line: &str) -> FinboardResult<Vec<Word>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                if !in_word {
                    quoted = true;
                }
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(Word {
                        text: std::mem::take(&mut current),
                        quoted,
                    });
                    in_word = false;
                    quoted = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(FinboardError::Command("Unterminated quote".into()));
    }
    if in_word {
        words.push(Word {
            text: current,
            quoted,
        });
    }
    Ok(words)
}
