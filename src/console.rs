//! Line-oriented front end. Owns the prompts and confirmations, then calls
//! into [`Workday`] with the collected answers.

use crate::domain::{clock_rows, effective_status, format_duration, timer_badge, ClockStatus, Shift, TaskId};
use crate::workday::{ShiftPrompt, Workday};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::debug;

const HELP: &str = "\
Commands:
  in                      Clock in
  out                     Clock out
  tasks                   List tasks with their timers
  toggle <task>           Start or finish a task timer
  shifts                  List my shifts and open shifts
  shift <id>              Reserve or release a shift (asks first)
  reserve <id> [name]     Reserve a shift directly
  release <id>            Release a shift directly
  add-shift <start> <end> <title>
                          Add a shift assigned to me (times as 2024-01-30T09:00)
  status                  Show clock and timer totals
  watch <ticks>           Refresh status every tick
  help                    Show this help
  quit                    Leave";

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ClockIn,
    ClockOut,
    Tasks,
    Toggle(TaskId),
    Shifts,
    ShiftClick(String),
    Reserve { shift: String, holder: Option<String> },
    Release(String),
    AddShift {
        start: NaiveDateTime,
        end: NaiveDateTime,
        title: String,
    },
    Status,
    Watch(u32),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield None.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };

    let command = match word.to_lowercase().as_str() {
        "in" | "clock-in" => Command::ClockIn,
        "out" | "clock-out" => Command::ClockOut,
        "tasks" | "t" => Command::Tasks,
        "toggle" => {
            let id = parts.next().context("Usage: toggle <task>")?;
            let id = id
                .parse::<TaskId>()
                .with_context(|| format!("Invalid task id: {}", id))?;
            Command::Toggle(id)
        }
        "shifts" | "s" => Command::Shifts,
        "shift" => Command::ShiftClick(parts.next().context("Usage: shift <id>")?.to_string()),
        "reserve" => {
            let shift = parts.next().context("Usage: reserve <id> [name]")?.to_string();
            let name = parts.collect::<Vec<_>>().join(" ");
            Command::Reserve {
                shift,
                holder: if name.is_empty() { None } else { Some(name) },
            }
        }
        "release" => Command::Release(parts.next().context("Usage: release <id>")?.to_string()),
        "add-shift" | "new-shift" => {
            const USAGE: &str = "Usage: add-shift <start> <end> <title>";
            let start = parse_time(parts.next().context(USAGE)?)?;
            let end = parse_time(parts.next().context(USAGE)?)?;
            let title = parts.collect::<Vec<_>>().join(" ");
            if title.is_empty() {
                bail!(USAGE);
            }
            if end <= start {
                bail!("Shift must end after it starts");
            }
            Command::AddShift { start, end, title }
        }
        "status" => Command::Status,
        "watch" => {
            let ticks = match parts.next() {
                Some(n) => n.parse().with_context(|| format!("Invalid tick count: {}", n))?,
                None => 5,
            };
            Command::Watch(ticks)
        }
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => bail!("Unknown command: {} (try 'help')", other),
    };

    Ok(Some(command))
}

fn parse_time(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
        .with_context(|| format!("Invalid time: {} (expected YYYY-MM-DDTHH:MM)", text))
}

/// Write my shifts and open shifts for `day` as of `now`
pub fn write_shifts<W: Write>(out: &mut W, day: &Workday, now: NaiveDateTime) -> Result<()> {
    writeln!(out, "My shifts:")?;
    let mine = day.roster.my_shifts(&day.identity, now);
    if mine.is_empty() {
        writeln!(out, "  No upcoming shifts")?;
    }
    for shift in mine {
        write_shift_line(out, day, shift)?;
    }

    writeln!(out, "Open shifts:")?;
    let open = day.roster.open_shifts(&day.identity, now);
    if open.is_empty() {
        writeln!(out, "  No upcoming shifts")?;
    }
    for shift in open {
        write_shift_line(out, day, shift)?;
    }
    Ok(())
}

fn write_shift_line<W: Write>(out: &mut W, day: &Workday, shift: &Shift) -> Result<()> {
    let holder = day
        .shift_holder(&shift.id)
        .map(|h| format!("reserved by {}", h))
        .unwrap_or_else(|| "unreserved".to_string());
    writeln!(
        out,
        "  {:>3} {} {} ({}) {} [{}]",
        shift.id,
        shift.title,
        shift.start.format("%a %b %-d %H:%M"),
        format_duration(shift.length()),
        shift.location.as_deref().unwrap_or("TBD"),
        holder
    )?;
    Ok(())
}

/// Interactive session over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
    now: Box<dyn FnMut() -> DateTime<Local>>,
    tick: Duration,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, tick: Duration) -> Self {
        Self {
            input,
            output,
            now: Box::new(Local::now),
            tick,
        }
    }

    /// Replace the time source
    pub fn with_clock<F>(mut self, now: F) -> Self
    where
        F: FnMut() -> DateTime<Local> + 'static,
    {
        self.now = Box::new(now);
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read and apply commands until quit or end of input
    pub fn run(&mut self, day: &mut Workday) -> Result<()> {
        writeln!(self.output, "crewclock - type 'help' for commands")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.output, "! {}", e)?;
                    continue;
                }
            };

            debug!(?command, "Console command");
            if command == Command::Quit {
                break;
            }
            self.execute(day, command)?;
        }

        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Apply one command and write its outcome
    pub fn execute(&mut self, day: &mut Workday, command: Command) -> Result<()> {
        let now = (self.now)();

        match command {
            Command::ClockIn => match day.clock_in(now) {
                Ok(()) => writeln!(self.output, "Clocked in at {}", now.format("%H:%M:%S"))?,
                Err(e) => writeln!(self.output, "! {}", e)?,
            },
            Command::ClockOut => match day.clock_out(now) {
                Ok(()) => {
                    let total = day.clock().total().unwrap_or_else(chrono::Duration::zero);
                    writeln!(self.output, "Clocked out. Total: {}", format_duration(total))?
                }
                Err(e) => writeln!(self.output, "! {}", e)?,
            },
            Command::Tasks => self.print_tasks(day, now)?,
            Command::Toggle(id) => self.toggle(day, id, now)?,
            Command::Shifts => write_shifts(&mut self.output, day, now.naive_local())?,
            Command::ShiftClick(id) => self.shift_click(day, &id)?,
            Command::Reserve { shift, holder } => {
                let holder = holder.unwrap_or_else(|| day.identity.clone());
                match day.reserve_shift(&shift, &holder) {
                    Ok(()) => writeln!(self.output, "Shift {} reserved by {}", shift, holder)?,
                    Err(e) => writeln!(self.output, "! {}", e)?,
                }
            }
            Command::Release(shift) => match day.release_shift(&shift) {
                Ok(holder) => writeln!(self.output, "Shift {} released by {}", shift, holder)?,
                Err(e) => writeln!(self.output, "! {}", e)?,
            },
            Command::AddShift { start, end, title } => self.add_shift(day, start, end, title)?,
            Command::Status => self.print_status(day, now)?,
            Command::Watch(ticks) => {
                for i in 0..ticks {
                    if i > 0 {
                        std::thread::sleep(self.tick);
                    }
                    let now = (self.now)();
                    self.print_status(day, now)?;
                }
            }
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => {}
        }

        Ok(())
    }

    fn toggle(&mut self, day: &mut Workday, id: TaskId, now: DateTime<Local>) -> Result<()> {
        let was_completed = day.task_state(id).completed;

        let state = match day.toggle_task(id, now) {
            Ok(state) => state,
            Err(e) => {
                writeln!(self.output, "! {}", e)?;
                return Ok(());
            }
        };

        let name = day
            .roster
            .task(id)
            .map(|task| task.name.clone())
            .unwrap_or_default();

        if was_completed {
            writeln!(self.output, "{} is already completed", name)?;
        } else if let Some(took) = state.completed_duration {
            writeln!(self.output, "Completed {} in {}", name, format_duration(took))?;
        } else {
            writeln!(self.output, "Started {}", name)?;
        }
        Ok(())
    }

    fn shift_click(&mut self, day: &mut Workday, id: &str) -> Result<()> {
        let prompt = match day.shift_click(id) {
            Ok(prompt) => prompt,
            Err(e) => {
                writeln!(self.output, "! {}", e)?;
                return Ok(());
            }
        };

        match prompt {
            ShiftPrompt::AskHolder => {
                write!(
                    self.output,
                    "Shift {} is not reserved. Enter your name to reserve it: ",
                    id
                )?;
                self.output.flush()?;

                let name = self.read_line()?.unwrap_or_default();
                if name.is_empty() {
                    writeln!(self.output, "Cancelled")?;
                    return Ok(());
                }
                match day.reserve_shift(id, &name) {
                    Ok(()) => writeln!(self.output, "Shift {} reserved by {}", id, name)?,
                    Err(e) => writeln!(self.output, "! {}", e)?,
                }
            }
            ShiftPrompt::ConfirmRelease { holder } => {
                write!(
                    self.output,
                    "Shift {} is reserved by {}. Release it? [y/N]: ",
                    id, holder
                )?;
                self.output.flush()?;

                let answer = self.read_line()?.unwrap_or_default().to_lowercase();
                if answer != "y" && answer != "yes" {
                    writeln!(self.output, "Kept")?;
                    return Ok(());
                }
                match day.release_shift(id) {
                    Ok(holder) => writeln!(self.output, "Shift {} released by {}", id, holder)?,
                    Err(e) => writeln!(self.output, "! {}", e)?,
                }
            }
        }
        Ok(())
    }

    fn add_shift(&mut self, day: &mut Workday, start: NaiveDateTime, end: NaiveDateTime, title: String) -> Result<()> {
        let shift = Shift {
            id: day.roster.next_shift_id(),
            title,
            start,
            end,
            location: None,
            assigned_to: vec![day.identity.clone()],
            reserved_by: None,
        };

        write!(self.output, "Who is reserving this shift? (blank to skip): ")?;
        self.output.flush()?;
        let name = self.read_line()?.unwrap_or_default();
        let holder = if name.is_empty() { None } else { Some(name) };

        let id = shift.id.clone();
        let title = shift.title.clone();
        match day.add_shift(shift, holder.as_deref()) {
            Ok(()) => match holder {
                Some(holder) => writeln!(self.output, "Added shift {} {} reserved by {}", id, title, holder)?,
                None => writeln!(self.output, "Added shift {} {}", id, title)?,
            },
            Err(e) => writeln!(self.output, "! {}", e)?,
        }
        Ok(())
    }

    fn print_tasks(&mut self, day: &Workday, now: DateTime<Local>) -> Result<()> {
        for row in clock_rows(day.clock()) {
            writeln!(self.output, "  [{}] {}", row.status.label(), row.name)?;
        }

        for (task, state) in day.task_rows() {
            let detail = match (state.elapsed_since(now), state.completed_duration) {
                (Some(elapsed), _) => format!(" ({})", format_duration(elapsed)),
                (None, Some(took)) => format!(" (completed in {})", format_duration(took)),
                (None, None) => String::new(),
            };
            let due = task
                .due_date
                .map(|date| format!(" due {}", date.format("%b %-d")))
                .unwrap_or_default();
            writeln!(
                self.output,
                "{:>3} {} {} [{}]{}{}",
                task.id,
                timer_badge(&state),
                task.name,
                effective_status(task, &state).label(),
                detail,
                due
            )?;
        }
        Ok(())
    }

    fn print_status(&mut self, day: &Workday, now: DateTime<Local>) -> Result<()> {
        let snapshot = day.snapshot(now);

        let clock = match (snapshot.clock, snapshot.clock_elapsed, snapshot.clock_total) {
            (ClockStatus::In, Some(elapsed), _) => format!("in {}", format_duration(elapsed)),
            (ClockStatus::In, None, _) => "in".to_string(),
            (ClockStatus::Out, _, Some(total)) => format!("out, total {}", format_duration(total)),
            (ClockStatus::Out, _, None) => "out".to_string(),
        };
        writeln!(
            self.output,
            "Clock: {} | running: {} | completed: {} ({}) | reserved shifts: {}",
            clock,
            snapshot.running.len(),
            snapshot.completed_count,
            format_duration(snapshot.completed_total),
            snapshot.reserved_count
        )?;
        for (id, elapsed) in &snapshot.running {
            writeln!(self.output, "  task {} {}", id, format_duration(*elapsed))?;
        }
        Ok(())
    }
}
