use std::io::IsTerminal;

use anstyle::{AnsiColor, Effects, Style};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn resolve_output_style() -> OutputStyle {
    if std::io::stdout().is_terminal() {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => {
            let badge = match status {
                "ok" => "[OK]",
                "warn" => "[WARN]",
                "err" => "[ERR]",
                _ => "[..]",
            };
            format!("{badge} {message}")
        }
    }
}

pub(crate) fn print_section(style: OutputStyle, title: &str) {
    if style == OutputStyle::Plain {
        return;
    }
    println!();
    println!("{}", colorize(section_style(), &format!("== {title} ==")));
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

/// Progress over rollback plan entries; narration lines are routed through
/// the bar so they stay visible above it.
pub(crate) struct RollbackProgress {
    bar: Option<ProgressBar>,
}

impl RollbackProgress {
    pub(crate) fn start(style: OutputStyle, total: u64) -> Self {
        let bar = if style == OutputStyle::Rich {
            let bar = ProgressBar::new(total.max(1));
            if let Ok(template) =
                ProgressStyle::with_template("{msg:<10} [{bar:20.cyan/blue}] {pos:>3}/{len:3}")
            {
                bar.set_style(template.progress_chars("=>-"));
            }
            bar.set_message("rollback");
            Some(bar)
        } else {
            None
        };

        RollbackProgress { bar }
    }

    pub(crate) fn println(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }

    pub(crate) fn advance(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub(crate) fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
