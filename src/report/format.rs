use super::{Block, PREFIX, Report};
use std::fmt::{Display, Formatter, Result};

#[cfg(feature = "color")]
use anstyle::{AnsiColor, Style};

/// Struct used to adjust the formatting of a `Report`
#[derive(Debug)]
pub struct ReportFormatter {
    #[cfg(feature = "color")]
    with_color: bool,

    #[cfg(feature = "color")]
    directive: Style,
    #[cfg(feature = "color")]
    delete: Style,
    #[cfg(feature = "color")]
    insert: Style,
    #[cfg(feature = "color")]
    moved: Style,
}

#[derive(Copy, Clone)]
enum Kind {
    Directive,
    Delete,
    Insert,
    Moved,
}

impl ReportFormatter {
    /// Construct a new formatter
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "color")]
            with_color: false,

            #[cfg(feature = "color")]
            directive: Style::new().bold(),
            #[cfg(feature = "color")]
            delete: AnsiColor::Red.on_default(),
            #[cfg(feature = "color")]
            insert: AnsiColor::Green.on_default(),
            #[cfg(feature = "color")]
            moved: AnsiColor::Magenta.on_default(),
        }
    }

    /// Enable formatting a report with color
    #[cfg(feature = "color")]
    pub fn with_color(mut self) -> Self {
        self.with_color = true;
        self
    }

    /// Returns a `Display` impl which can be used to print a Report
    pub fn fmt_report<'a>(&'a self, report: &'a Report) -> impl Display + 'a {
        ReportDisplay { f: self, report }
    }

    fn fmt_block<'a>(&'a self, block: &'a Block) -> impl Display + 'a {
        BlockDisplay { f: self, block }
    }

    #[cfg(feature = "color")]
    fn style(&self, kind: Kind) -> Option<Style> {
        if !self.with_color {
            return None;
        }
        Some(match kind {
            Kind::Directive => self.directive,
            Kind::Delete => self.delete,
            Kind::Insert => self.insert,
            Kind::Moved => self.moved,
        })
    }

    // Writes one newline-terminated output line, colored when enabled.
    #[cfg(feature = "color")]
    fn line(&self, f: &mut Formatter<'_>, kind: Kind, text: impl Display) -> Result {
        match self.style(kind) {
            Some(style) => writeln!(f, "{}{}{}", style.render(), text, style.render_reset()),
            None => writeln!(f, "{}", text),
        }
    }

    #[cfg(not(feature = "color"))]
    fn line(&self, f: &mut Formatter<'_>, _kind: Kind, text: impl Display) -> Result {
        writeln!(f, "{}", text)
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

struct ReportDisplay<'a> {
    f: &'a ReportFormatter,
    report: &'a Report,
}

impl Display for ReportDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for block in &self.report.blocks {
            write!(f, "{}", self.f.fmt_block(block))?;
        }

        let summary = if self.report.has_differences() {
            "End of differences."
        } else {
            "Files are identical."
        };
        self.f.line(
            f,
            Kind::Directive,
            format_args!("{} {}: {}", PREFIX, self.report.identifier, summary),
        )
    }
}

struct BlockDisplay<'a> {
    f: &'a ReportFormatter,
    block: &'a Block,
}

impl BlockDisplay<'_> {
    fn lines(&self, f: &mut Formatter<'_>, kind: Kind, lines: &[String]) -> Result {
        for line in lines {
            self.f.line(f, kind, line)?;
        }
        Ok(())
    }
}

impl Display for BlockDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let directive = Kind::Directive;
        match self.block {
            Block::Delete { at, lines } => {
                self.f
                    .line(f, directive, format_args!("{} DELETE AT {}", PREFIX, at))?;
                self.lines(f, Kind::Delete, lines)
            }
            Block::Insert { before, lines } => {
                self.f.line(
                    f,
                    directive,
                    format_args!("{} INSERT BEFORE {}", PREFIX, before),
                )?;
                self.lines(f, Kind::Insert, lines)
            }
            Block::Change { at, from, to } => {
                self.f
                    .line(f, directive, format_args!("{} {} CHANGED FROM", PREFIX, at))?;
                self.lines(f, Kind::Delete, from)?;
                self.f
                    .line(f, directive, format_args!("{}     CHANGED TO", PREFIX))?;
                self.lines(f, Kind::Insert, to)
            }
            Block::Move {
                first,
                last,
                before,
                lines,
            } => {
                self.f.line(
                    f,
                    directive,
                    format_args!(
                        "{} {} THRU {} MOVED TO BEFORE {}",
                        PREFIX, first, last, before
                    ),
                )?;
                self.lines(f, Kind::Moved, lines)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn identical() {
        let report = Report::new("Diff".into(), Vec::new());
        assert_eq!(report.to_string(), ">>>> Diff: Files are identical.\n");
    }

    #[test]
    fn every_directive() {
        let report = Report::new(
            "cmp".into(),
            vec![
                Block::Delete {
                    at: 2,
                    lines: lines(&["gone"]),
                },
                Block::Insert {
                    before: 4,
                    lines: lines(&["new 1", "new 2"]),
                },
                Block::Change {
                    at: 5,
                    from: lines(&["old"]),
                    to: lines(&["  replaced"]),
                },
                Block::Move {
                    first: 8,
                    last: 9,
                    before: 6,
                    lines: lines(&["m1", "m2"]),
                },
            ],
        );

        let expected = "\
>>>> DELETE AT 2
gone
>>>> INSERT BEFORE 4
new 1
new 2
>>>> 5 CHANGED FROM
old
>>>>     CHANGED TO
  replaced
>>>> 8 THRU 9 MOVED TO BEFORE 6
m1
m2
>>>> cmp: End of differences.
";
        assert_eq!(report.to_string(), expected);
        assert_eq!(
            ReportFormatter::default().fmt_report(&report).to_string(),
            expected
        );
    }

    #[cfg(feature = "color")]
    #[test]
    fn color() {
        let report = Report::new(
            "Diff".into(),
            vec![Block::Delete {
                at: 1,
                lines: lines(&["x"]),
            }],
        );
        let plain = report.to_string();
        let colored = ReportFormatter::new()
            .with_color()
            .fmt_report(&report)
            .to_string();
        assert_ne!(plain, colored);
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("DELETE AT 1"));
    }
}
