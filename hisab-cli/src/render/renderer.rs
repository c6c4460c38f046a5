use super::theme::Palette;
use hisab_core::{
    aggregate::MonthReport,
    record::{Entry, MissingFields, ParsedRecord},
    store::SaveOutcome,
};
use std::io::{self, Write};
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub currency: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: Palette::report_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%d %b %Y".to_string(),
                    currency: "₹".to_string(),
                    use_color: true,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_info(&self, message: &str) {
        let md = format!("|-|\n| {message} |\n|-|\n");
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            println!("{}", message);
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.with(Palette::ERROR));
        } else {
            eprintln!("{}", message);
        }
    }

    /// Prints `question [y/N] ` without a newline, ready for the answer.
    pub fn print_question(&self, question: &str) {
        if self.opts.use_color {
            print!("{} [y/N] ", question.with(Palette::QUESTION));
        } else {
            print!("{question} [y/N] ");
        }
        let _ = io::stdout().flush();
    }

    /// One `date shift amount` line, as shown before saving.
    pub fn print_record(&self, record: &ParsedRecord) {
        println!("{}", self.record_line(record));
    }

    pub fn print_missing(&self, missing: &MissingFields) {
        let mut md = String::from("**Ye samajh nahi aaya:**\n");
        for descriptor in missing.descriptors() {
            md.push_str(&format!("* {descriptor}\n"));
        }
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            print!("{}", md.replace("**", ""));
        }
    }

    pub fn print_save_outcome(&self, outcome: &SaveOutcome) {
        match outcome {
            SaveOutcome::Created(_) => self.print_info("Entry save ho gayi!"),
            SaveOutcome::Overwritten { previous, .. } => self.print_info(&format!(
                "Entry update ho gayi (pehle {}).",
                format_amount(&self.opts.currency, previous.amount)
            )),
            SaveOutcome::Cancelled { .. } => self.print_info("Overwrite cancel. Purani entry rakhi."),
        }
    }

    pub fn overwrite_question(&self, existing: &Entry) -> String {
        format!(
            "{} ki {} ki entry pehle se hai ({}). Overwrite karein?",
            existing.date.format(&self.opts.date_format),
            existing.shift.label(),
            format_amount(&self.opts.currency, existing.amount)
        )
    }

    pub fn print_month_report(&self, report: &MonthReport) {
        if report.is_empty() {
            self.print_info(&format!("{} mein koi entry nahi.", report.period));
            return;
        }
        if self.opts.use_color {
            self.print_md(&self.month_report_md(report));
        } else {
            print!("{}", self.month_report_plain(report));
        }
    }

    pub fn print_entries(&self, entries: &[Entry]) {
        if entries.is_empty() {
            self.print_info("Abhi tak koi entry nahi.");
            return;
        }
        for entry in entries {
            let line = self.record_line(&entry.record());
            match entry.written_at() {
                Some(at) => {
                    let at = at.format("saved %d/%m %H:%M").to_string();
                    if self.opts.use_color {
                        println!("{line}  {}", at.with(Palette::MUTED));
                    } else {
                        println!("{line}  {at}");
                    }
                }
                None => println!("{line}"),
            }
        }
    }

    fn record_line(&self, record: &ParsedRecord) -> String {
        let date = record.date.format(&self.opts.date_format).to_string();
        let shift = record.shift.label().to_string();
        let amount = format_amount(&self.opts.currency, record.amount);
        if self.opts.use_color {
            format!(
                "{} {} {}",
                date.with(Palette::DATE),
                shift.with(Palette::SHIFT),
                amount.with(Palette::AMOUNT)
            )
        } else {
            format!("{date} {shift} {amount}")
        }
    }

    fn month_report_md(&self, report: &MonthReport) -> String {
        let mut md = format!(
            "# {}\n|:-|:-:|-:|\n|**Date**|**Shift**|**Amount**|\n|:-|:-:|-:|\n",
            report.period
        );
        for entry in &report.entries {
            md.push_str(&format!(
                "|{}|{}|{}|\n",
                entry.date.format(&self.opts.date_format),
                entry.shift.label(),
                format_amount(&self.opts.currency, entry.amount)
            ));
        }
        md.push_str("|-|\n");
        md.push_str(&format!(
            "## Total: {} ({} entries)\n",
            format_amount(&self.opts.currency, report.total),
            report.entries.len()
        ));
        md
    }

    fn month_report_plain(&self, report: &MonthReport) -> String {
        let mut out = format!("{}\n", report.period);
        for entry in &report.entries {
            out.push_str(&format!(
                "{:<14}{:<8}{:>12}\n",
                entry.date.format(&self.opts.date_format).to_string(),
                entry.shift.label(),
                format_amount(&self.opts.currency, entry.amount)
            ));
        }
        out.push_str(&format!(
            "Total: {} ({} entries)\n",
            format_amount(&self.opts.currency, report.total),
            report.entries.len()
        ));
        out
    }
}

/// `₹126.56`
pub fn format_amount(currency: &str, amount: f64) -> String {
    format!("{currency}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hisab_core::record::Shift;
    use hisab_core::aggregate::{MonthPeriod, month_report};

    fn renderer(use_color: bool) -> Renderer {
        Renderer::new(Some(RenderOptions {
            date_format: "%d %b %Y".to_string(),
            currency: "₹".to_string(),
            use_color,
        }))
    }

    fn report() -> MonthReport {
        let entries = vec![
            Entry {
                date: NaiveDate::from_ymd_opt(2025, 5, 26).unwrap(),
                shift: Shift::Evening,
                amount: 126.56,
                timestamp: 0,
            },
            Entry {
                date: NaiveDate::from_ymd_opt(2025, 5, 26).unwrap(),
                shift: Shift::Morning,
                amount: 100.0,
                timestamp: 0,
            },
        ];
        month_report(&entries, MonthPeriod::new(2025, 5).unwrap())
    }

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(format_amount("₹", 126.5), "₹126.50");
        assert_eq!(format_amount("Rs.", 40.0), "Rs.40.00");
    }

    #[test]
    fn report_markdown_is_a_table_with_total() {
        let md = renderer(true).month_report_md(&report());
        assert!(md.starts_with("# May 2025\n"));
        assert!(md.contains("|26 May 2025|Subah|₹100.00|\n|26 May 2025|Shaam|₹126.56|"));
        assert!(md.contains("## Total: ₹226.56 (2 entries)"));
    }

    #[test]
    fn plain_report_without_markup() {
        let out = renderer(false).month_report_plain(&report());
        assert!(!out.contains('|'));
        assert!(out.ends_with("Total: ₹226.56 (2 entries)\n"));
    }

    #[test]
    fn plain_record_line() {
        let line = renderer(false).record_line(&ParsedRecord {
            date: NaiveDate::from_ymd_opt(2025, 5, 26).unwrap(),
            shift: Shift::Evening,
            amount: 126.56,
        });
        assert_eq!(line, "26 May 2025 Shaam ₹126.56");
    }

    #[test]
    fn overwrite_question_names_existing_entry() {
        let existing = &report().entries[0];
        assert_eq!(
            renderer(false).overwrite_question(existing),
            "26 May 2025 ki Subah ki entry pehle se hai (₹100.00). Overwrite karein?"
        );
    }
}
