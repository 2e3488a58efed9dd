//! Scanner for the plaintext results report written by an MM-PBSA run.
//!
//! A report interleaves free text with per-system energy tables. Each table is
//! introduced by a label line (`Complex:`, `Receptor:`, `Ligand:`, `Delta (...)` or
//! `<name> Delta`), followed by a column header, a horizontal rule, the data rows, and a
//! closing rule:
//!
//! ```text
//! Complex:
//! Energy Component       Average     SD(Prop.)         SD   SEM(Prop.)        SEM
//! -------------------------------------------------------------------------------
//! BOND                 1636.5468       26.4187    26.4187       2.6419     2.6419
//! ...
//! -------------------------------------------------------------------------------
//! ```
//!
//! The scanner is a line-driven state machine. A label line opens a pending section and
//! the first run of at least [`RULE_MIN_DASHES`] dashes after the label, anywhere on a
//! line and possibly on the label line itself, starts collecting its body. The body ends
//! at the next line that *begins* with such a run; indented dash lines stay inside the
//! body and are skipped as rows. Anything between the label and the opening rule,
//! including further label lines, is ignored.

use crate::core::models::energy::{EnergyRecord, EnergySystem};
use tracing::debug;

/// Minimum run of `-` characters that makes a line a horizontal rule.
pub const RULE_MIN_DASHES: usize = 60;

const SYSTEM_KEYWORDS: [(&str, EnergySystem); 4] = [
    ("Complex", EnergySystem::Complex),
    ("Receptor", EnergySystem::Receptor),
    ("Ligand", EnergySystem::Ligand),
    ("Delta", EnergySystem::Delta),
];
const DELTA_SUFFIX: &str = "delta";

/// Number of whitespace-separated tokens a data row must provide: the component label
/// followed by five numbers.
const ROW_TOKENS: usize = 6;

/// The raw body of one system's table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection<'a> {
    /// Label text exactly as it appeared in the report.
    pub label: &'a str,
    pub system: EnergySystem,
    /// Lines between the opening and closing rules, untrimmed.
    pub lines: Vec<&'a str>,
}

impl ReportSection<'_> {
    /// Tokenizes the section body into records, skipping lines that are not data rows.
    pub fn records(&self) -> impl Iterator<Item = EnergyRecord> + '_ {
        self.lines
            .iter()
            .filter_map(move |line| parse_row(self.system, line))
    }
}

enum ScanState<'a> {
    Outside,
    AwaitingTable {
        label: &'a str,
        system: EnergySystem,
    },
    InTable {
        label: &'a str,
        system: EnergySystem,
        lines: Vec<&'a str>,
    },
}

/// Splits a report into its per-system table sections, in order of appearance.
///
/// Duplicate labels each produce their own section. A label that is never followed by a
/// rule produces nothing; a table whose closing rule is missing runs to the end of the
/// text.
pub fn scan_sections(text: &str) -> Vec<ReportSection<'_>> {
    let mut sections = Vec::new();
    let mut state = ScanState::Outside;

    for line in text.lines() {
        state = match state {
            ScanState::Outside => match match_label(line) {
                Some((label, system)) if contains_rule(&line[label.len()..]) => {
                    ScanState::InTable {
                        label,
                        system,
                        lines: Vec::new(),
                    }
                }
                Some((label, system)) => ScanState::AwaitingTable { label, system },
                None => ScanState::Outside,
            },
            ScanState::AwaitingTable { label, system } => {
                if contains_rule(line) {
                    ScanState::InTable {
                        label,
                        system,
                        lines: Vec::new(),
                    }
                } else {
                    ScanState::AwaitingTable { label, system }
                }
            }
            ScanState::InTable {
                label,
                system,
                mut lines,
            } => {
                if starts_with_rule(line) {
                    push_section(&mut sections, label, system, lines);
                    ScanState::Outside
                } else {
                    lines.push(line);
                    ScanState::InTable {
                        label,
                        system,
                        lines,
                    }
                }
            }
        };
    }

    if let ScanState::InTable {
        label,
        system,
        lines,
    } = state
    {
        push_section(&mut sections, label, system, lines);
    }
    sections
}

/// Parses a full report into energy records: every row of one section before any row of
/// the next, sections in report order.
///
/// Malformed rows and empty sections are skipped; an input without any sections yields
/// an empty vector.
pub fn parse_report(text: &str) -> Vec<EnergyRecord> {
    let records: Vec<EnergyRecord> = scan_sections(text)
        .iter()
        .flat_map(|section| section.records())
        .collect();
    debug!(records = records.len(), "Parsed MM-PBSA report.");
    records
}

fn push_section<'a>(
    sections: &mut Vec<ReportSection<'a>>,
    label: &'a str,
    system: EnergySystem,
    lines: Vec<&'a str>,
) {
    debug!(label, system = %system, lines = lines.len(), "Found report section.");
    sections.push(ReportSection {
        label,
        system,
        lines,
    });
}

/// Returns the label that opens a section when `line` starts with one, together with the
/// system it names.
///
/// Labels must begin at column zero. The four system keywords are tried first, as a
/// case-insensitive prefix; failing that, a leading word followed by a single space and
/// `Delta` names a composite delta section.
fn match_label(line: &str) -> Option<(&str, EnergySystem)> {
    for (keyword, system) in SYSTEM_KEYWORDS {
        if let Some(prefix) = line.get(..keyword.len()) {
            if prefix.eq_ignore_ascii_case(keyword) {
                return Some((prefix, system));
            }
        }
    }

    let word_end = line.find(char::is_whitespace)?;
    if word_end == 0 {
        return None;
    }
    let rest = line[word_end..].strip_prefix(' ')?;
    let suffix = rest.get(..DELTA_SUFFIX.len())?;
    if suffix.eq_ignore_ascii_case(DELTA_SUFFIX) {
        Some((
            &line[..word_end + 1 + DELTA_SUFFIX.len()],
            EnergySystem::Delta,
        ))
    } else {
        None
    }
}

fn contains_rule(line: &str) -> bool {
    line.split(|c: char| c != '-').any(|run| run.len() >= RULE_MIN_DASHES)
}

fn starts_with_rule(line: &str) -> bool {
    line.bytes().take_while(|&b| b == b'-').count() >= RULE_MIN_DASHES
}

/// Tokenizes one body line into a record.
///
/// Blank lines, short dash rules, lines with fewer than six tokens, and lines whose
/// five value tokens do not all parse as numbers yield `None`. Tokens past the sixth
/// are ignored.
fn parse_row(system: EnergySystem, line: &str) -> Option<EnergyRecord> {
    let line = line.trim();
    if line.is_empty() || line.bytes().all(|b| b == b'-') {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().take(ROW_TOKENS).collect();
    if tokens.len() < ROW_TOKENS {
        return None;
    }

    let mut values = [0.0_f64; ROW_TOKENS - 1];
    for (slot, token) in values.iter_mut().zip(&tokens[1..]) {
        *slot = token.parse().ok()?;
    }
    let [average, sd_prop, sd, sem_prop, sem] = values;

    Some(EnergyRecord {
        system,
        component: tokens[0].to_string(),
        average,
        sd_prop,
        sd,
        sem_prop,
        sem,
    })
}
