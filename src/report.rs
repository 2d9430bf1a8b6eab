//! Result table.

use std::io::{self, Write};

pub const VALUE_WIDTH: usize = 15;
pub const SPEEDUP_WIDTH: usize = 12;
pub const ELEM_WIDTH: usize = 6;
pub const LABEL_WIDTH: usize = 24;

pub mod colors {
    pub const RED: &str = "\x1b[1;40;31m";
    pub const GREEN: &str = "\x1b[1;40;32m";
    pub const DGREEN: &str = "\x1b[0;40;32m";
    pub const NORMAL: &str = "\x1b[0m";
}

/// How a speedup is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Good,
    MildGain,
    Neutral,
    Regression,
}

impl Tier {
    /// `speedup_lanes` is how many lanes the row could gain at best,
    /// `reference_lanes` the same for the reference row.
    pub fn classify(speedup: f64, speedup_lanes: usize, reference_lanes: usize) -> Self {
        let expected = speedup_lanes as f64 / reference_lanes.max(1) as f64;
        if speedup >= 1.5 || (speedup > 1.1 && speedup >= 0.90 * expected) {
            Tier::Good
        } else if speedup > 1.1 {
            Tier::MildGain
        } else if speedup < 0.95 {
            Tier::Regression
        } else {
            Tier::Neutral
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Good => colors::GREEN,
            Tier::MildGain => colors::DGREEN,
            Tier::Regression => colors::RED,
            Tier::Neutral => "",
        }
    }
}

/// Cycles per value of the reference over cycles per value of this row.
pub fn speedup(reference: Option<(f64, usize)>, cost: f64, lanes: usize) -> f64 {
    match reference {
        Some((ref_cost, ref_lanes)) => (ref_cost / ref_lanes as f64) / (cost / lanes as f64),
        None => 1.0,
    }
}

/// One measured channel as printed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub cycles: f64,
    pub speedup: f64,
    pub tier: Tier,
}

/// `"  int8, lanes<8>                 "` followed by the unit's name, if any.
pub fn row_id(elem_name: &str, label: impl std::fmt::Display, name: &str) -> String {
    let mut id = format!("{elem_name:>ELEM_WIDTH$}, {label:<LABEL_WIDTH$}");
    if !name.is_empty() {
        id.push(' ');
        id.push_str(name);
    }
    id
}

pub fn id_width(name: &str) -> usize {
    let extra = if name.is_empty() { 0 } else { 1 + name.len() };
    ELEM_WIDTH + 2 + LABEL_WIDTH + extra
}

pub struct Report<W> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Channel names over their units, with `TYPE` centered above the ids.
    pub fn header(&mut self, id_width: usize, info: &[&str]) -> io::Result<()> {
        let mut id = " ".repeat(id_width);
        let at = (id_width / 2).saturating_sub(2);
        id.replace_range(at..at + 4, "TYPE");

        write!(self.out, "{id}")?;
        for name in info {
            write!(self.out, "{name:>VALUE_WIDTH$}{:>SPEEDUP_WIDTH$}", "Speedup")?;
        }
        writeln!(self.out)?;

        write!(self.out, "{:id_width$}", "")?;
        for _ in info {
            write!(
                self.out,
                "{:>VALUE_WIDTH$}{:>SPEEDUP_WIDTH$}",
                "[cycles/call]", "[per value]"
            )?;
        }
        writeln!(self.out)
    }

    pub fn row(&mut self, id: &str, cells: &[Cell]) -> io::Result<()> {
        write!(self.out, "{id}")?;
        for cell in cells {
            write!(
                self.out,
                "{:VALUE_WIDTH$.3}{}{:SPEEDUP_WIDTH$.3}{}",
                cell.cycles,
                cell.tier.color(),
                cell.speedup,
                colors::NORMAL
            )?;
        }
        writeln!(self.out)
    }

    pub fn separator(&mut self, id_width: usize, channels: usize) -> io::Result<()> {
        let width = id_width + channels * (VALUE_WIDTH + SPEEDUP_WIDTH);
        writeln!(self.out, "{}", "-".repeat(width))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_when_speedup_is_large() {
        assert_eq!(Tier::classify(1.6, 8, 1), Tier::Good);
        assert_eq!(Tier::classify(1.5, 64, 1), Tier::Good);
    }

    #[test]
    fn good_when_width_is_reflected() {
        assert_eq!(Tier::classify(1.2, 1, 1), Tier::Good);
        assert_eq!(Tier::classify(1.3, 4, 4), Tier::Good);
        assert_eq!(Tier::classify(1.2, 4, 1), Tier::MildGain);
    }

    #[test]
    fn neutral_band() {
        assert_eq!(Tier::classify(1.05, 8, 1), Tier::Neutral);
        assert_eq!(Tier::classify(0.95, 8, 1), Tier::Neutral);
        assert_eq!(Tier::classify(1.1, 1, 1), Tier::Neutral);
    }

    #[test]
    fn regression_below_cutoff() {
        assert_eq!(Tier::classify(0.94, 8, 1), Tier::Regression);
        assert_eq!(Tier::classify(0.94, 1, 1), Tier::Regression);
    }

    #[test]
    fn speedup_is_per_value() {
        assert_eq!(speedup(None, 3.0, 8), 1.0);
        assert_eq!(speedup(Some((2.0, 1)), 4.0, 8), 4.0);
        assert_eq!(speedup(Some((8.0, 4)), 2.0, 1), 1.0);
    }

    #[test]
    fn ids_are_aligned() {
        let id = row_id("  int8", "lanes<8>", "");
        assert_eq!(id.len(), id_width(""));
        assert!(id.starts_with("  int8, lanes<8> "));
        let id = row_id(" float", "", "sin(x)");
        assert_eq!(id.len(), id_width("sin(x)"));
        assert!(id.ends_with(" sin(x)"));
    }

    #[test]
    fn table_layout() {
        let mut report = Report::new(Vec::new());
        report.header(20, &["Latency", "Throughput"]).unwrap();
        report
            .row(
                &format!("{:20}", "x"),
                &[
                    Cell { cycles: 4.0, speedup: 1.0, tier: Tier::Neutral },
                    Cell { cycles: 0.5, speedup: 2.0, tier: Tier::Good },
                ],
            )
            .unwrap();
        report.separator(20, 2).unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(&lines[0][8..12], "TYPE");
        assert!(lines[0].ends_with("     Latency     Speedup     Throughput     Speedup"));
        assert!(lines[1].starts_with(&" ".repeat(20)));
        assert!(lines[1].contains("[cycles/call] [per value]"));
        assert!(lines[2].contains("          4.000       1.000\x1b[0m"));
        assert!(lines[2].contains(&format!("{}       2.000{}", colors::GREEN, colors::NORMAL)));
        assert_eq!(lines[3], "-".repeat(20 + 2 * 27));
    }
}
