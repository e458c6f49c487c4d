//! Interactive collection of a coordinate set, either typed in line by line or
//! loaded from a CSV file. Works over any reader/writer pair so sessions can be
//! scripted.

use std::io::{BufRead, Write};

use tracing::info;

use crate::error::Result;
use crate::geo::CoordinateSet;
use crate::input::{parse_coordinate, read_csv_file, ColumnSelector, CsvColumns};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    // None once the input is exhausted.
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask where the points come from and gather them. An unrecognised answer
    /// gives an empty set.
    pub fn collect_points(&mut self) -> Result<CoordinateSet> {
        let choice = self.ask("Load points from CSV? (y/n): ")?;
        match choice.as_deref().map(str::to_lowercase).as_deref() {
            Some("y") => self.csv_points(),
            Some("n") => self.manual_points(),
            _ => {
                self.say("Invalid choice; no points loaded.")?;
                Ok(CoordinateSet::default())
            }
        }
    }

    fn manual_points(&mut self) -> Result<CoordinateSet> {
        self.say("Enter points as 'lat,lon' one per line. Type 'done' when finished.")?;
        let mut points = Vec::new();
        while let Some(line) = self.ask("> ")? {
            if line.eq_ignore_ascii_case("done") {
                break;
            }
            match parse_coordinate(&line) {
                Ok(c) => points.push(c),
                Err(e) => self.say(&format!("Invalid point ({}). Use e.g. 37.77,-122.42", e))?,
            }
        }
        Ok(CoordinateSet::from(points))
    }

    fn csv_points(&mut self) -> Result<CoordinateSet> {
        let (Some(path), Some(lat), Some(lon)) = (
            self.ask("CSV filename: ")?,
            self.ask("Latitude column (name or index): ")?,
            self.ask("Longitude column (name or index): ")?,
        ) else {
            return Ok(CoordinateSet::default());
        };
        let columns = CsvColumns {
            lat: lat.parse::<ColumnSelector>().unwrap_or_else(|never| match never {}),
            lon: lon.parse::<ColumnSelector>().unwrap_or_else(|never| match never {}),
            has_headers: true,
        };
        match read_csv_file(&path, &columns) {
            Ok((set, report)) => {
                info!(
                    path = %path,
                    loaded = report.loaded,
                    skipped = report.skipped.len(),
                    "loaded csv"
                );
                if !report.skipped.is_empty() {
                    self.say(&format!(
                        "Skipped {} row(s) with missing or invalid data.",
                        report.skipped.len()
                    ))?;
                }
                Ok(set)
            }
            Err(e) => {
                self.say(&format!("Error reading '{}': {}", path, e))?;
                Ok(CoordinateSet::default())
            }
        }
    }
}
