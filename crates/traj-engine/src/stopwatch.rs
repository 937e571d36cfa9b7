use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, Local};

const STAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Wall-clock progress report for a batch run.
pub struct Stopwatch<W: Write> {
    out: W,
    launched: Instant,
    lap: Instant,
}

impl<W: Write> Stopwatch<W> {
    pub fn launch(mut out: W) -> std::io::Result<Self> {
        writeln!(out, "Post-processing launched: {}", stamp(Local::now()))?;
        let now = Instant::now();
        Ok(Self {
            out,
            launched: now,
            lap: now,
        })
    }

    pub fn start_stage(&mut self, title: &str) -> std::io::Result<()> {
        writeln!(self.out, "\nCalculating {title}...")?;
        self.lap = Instant::now();
        Ok(())
    }

    pub fn complete_stage(&mut self) -> std::io::Result<u64> {
        let elapsed = self.lap.elapsed().as_secs();
        writeln!(self.out, "Task completed: {}", stamp(Local::now()))?;
        writeln!(self.out, "Elapsed time: {elapsed} sec")?;
        Ok(elapsed)
    }

    pub fn fail_stage(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.out, "Task failed: {message}")
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        let elapsed = self.launched.elapsed().as_secs();
        writeln!(self.out, "\nPost-processing finished: {}", stamp(Local::now()))?;
        writeln!(self.out, "Total Elapsed time: {elapsed} sec")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

fn stamp(at: DateTime<Local>) -> String {
    at.format(STAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_layout() {
        let mut sw = Stopwatch::launch(Vec::new()).unwrap();
        sw.start_stage("MSD").unwrap();
        assert_eq!(sw.complete_stage().unwrap(), 0);
        let text = String::from_utf8(sw.finish().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Post-processing launched: "));
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Calculating MSD...");
        assert!(lines[3].starts_with("Task completed: "));
        assert_eq!(lines[4], "Elapsed time: 0 sec");
        assert!(lines[6].starts_with("Post-processing finished: "));
        assert_eq!(lines[7], "Total Elapsed time: 0 sec");
    }
}
