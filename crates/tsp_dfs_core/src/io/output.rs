use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use crate::{Error, Result, SearchOutcome, TspOptions};

pub const NO_TOUR_MESSAGE: &str = "No tour found.";

/// Opens `--output` when set, otherwise stdout.
pub fn open_output(options: &TspOptions) -> Result<Box<dyn Write>> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::invalid_input(format!("error file write {}: {e}", path.display()))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Writes the shortest circuit, or [`NO_TOUR_MESSAGE`], then the call count.
pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    outcome: &SearchOutcome,
    names: &[String],
) -> io::Result<()> {
    match outcome.shortest() {
        Some(path) => path.print(out, names)?,
        None => writeln!(out, "{NO_TOUR_MESSAGE}")?,
    }
    writeln!(out, "Total recursive calls: {}", outcome.calls())
}
