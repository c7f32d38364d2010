use std::io::Write;

use super::rental::Rental;
use super::report::RentalView;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write rental csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush rental csv: {0}")]
    Io(#[from] std::io::Error),
}

/// Write one header row plus one row per rental.
pub fn write_csv<'a, W: Write>(
    rentals: impl IntoIterator<Item = &'a Rental>,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for rental in rentals {
        csv_writer.serialize(RentalView::from(rental))?;
    }
    csv_writer.flush()?;
    Ok(())
}
