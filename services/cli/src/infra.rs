use clap::ValueEnum;
use rental_manager::config::StorageConfig;
use rental_manager::error::AppError;
use rental_manager::rentals::{
    FileStore, LookupKey, PortfolioSummary, RentalService, RentalStorage, RentalView, SortKey,
};
use std::io::{self, Write};
use tracing::info;

/// Field a KEY or TERM argument is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum LookupArg {
    #[default]
    Name,
    Street,
}

impl From<LookupArg> for LookupKey {
    fn from(value: LookupArg) -> Self {
        match value {
            LookupArg::Name => LookupKey::Name,
            LookupArg::Street => LookupKey::AddressStreet,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortArg {
    Name,
    Street,
    Revenue,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => SortKey::Name,
            SortArg::Street => SortKey::AddressStreet,
            SortArg::Revenue => SortKey::Revenue,
        }
    }
}

pub(crate) fn open_service(storage: &StorageConfig) -> Result<RentalService<FileStore>, AppError> {
    info!(
        store = %storage.path.display(),
        key = %storage.key,
        "opening rental store"
    );
    let store = FileStore::new(&storage.path);
    let service = RentalService::open(RentalStorage::with_key(store, storage.key.clone()))?;
    Ok(service)
}

/// Monetary flag values must be finite numbers.
pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{raw}' is not a finite amount"))
    }
}

pub(crate) fn write_row(out: &mut impl Write, view: &RentalView) -> io::Result<()> {
    writeln!(out, "{}", view.name)?;
    for line in view.display_address().lines() {
        writeln!(out, "  {}", line.trim_end_matches(','))?;
    }
    writeln!(
        out,
        "  Tenant: {} ({})",
        view.tenant_name, view.tenant_phone_number
    )?;
    writeln!(
        out,
        "  Rent {:.2} | Cost {:.2} | Revenue {:.2}",
        view.rent_per_month, view.total_monthly_cost, view.monthly_revenue
    )
}

pub(crate) fn write_summary(out: &mut impl Write, summary: &PortfolioSummary) -> io::Result<()> {
    writeln!(out, "Portfolio summary ({} rentals)", summary.rentals)?;
    writeln!(out, "- Monthly rent:    {:.2}", summary.total_rent)?;
    writeln!(out, "- Monthly cost:    {:.2}", summary.total_cost)?;
    writeln!(out, "- Monthly revenue: {:.2}", summary.total_revenue)?;
    if !summary.is_profitable() && summary.rentals > 0 {
        writeln!(out, "Portfolio is not profitable this month.")?;
    }
    Ok(())
}
