use crate::infra::{parse_amount, write_row, write_summary, LookupArg, SortArg};
use clap::Args;
use rental_manager::error::AppError;
use rental_manager::rentals::{
    export, Address, AddressPatch, KeyValueStore, Rental, RentalCosts, RentalPatch,
    RentalService, RentalView, Tenant,
};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Reorder the stored collection before listing
    #[arg(long, value_enum)]
    pub(crate) sort: Option<SortArg>,
}

#[derive(Args, Debug)]
pub(crate) struct AddArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) street: String,
    #[arg(long)]
    pub(crate) city: String,
    /// Two-letter state code
    #[arg(long)]
    pub(crate) state: String,
    /// Five-digit zip code
    #[arg(long)]
    pub(crate) zip: String,
    #[arg(long)]
    pub(crate) tenant_name: String,
    #[arg(long)]
    pub(crate) tenant_phone: String,
    #[arg(long, default_value_t = 0.0, value_parser = parse_amount)]
    pub(crate) rent: f64,
    #[arg(long, default_value_t = 0.0, value_parser = parse_amount)]
    pub(crate) mortgage: f64,
    #[arg(long, default_value_t = 0.0, value_parser = parse_amount)]
    pub(crate) maintenance: f64,
    #[arg(long, default_value_t = 0.0, value_parser = parse_amount)]
    pub(crate) misc: f64,
}

impl AddArgs {
    fn into_rental(self) -> Result<Rental, AppError> {
        let address = Address::new(self.street, self.city, self.state, self.zip)?;
        let tenant = Tenant::new(self.tenant_name, self.tenant_phone)?;
        Ok(Rental::new(self.name, address, tenant)
            .with_rent(self.rent)
            .with_costs(RentalCosts::new(self.mortgage, self.maintenance, self.misc)))
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct EditArgs {
    /// Name or street of the rental to edit
    pub(crate) key: String,
    #[arg(long, value_enum, default_value_t = LookupArg::Name)]
    pub(crate) by: LookupArg,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) street: Option<String>,
    #[arg(long)]
    pub(crate) city: Option<String>,
    #[arg(long)]
    pub(crate) state: Option<String>,
    #[arg(long)]
    pub(crate) zip: Option<String>,
    #[arg(long)]
    pub(crate) tenant_name: Option<String>,
    #[arg(long)]
    pub(crate) tenant_phone: Option<String>,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) rent: Option<f64>,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) mortgage: Option<f64>,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) maintenance: Option<f64>,
    #[arg(long, value_parser = parse_amount)]
    pub(crate) misc: Option<f64>,
}

impl EditArgs {
    /// Patch carrying only the flags that were given.
    fn patch(&self) -> RentalPatch {
        let address = AddressPatch {
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
        };

        RentalPatch {
            name: self.name.clone(),
            address: (!address.is_empty()).then_some(address),
            tenant_name: self.tenant_name.clone(),
            tenant_phone_number: self.tenant_phone.clone(),
            rent_per_month: self.rent,
            mortgage_per_month: self.mortgage,
            maintenance_per_month: self.maintenance,
            misc_per_month: self.misc,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DeleteArgs {
    /// Name or street of the rental to delete
    pub(crate) key: String,
    #[arg(long, value_enum, default_value_t = LookupArg::Name)]
    pub(crate) by: LookupArg,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Case-sensitive substring to look for
    pub(crate) term: String,
    #[arg(long, value_enum, default_value_t = LookupArg::Name)]
    pub(crate) by: LookupArg,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Write CSV to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_list<S: KeyValueStore>(
    service: &mut RentalService<S>,
    args: ListArgs,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if let Some(sort) = args.sort {
        service.sort(sort.into())?;
    }

    if service.manager().is_empty() {
        writeln!(out, "No rentals.")?;
        return Ok(());
    }
    for rental in service.manager().iter() {
        write_row(out, &RentalView::from(rental))?;
    }
    Ok(())
}

pub(crate) fn run_add<S: KeyValueStore>(
    service: &mut RentalService<S>,
    args: AddArgs,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let rental = args.into_rental()?;
    let view = RentalView::from(&rental);
    service.add(rental)?;

    writeln!(out, "Added rental:")?;
    write_row(out, &view)?;
    Ok(())
}

pub(crate) fn run_edit<S: KeyValueStore>(
    service: &mut RentalService<S>,
    args: EditArgs,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let patch = args.patch();
    service.edit(&args.key, &patch, args.by.into())?;

    writeln!(out, "Updated rental '{}'.", args.key)?;
    Ok(())
}

pub(crate) fn run_delete<S: KeyValueStore>(
    service: &mut RentalService<S>,
    args: DeleteArgs,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let removed = service.delete(&args.key, args.by.into())?;
    writeln!(out, "Deleted rental '{}'.", removed.name)?;
    Ok(())
}

pub(crate) fn run_search<S: KeyValueStore>(
    service: &RentalService<S>,
    args: SearchArgs,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let mut matches = 0;
    for rental in service.search(&args.term, args.by.into()) {
        write_row(out, &RentalView::from(rental))?;
        matches += 1;
    }
    if matches == 0 {
        writeln!(out, "No rentals match '{}'.", args.term)?;
    }
    Ok(())
}

pub(crate) fn run_summary<S: KeyValueStore>(
    service: &RentalService<S>,
    out: &mut impl Write,
) -> Result<(), AppError> {
    write_summary(out, &service.summary())?;
    Ok(())
}

pub(crate) fn run_export<S: KeyValueStore>(
    service: &RentalService<S>,
    args: ExportArgs,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            export::write_csv(service.manager().iter(), file)?;
            writeln!(
                out,
                "Exported {} rentals to {}.",
                service.manager().len(),
                path.display()
            )?;
        }
        None => export::write_csv(service.manager().iter(), out)?,
    }
    Ok(())
}
