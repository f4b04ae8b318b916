use rollcall_core::error::RollcallError;
use rollcall_core::export::write_sheets;
use rollcall_core::ingest::read_workbook;
use std::path::PathBuf;

pub fn run(input_file: PathBuf, out: PathBuf) -> Result<(), RollcallError> {
    let workbook = read_workbook(&input_file)?;
    let masked = rollcall_core::mask_workbook(&workbook);
    write_sheets(&masked, &out)?;
    eprintln!("Masked {} sheet(s), written to {}", masked.len(), out.display());
    Ok(())
}
