use rollcall_core::error::RollcallError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), RollcallError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
