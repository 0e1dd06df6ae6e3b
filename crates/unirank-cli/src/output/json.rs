use unirank_core::model::TypedTable;

pub fn print(table: &TypedTable) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(table)?;
    println!("{json}");
    Ok(())
}
