use unirank_core::catalog::RANK_TYPES;

pub fn list() -> anyhow::Result<()> {
    println!("Available rank types:\n");
    for (i, rt) in RANK_TYPES.iter().enumerate() {
        let note = if rt.has_schema() {
            ""
        } else {
            "  (no fixed columns, names are inferred)"
        };
        println!("  {}. {:<8} {}{}", i + 1, rt.short_code, rt.display_name, note);
    }
    Ok(())
}
