//! The `bloomscope levels` command.

use anyhow::Result;
use comfy_table::Table;
use serde_json::json;

use bloomscope_core::taxonomy::all_levels;

pub fn execute(json: bool) -> Result<()> {
    if json {
        let levels: Vec<_> = all_levels()
            .iter()
            .map(|&level| {
                let set = level.keywords();
                json!({
                    "level": level.label(),
                    "name": level.name(),
                    "description": level.description(),
                    "color": level.color(),
                    "keywords": set.keywords,
                    "strong_indicators": set.strong_indicators,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&levels)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Level",
        "Description",
        "Color",
        "Keywords",
        "Strong indicators",
    ]);
    for &level in all_levels() {
        let set = level.keywords();
        table.add_row(vec![
            level.label().to_string(),
            level.description().to_string(),
            level.color().to_string(),
            set.keywords.len().to_string(),
            set.strong_indicators.join(", "),
        ]);
    }
    println!("{table}");

    Ok(())
}
