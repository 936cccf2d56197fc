//! The `bloomscope classify` command.

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use bloomscope_core::model::QuestionResult;
use bloomscope_core::scorer::score_question;
use bloomscope_core::taxonomy::all_levels;

pub fn execute(question: &str, json: bool) -> Result<()> {
    let classification = bloomscope_core::classify_single(question)?;
    let question = question.trim();
    let result = QuestionResult::new(
        1,
        question.to_string(),
        classification,
        score_question(question),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Question:    {}", result.question);
    println!("Level:       {}", result.level.label());
    println!("Display:     {}", result.level_display);
    println!("Description: {}", result.description);
    println!("Color:       {}", result.color);
    if result.is_multi_level {
        println!("Multi-level: yes");
    }

    let mut table = Table::new();
    table.set_header(vec!["Level", "Score"]);
    let selected = result.classification.levels();
    for &level in all_levels() {
        let score = result.scores.get(level);
        let mut cell = Cell::new(level.label());
        if selected.iter().any(|m| m.level == level) {
            cell = cell.fg(Color::Green);
        }
        table.add_row(vec![cell, Cell::new(score)]);
    }
    println!("\n{table}");

    Ok(())
}
