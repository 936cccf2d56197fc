//! The `bloomscope init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("bloomscope.toml").exists() {
        println!("bloomscope.toml already exists, skipping.");
    } else {
        std::fs::write("bloomscope.toml", SAMPLE_CONFIG)?;
        println!("Created bloomscope.toml");
    }

    std::fs::create_dir_all("papers")?;
    let sample_path = std::path::Path::new("papers/sample.txt");
    if sample_path.exists() {
        println!("papers/sample.txt already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_PAPER)?;
        println!("Created papers/sample.txt");
    }

    println!("\nNext steps:");
    println!("  1. Run: bloomscope classify \"Explain the water cycle.\"");
    println!("  2. Run: bloomscope analyze --input papers --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# bloomscope configuration

parallelism = 4
output_dir = "./bloomscope-results"
formats = ["json", "html"]
max_document_bytes = 16777216
allowed_formats = ["txt", "csv", "pdf", "docx", "doc"]
"#;

const SAMPLE_PAPER: &str = "Biology midterm

1. Define osmosis.
2. Explain the water cycle in your own words.
3. Solve for x in 2x + 4 = 10.
4. Compare and contrast mitosis and meiosis.
5. Evaluate the argument for renewable energy.
6. Design a new product for sustainable living.
7. Explain and analyze the poem.
";
