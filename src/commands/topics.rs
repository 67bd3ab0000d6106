use anyhow::Result;

use playtrend::config::Config;

/// List the topic table in effect and its patterns
pub fn topics(config: &Config) -> Result<()> {
    let definitions = config.topic_definitions();

    println!("Topic patterns ({} topics)", definitions.len());
    println!("==========================");
    for definition in &definitions {
        println!("\n{}", definition.name);
        for pattern in &definition.patterns {
            println!("  - {pattern}");
        }
    }

    // surfaces bad patterns before a run does
    config.classifier()?;
    Ok(())
}
