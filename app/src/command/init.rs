use hanzi_config::Config;

/// Strategy for initializing the configuration.
///
/// Creates the default configuration file at `~/hanzi/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Install the AnkiConnect add-on and keep Anki running");
        println!("   2. Point embedding.model_path at a word2vec text table");
        println!("   3. Run 'hanzi run' to export the review set");
        println!();
        println!("🔧 Configuration options:");
        println!("   - review.deck: limit the search to one deck (e.g. \"Chinese::HanziCraft Review\")");
        println!("   - review.primary_field / alternate_field: note fields holding the word forms");
        println!("   - embedding.limit: read only the first N rows of the table");
        println!("   - anki.timeout_secs / retry_delays_secs: request timeout and retry schedule");
        println!();
        Ok(())
    }
}
