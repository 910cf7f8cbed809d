use anyhow::Context;
use clap::Parser;
use date_sorter::utils::{logger, validation::Validate};
use date_sorter::{app, CliConfig, SorterError};

fn fail(e: &SorterError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };

    logger::init_cli_logger(settings.verbose, settings.log_format);
    tracing::info!("Starting date-sorter");
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        fail(&e);
    }

    let root = {
        let stdin = std::io::stdin();
        match settings.root_or_prompt(stdin.lock(), std::io::stdout()) {
            Ok(root) => root,
            Err(e) => fail(&e),
        }
    };

    let summary = match app::run(&settings, &root) {
        Ok(summary) => summary,
        Err(e) => fail(&e),
    };

    if settings.json {
        let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
        println!("{}", json);
    } else {
        println!(
            "✅ {} moved, {} already in place, {} hidden skipped, {} failed{}",
            summary.moved,
            summary.already_in_place,
            summary.skipped_hidden,
            summary.failed,
            if summary.dry_run { " (dry run)" } else { "" }
        );
    }

    Ok(())
}
