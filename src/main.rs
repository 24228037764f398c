use clap::Parser;
use fitment::config::{Command, ExtractArgs, FilterArgs};
use fitment::domain::ports::ProductStore;
use fitment::utils::error::{ErrorSeverity, FitmentError};
use fitment::utils::{logger, validation::Validate};
use fitment::{
    browse, BrowseOutcome, CatalogSession, CliConfig, CompatibilityCatalog, CompatibilityDraft,
    FitmentConfig, JsonProductStore, SelectedCompatibility,
};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.verbose());
    } else {
        logger::init_cli_logger(config.verbose());
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Extract(args) => run_extract(&config, args).await,
        Command::Filter(args) => run_filter(&config, args).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ fitment failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn read_input(input: Option<&str>) -> fitment::Result<String> {
    match input {
        Some(path) if path != "-" => Ok(tokio::fs::read_to_string(path).await?),
        _ => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}

fn product_store(config: &FitmentConfig) -> fitment::Result<JsonProductStore> {
    config
        .products
        .path
        .as_ref()
        .map(JsonProductStore::new)
        .ok_or_else(|| FitmentError::MissingConfigError {
            field: "products.path".to_string(),
        })
}

async fn run_extract(config: &FitmentConfig, args: &ExtractArgs) -> fitment::Result<()> {
    let text = read_input(args.input.as_deref()).await?;
    let provider = config.catalog_provider()?;
    let session = CatalogSession::load(&*provider).await;
    if !session.is_available() {
        eprintln!("⚠️ Compatibility data unavailable, no vehicles can be recognised");
    }

    let key_types = if args.key_types.is_empty() {
        config.default_key_types().to_vec()
    } else {
        args.key_types.clone()
    };

    let (draft, report) = match &args.product_id {
        Some(id) => {
            let store = product_store(config)?;
            let mut products = store.load_products().await?;
            let product = products
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| FitmentError::ProductNotFound { id: id.clone() })?;

            let mut draft = CompatibilityDraft::from_product(product);
            let report = draft.apply_supplier_text(&text, session.catalog());
            draft.save_into(product, &key_types);
            store.save_products(&products).await?;
            tracing::info!("✅ Product {} updated", id);
            (draft, report)
        }
        None => {
            let mut draft = CompatibilityDraft::new();
            let report = draft.apply_supplier_text(&text, session.catalog());
            (draft, report)
        }
    };

    let selected: Vec<SelectedCompatibility> = draft
        .entries()
        .iter()
        .map(|entry| SelectedCompatibility::from_entry(entry, &key_types))
        .collect();

    let output = serde_json::json!({
        "catalogAvailable": session.is_available(),
        "report": report,
        "selectedCompatibility": selected,
        "customFields": draft.custom_fields(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if session.is_available() && draft.entries().is_empty() {
        eprintln!("No compatible vehicles found in the input");
    }
    Ok(())
}

async fn run_filter(config: &FitmentConfig, args: &FilterArgs) -> fitment::Result<()> {
    let query = args.to_query()?;
    let store = product_store(config)?;
    let products = store.load_products().await?;

    let session = match config.catalog_provider() {
        Ok(provider) => CatalogSession::load(&*provider).await,
        Err(FitmentError::MissingConfigError { .. }) => {
            tracing::debug!("No catalog configured, filtering on stored compatibility only");
            CatalogSession::from_catalog(CompatibilityCatalog::empty())
        }
        Err(e) => return Err(e),
    };

    match browse(&session, &query, &products) {
        BrowseOutcome::Matches(found) => {
            for product in found {
                println!("{}\t{}", product.id, product.name);
            }
            Ok(())
        }
        BrowseOutcome::NoMatches => {
            println!("No compatible products found");
            Ok(())
        }
        BrowseOutcome::MissingMake => Err(FitmentError::InvalidQuery {
            message: "a make is required to filter products".to_string(),
        }),
        BrowseOutcome::CatalogUnavailable { reason } => {
            Err(FitmentError::CatalogUnavailable { reason })
        }
    }
}
