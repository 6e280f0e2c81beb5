//! Models command handler.

use anyhow::Result;
use mindbridge_core::{ModelRef, ProviderRegistry};

use crate::bootstrap::CliContext;

/// Every routable identifier, grouped by provider in registry order.
pub fn model_ids(registry: &ProviderRegistry) -> Vec<String> {
    registry
        .list_all_models()
        .iter()
        .flat_map(|(provider, models)| {
            models
                .iter()
                .map(move |model| ModelRef::namespaced(provider, model))
        })
        .collect()
}

/// Print the routable model identifiers.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let ids = model_ids(ctx.registry());
    if ids.is_empty() {
        println!("No providers configured. Set OPENAI_API_KEY, ANTHROPIC_API_KEY or GOOGLE_API_KEY.");
        return Ok(());
    }

    for id in ids {
        println!("{id}");
    }
    Ok(())
}
