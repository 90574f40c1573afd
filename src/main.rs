//! scored demo
//!
//! Builds a ledger with a small plugin pipeline, plays a few rounds of
//! awards through the game adapter and logs the results.

use anyhow::{Context as _, Result};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scored::{
    adapter::GameAdapter,
    core::{format_score, map_of},
    ClampPlugin, EngineConfig, FlatBonusPlugin, MultiplierPlugin, RuleArgs, ScoringEngine,
    VERSION,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("scored v{}", VERSION);

    let config = EngineConfig::from_env();
    info!("Update policy: {}", config.update_policy);

    demo_round(config)
}

/// Demo function to exercise the ledger.
fn demo_round(config: EngineConfig) -> Result<()> {
    info!("=== Starting Demo Round ===");

    let mut engine = ScoringEngine::with_config(config);
    engine.register_plugin(ClampPlugin::from_config(&map_of([("min", -50), ("max", 500)]))?);
    engine.register_plugin(FlatBonusPlugin::new(5));
    engine.register_plugin(MultiplierPlugin::from_config(&map_of([("factor", 2)]))?);

    engine.configure_rule("combo_bonus", |args| {
        let points = args.i64("points")?;
        let combo = args.i64("combo")?;
        Ok(json!(points * combo.max(1)))
    })?;

    let players = ["alice", "bob", "carol"];
    for player in players {
        engine.initialize_score(player, 0);
    }

    let awards: [(&str, i64); 6] = [
        ("alice", 50),
        ("bob", 120),
        ("carol", 900),
        ("alice", -80),
        ("bob", 10),
        ("carol", 1),
    ];

    {
        let mut adapter = GameAdapter::new(&mut engine);
        for (player, points) in awards {
            let total = adapter
                .award_points(player, points, None)
                .with_context(|| format!("award to {} failed", player))?;
            info!("{} {:+} -> {}", player, points, total);
        }
    }

    let bonus = engine.apply_rule("combo_bonus", &RuleArgs::new().with("points", 10).with("combo", 3))?;
    info!("Rule combo_bonus(points=10, combo=3) = {}", bonus);

    // Print final results
    info!("=== Round Results ===");
    for (player, score) in engine.get_scores() {
        info!("{}: {}", player, format_score(score as f64, 0));
    }

    Ok(())
}
