use log::{error, info};
use std::process::ExitCode;

use pow_ledger::config::Config;
use pow_ledger::view::ChainSummary;
use pow_ledger::{Blockchain, Identity, Result};

fn run(cfg: &Config) -> Result<bool> {
    let mut chain = Blockchain::new(cfg.difficulty);
    let alice = Identity::generate()?;
    let bob = Identity::generate()?;
    info!("alice={} bob={}", alice.public_key(), bob.public_key());

    for i in 0..cfg.demo_blocks {
        let (from, to) = if i % 2 == 0 { (&alice, &bob) } else { (&bob, &alice) };
        let block = chain.new_block();
        block.append_transaction(from, to.public_key(), format!("message #{i}"))?;
        let hash = block.mine();
        info!("mined block #{i} nonce={} hash={hash}", block.nonce());
    }

    let summary = ChainSummary::from(&chain);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(summary.valid)
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "⛓️ Building a {}-block ledger at difficulty {}",
        cfg.demo_blocks, cfg.difficulty
    );

    match run(&cfg) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("chain failed validation");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
