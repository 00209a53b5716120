use chacoin::config::ChainConfig;
use chacoin::core::{Block, Chain, Parent, Transaction};
use chacoin::crypto::keys::KeyPair;
use chacoin::wallet::Wallet;
use clap::Parser;

/// Fixed demo: two wallets trading on a freshly seeded chain, followed by a
/// full audit.
#[derive(Parser, Debug)]
#[command(name = "chacoin", about = "A minimal single-process UTXO ledger")]
struct Args {
    /// Leading zero hex characters required of a block hash
    #[arg(long, default_value_t = 3)]
    difficulty: u32,

    /// Smallest input sum a transaction may spend
    #[arg(long, default_value_t = 1)]
    minimum: u64,

    /// Pretty-print the final chain as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    let config = ChainConfig::with_params(args.difficulty, args.minimum);

    let coinbase = KeyPair::new()?;
    let alice = Wallet::new()?;
    let bob = Wallet::new()?;

    println!("Creating and mining the genesis block...");
    let genesis_tx = Transaction::genesis(&coinbase, alice.public_key().clone(), 100)?;
    let mut chain = Chain::new(config, genesis_tx)?;

    println!("Alice's balance is: {}", chain.balance(alice.public_key()));

    println!("\nAlice is sending 40 to Bob...");
    let mut block = Block::new(Parent::Block(chain.tip_hash()));
    match alice.send_funds(bob.public_key(), 40, chain.utxo_set()) {
        Ok(tx) => block.add_transaction(tx, chain.ledger_mut())?,
        Err(e) => println!("Transaction refused: {}", e),
    }
    chain.add_block(block)?;
    println!("Alice's balance is: {}", chain.balance(alice.public_key()));
    println!("Bob's balance is:   {}", chain.balance(bob.public_key()));

    println!("\nAlice is attempting to send 1000, more than she has...");
    let mut block = Block::new(Parent::Block(chain.tip_hash()));
    match alice.send_funds(bob.public_key(), 1000, chain.utxo_set()) {
        Ok(tx) => block.add_transaction(tx, chain.ledger_mut())?,
        Err(e) => println!("Transaction refused: {}", e),
    }
    chain.add_block(block)?;
    println!("Alice's balance is: {}", chain.balance(alice.public_key()));
    println!("Bob's balance is:   {}", chain.balance(bob.public_key()));

    println!("\nBob is sending 20 to Alice...");
    let mut block = Block::new(Parent::Block(chain.tip_hash()));
    match bob.send_funds(alice.public_key(), 20, chain.utxo_set()) {
        Ok(tx) => block.add_transaction(tx, chain.ledger_mut())?,
        Err(e) => println!("Transaction refused: {}", e),
    }
    chain.add_block(block)?;
    println!("Alice's balance is: {}", chain.balance(alice.public_key()));
    println!("Bob's balance is:   {}", chain.balance(bob.public_key()));

    println!("\nAuditing the chain...");
    match chain.validate() {
        Ok(()) => println!("Chain is valid."),
        Err(e) => println!("Chain is INVALID: {}", e),
    }

    if args.json {
        println!("\n{}", serde_json::to_string_pretty(chain.blocks())?);
    }

    Ok(())
}
