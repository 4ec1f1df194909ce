//! `paperwallet create`: derive a new account and write its wallet file.

use std::path::PathBuf;

use clap::Args;
use paperwallet_crypto::entropy::OsEntropy;
use paperwallet_types::{Network, ProtocolKind, Result};
use paperwallet_wallet::json_config::JsonConfig;
use paperwallet_wallet::registry::ProtocolRegistry;
use paperwallet_wallet::wallet::create_wallet;
use paperwallet_wallet::wallet_io::save_wallet;

use crate::GlobalOpts;

#[derive(Args)]
pub struct CreateArgs {
    /// Protocol, e.g. Ethereum (default: from config, else Bitcoin).
    #[arg(short, long)]
    protocol: Option<String>,

    /// Network: Production, Test or Local (default: from config, else Production).
    #[arg(short, long)]
    network: Option<String>,

    /// Target directory for the wallet file (default: from config, else ".").
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Mnemonic sentence (default: generate a new one).
    #[arg(short, long)]
    mnemonic: Option<String>,

    /// Pass phrase for the wallet file. An empty value leaves the secret
    /// unencrypted.
    #[arg(long = "pass-phrase", value_name = "PASS_PHRASE")]
    pass_phrase: String,

    /// Target wallet app, e.g. MetaMask (default: protocol default).
    #[arg(short, long)]
    wallet: Option<String>,
}

pub fn run(args: CreateArgs, opts: &GlobalOpts) -> std::result::Result<(), String> {
    create(args, opts).map_err(|e| e.to_string())
}

fn create(args: CreateArgs, opts: &GlobalOpts) -> Result<()> {
    let kind = match args.protocol.as_deref() {
        Some(name) => name.parse::<ProtocolKind>()?,
        None => opts.config.default_protocol,
    };
    let network = match args.network.as_deref() {
        Some(name) => name.parse::<Network>()?,
        None => opts.config.default_network,
    };
    let protocol = ProtocolRegistry::resolve(kind, network);

    let words: Option<Vec<String>> = args.mnemonic.as_deref().map(split_sentence);
    let wallet_app = args.wallet.as_deref().filter(|w| !w.trim().is_empty());
    let json_config = JsonConfig::from_app_config(&opts.config);

    let wallet = create_wallet(
        protocol,
        words.as_deref(),
        &args.pass_phrase,
        wallet_app,
        opts.config.entropy_bits,
        &json_config,
        &mut OsEntropy,
    )?;

    let dir = args
        .directory
        .unwrap_or_else(|| PathBuf::from(&opts.config.output_dir));
    let path = save_wallet(&dir, &wallet, &json_config)?;

    super::report("wallet created", &wallet, &path, opts);
    Ok(())
}

/// Splits a sentence on whitespace into lowercase words.
fn split_sentence(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_split_normalizes() {
        assert_eq!(
            split_sentence("  Expose dwarf\tcoyote  "),
            vec!["expose", "dwarf", "coyote"]
        );
    }

    #[test]
    fn blank_sentence_is_empty() {
        assert!(split_sentence("   ").is_empty());
    }
}
