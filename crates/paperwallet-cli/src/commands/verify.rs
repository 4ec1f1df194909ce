//! `paperwallet verify`: restore a wallet file and check its address.

use std::path::PathBuf;

use clap::Args;
use paperwallet_wallet::json_config::JsonConfig;
use paperwallet_wallet::wallet_io::restore_from_file;

use crate::GlobalOpts;

#[derive(Args)]
pub struct VerifyArgs {
    /// Wallet file to verify.
    file: PathBuf,

    /// Pass phrase the wallet file was created with.
    #[arg(long = "pass-phrase", value_name = "PASS_PHRASE")]
    pass_phrase: String,
}

pub fn run(args: VerifyArgs, opts: &GlobalOpts) -> std::result::Result<(), String> {
    let config = JsonConfig::from_app_config(&opts.config);
    let wallet =
        restore_from_file(&args.file, &args.pass_phrase, &config).map_err(|e| e.to_string())?;

    super::report("wallet verified", &wallet, &args.file, opts);
    Ok(())
}
