//! Subcommand handlers.

pub mod create;
pub mod verify;

use std::path::Path;

use paperwallet_wallet::wallet::Wallet;
use serde_json::Value;

use crate::output;
use crate::GlobalOpts;

/// Prints the wallet summary shared by `create` and `verify`.
fn report(title: &str, wallet: &Wallet, path: &Path, opts: &GlobalOpts) {
    if opts.silent {
        return;
    }

    let account = wallet.account();
    let mut fields = vec![
        ("wallet file", Value::String(path.display().to_string())),
        ("protocol", Value::String(wallet.protocol().to_string())),
        ("wallet app", Value::String(account.wallet().to_string())),
        ("address", Value::String(account.address().to_string())),
    ];
    if let Some(words) = wallet.mnemonic_words() {
        fields.push(("mnemonic", Value::String(words.join(" "))));
    }
    fields.push(("encrypted", Value::Bool(account.is_encrypted())));

    output::print_fields(title, &fields, opts.json);
}
