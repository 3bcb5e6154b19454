#![warn(clippy::uninlined_format_args)]

use std::{borrow::Cow, env, fs, process};

use tabsplit_application::{FinalizedSplit, SplitFinalizer, SplitRequest};
use tabsplit_i18n as i18n;

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let Some(path) = env::args().nth(1) else {
        return Err("Usage: tabsplit <request.json>".into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let request: SplitRequest = serde_json::from_str(&source)
        .map_err(|err| format!("Failed to parse '{path}': {err}"))?;

    let finalized = SplitFinalizer::finalize(&request)
        .map_err(|err| format!("{}: {err}", i18n::FINALIZE_FAILED))?;

    print_split(&finalized);
    Ok(())
}

fn print_split(finalized: &FinalizedSplit) {
    if let Some(warning) = &finalized.warning {
        println!("{}", i18n::calculation_warning_detail(warning.drift));
        println!();
    }

    println!("{}", i18n::SPLIT_HEADER);
    let name_width = finalized
        .allocation
        .entries()
        .iter()
        .map(|(member, _)| member.as_str().len())
        .max()
        .unwrap_or(0)
        .max(i18n::MEMBER.len());

    println!("{:name_width$}  {}", i18n::MEMBER, i18n::OWED);
    for (member, amount) in finalized.allocation.entries() {
        println!("{member:name_width$}  {amount}");
    }
    println!(
        "{:name_width$}  {}",
        i18n::TOTAL,
        finalized.allocation.total()
    );

    println!();
    println!("{}", i18n::LEDGER_SHARES_HEADER);
    for share in &finalized.payload.shares {
        println!(
            "{:name_width$}  {}: {}  {}: {}",
            share.user_id,
            i18n::PAID,
            share.paid_share,
            i18n::OWED,
            share.owed_share
        );
    }
}
