//! `qmakeflags quirks` command

use anyhow::Result;

use super::{load_current_config, parse_target_os};
use crate::cli::QuirksArgs;
use qmakeflags::flags::QuirkRule;

pub fn execute(args: QuirksArgs) -> Result<()> {
    let config = load_current_config()?;
    let quirks = config.quirk_set();

    if args.all {
        for rule in quirks.rules() {
            print_rule(rule);
        }
        return Ok(());
    }

    let target = match args.target_os {
        Some(ref os) => parse_target_os(os)?,
        None => config.target_os(),
    };

    let active = quirks.for_target(target);
    if active.is_empty() {
        println!("No quirk rules apply to `{}`", target);
        return Ok(());
    }

    println!("# Quirk rules for `{}` (mkspec {}):", target, target.qmake_spec());
    for rule in active.rules() {
        print_rule(rule);
    }

    Ok(())
}

fn print_rule(rule: &QuirkRule) {
    let platforms = if rule.platforms.is_empty() {
        "all".to_string()
    } else {
        rule.platforms
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!(
        "  {}: {:?} -> {:?}    # platforms: {}",
        rule.name, rule.pattern, rule.replacement, platforms
    );
}
