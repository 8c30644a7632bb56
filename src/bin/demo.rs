//! Globalization - Demo CLI
//!
//! Loads a bundle described by a TOML config, walks through the given
//! locales and prints the resolved translations of each as JSON.
//!
//! Usage: globalization-demo <config.toml> [locale...]

use anyhow::{bail, Context};
use std::collections::BTreeMap;

use globalization::{Lang, LangConfig, Locale};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next() else {
        bail!("usage: globalization-demo <config.toml> [locale...]");
    };
    let locales: Vec<Locale> = args.map(Locale::from).collect();

    let config = LangConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path))?;
    let mut lang = Lang::from_config(&config)
        .with_context(|| format!("loading bundle '{}'", config.bundle))?;

    lang.set_sweeper(|lang| {
        log::info!(
            "Sweeping {} cached locales, keeping {}",
            lang.fast_switch_size(),
            lang.locale()
        );
        lang.reset();
    });

    println!("==============================================");
    println!("   Globalization - Demo CLI");
    println!("==============================================\n");
    println!("  Bundle:    {}", lang.bundle());
    println!("  Directory: {}", lang.bundle_dir().display());
    println!("  Threshold: {}\n", lang.sweeper_threshold());

    print_translations(&lang)?;

    for locale in locales {
        if let Err(e) = lang.set_locale(locale.clone()) {
            eprintln!("  Skipping {}: {}\n", locale, e);
            continue;
        }
        print_translations(&lang)?;
    }

    let mut cached: Vec<String> = lang
        .fast_switch_locales()
        .iter()
        .map(Locale::to_string)
        .collect();
    cached.sort();
    println!("  Cached locales: {}", cached.join(", "));

    Ok(())
}

fn print_translations(lang: &Lang) -> anyhow::Result<()> {
    let all: BTreeMap<String, String> = lang.get_all().into_iter().collect();
    println!("--- {} ---", lang.locale());
    println!("{}\n", serde_json::to_string_pretty(&all)?);
    Ok(())
}
