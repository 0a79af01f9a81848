use anyhow::Result;
use sitegraft::pass::{describe_failure, post_build, summarize};

use super::{ConfigArgs, describe_base_path, load_config};

/// Run the post-build pass over the generated site
pub fn run(args: ConfigArgs, strict: bool) -> Result<()> {
    let config = load_config(&args)?;

    println!("🔨 Post-processing site...");
    println!("   Docs:      {}", config.site.docs_dir.display());
    println!("   Site:      {}", config.site.site_dir.display());
    println!("   Base path: {}", describe_base_path(&config));
    println!();

    if !config.site.site_dir.is_dir() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun the site generator first",
            config.site.site_dir.display()
        );
    }

    let report = post_build(&config);

    println!();
    for line in summarize(&report) {
        println!("   ✓ {}", line);
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!();
        for item in &failures {
            eprintln!("   ⚠ {}", describe_failure(item));
        }
        if strict {
            anyhow::bail!("{} item(s) failed during the post-build pass", failures.len());
        }
    }

    println!();
    println!("✅ Post-build pass complete!");
    println!("   Output: {}", config.site.site_dir.display());
    println!();
    println!("To test locally:");
    println!("   sitegraft preview --config {}", args.config.display());
    println!();

    Ok(())
}
