//! Init command: writes a starter configuration file.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# archguard configuration
#
# tool: foundational packages with no internal imports of their own.
# db: persistence packages, may import tool and other db packages.
# god: packages exempt from the role rules entirely (default: ["main"]).
tool = []
db = []
# god = ["main"]

# noGod = true

# Maximum package size (statements + declarations); 0 uses the default.
size = 2048

# [allowOnlyIn]
# "db/secrets" = ["cmd/main"]

# [allowAdditionally]
# "domain/orders" = ["domain/billing"]
"#;

/// Runs the `init` subcommand.
///
/// # Errors
///
/// Returns an error if a config file already exists and `force` is false,
/// or if writing the file fails.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("archguard.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created archguard.toml");
    println!("\nNext steps:");
    println!("  1. Edit archguard.toml to declare tool/db/god packages");
    println!("  2. Run: archguard check");

    Ok(())
}
