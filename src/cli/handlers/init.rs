use std::error::Error;
use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;

pub fn cmd_init(data_dir: &Path, args: InitArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(data_dir)
        .map_err(|e| format!("could not create {}: {}", data_dir.display(), e))?;

    let config_path = config_io::config_path(data_dir);
    if config_path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )
        .into());
    }

    let written = config_io::write_config_template(data_dir)?;
    println!("initialized {}", data_dir.display());
    println!("  config: {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_dir_and_config() {
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("nested/wt");
        cmd_init(&data_dir, InitArgs { force: false }).unwrap();
        assert!(data_dir.join("config.toml").exists());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "# mine\n").unwrap();

        assert!(cmd_init(tmp.path(), InitArgs { force: false }).is_err());
        assert_eq!(
            fs::read_to_string(tmp.path().join("config.toml")).unwrap(),
            "# mine\n"
        );

        cmd_init(tmp.path(), InitArgs { force: true }).unwrap();
        assert_eq!(
            fs::read_to_string(tmp.path().join("config.toml")).unwrap(),
            config_io::CONFIG_TEMPLATE
        );
    }
}
