// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates dropdeploy.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, droplet: Option<u64>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&Config::default(), droplet);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config, droplet: Option<u64>) -> String {
    let droplet_line = match droplet.filter(|d| *d != 0) {
        Some(id) => format!("droplet: {id}"),
        None => "# droplet: 123456789".to_string(),
    };

    format!(
        r#"# Target droplet id (overridden by --droplet or DO_DROPLET_ID)
{droplet_line}
api_url: {api_url}
endpoint: {endpoint}
runtime: {runtime}
compose:
  command: {command}
  # file: docker-compose.yml
  # project_dir: /srv/app
  # include_stopped: false
"#,
        api_url = config.api_url,
        endpoint = config.endpoint,
        runtime = config.runtime,
        command = config.compose.command.join(" "),
    )
}
