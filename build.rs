use std::env;
use std::fs;
use std::path::Path;

/// Variables que lee `AppConfig::from_env` vía `option_env!`
const CONFIG_KEYS: [&str; 5] = [
    "AUTH_BASE_URL",
    "WORKSHOP_BASE_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "LOGOUT_ON_UNAUTHORIZED",
];

fn main() {
    // Sin .env no se avisa: config.rs ya trae los defaults de producción
    let env_file = Path::new(".env");
    if let Ok(contents) = fs::read_to_string(env_file) {
        for (key, value) in contents.lines().filter_map(parse_line) {
            if !CONFIG_KEYS.iter().any(|k| *k == key) {
                continue;
            }
            // El entorno real manda sobre .env (CI, deploy)
            if env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value);
            }
        }
    }

    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=build.rs");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}

/// `KEY=VALUE`, con `export ` opcional y comillas simples o dobles
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    Some((key.trim(), value))
}
