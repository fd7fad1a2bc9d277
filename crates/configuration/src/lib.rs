use crate::error::ConfigError;
use crate::settings::Config;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Benchmark, Config, Data, ScreenerDefaults, Server};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, and returns it. A missing file is not an error: every section
/// carries defaults, so the application can start from an empty directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml").required(false))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_cover_every_section() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.data.years_back, 26);
        assert_eq!(config.benchmark.tickers, vec!["SPY", "QQQ", "DIA"]);
        assert_eq!(config.screener.min_win_rate, 60);
        assert_eq!(config.screener.min_avg_per_month, dec!(0.5));
        assert_eq!(config.screener.min_years, 8);
        assert_eq!(config.screener.limit, 50);
    }

    #[test]
    fn partial_files_keep_defaults_for_omitted_sections() {
        let raw = r#"
            [server]
            port = 8080

            [benchmark]
            tickers = ["VTI"]
        "#;
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.benchmark.tickers, vec!["VTI"]);
        assert_eq!(config.data.years_back, 26);
    }
}
