//! Fallbacks fed from the environment when an option never appears.

use anyhow::{Result, ensure};
use argfold::OptionParser;
use test_helpers::env;

#[derive(Debug, Default, PartialEq)]
struct Server {
    port: u16,
    host: String,
}

/// Parser whose port falls back to `port_var`. Each test reads its own
/// variable so parallel tests never observe each other's values.
fn server(port_var: &'static str) -> OptionParser<Server> {
    let mut parser = OptionParser::new("serve");
    parser
        .opt::<u16>("port")
        .with_fallback(move || {
            std::env::var(port_var)
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(8080)
        })
        .validate(|port| {
            if *port >= 1024 {
                Ok(())
            } else {
                Err(format!("port {port} is privileged"))
            }
        })
        .action(|port, s| Server { port, ..s });
    parser
        .opt::<String>("host")
        .with_fallback(|| "localhost".to_owned())
        .action(|host, s| Server { host, ..s });
    parser
}

#[test]
fn fallback_reads_environment() -> Result<()> {
    const PORT_VAR: &str = "ARGFOLD_TEST_PORT_ENV";
    let parser = server(PORT_VAR);
    let _guard = env::set_var(PORT_VAR, "9000");
    let config = parser.try_parse(Vec::<String>::new(), Server::default())?;
    ensure!(
        config
            == Server {
                port: 9000,
                host: "localhost".into(),
            },
        "unexpected {config:?}"
    );
    Ok(())
}

#[test]
fn fallback_defaults_without_environment() -> Result<()> {
    const PORT_VAR: &str = "ARGFOLD_TEST_PORT_UNSET";
    let parser = server(PORT_VAR);
    let _guard = env::remove_var(PORT_VAR);
    let config = parser.try_parse(["--host", "example.org"], Server::default())?;
    ensure!(config.port == 8080, "port {}", config.port);
    ensure!(config.host == "example.org", "host {}", config.host);
    Ok(())
}

#[test]
fn explicit_values_win() -> Result<()> {
    const PORT_VAR: &str = "ARGFOLD_TEST_PORT_EXPLICIT";
    let parser = server(PORT_VAR);
    let _guard = env::set_var(PORT_VAR, "9000");
    let config = parser.try_parse(["--port", "4040"], Server::default())?;
    ensure!(config.port == 4040, "port {}", config.port);
    Ok(())
}

#[test]
fn fallback_values_are_validated() -> Result<()> {
    const PORT_VAR: &str = "ARGFOLD_TEST_PORT_PRIVILEGED";
    let parser = server(PORT_VAR);
    let _guard = env::set_var(PORT_VAR, "80");
    let messages = parser
        .try_parse(Vec::<String>::new(), Server::default())
        .err()
        .map(|errors| errors.messages())
        .unwrap_or_default();
    ensure!(
        messages == ["port 80 is privileged"],
        "unexpected {messages:?}"
    );
    Ok(())
}
